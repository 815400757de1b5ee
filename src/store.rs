use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Resolution;

/// File name used when no other path is configured
pub const DEFAULT_FILE_NAME: &str = "resolutions.json";

/// Resolutions offered when there is no usable list on disk
pub const DEFAULT_RESOLUTIONS: [Resolution; 4] = [
    Resolution { width: 1920, height: 1080 },
    Resolution { width: 1680, height: 1050 },
    Resolution { width: 1440, height: 1080 },
    Resolution { width: 1280, height: 960 },
];

/// Error type for the store module
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize the resolution list")]
    Serialize(#[from] serde_json::Error),
}

/// Ordered list of preferred resolutions, numbered from 1 in the menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolutionList(Vec<Resolution>);

impl ResolutionList {
    pub fn new(resolutions: Vec<Resolution>) -> Self {
        Self(resolutions)
    }

    /// The built-in list of four common resolutions
    pub fn defaults() -> Self {
        Self(DEFAULT_RESOLUTIONS.to_vec())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, resolution: &Resolution) -> bool {
        self.0.contains(resolution)
    }

    /// Looks up an entry by its 1-based menu number.
    pub fn get_numbered(&self, number: usize) -> Option<Resolution> {
        number.checked_sub(1).and_then(|idx| self.0.get(idx)).copied()
    }

    /// Appends `resolution` unless an equal one is already listed.
    /// Returns whether the list changed.
    pub fn insert_unique(&mut self, resolution: Resolution) -> bool {
        if self.contains(&resolution) {
            return false;
        }
        self.0.push(resolution);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resolution> {
        self.0.iter()
    }
}

/// JSON file holding the preferred resolutions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionStore {
    path: PathBuf,
}

impl Default for ResolutionStore {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

impl ResolutionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored list. A missing, unreadable or malformed file yields
    /// the defaults.
    pub fn load(&self) -> ResolutionList {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!("Using default resolutions, cannot read {}: {}", self.path.display(), err);
                return ResolutionList::defaults();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(list) => list,
            Err(err) => {
                debug!("Using default resolutions, cannot parse {}: {}", self.path.display(), err);
                ResolutionList::defaults()
            }
        }
    }

    /// Overwrites the file with the whole list.
    pub fn save(&self, list: &ResolutionList) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(list)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved {} resolutions to {}", list.len(), self.path.display());
        Ok(())
    }
}
