use core::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use thiserror::Error;

/// Contains the resolution of a display
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// Stored as `[width, height]` so the file stays a plain list of integer pairs.
impl Serialize for Resolution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_tuple(2)?;
        state.serialize_element(&self.width)?;
        state.serialize_element(&self.height)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Width,
            Height,
        }

        struct ResolutionVisitor;

        impl<'de> Visitor<'de> for ResolutionVisitor {
            type Value = Resolution;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a [width, height] pair")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<Resolution, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let width = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let height = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(3, &self));
                }
                Ok(Resolution::new(width, height))
            }

            fn visit_map<V>(self, mut map: V) -> Result<Resolution, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut width = None;
                let mut height = None;
                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Width => {
                            if width.is_some() {
                                return Err(de::Error::duplicate_field("width"));
                            }
                            width = Some(map.next_value()?);
                        }
                        Field::Height => {
                            if height.is_some() {
                                return Err(de::Error::duplicate_field("height"));
                            }
                            height = Some(map.next_value()?);
                        }
                    }
                }
                let width = width.ok_or_else(|| de::Error::missing_field("width"))?;
                let height = height.ok_or_else(|| de::Error::missing_field("height"))?;
                Ok(Resolution::new(width, height))
            }
        }

        deserializer.deserialize_any(ResolutionVisitor)
    }
}

/// Errors that occur while parsing a resolution from a string
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseResolutionError {
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("First integer missing")]
    FirstPart,
    #[error("Second integer missing. Expected format: <width>x<height>")]
    SecondPart,
    #[error("Unexpected trailing part. Expected format: <width>x<height>")]
    TrailingPart,
    #[error("Width and height must be greater than zero")]
    Zero,
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let mut parts = lowered.split('x').map(str::trim);

        let width = match parts.next() {
            Some(part) if !part.is_empty() => part.parse::<u32>()?,
            _ => return Err(ParseResolutionError::FirstPart),
        };
        let height = match parts.next() {
            Some(part) if !part.is_empty() => part.parse::<u32>()?,
            _ => return Err(ParseResolutionError::SecondPart),
        };
        if parts.next().is_some() {
            return Err(ParseResolutionError::TrailingPart);
        }
        if width == 0 || height == 0 {
            return Err(ParseResolutionError::Zero);
        }

        Ok(Self::new(width, height))
    }
}
