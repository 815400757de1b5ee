use thiserror::Error;

use crate::{GammaRamp, Resolution};

/// Error type for the display module
#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("Display control is only available on Windows")]
    Unsupported,
    #[error("Could not acquire a device context for the screen")]
    NoDeviceContext,
    #[error("Apply failed, returned flags: {0}")]
    ApplyFailed(String),
    #[error("The display rejected the gamma ramp")]
    GammaRejected,
}

pub type DisplayResult<T = ()> = std::result::Result<T, DisplayError>;

/// The three display calls a session needs.
pub trait DisplayBackend {
    /// Pixel size of the primary display right now.
    fn current_resolution(&self) -> Resolution;

    /// Requests a mode change touching only width and height.
    fn apply_resolution(&mut self, resolution: Resolution) -> DisplayResult;

    /// Installs `ramp` as the active gamma table.
    fn set_gamma_ramp(&mut self, ramp: &GammaRamp) -> DisplayResult;
}

/// Picks the mode to apply. Re-selecting the active resolution switches to
/// `fallback` instead.
pub fn effective_target(current: Resolution, selected: Resolution, fallback: Resolution) -> Resolution {
    if selected == current {
        fallback
    } else {
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_active_resolution_uses_fallback() {
        let current = Resolution::new(1440, 1080);
        let fallback = Resolution::new(1920, 1080);

        assert_eq!(effective_target(current, current, fallback), fallback);
    }

    #[test]
    fn other_selection_is_kept() {
        let current = Resolution::new(1920, 1080);
        let selected = Resolution::new(1280, 960);

        assert_eq!(
            effective_target(current, selected, Resolution::new(1920, 1080)),
            selected
        );
    }
}
