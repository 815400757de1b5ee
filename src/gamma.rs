use core::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of levels per color channel
pub const RAMP_LEVELS: usize = 256;

/// Exponent applied per color channel, always finite and positive
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Gamma(f64);

impl Gamma {
    /// The linear curve
    pub const LINEAR: Gamma = Gamma(1.0);

    /// The curve picked by answering `0` at the gamma prompt
    pub const PRESET: Gamma = Gamma(1.5);

    pub fn new(value: f64) -> Result<Self, GammaError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(GammaError::OutOfRange(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that occur while reading a gamma exponent
#[derive(Error, Debug, PartialEq)]
pub enum GammaError {
    #[error("Error parsing float")]
    FloatError(#[from] std::num::ParseFloatError),
    #[error("Gamma must be a finite number greater than zero, got {0}")]
    OutOfRange(f64),
}

impl FromStr for Gamma {
    type Err = GammaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim().parse()?)
    }
}

/// Gamma table in the layout the OS expects: red, green then blue
#[repr(C)]
#[derive(Clone, PartialEq, Eq)]
pub struct GammaRamp {
    pub red: [u16; RAMP_LEVELS],
    pub green: [u16; RAMP_LEVELS],
    pub blue: [u16; RAMP_LEVELS],
}

impl GammaRamp {
    /// Builds a ramp with the same curve on all three channels
    pub fn new(gamma: Gamma) -> Self {
        let curve = curve(gamma);
        Self {
            red: curve,
            green: curve,
            blue: curve,
        }
    }
}

impl fmt::Debug for GammaRamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GammaRamp")
            .field("first", &self.red[0])
            .field("mid", &self.red[RAMP_LEVELS / 2])
            .field("last", &self.red[RAMP_LEVELS - 1])
            .finish()
    }
}

/// Output level for each of the 256 input levels: `(i / 255) ^ (1 / gamma)`
/// scaled to the full `u16` range, rounded half up.
pub fn curve(gamma: Gamma) -> [u16; RAMP_LEVELS] {
    let exponent = 1.0 / gamma.value();
    let max_input = (RAMP_LEVELS - 1) as f64;
    let max_output = f64::from(u16::MAX);

    let mut levels = [0u16; RAMP_LEVELS];
    for (i, level) in levels.iter_mut().enumerate() {
        let scaled = (i as f64 / max_input).powf(exponent) * max_output + 0.5;
        *level = scaled.floor().clamp(0.0, max_output) as u16;
    }
    levels
}
