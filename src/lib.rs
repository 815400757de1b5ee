//! Switch the resolution and gamma ramp of the primary display on Windows.
//!
//! The interactive flow lives in [`SessionConfig::run`]; the OS calls sit behind
//! [`DisplayBackend`] so the flow can be driven without a real screen.

mod display;
mod gamma;
mod primary;
pub mod prompt;
mod session;
mod store;
mod types;

pub use display::*;
pub use gamma::*;
pub use primary::PrimaryDisplay;
pub use session::*;
pub use store::*;
pub use types::*;
