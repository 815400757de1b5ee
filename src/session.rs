use std::io::{BufRead, Write};

use log::{info, warn};

use crate::prompt::{prompt_gamma, select_resolution, Console, PromptResult};
use crate::{effective_target, DisplayBackend, Gamma, GammaRamp, Resolution, ResolutionStore};

/// Resolution applied when the user picks the one already active
pub const DEFAULT_FALLBACK: Resolution = Resolution { width: 1920, height: 1080 };

/// Everything a run needs besides the display and the console
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub store: ResolutionStore,
    pub fallback: Resolution,
    pub gamma_preset: Gamma,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store: ResolutionStore::default(),
            fallback: DEFAULT_FALLBACK,
            gamma_preset: Gamma::PRESET,
        }
    }
}

/// What a completed run did
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub applied: Resolution,
    pub gamma: Option<Gamma>,
}

impl SessionConfig {
    /// Runs the whole interaction once: pick a resolution, apply it, then
    /// optionally adjust gamma. Invalid menu or custom input aborts with an
    /// error before anything is applied.
    pub fn run<D, R, W>(&self, display: &mut D, console: &mut Console<R, W>) -> PromptResult<Outcome>
    where
        D: DisplayBackend,
        R: BufRead,
        W: Write,
    {
        let current = display.current_resolution();
        let mut list = self.store.load();
        let selected = select_resolution(console, &mut list, current, &self.store)?;

        let target = effective_target(current, selected, self.fallback);
        if selected == current {
            console.say(format_args!(
                "The selected resolution {} is already active. Resetting to {}...",
                selected, target
            ))?;
        }

        console.say(format_args!("Changing resolution to {}...", target))?;
        match display.apply_resolution(target) {
            Ok(()) => info!("Requested display mode {}", target),
            Err(err) => warn!("Changing resolution to {} failed: {}", target, err),
        }

        let gamma = prompt_gamma(console, self.gamma_preset)?;
        if let Some(gamma) = gamma {
            let ramp = GammaRamp::new(gamma);
            match display.set_gamma_ramp(&ramp) {
                Ok(()) => info!("Installed gamma ramp for {}", gamma),
                Err(err) => warn!("Setting gamma {} failed: {}", gamma, err),
            }
        }

        Ok(Outcome { applied: target, gamma })
    }
}
