//! Animator configuration
//!
//! Duration, start delay and interpolation curve persist across batches.
//! A field left unset keeps the timer engine's own default; a field that has
//! been set is pushed onto every timer the animator creates.
//!
//! Configurations can be written in TOML:
//!
//! ```toml
//! duration_ms = 250
//! start_delay_ms = 40
//! interpolator = "ease_out"
//! ```

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{AnimatorError, Result};
use crate::timer::{TimerEngine, TimerId};

/// Per-animator timing configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimatorConfig {
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub start_delay_ms: Option<u64>,
    #[serde(default)]
    pub interpolator: Option<Easing>,
}

impl AnimatorConfig {
    /// Parse a configuration from TOML source
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Set the duration, rejecting negative values without touching state
    pub fn set_duration(&mut self, duration_ms: i64) -> Result<()> {
        let duration = u64::try_from(duration_ms)
            .map_err(|_| AnimatorError::NegativeDuration(duration_ms))?;
        self.duration_ms = Some(duration);
        Ok(())
    }

    /// Set the start delay, rejecting negative values without touching state
    pub fn set_start_delay(&mut self, delay_ms: i64) -> Result<()> {
        let delay =
            u64::try_from(delay_ms).map_err(|_| AnimatorError::NegativeStartDelay(delay_ms))?;
        self.start_delay_ms = Some(delay);
        Ok(())
    }

    pub fn set_interpolator(&mut self, easing: Easing) {
        self.interpolator = Some(easing);
    }

    /// Effective duration: the configured one, else the engine default
    pub fn duration_or(&self, engine_default_ms: u64) -> u64 {
        self.duration_ms.unwrap_or(engine_default_ms)
    }

    /// Effective start delay (0 when unset)
    pub fn start_delay(&self) -> u64 {
        self.start_delay_ms.unwrap_or(0)
    }

    /// Push every explicitly set field onto a freshly created timer
    pub fn apply_to(&self, engine: &dyn TimerEngine, timer: TimerId) {
        if let Some(delay) = self.start_delay_ms {
            engine.set_start_delay(timer, delay);
        }
        if let Some(duration) = self.duration_ms {
            engine.set_duration(timer, duration);
        }
        if let Some(easing) = self.interpolator {
            engine.set_interpolator(timer, easing);
        }
    }
}
