//! General application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Smallest accepted `completion_step`; keeps the animation under a thousand ticks.
pub const MIN_COMPLETION_STEP: f64 = 0.1;

const fn default_tick_ms() -> u64 {
    100
}

const fn default_step() -> f64 {
    2.5
}

fn default_redirect() -> String {
    String::from("/dashboard")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Interval between completion-animation ticks.
    #[serde(default = "default_tick_ms")]
    pub completion_tick_ms: u64,

    /// Percent added to the completion animation on each tick.
    #[serde(default = "default_step")]
    pub completion_step: f64,

    /// Route shown once the completion animation finishes.
    #[serde(default = "default_redirect")]
    pub redirect_after_submit: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            completion_tick_ms: default_tick_ms(),
            completion_step: default_step(),
            redirect_after_submit: default_redirect(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub const fn completion_tick(&self) -> Duration {
        Duration::from_millis(self.completion_tick_ms)
    }
}
