//! Cosmetic countdown between a successful submit and the redirect.

use std::time::Duration;

use ff_config::{GeneralConfig, MIN_COMPLETION_STEP};
use ff_core::Route;

/// Fixed-interval progress from 0 to 100, then a route to go to.
///
/// Runs only after the server has accepted the answers; nothing waits on it.
#[derive(Debug, Clone)]
pub struct Completion {
    tick: Duration,
    step: f64,
    redirect: Route,
}

impl Completion {
    /// Steps below `MIN_COMPLETION_STEP` (including non-positive or NaN) are raised to it.
    #[must_use]
    pub fn new(tick: Duration, step: f64, redirect: Route) -> Self {
        Self {
            tick,
            step: step.max(MIN_COMPLETION_STEP),
            redirect,
        }
    }

    #[must_use]
    pub fn from_config(config: &GeneralConfig) -> Self {
        Self::new(
            config.completion_tick(),
            config.completion_step,
            Route::from_path(&config.redirect_after_submit),
        )
    }

    #[must_use]
    pub const fn redirect(&self) -> Route {
        self.redirect
    }

    /// Progress values the animation will report, ending at exactly 100.
    pub fn frames(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::successors(Some(self.step.min(100.0)), |progress| {
            (*progress < 100.0).then(|| (progress + self.step).min(100.0))
        })
    }

    /// Report each frame to `on_tick`, one per interval, then return the
    /// redirect route.
    pub async fn run<F: FnMut(f64)>(&self, mut on_tick: F) -> Route {
        let mut interval = tokio::time::interval(self.tick);
        interval.tick().await;
        for progress in self.frames() {
            interval.tick().await;
            on_tick(progress);
        }
        tracing::debug!(route = %self.redirect, "completion finished");
        self.redirect
    }
}
