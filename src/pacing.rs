//! Sequential call pacing
//!
//! The board API enforces a call-rate ceiling. The pipeline stays under it
//! by running all host calls sequentially and awaiting a fixed delay after
//! each one. `CallPacer` is that policy as an explicit object: callers
//! `pause().await` after every host call instead of scattering sleeps.

use std::time::Duration;

/// Fixed inter-call delay shared by one export run
///
/// Cloning is cheap; the pacer is stateless, so clones share nothing
/// mutable.
#[derive(Clone, Debug)]
pub struct CallPacer {
    delay: Duration,
}

impl CallPacer {
    /// Create a pacer with the given inter-call delay
    ///
    /// A zero delay disables pacing entirely (useful in tests).
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured inter-call delay
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Await the inter-call delay
    ///
    /// Called once after every host API call, success or failure alike.
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
