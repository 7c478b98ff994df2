//! Ambient reputation drift: a cosmetic background nudge with no
//! semantic meaning, isolated from the review ledger.

use std::{sync::Arc, time::Duration};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{CoreEvent, PlatformCore, StateSnapshot};

/// One drift tick. `None` when the probability roll decides nothing
/// happens this tick; otherwise the nudged score, floored at zero.
pub fn drift_step(
    rng: &mut impl Rng,
    score: u32,
    tick_probability: f64,
    positive_bias: f64,
) -> Option<u32> {
    if rng.gen::<f64>() >= tick_probability {
        return None;
    }
    let nudged = if rng.gen::<f64>() < positive_bias {
        score + 1
    } else {
        score.saturating_sub(1)
    };
    Some(nudged)
}

impl PlatformCore {
    /// Starts the repeating drift tick. Idempotent: a second call while
    /// a tick task is alive does nothing.
    pub async fn start_ambient_drift(self: &Arc<Self>) {
        let mut guard = self.drift_task.lock().await;
        if guard.is_some() {
            return;
        }

        let core = Arc::clone(self);
        let interval = Duration::from_secs(core.settings.drift_interval_secs);
        *guard = Some(tokio::spawn(async move {
            let mut rng = StdRng::from_entropy();
            loop {
                tokio::time::sleep(interval).await;
                core.apply_drift_tick(&mut rng).await;
            }
        }));
    }

    pub async fn stop_ambient_drift(&self) {
        if let Some(handle) = self.drift_task.lock().await.take() {
            handle.abort();
        }
    }

    async fn apply_drift_tick(&self, rng: &mut StdRng) {
        let mut state = self.state.lock().await;
        let Some(score) = drift_step(
            rng,
            state.profile.reputation,
            self.settings.drift_tick_probability,
            self.settings.drift_positive_bias,
        ) else {
            return;
        };

        debug!(from = state.profile.reputation, to = score, "reputation drift tick");
        state.profile.reputation = score;
        let _ = self
            .events
            .send(CoreEvent::StateRefreshed(StateSnapshot::capture(&state)));
        let _ = self.events.send(CoreEvent::ReputationDrifted { score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_probability_never_drifts() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(drift_step(&mut rng, 50, 0.0, 0.7), None);
        }
    }

    #[test]
    fn certain_positive_bias_always_increments() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(drift_step(&mut rng, 50, 1.0, 1.0), Some(51));
        }
    }

    #[test]
    fn drift_floors_at_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let next = drift_step(&mut rng, 0, 1.0, 0.0).expect("always drifts");
            assert_eq!(next, 0);
        }
    }
}
