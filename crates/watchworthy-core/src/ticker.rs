//! Elapsed-time counter for an in-flight request

use crate::types::RequestState;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest period accepted; `interval_at` rejects zero
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Background task bumping `elapsed_seconds` once per period.
///
/// Only the request that started at `started_at` is ticked. The task exits on
/// its own once that request leaves `InFlight`, and is aborted when the ticker
/// is stopped or dropped.
#[derive(Debug)]
pub struct ElapsedTicker {
    handle: JoinHandle<()>,
}

impl ElapsedTicker {
    /// Start ticking. Must be called from within a tokio runtime.
    pub fn start(
        state: Arc<watch::Sender<RequestState>>,
        started_at: DateTime<Utc>,
        period: Duration,
    ) -> Self {
        let period = period.max(MIN_TICK_PERIOD);
        let first_tick = Instant::now() + period;
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !state.send_if_modified(|current| current.tick(started_at)) {
                    break;
                }
                tracing::trace!(elapsed = state.borrow().elapsed_seconds(), "tick");
            }
        });
        Self { handle }
    }

    #[cfg(test)]
    fn abort_handle(&self) -> tokio::task::AbortHandle {
        self.handle.abort_handle()
    }

    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn in_flight_channel() -> (Arc<watch::Sender<RequestState>>, DateTime<Utc>) {
        let started_at = Utc::now();
        let (tx, _rx) = watch::channel(RequestState::in_flight(started_at));
        (Arc::new(tx), started_at)
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_whole_periods() {
        let (state, started_at) = in_flight_channel();
        let ticker = ElapsedTicker::start(state.clone(), started_at, Duration::from_secs(1));

        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(state.borrow().elapsed_seconds(), 3);

        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks() {
        let (state, started_at) = in_flight_channel();
        let ticker = ElapsedTicker::start(state.clone(), started_at, Duration::from_secs(1));
        let abort = ticker.abort_handle();

        time::sleep(Duration::from_millis(1500)).await;
        ticker.stop();
        time::sleep(Duration::from_secs(5)).await;

        assert_eq!(state.borrow().elapsed_seconds(), 1);
        assert!(abort.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_exits_when_state_leaves_in_flight() {
        let (state, started_at) = in_flight_channel();
        let ticker = ElapsedTicker::start(state.clone(), started_at, Duration::from_secs(1));
        let abort = ticker.abort_handle();

        state.send_replace(RequestState::Failed {
            reason: "gone".to_string(),
        });
        time::sleep(Duration::from_secs(2)).await;

        assert!(abort.is_finished());
        assert_eq!(state.borrow().elapsed_seconds(), 0);
        drop(ticker);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts() {
        let (state, started_at) = in_flight_channel();
        let abort = {
            let ticker = ElapsedTicker::start(state.clone(), started_at, Duration::from_secs(1));
            ticker.abort_handle()
        };

        time::sleep(Duration::from_secs(3)).await;
        assert!(abort.is_finished());
        assert_eq!(state.borrow().elapsed_seconds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let (state, started_at) = in_flight_channel();
        let ticker = ElapsedTicker::start(state.clone(), started_at, Duration::ZERO);
        let abort = ticker.abort_handle();

        time::sleep(Duration::from_millis(5)).await;

        assert!(!abort.is_finished());
        assert!(state.borrow().elapsed_seconds() >= 1);
        ticker.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaves_a_later_request_alone() {
        let (state, started_at) = in_flight_channel();
        let ticker = ElapsedTicker::start(state.clone(), started_at, Duration::from_secs(1));
        let abort = ticker.abort_handle();

        let next_request = started_at + chrono::Duration::seconds(30);
        state.send_replace(RequestState::in_flight(next_request));
        time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(state.borrow().elapsed_seconds(), 0);
        assert!(abort.is_finished());
        drop(ticker);
    }
}
