//! Single-request lifecycle driver
//!
//! The orchestrator owns the request state and the recent-results cache.
//! Displays read snapshots or subscribe to the watch channels; nothing
//! outside this module mutates either.
//!
//! ```text
//! Idle | Resolved | Failed --submit--> InFlight --ok--> Resolved --> cache insert --> persist
//!                                         |
//!                                         +--err--> Failed
//! ```

use crate::cache::RecencyCache;
use crate::error::{ReplayError, SubmitError};
use crate::service::AnalysisService;
use crate::ticker::{ElapsedTicker, MIN_TICK_PERIOD};
use crate::types::{AnalysisQuery, HistoryEntry, RequestState};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

const ABANDONED_REASON: &str = "request abandoned before completion";

pub struct RequestOrchestrator {
    service: Arc<dyn AnalysisService>,
    cache: Mutex<RecencyCache>,
    state: Arc<watch::Sender<RequestState>>,
    history: watch::Sender<Vec<HistoryEntry>>,
    displayed_query: Mutex<Option<AnalysisQuery>>,
    tick_period: Duration,
}

impl RequestOrchestrator {
    pub fn new(service: Arc<dyn AnalysisService>, cache: RecencyCache) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        let (history, _) = watch::channel(cache.entries().to_vec());

        Self {
            service,
            cache: Mutex::new(cache),
            state: Arc::new(state),
            history,
            displayed_query: Mutex::new(None),
            tick_period: Duration::from_secs(1),
        }
    }

    /// Override the one-second elapsed tick; zero is raised to 1ms
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period.max(MIN_TICK_PERIOD);
        self
    }

    pub fn current_state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.state.borrow().elapsed_seconds()
    }

    /// Receive every lifecycle transition and elapsed tick
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Current cache contents, most recent first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.borrow().clone()
    }

    /// Receive the cache contents after every insert
    pub fn subscribe_history(&self) -> watch::Receiver<Vec<HistoryEntry>> {
        self.history.subscribe()
    }

    /// Query last submitted or replayed
    pub fn displayed_query(&self) -> Option<AnalysisQuery> {
        self.lock_displayed_query().clone()
    }

    /// Run one analysis request to completion.
    ///
    /// Blank queries and submissions made while another request is in flight
    /// are rejected without touching any state. Otherwise the returned state
    /// is the terminal `Resolved` or `Failed` state of this request.
    pub async fn submit(&self, query: AnalysisQuery) -> Result<RequestState, SubmitError> {
        if query.is_blank() {
            tracing::debug!("rejecting blank query");
            return Err(SubmitError::InvalidQuery);
        }

        let Some(in_flight) = InFlight::enter(&self.state, self.tick_period) else {
            tracing::debug!(url = %query.url, "rejecting submission, request already in flight");
            return Err(SubmitError::RequestInFlight);
        };

        *self.lock_displayed_query() = Some(query.clone());
        tracing::info!(url = %query.url, "analysis submitted");

        let outcome = self.service.analyze(&query).await;
        let elapsed = self.elapsed_seconds();

        let state = match outcome {
            Ok(document) => {
                let resolved = in_flight.finish(RequestState::Resolved {
                    document: document.clone(),
                });
                tracing::info!(url = %query.url, elapsed, "analysis resolved");
                self.record(HistoryEntry::new(query, document));
                resolved
            }
            Err(e) => {
                tracing::warn!(url = %query.url, elapsed, error = %e, "analysis failed");
                in_flight.finish(RequestState::Failed {
                    reason: e.to_string(),
                })
            }
        };

        Ok(state)
    }

    /// Cached entry at `index` (0 = most recent), without contacting the service.
    ///
    /// Primes the displayed query; lifecycle state and cache order are untouched.
    pub fn replay(&self, index: usize) -> Result<HistoryEntry, ReplayError> {
        let entry = self.lock_cache().replay(index)?.clone();
        *self.lock_displayed_query() = Some(entry.query.clone());
        tracing::debug!(index, url = %entry.query.url, "replaying cached analysis");
        Ok(entry)
    }

    fn record(&self, entry: HistoryEntry) {
        let snapshot = self.lock_cache().insert(entry).to_vec();
        self.history.send_replace(snapshot);
    }

    fn lock_cache(&self) -> MutexGuard<'_, RecencyCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_displayed_query(&self) -> MutexGuard<'_, Option<AnalysisQuery>> {
        self.displayed_query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Ownership of the `InFlight` period.
///
/// Entering sets the state and starts the ticker in one step. Finishing, or
/// dropping the guard mid-request, stops the ticker before the state moves on.
struct InFlight {
    state: Arc<watch::Sender<RequestState>>,
    ticker: Option<ElapsedTicker>,
}

impl InFlight {
    fn enter(state: &Arc<watch::Sender<RequestState>>, tick_period: Duration) -> Option<Self> {
        let started_at = Utc::now();
        let entered = state.send_if_modified(|current| {
            if current.is_in_flight() {
                return false;
            }
            *current = RequestState::in_flight(started_at);
            true
        });
        if !entered {
            return None;
        }

        Some(Self {
            state: Arc::clone(state),
            ticker: Some(ElapsedTicker::start(
                Arc::clone(state),
                started_at,
                tick_period,
            )),
        })
    }

    fn finish(mut self, next: RequestState) -> RequestState {
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
        self.state.send_replace(next.clone());
        next
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(ticker) = self.ticker.take() else {
            return;
        };
        ticker.stop();
        self.state.send_if_modified(|current| {
            if !current.is_in_flight() {
                return false;
            }
            *current = RequestState::Failed {
                reason: ABANDONED_REASON.to_string(),
            };
            true
        });
        tracing::warn!("analysis request dropped before completion");
    }
}
