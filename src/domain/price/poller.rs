//! Price poller: an immediate fetch, then fixed-interval and manual refreshes.
//!
//! - Activation fetches at once and spawns an interval task for later ticks
//! - [`PollerHandle`] scopes the interval task: dropping it stops the timer
//! - Each fetch runs in its own task so a manual refresh can overlap a tick
//! - Completions go through [`PollState`], which drops stale and superseded ones
//!
//! Requires a tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::state::{lock, Completion, OverlapPolicy, PollState, SharedPollState};
use super::PriceSource;
use crate::error::{ApplicationError, SmjError};
use crate::network::DEFAULT_REFRESH_INTERVAL;
use crate::ui::{Notifier, Toast};

pub const FETCH_ERROR_TITLE: &str = "Error fetching prices";
pub const FETCH_ERROR_MESSAGE: &str = "Unable to load current prices. Please try again.";

/// Poller configuration.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    pub overlap: OverlapPolicy,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
            overlap: OverlapPolicy::default(),
        }
    }
}

/// Drives a [`PollState`] from a [`PriceSource`].
pub struct PricePoller<S, N> {
    source: Arc<S>,
    notifier: Arc<N>,
    state: SharedPollState,
    config: PollerConfig,
}

impl<S, N> Clone for PricePoller<S, N> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            notifier: self.notifier.clone(),
            state: self.state.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S, N> PricePoller<S, N>
where
    S: PriceSource + Send + Sync + 'static,
    N: Notifier + 'static,
{
    pub fn new(source: Arc<S>, notifier: Arc<N>, config: PollerConfig) -> Self {
        let state = Arc::new(std::sync::Mutex::new(PollState::new(config.overlap)));
        Self {
            source,
            notifier,
            state,
            config,
        }
    }

    pub fn state(&self) -> &SharedPollState {
        &self.state
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Start polling: one fetch now, then one per interval until the returned
    /// handle is dropped or cancelled.
    ///
    /// Activating again while a handle is alive starts a fresh activation;
    /// drop the old handle first so only one timer runs.
    pub fn activate(&self) -> PollerHandle {
        let epoch = lock(&self.state).attach();
        tracing::debug!(
            epoch,
            interval_ms = self.config.interval.as_millis() as u64,
            "Poller activated"
        );

        self.refresh();

        let poller = self.clone();
        let period = self.config.interval;
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                tracing::debug!("Scheduled price refresh");
                poller.refresh();
            }
        });

        PollerHandle {
            task: Some(task),
            state: self.state.clone(),
            epoch,
        }
    }

    /// Fetch now. A no-op when no activation is live.
    ///
    /// Overlapping an in-flight fetch is allowed; [`OverlapPolicy`] decides
    /// which result is kept.
    pub fn refresh(&self) {
        let Some(ticket) = lock(&self.state).start() else {
            tracing::debug!("Refresh ignored: poller is not active");
            return;
        };
        tracing::debug!(seq = ticket.seq(), "Fetching prices");

        let source = self.source.clone();
        let notifier = self.notifier.clone();
        let state = self.state.clone();

        tokio::spawn(async move {
            let result = source.fetch_prices().await;

            match result {
                Ok(snapshot) => {
                    let completion = lock(&state).on_success(ticket, snapshot, Utc::now());
                    tracing::debug!(seq = ticket.seq(), ?completion, "Price fetch completed");
                }
                Err(e) => {
                    let completion = lock(&state).on_failure(ticket);
                    tracing::warn!(
                        seq = ticket.seq(),
                        ?completion,
                        error = %e,
                        "Price fetch failed"
                    );
                    if completion == Completion::Applied {
                        notifier.notify(failure_toast(&e));
                    }
                }
            }
        });
    }
}

/// The toast shown for a failed poll. Transport detail is never shown; a
/// rejection message from the service is.
fn failure_toast(error: &SmjError) -> Toast {
    let description = match error {
        SmjError::Application(app @ ApplicationError::PriceRejected { .. }) => {
            app.message().unwrap_or(FETCH_ERROR_MESSAGE)
        }
        _ => FETCH_ERROR_MESSAGE,
    };
    Toast::destructive(FETCH_ERROR_TITLE, description)
}

/// Keeps an activation's interval timer alive. Dropping it cancels the timer
/// and makes any in-flight completion for this activation a no-op.
#[derive(Debug)]
pub struct PollerHandle {
    task: Option<JoinHandle<()>>,
    state: SharedPollState,
    epoch: u64,
}

impl PollerHandle {
    /// Stop polling now.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            lock(&self.state).detach(self.epoch);
            tracing::debug!(epoch = self.epoch, "Poller deactivated");
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PriceSnapshot;
    use crate::error::HttpError;
    use crate::ui::ToastQueue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    const INTERVAL: Duration = Duration::from_millis(600_000);

    fn snap(gold_1g: &str) -> PriceSnapshot {
        PriceSnapshot {
            gold_1g: Some(gold_1g.to_string()),
            ..Default::default()
        }
    }

    /// Answers every fetch immediately and counts calls.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl PriceSource for CountingSource {
        fn fetch_prices(
            &self,
        ) -> impl std::future::Future<Output = Result<PriceSnapshot, SmjError>> + Send {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok(snap(&n.to_string())) }
        }
    }

    /// Parks every fetch until the test resolves it.
    #[derive(Default)]
    struct ManualSource {
        pending: Mutex<Vec<oneshot::Sender<Result<PriceSnapshot, SmjError>>>>,
    }

    impl ManualSource {
        fn resolve(&self, index: usize, result: Result<PriceSnapshot, SmjError>) {
            let tx = self.pending.lock().unwrap().remove(index);
            let _ = tx.send(result);
        }

        fn pending(&self) -> usize {
            self.pending.lock().unwrap().len()
        }
    }

    impl PriceSource for ManualSource {
        fn fetch_prices(
            &self,
        ) -> impl std::future::Future<Output = Result<PriceSnapshot, SmjError>> + Send {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().unwrap().push(tx);
            async move { rx.await.unwrap_or_else(|_| Err(HttpError::Timeout.into())) }
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn poller<S: PriceSource + Send + Sync + 'static>(
        source: Arc<S>,
        overlap: OverlapPolicy,
    ) -> (PricePoller<S, ToastQueue>, Arc<ToastQueue>) {
        let toasts = Arc::new(ToastQueue::new());
        let config = PollerConfig {
            interval: INTERVAL,
            overlap,
        };
        (PricePoller::new(source, toasts.clone(), config), toasts)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_once_on_activation_then_per_interval() {
        let source = Arc::new(CountingSource::default());
        let (poller, _) = poller(source.clone(), OverlapPolicy::LastCompleted);

        let _handle = poller.activate();
        settle().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(INTERVAL - Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);

        tokio::time::advance(INTERVAL).await;
        settle().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);

        let state = lock(poller.state());
        assert_eq!(state.snapshot().unwrap().gold_1g.as_deref(), Some("3"));
        assert!(!state.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fetch_after_teardown() {
        let source = Arc::new(CountingSource::default());
        let (poller, _) = poller(source.clone(), OverlapPolicy::LastCompleted);

        let handle = poller.activate();
        settle().await;
        handle.cancel();

        tokio::time::advance(INTERVAL * 3).await;
        settle().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        poller.refresh();
        settle().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reactivation_does_not_stack_timers() {
        let source = Arc::new(CountingSource::default());
        let (poller, _) = poller(source.clone(), OverlapPolicy::LastCompleted);

        for _ in 0..3 {
            let handle = poller.activate();
            settle().await;
            drop(handle);
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);

        let _handle = poller.activate();
        settle().await;
        tokio::time::advance(INTERVAL).await;
        settle().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh_overlap_last_completion_wins() {
        let source = Arc::new(ManualSource::default());
        let (poller, _) = poller(source.clone(), OverlapPolicy::LastCompleted);

        let _handle = poller.activate();
        settle().await;
        poller.refresh();
        settle().await;
        assert_eq!(source.pending(), 2);
        assert!(lock(poller.state()).is_loading());

        // The manual refresh (second) answers first, the initial fetch last.
        source.resolve(1, Ok(snap("200")));
        settle().await;
        assert!(lock(poller.state()).is_loading());

        source.resolve(0, Ok(snap("100")));
        settle().await;

        let state = lock(poller.state());
        assert!(!state.is_loading());
        assert_eq!(state.snapshot().unwrap().gold_1g.as_deref(), Some("100"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_refresh_overlap_latest_issued_wins() {
        let source = Arc::new(ManualSource::default());
        let (poller, _) = poller(source.clone(), OverlapPolicy::LatestIssued);

        let _handle = poller.activate();
        settle().await;
        poller.refresh();
        settle().await;

        source.resolve(1, Ok(snap("200")));
        settle().await;
        source.resolve(0, Ok(snap("100")));
        settle().await;

        let state = lock(poller.state());
        assert!(!state.is_loading());
        assert_eq!(state.snapshot().unwrap().gold_1g.as_deref(), Some("200"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_notifies_generic_message_and_keeps_snapshot() {
        let source = Arc::new(ManualSource::default());
        let (poller, toasts) = poller(source.clone(), OverlapPolicy::LastCompleted);

        let _handle = poller.activate();
        settle().await;
        source.resolve(0, Ok(snap("100")));
        settle().await;

        poller.refresh();
        settle().await;
        source.resolve(0, Err(HttpError::ServerError { status: 500, body: "boom".into() }.into()));
        settle().await;

        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert!(drained[0].is_destructive());
        assert_eq!(drained[0].title, FETCH_ERROR_TITLE);
        assert_eq!(drained[0].description, FETCH_ERROR_MESSAGE);

        let state = lock(poller.state());
        assert_eq!(state.snapshot().unwrap().gold_1g.as_deref(), Some("100"));
        assert!(!state.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_message_is_shown() {
        let source = Arc::new(ManualSource::default());
        let (poller, toasts) = poller(source.clone(), OverlapPolicy::LastCompleted);

        let _handle = poller.activate();
        settle().await;
        source.resolve(
            0,
            Err(ApplicationError::PriceRejected {
                message: Some("Rates not published".into()),
            }
            .into()),
        );
        settle().await;

        assert_eq!(toasts.drain()[0].description, "Rates not published");
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_after_teardown_is_ignored() {
        let source = Arc::new(ManualSource::default());
        let (poller, toasts) = poller(source.clone(), OverlapPolicy::LastCompleted);

        let handle = poller.activate();
        settle().await;
        drop(handle);

        source.resolve(0, Err(HttpError::Timeout.into()));
        settle().await;

        assert!(toasts.is_empty());
        let state = lock(poller.state());
        assert!(state.snapshot().is_none());
        assert!(!state.is_loading());
    }
}
