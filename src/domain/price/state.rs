//! Poll state container: screen-owned, poller-driven.
//!
//! `PollState` records the outcome of fetch cycles. It is mutated only at the
//! start and completion of a fetch and knows nothing about timers or transport.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::PriceSnapshot;

/// Poll state shared between a dashboard and its poller tasks.
pub type SharedPollState = Arc<Mutex<PollState>>;

/// Lock shared poll state. A panic in another holder does not corrupt the state
/// (every mutation is a handful of field writes), so poisoning is ignored.
pub(crate) fn lock(state: &SharedPollState) -> MutexGuard<'_, PollState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Phase of the poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    /// No fetch has been issued yet.
    #[default]
    Idle,
    /// At least one fetch is in flight.
    Loading,
    /// The last applied fetch succeeded.
    Ready,
    /// The last applied fetch failed.
    Failed,
}

/// What to do when fetches overlap (manual refresh racing the timer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// Every completion is applied in arrival order; the last response to
    /// arrive wins even if it was issued earlier.
    #[default]
    LastCompleted,
    /// Only the most recently issued fetch may change the snapshot; older
    /// completions are dropped.
    LatestIssued,
}

/// Handed out by [`PollState::start`]; identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    epoch: u64,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Result of reporting a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome changed the state.
    Applied,
    /// A newer fetch was issued; the outcome was dropped.
    Superseded,
    /// The owning screen was torn down (or re-activated) since the fetch began.
    Stale,
}

/// Dashboard poll state: latest snapshot, loading flag, last update time.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    snapshot: Option<PriceSnapshot>,
    last_updated_at: Option<DateTime<Utc>>,
    settled: PollPhase,
    overlap: OverlapPolicy,
    issued: u64,
    in_flight: u32,
    epoch: u64,
    attached: bool,
}

impl PollState {
    pub fn new(overlap: OverlapPolicy) -> Self {
        Self {
            overlap,
            ..Self::default()
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Bind to a new screen activation. Fetches from earlier activations
    /// become stale. Returns the activation epoch.
    pub fn attach(&mut self) -> u64 {
        self.epoch += 1;
        self.attached = true;
        self.in_flight = 0;
        self.epoch
    }

    /// Unbind from the activation `epoch`. A no-op if a newer activation
    /// already took over.
    pub fn detach(&mut self, epoch: u64) {
        if self.epoch == epoch {
            self.attached = false;
            self.in_flight = 0;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ── Transitions ──────────────────────────────────────────────────────

    /// Enter `Loading`. The previous snapshot stays visible.
    ///
    /// Returns `None` when detached: a torn-down screen does not fetch.
    pub fn start(&mut self) -> Option<FetchTicket> {
        if !self.attached {
            return None;
        }
        self.issued += 1;
        self.in_flight += 1;
        Some(FetchTicket {
            seq: self.issued,
            epoch: self.epoch,
        })
    }

    /// Replace the snapshot and stamp `now` as the update time.
    pub fn on_success(
        &mut self,
        ticket: FetchTicket,
        snapshot: PriceSnapshot,
        now: DateTime<Utc>,
    ) -> Completion {
        let completion = self.complete(ticket);
        if completion == Completion::Applied {
            self.snapshot = Some(snapshot);
            self.last_updated_at = Some(now);
            self.settled = PollPhase::Ready;
        }
        completion
    }

    /// Record a failed fetch. The snapshot is kept.
    pub fn on_failure(&mut self, ticket: FetchTicket) -> Completion {
        let completion = self.complete(ticket);
        if completion == Completion::Applied {
            self.settled = PollPhase::Failed;
        }
        completion
    }

    fn complete(&mut self, ticket: FetchTicket) -> Completion {
        if !self.attached || ticket.epoch != self.epoch {
            return Completion::Stale;
        }
        self.in_flight = self.in_flight.saturating_sub(1);

        match self.overlap {
            OverlapPolicy::LatestIssued if ticket.seq != self.issued => Completion::Superseded,
            _ => Completion::Applied,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn phase(&self) -> PollPhase {
        if self.in_flight > 0 {
            PollPhase::Loading
        } else {
            self.settled
        }
    }

    /// True while any fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn snapshot(&self) -> Option<&PriceSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated_at
    }

    pub fn overlap(&self) -> OverlapPolicy {
        self.overlap
    }
}
