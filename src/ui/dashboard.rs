//! Dashboard screen model: price cards plus refresh and logout.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use crate::domain::price::state::lock;
use crate::domain::price::{PollerConfig, PollerHandle, PriceField, PricePoller, PriceSource};
use crate::shared::fmt::num::NOT_AVAILABLE;
use crate::ui::{Navigator, Notifier, Route, Toast};

pub const DASHBOARD_TITLE: &str = "SMJ Dashboard";
pub const LOGOUT_TITLE: &str = "Logged Out";
pub const LOGOUT_MESSAGE: &str = "You have been successfully logged out.";

/// What a card shows in its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Loading,
    Price(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceCard {
    pub field: PriceField,
    pub title: &'static str,
    pub caption: &'static str,
    pub body: CardBody,
}

/// Everything needed to draw the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub title: &'static str,
    /// `"Last updated: <local time>"`, once a snapshot has landed.
    pub last_updated: Option<String>,
    pub is_loading: bool,
    pub refresh_enabled: bool,
    pub cards: Vec<PriceCard>,
    pub footer: String,
}

/// Dashboard state. Owns the poll state through its poller; nothing else
/// writes it.
///
/// Call [`activate`](Self::activate) when the screen is shown and
/// [`deactivate`](Self::deactivate) (or drop the screen) when it goes away.
pub struct DashboardScreen<S, N, T> {
    poller: PricePoller<S, T>,
    navigator: Arc<N>,
    notifier: Arc<T>,
    handle: Mutex<Option<PollerHandle>>,
}

impl<S, N, T> DashboardScreen<S, N, T>
where
    S: PriceSource + Send + Sync + 'static,
    N: Navigator,
    T: Notifier + 'static,
{
    pub fn new(source: Arc<S>, navigator: Arc<N>, notifier: Arc<T>, config: PollerConfig) -> Self {
        Self {
            poller: PricePoller::new(source, notifier.clone(), config),
            navigator,
            notifier,
            handle: Mutex::new(None),
        }
    }

    fn handle(&self) -> MutexGuard<'_, Option<PollerHandle>> {
        self.handle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Show the screen: fetch now and start the refresh timer.
    ///
    /// Re-activating replaces the running timer.
    pub fn activate(&self) {
        let mut handle = self.handle();
        // Tear the old activation down before the new one attaches.
        drop(handle.take());
        *handle = Some(self.poller.activate());
    }

    /// Hide the screen: stop the timer. Late responses are discarded.
    pub fn deactivate(&self) {
        drop(self.handle().take());
    }

    pub fn is_active(&self) -> bool {
        self.handle().is_some()
    }

    /// Manual refresh. Mirrors the disabled refresh button: ignored while a
    /// fetch is in flight or the screen is inactive. Returns whether a fetch
    /// was started.
    pub fn refresh(&self) -> bool {
        if !self.is_active() || lock(self.poller.state()).is_loading() {
            return false;
        }
        self.poller.refresh();
        true
    }

    /// Notify, leave for the login screen, and stop polling. No server call.
    pub fn logout(&self) {
        let toast = Toast::info(LOGOUT_TITLE, LOGOUT_MESSAGE);
        self.notifier.notify(toast);
        self.navigator.navigate(Route::Login);
        self.deactivate();
    }

    pub fn view(&self) -> DashboardView {
        let state = lock(self.poller.state());
        let is_loading = state.is_loading();

        let cards = PriceField::ALL
            .iter()
            .map(|&field| PriceCard {
                field,
                title: field.title(),
                caption: field.caption(),
                body: if is_loading {
                    CardBody::Loading
                } else {
                    CardBody::Price(
                        state
                            .snapshot()
                            .map(|s| s.formatted(field))
                            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                    )
                },
            })
            .collect();

        DashboardView {
            title: DASHBOARD_TITLE,
            last_updated: state.last_updated_at().map(last_updated_label),
            is_loading,
            refresh_enabled: !is_loading,
            cards,
            footer: refresh_footer(self.poller.config().interval),
        }
    }
}

/// `"Last updated: 3:04:05 PM"` in local time.
pub fn last_updated_label(at: DateTime<Utc>) -> String {
    format!(
        "Last updated: {}",
        at.with_timezone(&Local).format("%-I:%M:%S %p")
    )
}

/// `"Prices update automatically every 10 minutes"`.
pub fn refresh_footer(interval: Duration) -> String {
    let secs = interval.as_secs();
    let every = match secs {
        60 => "minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "second".to_string(),
        s => format!("{} seconds", s),
    };
    format!("Prices update automatically every {}", every)
}
