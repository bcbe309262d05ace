//! Headless screen models and their collaborators.
//!
//! Rendering, routing infrastructure and toast delivery belong to the host UI.
//! Screens reach them through two small traits:
//!
//! - [`Navigator`]: switch between [`Route::Login`] and [`Route::Dashboard`]
//! - [`Notifier`]: raise a transient [`Toast`]
//!
//! [`Router`] and [`ToastQueue`] are ready-made in-memory implementations.

pub mod dashboard;
pub mod login;

use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

pub use dashboard::{CardBody, DashboardScreen, DashboardView, PriceCard};
pub use login::{LoginScreen, LoginView};

// ─── Navigation ──────────────────────────────────────────────────────────────

/// The two views of the app. There is no guard: the dashboard is reachable
/// without logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Root view.
    #[default]
    Login,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Dashboard => "/dashboard",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" | "" => Some(Self::Login),
            "/dashboard" => Some(Self::Dashboard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// In-memory navigator. Hosts watch it to swap screens.
#[derive(Debug)]
pub struct Router {
    tx: watch::Sender<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    pub fn current(&self) -> Route {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) {
        tracing::debug!(%route, "Navigate");
        self.tx.send_replace(route);
    }
}

// ─── Notifications ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub variant: ToastVariant,
    pub title: String,
    pub description: String,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Default,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: ToastVariant::Destructive,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// In-memory notifier. Hosts drain it on each frame.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
