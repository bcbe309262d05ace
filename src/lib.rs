//! # SMJ Client
//!
//! Rust client for the SMJ price service: customer login and today's gold and
//! silver prices, plus headless models of the two app screens.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: validation, price formatting, poll state, poller (always available)
//! 2. **HTTP API**: `SmjHttp`, one request per operation
//! 3. **High-Level Client**: `SmjClient` with nested sub-clients
//! 4. **Screens**: `LoginScreen` and `DashboardScreen`, rendered by the host UI
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use smj_client::prelude::*;
//! use std::sync::Arc;
//!
//! let client = Arc::new(SmjClient::builder().build()?);
//! let router = Arc::new(Router::default());
//! let toasts = Arc::new(ToastQueue::new());
//!
//! let login = LoginScreen::new(client.clone(), router.clone(), toasts.clone());
//! login.set_mobile_number("9876543210");
//! login.set_password("secret");
//! login.submit().await;
//!
//! let dashboard = DashboardScreen::new(client, router, toasts, PollerConfig::default());
//! dashboard.activate();
//! let view = dashboard.view();
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared formatting and serde helpers.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Client error types.
pub mod error;

/// Endpoint and scheduling constants.
pub mod network;

/// Credential validation and login wire types.
pub mod auth;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP adapter for the SMJ REST API.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `SmjClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Screens ─────────────────────────────────────────────────────────

/// Login and dashboard screen models, navigation, notifications.
pub mod ui;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Auth
    pub use crate::auth::{validate, Authenticator, CredentialTransport, Credentials};

    // Prices
    pub use crate::domain::price::{
        OverlapPolicy, PollPhase, PollState, PollerConfig, PollerHandle, PriceField,
        PricePoller, PriceSnapshot, PriceSource,
    };
    pub use crate::shared::fmt::format_price;

    // Errors
    pub use crate::error::{ApplicationError, HttpError, SmjError, ValidationError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_REFRESH_INTERVAL};

    // Screens
    pub use crate::ui::login::LoginOutcome;
    pub use crate::ui::{
        CardBody, DashboardScreen, DashboardView, LoginScreen, LoginView, Navigator, Notifier,
        PriceCard, Route, Router, Toast, ToastQueue, ToastVariant,
    };

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{AuthClient, PricesClient, SmjClient, SmjClientBuilder};
}
