//! High-level client: `SmjClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client (`auth/client.rs`,
//! `domain/price/client.rs`). This module keeps the builder and the trait
//! impls that let the screens use a real client.

use std::future::Future;
use std::time::Duration;

use crate::auth::client::Auth;
use crate::auth::{Authenticator, CredentialTransport, Credentials};
use crate::domain::price::client::Prices;
use crate::domain::price::{PriceSnapshot, PriceSource};
use crate::error::SmjError;
use crate::http::SmjHttp;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::price::client::Prices as PricesClient;

/// The primary entry point for the SMJ service.
///
/// Provides nested sub-client accessors: `client.auth()`, `client.prices()`.
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct SmjClient {
    pub(crate) http: SmjHttp,
    pub(crate) credential_transport: CredentialTransport,
}

impl SmjClient {
    pub fn builder() -> SmjClientBuilder {
        SmjClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn credential_transport(&self) -> CredentialTransport {
        self.credential_transport
    }
}

impl Authenticator for SmjClient {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<(), SmjError>> + Send {
        async move { self.auth().login(credentials).await }
    }
}

impl PriceSource for SmjClient {
    fn fetch_prices(&self) -> impl Future<Output = Result<PriceSnapshot, SmjError>> + Send {
        async move { self.prices().today().await }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct SmjClientBuilder {
    base_url: String,
    timeout: Duration,
    credential_transport: CredentialTransport,
}

impl Default for SmjClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: crate::network::DEFAULT_TIMEOUT,
            credential_transport: CredentialTransport::default(),
        }
    }
}

impl SmjClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How login credentials are sent. Defaults to a form-encoded POST body.
    pub fn credential_transport(mut self, transport: CredentialTransport) -> Self {
        self.credential_transport = transport;
        self
    }

    pub fn build(self) -> Result<SmjClient, SmjError> {
        if self.credential_transport == CredentialTransport::Query {
            tracing::warn!("Login credentials will be sent in the URL query string");
        }
        Ok(SmjClient {
            http: SmjHttp::new(&self.base_url, self.timeout)?,
            credential_transport: self.credential_transport,
        })
    }
}
