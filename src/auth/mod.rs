//! Authentication: credential validation and the login wire types.
//!
//! ## Security Model
//!
//! - There is no session. A successful login only unlocks navigation to the
//!   dashboard; no token is issued, stored, or checked.
//! - [`Credentials`] are transient: built from form input, consumed by one login
//!   attempt, never persisted. `Debug` output redacts the password and nothing in
//!   this crate logs either field.
//! - By default the credentials travel in a form-encoded POST body over HTTPS
//!   ([`CredentialTransport::FormBody`]). The legacy query-string transport is
//!   kept for servers that only read `$_GET`.

#[cfg(feature = "http")]
pub mod client;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{ApplicationError, SmjError, ValidationError};
use crate::shared::serde_util::{is_truthy, string_or_number};

/// Required length of a mobile number.
pub const MOBILE_NUMBER_LEN: usize = 10;

// ============================================================================
// Credentials + validation
// ============================================================================

/// Login input. Validated with [`validate`] before any network call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub mobile_number: String,
    pub password: String,
}

impl Credentials {
    pub fn new(mobile_number: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mobile_number: mobile_number.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.mobile_number, &self.password)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("mobile_number", &self.mobile_number)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Check login input. Reports only the first failing check, in the order
/// mobile presence → mobile format → password presence.
pub fn validate(mobile_number: &str, password: &str) -> Result<(), ValidationError> {
    let mobile = mobile_number.trim();
    if mobile.is_empty() {
        return Err(ValidationError::MissingMobile);
    }
    if mobile.len() != MOBILE_NUMBER_LEN || !mobile.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidMobileFormat);
    }
    if password.trim().is_empty() {
        return Err(ValidationError::MissingPassword);
    }
    Ok(())
}

/// Reduce raw keyboard input to what the mobile field accepts: ASCII digits only,
/// at most ten of them.
pub fn sanitize_mobile_input(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MOBILE_NUMBER_LEN)
        .collect()
}

// ============================================================================
// Transport + authenticator seam
// ============================================================================

/// How credentials are sent to the login endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialTransport {
    /// `POST ?option=LoginVerifyCustomer` with an urlencoded form body.
    #[default]
    FormBody,
    /// `GET` with `mobileNumber` and `password` in the query string.
    Query,
}

/// Something that can check credentials against the login service.
///
/// Implemented by [`crate::client::SmjClient`]; the login screen only sees this
/// trait.
pub trait Authenticator {
    /// `Ok(())` when the service accepts the credentials.
    ///
    /// Rejections are `SmjError::Application(ApplicationError::LoginRejected)`;
    /// transport failures are `SmjError::Http`.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<(), SmjError>> + Send;
}

// ============================================================================
// Wire types
// ============================================================================

/// Login response body.
///
/// The service is loosely typed: success is either `status == "success"` or a
/// truthy `success` field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub success: Option<serde_json::Value>,
    #[serde(default, with = "string_or_number")]
    pub message: Option<String>,
}

impl LoginResponse {
    /// Interpret an arbitrary JSON body.
    ///
    /// `null` is not a response at all and fails decoding; any other non-object
    /// body carries no success marker and reads as a rejection.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match value {
            serde_json::Value::Object(_) => serde_json::from_value(value),
            serde_json::Value::Null => {
                Err(serde::de::Error::custom("login response body is null"))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
            || self.success.as_ref().is_some_and(is_truthy)
    }

    pub fn into_result(self) -> Result<(), ApplicationError> {
        if self.is_success() {
            Ok(())
        } else {
            Err(ApplicationError::LoginRejected {
                message: self.message,
            })
        }
    }
}
