//! Auth sub-client: credential check against `LoginVerifyCustomer`.

use crate::auth::{Credentials, LoginResponse};
use crate::client::SmjClient;
use crate::error::{HttpError, SmjError};

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a SmjClient,
}

impl<'a> Auth<'a> {
    /// Validate and submit credentials.
    ///
    /// Invalid input is rejected locally with `SmjError::Validation` and never
    /// reaches the network. Login is never retried.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), SmjError> {
        credentials.validate()?;

        let body = self
            .client
            .http
            .login(credentials, self.client.credential_transport)
            .await?;

        let response =
            LoginResponse::from_value(body).map_err(|e| HttpError::Decode(e.to_string()))?;

        if response.is_success() {
            tracing::info!("Login accepted");
        } else {
            tracing::info!(status = ?response.status, "Login rejected");
        }

        Ok(response.into_result()?)
    }
}
