//! Prices sub-client: today's price list.

use crate::client::SmjClient;
use crate::domain::price::wire::PriceListResponse;
use crate::domain::price::PriceSnapshot;
use crate::error::{HttpError, SmjError};

/// Sub-client for price operations.
pub struct Prices<'a> {
    pub(crate) client: &'a SmjClient,
}

impl<'a> Prices<'a> {
    /// Fetch today's price list.
    ///
    /// Fields the service omits stay `None`. An explicit `success: false` is
    /// returned as `SmjError::Application`.
    pub async fn today(&self) -> Result<PriceSnapshot, SmjError> {
        let body = self.client.http.price_list_today().await?;

        let resp =
            PriceListResponse::from_value(body).map_err(|e| HttpError::Decode(e.to_string()))?;

        Ok(PriceSnapshot::try_from(resp)?)
    }
}
