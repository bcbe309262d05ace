//! Wire types for the `PriceListToday` response.

use crate::shared::serde_util::string_or_number;
use serde::{Deserialize, Serialize};

/// REST response for today's price list.
///
/// Field names are the service's own and must not change on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceListResponse {
    #[serde(
        rename = "1gramPrice",
        default,
        with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gold_1g: Option<String>,
    #[serde(
        rename = "8gramPrice",
        default,
        with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub gold_8g: Option<String>,
    #[serde(
        rename = "1silverPrice",
        default,
        with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub silver_1g: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(
        default,
        with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

impl PriceListResponse {
    /// Decode a response body. Anything other than a JSON object is rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde::de::Error::custom(format!(
                "expected a price list object, got {}",
                value
            )));
        }
        serde_json::from_value(value)
    }
}
