//! Conversions from wire types to domain types for prices.

use super::wire::PriceListResponse;
use super::PriceSnapshot;
use crate::error::ApplicationError;

impl TryFrom<PriceListResponse> for PriceSnapshot {
    type Error = ApplicationError;

    /// An explicit `success: false` is a rejection; every other shape is a
    /// snapshot, with missing prices left as `None`.
    fn try_from(r: PriceListResponse) -> Result<Self, Self::Error> {
        if r.success == Some(false) {
            return Err(ApplicationError::PriceRejected { message: r.message });
        }
        Ok(Self {
            gold_1g: r.gold_1g,
            gold_8g: r.gold_8g,
            silver_1g: r.silver_1g,
            success: r.success,
            message: r.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_false_is_rejected() {
        let resp = PriceListResponse {
            success: Some(false),
            message: Some("Prices not published yet".into()),
            ..Default::default()
        };
        let err = PriceSnapshot::try_from(resp).unwrap_err();
        assert_eq!(err.message(), Some("Prices not published yet"));
    }

    #[test]
    fn test_missing_success_is_accepted() {
        let resp = PriceListResponse {
            gold_1g: Some("6543.21".into()),
            ..Default::default()
        };
        let snap = PriceSnapshot::try_from(resp).unwrap();
        assert_eq!(snap.gold_1g.as_deref(), Some("6543.21"));
        assert!(snap.gold_8g.is_none());
    }
}
