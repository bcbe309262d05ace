//! Price domain: today's gold/silver snapshot, polling state, poller.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod poller;
pub mod state;
pub mod wire;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::SmjError;
use crate::shared::fmt::num::{format_price, parse_price};

pub use poller::{PollerConfig, PollerHandle, PricePoller};
pub use state::{Completion, FetchTicket, OverlapPolicy, PollPhase, PollState, SharedPollState};

/// One of the three prices shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Gold1g,
    Gold8g,
    Silver1g,
}

impl PriceField {
    /// All fields, in display order.
    pub const ALL: [PriceField; 3] = [Self::Gold1g, Self::Gold8g, Self::Silver1g];

    /// Key used by the price service.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::Gold1g => "1gramPrice",
            Self::Gold8g => "8gramPrice",
            Self::Silver1g => "1silverPrice",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Gold1g => "Gold (1g)",
            Self::Gold8g => "Gold (8g)",
            Self::Silver1g => "Silver (1g)",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Self::Gold1g | Self::Silver1g => "Per gram",
            Self::Gold8g => "8 grams total",
        }
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// The latest successfully fetched price list. Replaced wholesale on each poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub gold_1g: Option<String>,
    pub gold_8g: Option<String>,
    pub silver_1g: Option<String>,
    pub success: Option<bool>,
    pub message: Option<String>,
}

impl PriceSnapshot {
    /// Raw field as sent by the service.
    pub fn raw(&self, field: PriceField) -> Option<&str> {
        match field {
            PriceField::Gold1g => self.gold_1g.as_deref(),
            PriceField::Gold8g => self.gold_8g.as_deref(),
            PriceField::Silver1g => self.silver_1g.as_deref(),
        }
    }

    /// Parsed value. `None` means absent or unparseable; `Some(0.0)` is a real zero.
    pub fn value(&self, field: PriceField) -> Option<f64> {
        parse_price(self.raw(field))
    }

    /// Display string, `"N/A"` when the value is unusable.
    pub fn formatted(&self, field: PriceField) -> String {
        format_price(self.raw(field))
    }
}

/// Anything that can produce a fresh [`PriceSnapshot`].
///
/// Implemented by [`crate::client::SmjClient`]; the poller only sees this trait.
pub trait PriceSource {
    fn fetch_prices(&self) -> impl Future<Output = Result<PriceSnapshot, SmjError>> + Send;
}
