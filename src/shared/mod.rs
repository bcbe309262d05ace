//! Shared utilities used across domain modules.

pub mod fmt;
pub mod serde_util;

pub use fmt::{format_price, parse_price};
