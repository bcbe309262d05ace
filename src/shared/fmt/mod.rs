//! Display formatting helpers.

pub mod num;

pub use num::{format_price, parse_price};
