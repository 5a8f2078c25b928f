//! Display formatting helpers.

pub mod format;

pub use format::{format_price, mask_phone, truncate_description};
