//! Data models for Little Lemon.
//!
//! - `MenuDocument`, `RemoteMenuItem`: the remote menu as fetched
//! - `MenuItem`: a row of the local menu table
//! - `Category`: the fixed set of menu categories
//! - `UserProfile`, `ProfileUpdate`: the device's user record and its partial form

pub mod menu;
pub mod profile;

pub use menu::{Category, MenuDocument, MenuItem, RemoteMenuItem};
pub use profile::{ProfileUpdate, UserProfile};
