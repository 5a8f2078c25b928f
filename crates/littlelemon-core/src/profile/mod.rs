//! User profile state.
//!
//! `ProfileState` is the one place the running app keeps the user record.
//! It is passed explicitly to whatever needs it; observers subscribe to a
//! `tokio::sync::watch` channel instead of polling.

pub mod state;

pub use state::{ProfileError, ProfileState, PROFILE_KEY};
