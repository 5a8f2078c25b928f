use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{ProfileUpdate, UserProfile};
use crate::store::{KeyValueStore, StoreError};
use crate::validation::{OnboardingForm, ProfileForm, ValidationErrors};

/// Key under which the serialized profile is stored.
pub const PROFILE_KEY: &str = "user";

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Failed to save profile: {0}")]
    Store(#[from] StoreError),
}

/// Holds the device's single `UserProfile` and mirrors it to key-value storage.
///
/// Starts from defaults; call `bootstrap` to apply the stored record. Until
/// then readers see the defaults. Every mutation updates memory and notifies
/// subscribers first, then writes the whole record. A failed write is
/// returned to the caller but the in-memory change stays.
pub struct ProfileState {
    state: watch::Sender<UserProfile>,
    storage: Arc<dyn KeyValueStore>,
}

impl ProfileState {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(UserProfile::default());
        Self { state, storage }
    }

    /// Current snapshot.
    pub fn read(&self) -> UserProfile {
        self.state.borrow().clone()
    }

    /// Receiver that observes every later change.
    pub fn subscribe(&self) -> watch::Receiver<UserProfile> {
        self.state.subscribe()
    }

    /// Shallow-merge `update` over the current profile and persist it.
    pub fn update(&self, update: ProfileUpdate) -> Result<UserProfile, StoreError> {
        let mut next = UserProfile::default();
        self.state.send_modify(|current| {
            current.apply(update);
            next = current.clone();
        });
        self.persist(&next)?;
        Ok(next)
    }

    /// Reset to defaults and persist.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.state.send_replace(UserProfile::default());
        self.persist(&UserProfile::default())
    }

    /// Apply the stored profile, if any, as the first update.
    /// Returns whether a stored record was applied; unreadable records are
    /// logged and ignored.
    pub fn bootstrap(&self) -> bool {
        let json = match self.storage.get(PROFILE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                debug!("No stored profile");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored profile");
                return false;
            }
        };

        match serde_json::from_str::<ProfileUpdate>(&json) {
            Ok(stored) => {
                self.state.send_modify(|current| current.apply(stored));
                info!("Stored profile loaded");
                true
            }
            Err(e) => {
                warn!(error = %e, "Stored profile is malformed; keeping defaults");
                false
            }
        }
    }

    /// Validate the onboarding form and, if it passes, log the user in.
    pub fn complete_onboarding(&self, form: &OnboardingForm) -> Result<UserProfile, ProfileError> {
        let update = form.validate()?;
        Ok(self.update(update)?)
    }

    /// Validate the profile editor and save every field from it.
    pub fn save_profile(&self, form: &ProfileForm) -> Result<UserProfile, ProfileError> {
        let update = form.validate()?;
        Ok(self.update(update)?)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        info!("Logging out");
        self.clear()
    }

    fn persist(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile)?;
        self.storage.set(PROFILE_KEY, &json).map_err(|e| {
            warn!(error = %e, "Failed to persist profile");
            e
        })
    }
}
