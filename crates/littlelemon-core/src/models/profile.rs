//! The single user profile and its partial-update form.

use serde::{Deserialize, Deserializer, Serialize};

/// The user record kept on the device.
///
/// Serialized with camelCase keys so the stored JSON reads
/// `{"firstName": ..., "isLoggedIn": ..., "avatar": null, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Masked as `(123) 456-7890`.
    pub phone: String,
    pub is_logged_in: bool,
    pub onboarding_completed: bool,
    /// URI of the chosen avatar image.
    pub avatar: Option<String>,
    pub order_statuses: bool,
    pub password_changes: bool,
    pub special_offers: bool,
    pub newsletter: bool,
}

impl UserProfile {
    /// Shallow-merge: every field present in `update` replaces ours.
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            first_name,
            last_name,
            email,
            phone,
            is_logged_in,
            onboarding_completed,
            avatar,
            order_statuses,
            password_changes,
            special_offers,
            newsletter,
        } = update;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = is_logged_in {
            self.is_logged_in = v;
        }
        if let Some(v) = onboarding_completed {
            self.onboarding_completed = v;
        }
        if let Some(v) = avatar {
            self.avatar = v;
        }
        if let Some(v) = order_statuses {
            self.order_statuses = v;
        }
        if let Some(v) = password_changes {
            self.password_changes = v;
        }
        if let Some(v) = special_offers {
            self.special_offers = v;
        }
        if let Some(v) = newsletter {
            self.newsletter = v;
        }
    }

    /// Copy with `update` merged over it.
    pub fn merged(&self, update: ProfileUpdate) -> Self {
        let mut next = self.clone();
        next.apply(update);
        next
    }

    /// Avatar placeholder letters, e.g. "AL" for Ana Lima, "A" without a last name.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .into_iter()
            .chain(self.last_name.chars().next())
            .collect()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Partial profile: `None` fields are left untouched by `UserProfile::apply`.
///
/// `avatar` is doubly optional so an update can clear it:
/// absent keeps the current avatar, `Some(None)` (JSON `null`) removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_logged_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_completed: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_statuses: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_changes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_offers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<bool>,
}

/// A key that is present maps to `Some`, even when its value is `null`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UserProfile> for ProfileUpdate {
    fn from(p: UserProfile) -> Self {
        Self {
            first_name: Some(p.first_name),
            last_name: Some(p.last_name),
            email: Some(p.email),
            phone: Some(p.phone),
            is_logged_in: Some(p.is_logged_in),
            onboarding_completed: Some(p.onboarding_completed),
            avatar: Some(p.avatar),
            order_statuses: Some(p.order_statuses),
            password_changes: Some(p.password_changes),
            special_offers: Some(p.special_offers),
            newsletter: Some(p.newsletter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserProfile {
        UserProfile {
            first_name: "Tilly".to_string(),
            last_name: "Doe".to_string(),
            email: "tilly@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            is_logged_in: true,
            onboarding_completed: true,
            avatar: Some("file:///avatar.png".to_string()),
            order_statuses: true,
            password_changes: false,
            special_offers: true,
            newsletter: false,
        }
    }

    #[test]
    fn test_apply_replaces_only_present_fields() {
        let before = sample();
        let after = before.merged(ProfileUpdate {
            first_name: Some("Ana".to_string()),
            ..Default::default()
        });

        assert_eq!(after.first_name, "Ana");
        assert_eq!(
            UserProfile {
                first_name: before.first_name.clone(),
                ..after
            },
            before
        );
    }

    #[test]
    fn test_avatar_absent_keeps_null_clears() {
        let kept: ProfileUpdate = serde_json::from_str(r#"{"firstName":"Ana"}"#).unwrap();
        assert_eq!(kept.avatar, None);
        assert!(sample().merged(kept).avatar.is_some());

        let cleared: ProfileUpdate = serde_json::from_str(r#"{"avatar":null}"#).unwrap();
        assert_eq!(cleared.avatar, Some(None));
        assert_eq!(sample().merged(cleared).avatar, None);
    }

    #[test]
    fn test_stored_record_uses_camel_case() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert_eq!(json["firstName"], "");
        assert_eq!(json["isLoggedIn"], false);
        assert_eq!(json["onboardingCompleted"], false);
        assert!(json["avatar"].is_null());
    }

    #[test]
    fn test_full_update_reproduces_profile() {
        let p = sample();
        assert_eq!(UserProfile::default().merged(p.clone().into()), p);
    }

    #[test]
    fn test_initials() {
        assert_eq!(sample().initials(), "TD");
        let no_last = UserProfile {
            first_name: "Ana".to_string(),
            ..Default::default()
        };
        assert_eq!(no_last.initials(), "A");
        assert_eq!(UserProfile::default().initials(), "");
    }
}
