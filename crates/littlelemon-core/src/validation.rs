//! Onboarding and profile form validation.
//!
//! Failures are values carrying the message shown to the user, never errors
//! that abort a flow.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::models::{ProfileUpdate, UserProfile};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").expect("valid email regex"));

/// The masked input format, e.g. `(123) 456-7890`.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("valid phone regex"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter your {0}.")]
    Missing(&'static str),

    #[error("Please enter your email address.")]
    MissingEmail,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please enter your phone number.")]
    MissingPhone,

    #[error("Please enter a valid phone number.")]
    InvalidPhone,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Any non-empty value; `field` names it in the message ("first name").
pub fn check_required(value: &str, field: &'static str) -> Result<(), FieldError> {
    if value.is_empty() {
        Err(FieldError::Missing(field))
    } else {
        Ok(())
    }
}

pub fn check_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        Err(FieldError::MissingEmail)
    } else if !is_valid_email(email) {
        Err(FieldError::InvalidEmail)
    } else {
        Ok(())
    }
}

pub fn check_phone(phone: &str) -> Result<(), FieldError> {
    if phone.is_empty() {
        Err(FieldError::MissingPhone)
    } else if !is_valid_phone(phone) {
        Err(FieldError::InvalidPhone)
    } else {
        Ok(())
    }
}

/// Every problem found in a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn collect(checks: impl IntoIterator<Item = Result<(), FieldError>>) -> Result<(), Self> {
        let errors: Vec<FieldError> = checks.into_iter().filter_map(Result::err).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.0.contains(error)
    }
}

/// One message per line.
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// First-run form: just enough to greet the user and reach them.
#[derive(Debug, Clone, Default)]
pub struct OnboardingForm {
    pub first_name: String,
    pub email: String,
}

impl OnboardingForm {
    /// The update that completes onboarding and logs the user in.
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        ValidationErrors::collect([
            check_required(&self.first_name, "first name"),
            check_email(&self.email),
        ])?;

        Ok(ProfileUpdate {
            first_name: Some(self.first_name.clone()),
            last_name: Some(String::new()),
            email: Some(self.email.clone()),
            onboarding_completed: Some(true),
            is_logged_in: Some(true),
            ..Default::default()
        })
    }
}

/// The full profile editor.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub avatar: Option<String>,
    pub order_statuses: bool,
    pub password_changes: bool,
    pub special_offers: bool,
    pub newsletter: bool,
}

/// Editor fields filled from the current profile, e.g. to discard unsaved edits.
impl From<&UserProfile> for ProfileForm {
    fn from(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            avatar: profile.avatar.clone(),
            order_statuses: profile.order_statuses,
            password_changes: profile.password_changes,
            special_offers: profile.special_offers,
            newsletter: profile.newsletter,
        }
    }
}

impl ProfileForm {
    pub fn validate(&self) -> Result<ProfileUpdate, ValidationErrors> {
        ValidationErrors::collect([
            check_required(&self.first_name, "first name"),
            check_required(&self.last_name, "last name"),
            check_email(&self.email),
            check_phone(&self.phone),
        ])?;

        Ok(ProfileUpdate {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            avatar: Some(self.avatar.clone()),
            order_statuses: Some(self.order_statuses),
            password_changes: Some(self.password_changes),
            special_offers: Some(self.special_offers),
            newsletter: Some(self.newsletter),
            is_logged_in: Some(true),
            ..Default::default()
        })
    }
}
