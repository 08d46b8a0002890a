//! Field checks applied on create and update.
//!
//! Checks run in a fixed order (email, first name, last name, birthday) and
//! stop at the first violation, so the order decides which message the
//! caller sees when several fields are wrong.

use chrono::{Months, NaiveDate};
use regex::Regex;
use tracing::debug;

use super::domain::{UserFields, ValidatedUser};
use super::repository::UserRepository;
use crate::errors::ServiceError;

pub const DEFAULT_EMAIL_PATTERN: &str = r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
pub const DEFAULT_MIN_AGE: u32 = 18;

pub const INVALID_EMAIL: &str = "Invalid email!";
pub const FIRST_NAME_REQUIRED: &str = "First name cannot be null!";
pub const LAST_NAME_REQUIRED: &str = "Last name cannot be null!";
pub const INVALID_BIRTHDAY: &str = "Invalid birthday!";

/// Immutable validation settings, built once at startup.
#[derive(Clone, Debug)]
pub struct UserSettings {
    email_pattern: Regex,
    min_age: u32,
}

impl UserSettings {
    /// The pattern must match the whole address, not a substring.
    pub fn new(email_pattern: &str, min_age: u32) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!("^(?:{email_pattern})$"))?;
        Ok(Self { email_pattern: anchored, min_age })
    }

    pub fn from_config(cfg: &configs::UsersConfig) -> Result<Self, regex::Error> {
        Self::new(&cfg.email_regex, cfg.min_age)
    }

    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    pub fn email_matches(&self, email: &str) -> bool {
        self.email_pattern.is_match(email)
    }

    /// Latest birthday that still reaches `min_age` on `today`.
    /// Feb 29 falls back to Feb 28 in non-leap years.
    pub fn latest_allowed_birthday(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.min_age.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Validate `fields` into a working copy ready for a single store write.
///
/// The store is only asked about email uniqueness after the format checks
/// pass. The lookup does not exclude the record being updated.
pub async fn validate_user<R>(
    repo: &R,
    settings: &UserSettings,
    fields: UserFields,
    today: NaiveDate,
) -> Result<ValidatedUser, ServiceError>
where
    R: UserRepository + ?Sized,
{
    let email = match fields.email {
        Some(e) if !e.trim().is_empty() && settings.email_matches(&e) => e,
        _ => return Err(ServiceError::invalid(INVALID_EMAIL)),
    };
    if repo.exists_by_email(&email).await? {
        debug!(%email, "email already taken");
        return Err(ServiceError::invalid(INVALID_EMAIL));
    }

    // whitespace-only names are accepted
    let first_name = match fields.first_name {
        Some(n) if !n.is_empty() => n,
        _ => return Err(ServiceError::invalid(FIRST_NAME_REQUIRED)),
    };
    let last_name = match fields.last_name {
        Some(n) if !n.is_empty() => n,
        _ => return Err(ServiceError::invalid(LAST_NAME_REQUIRED)),
    };

    let birthday = fields.birthday.ok_or_else(|| ServiceError::invalid(INVALID_BIRTHDAY))?;
    if birthday > settings.latest_allowed_birthday(today) {
        return Err(ServiceError::InvalidRequest(format!("User must be {}!", settings.min_age)));
    }

    Ok(ValidatedUser {
        email,
        first_name,
        last_name,
        birthday,
        address: fields.address,
        phone: fields.phone,
    })
}
