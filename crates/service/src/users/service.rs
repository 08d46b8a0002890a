use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{info, instrument, warn};

use super::age::select_by_age;
use super::domain::{User, UserCreateRequest, UserId, UserUpdateRequest, USER_CREATED, USER_DELETED, USER_UPDATED};
use super::repository::UserRepository;
use super::validator::{validate_user, UserSettings};
use crate::errors::ServiceError;

pub const CREATE_REQUEST_MISSING: &str = "User cannot be null";
pub const UPDATE_REQUEST_MISSING: &str = "userUpdateRequest is null";
pub const INVALID_AGE_RANGE: &str = "“From” must be less than “To”!";

/// Default lower bound of the age filter.
pub const DEFAULT_AGE_FROM: i32 = 18;
/// Default upper bound of the age filter.
pub const DEFAULT_AGE_TO: i32 = 122;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// User business service independent of web framework
pub struct UserService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
    settings: UserSettings,
    today: fn() -> NaiveDate,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>, settings: UserSettings) -> Self {
        Self { repo, settings, today: local_today }
    }

    /// Replace the source of "today", e.g. to pin the date in tests.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: Option<UserCreateRequest>) -> Result<&'static str, ServiceError> {
        let request = request.ok_or_else(|| ServiceError::invalid(CREATE_REQUEST_MISSING))?;
        let user = validate_user(&*self.repo, &self.settings, request.into(), (self.today)())
            .await
            .map_err(|e| {
                warn!(error = %e, "user_create_rejected");
                e
            })?;
        let created = self.repo.create(user).await?;
        info!(user_id = created.id, "user_created");
        Ok(USER_CREATED)
    }

    /// Full replace: fields missing from the request are validated as absent.
    #[instrument(skip(self, request))]
    pub async fn update_user(&self, id: UserId, request: Option<UserUpdateRequest>) -> Result<&'static str, ServiceError> {
        let request = request.ok_or_else(|| ServiceError::invalid(UPDATE_REQUEST_MISSING))?;
        let existing = self.repo.find_by_id(id).await?.ok_or(ServiceError::NotFound)?;
        let user = validate_user(&*self.repo, &self.settings, request.into(), (self.today)())
            .await
            .map_err(|e| {
                warn!(user_id = id, error = %e, "user_update_rejected");
                e
            })?;
        self.repo.update(existing.id, user).await?;
        info!(user_id = id, "user_updated");
        Ok(USER_UPDATED)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: UserId) -> Result<&'static str, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or(ServiceError::NotFound)?;
        self.repo.delete_by_id(id).await?;
        info!(user_id = id, "user_deleted");
        Ok(USER_DELETED)
    }

    /// Users aged `from..=to` today, oldest birthday first.
    #[instrument(skip(self))]
    pub async fn users_by_age_range(&self, from: i32, to: i32) -> Result<Vec<User>, ServiceError> {
        if from > to {
            return Err(ServiceError::invalid(INVALID_AGE_RANGE));
        }
        let all = self.repo.find_all().await?;
        Ok(select_by_age(all, from, to, (self.today)()))
    }
}
