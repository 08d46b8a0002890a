use chrono::NaiveDate;
use common::utils::date_format;
use serde::{Deserialize, Serialize};

/// Store-assigned user identifier.
pub type UserId = i64;

pub const USER_CREATED: &str = "User was created successfully";
pub const USER_UPDATED: &str = "User was updated successfully";
pub const USER_DELETED: &str = "User was deleted successfully";

/// Embedded postal address. No field is validated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub country: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub house_number: Option<i64>,
    pub apartment_number: Option<i64>,
}

/// A persisted user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "date_format")]
    pub birthday: NaiveDate,
    pub address: Address,
    pub phone: Option<String>,
}

/// Working copy that passed validation and may be handed to the store.
///
/// Only the validator builds these, so a repository never sees an
/// unchecked record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedUser {
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) birthday: NaiveDate,
    pub(crate) address: Address,
    pub(crate) phone: Option<String>,
}

impl ValidatedUser {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }

    /// Attach a store identifier.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            birthday: self.birthday,
            address: self.address,
            phone: self.phone,
        }
    }
}

/// Body of `POST /users`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house_number: Option<i64>,
    #[serde(default)]
    pub apartment_number: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Body of `PATCH /users/{id}`. Every field replaces the stored one,
/// including fields left out of the body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, with = "date_format::option")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house_number: Option<i64>,
    #[serde(default)]
    pub apartment_number: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Candidate values fed to the validator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFields {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub address: Address,
    pub phone: Option<String>,
}

impl From<UserCreateRequest> for UserFields {
    fn from(r: UserCreateRequest) -> Self {
        Self {
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
            birthday: r.birthday,
            address: Address {
                country: r.country,
                city: r.city,
                street: r.street,
                house_number: r.house_number,
                apartment_number: r.apartment_number,
            },
            phone: r.phone,
        }
    }
}

impl From<UserUpdateRequest> for UserFields {
    fn from(r: UserUpdateRequest) -> Self {
        Self {
            email: r.email,
            first_name: r.first_name,
            last_name: r.last_name,
            birthday: r.birthday,
            address: Address {
                country: r.country,
                city: r.city,
                street: r.street,
                house_number: r.house_number,
                apartment_number: r.apartment_number,
            },
            phone: r.phone,
        }
    }
}

impl UserCreateRequest {
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}

impl UserUpdateRequest {
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
}
