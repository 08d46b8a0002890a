use thiserror::Error;

pub const USER_NOT_FOUND: &str = "User with such credentials is not found";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Client input fault; the message is shown to the caller as-is.
    #[error("{0}")]
    InvalidRequest(String),
    #[error("User with such credentials is not found")]
    NotFound,
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }
}
