use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("user not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("name field is required")]
    EmptyName,

    #[error("name too long: {len} characters (max: {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("email field is required")]
    EmptyEmail,

    #[error("invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("storage read failed: {message}")]
    ReadFailed { message: String },

    #[error("storage write failed: {message}")]
    WriteFailed { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn empty_name() -> Self {
        Self::EmptyName
    }

    pub fn name_too_long(len: usize, max: usize) -> Self {
        Self::NameTooLong { len, max }
    }

    pub fn empty_email() -> Self {
        Self::EmptyEmail
    }

    pub fn invalid_email(email: impl Into<String>) -> Self {
        Self::InvalidEmail {
            email: email.into(),
        }
    }

    pub fn read_failed(message: impl Into<String>) -> Self {
        Self::ReadFailed {
            message: message.into(),
        }
    }

    pub fn write_failed(message: impl Into<String>) -> Self {
        Self::WriteFailed {
            message: message.into(),
        }
    }
}
