use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::model::{NewUser, User};

/// Uniform response envelope returned for every outcome, success or failure.
/// All four fields serialize on every path (`null` when absent) so clients
/// see a stable schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub message: String,
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserEnvelope {
    /// Envelope echoing a full record.
    pub fn record(message: impl Into<String>, user: User) -> Self {
        Self {
            message: message.into(),
            id: Some(user.id),
            name: Some(user.name),
            email: Some(user.email),
        }
    }

    /// Envelope for outcomes with no record to echo.
    pub fn empty(message: impl Into<String>, id: Option<Uuid>) -> Self {
        Self {
            message: message.into(),
            id,
            name: None,
            email: None,
        }
    }
}

/// Request body for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserReq {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for renaming a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserReq {
    pub name: String,
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            // absent and empty email fail validation the same way
            email: req.email.unwrap_or_default(),
        }
    }
}
