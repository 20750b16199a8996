use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{CreateUserReq, UpdateUserReq, UserEnvelope};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

type EnvelopeResponse = (StatusCode, Json<UserEnvelope>);

/// Get a specific user by id
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> EnvelopeResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    info!("Getting user with id: {}", id);

    match svc.get_user(id).await {
        Ok(user) => (
            StatusCode::OK,
            Json(UserEnvelope::record("user exists", user)),
        ),
        Err(DomainError::UserNotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(UserEnvelope::empty("not found", Some(id))),
        ),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            (
                status_for(&e),
                Json(UserEnvelope::empty(e.to_string(), Some(id))),
            )
        }
    }
}

/// Create a new user
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<CreateUserReq>, JsonRejection>,
) -> EnvelopeResponse {
    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(UserEnvelope::empty(rejection.body_text(), None)),
            )
        }
    };
    info!("Creating user: {}", req.name);

    match svc.create_user(req.into()).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(UserEnvelope::record("user created", user)),
        ),
        Err(e) => {
            error!("Failed to create user: {}", e);
            (status_for(&e), Json(UserEnvelope::empty(e.to_string(), None)))
        }
    }
}

/// Update an existing user's name
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserReq>, JsonRejection>,
) -> EnvelopeResponse {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    // Existence probe comes first: an unknown id is 404 no matter what the
    // body looks like.
    if let Err(e) = svc.get_user(id).await {
        return match e {
            DomainError::UserNotFound { .. } => (
                StatusCode::NOT_FOUND,
                Json(UserEnvelope::empty("user not found", Some(id))),
            ),
            other => {
                error!("Failed to probe user {}: {}", id, other);
                (
                    status_for(&other),
                    Json(UserEnvelope::empty(other.to_string(), Some(id))),
                )
            }
        };
    }

    let Json(req) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(UserEnvelope::empty(rejection.body_text(), Some(id))),
            )
        }
    };
    info!("Updating user {} with name: {}", id, req.name);

    match svc.rename_user(id, &req.name).await {
        Ok(user) => (
            StatusCode::OK,
            Json(UserEnvelope::record("user data changed", user)),
        ),
        Err(DomainError::UserNotFound { .. }) => (
            StatusCode::NOT_FOUND,
            Json(UserEnvelope::empty("user not found", Some(id))),
        ),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            (
                status_for(&e),
                Json(UserEnvelope::empty(e.to_string(), Some(id))),
            )
        }
    }
}

fn parse_id(raw: &str) -> Result<Uuid, EnvelopeResponse> {
    Uuid::parse_str(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(UserEnvelope::empty(format!("invalid user id: {e}"), None)),
        )
    })
}

/// Map domain errors to HTTP status codes
fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::UserNotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::EmptyName
        | DomainError::NameTooLong { .. }
        | DomainError::EmptyEmail
        | DomainError::InvalidEmail { .. } => StatusCode::BAD_REQUEST,
        DomainError::ReadFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::WriteFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}
