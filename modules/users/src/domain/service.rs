use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::domain::model::{NewUser, User};
use crate::domain::repo::UserStore;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Domain service holding the validation policy for user management.
/// Depends only on the storage port, not on infra types.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn UserStore>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
        }
    }
}

impl Service {
    pub fn new(store: Arc<dyn UserStore>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Getting user by id");

        let user = self
            .store
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::read_failed(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;
        debug!("Successfully retrieved user");
        Ok(user)
    }

    #[instrument(
        name = "users.service.create_user",
        skip(self),
        fields(user_name = %new_user.name)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        // Validate input before any store call
        self.validate_name(&new_user.name)?;
        self.validate_email(&new_user.email)?;

        let user = self
            .store
            .create(new_user)
            .await
            .map_err(|e| DomainError::write_failed(e.to_string()))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(
        name = "users.service.rename_user",
        skip(self),
        fields(user_id = %id)
    )]
    pub async fn rename_user(&self, id: Uuid, new_name: &str) -> Result<User, DomainError> {
        info!("Renaming user");

        self.validate_name(new_name)?;

        // The store reports no-row-matched itself, so the write is atomic
        // with respect to concurrent renames of the same record.
        let user = self
            .store
            .update_name(id, new_name)
            .await
            .map_err(|e| DomainError::write_failed(e.to_string()))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        info!("Successfully renamed user");
        Ok(user)
    }

    // --- validation helpers ---

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::empty_name());
        }
        if name.len() > self.config.max_name_length {
            return Err(DomainError::name_too_long(
                name.len(),
                self.config.max_name_length,
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if email.is_empty() {
            return Err(DomainError::empty_email());
        }
        if !email.contains('@') || !email.contains('.') {
            return Err(DomainError::invalid_email(email));
        }
        Ok(())
    }
}
