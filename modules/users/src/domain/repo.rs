use crate::domain::model::{NewUser, User};
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: the storage operations user flows need.
/// Object-safe and async-friendly via `async_trait`.
///
/// The store is the single authority on identifier assignment; callers never
/// pick ids, which rules out check-then-insert races on creation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new record under a freshly generated identifier and return
    /// it. On error no partial record is visible.
    async fn create(&self, new_user: NewUser) -> anyhow::Result<User>;

    /// Load a user by id. `Ok(None)` means no such record, distinct from a
    /// backend failure.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Atomically replace the name (and `updated_at`) of an existing record
    /// and return the updated record. `Ok(None)` means no record matched.
    async fn update_name(&self, id: Uuid, name: &str) -> anyhow::Result<Option<User>>;
}
