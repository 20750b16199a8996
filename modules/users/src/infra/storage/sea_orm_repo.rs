//! SeaORM-backed implementation of the storage port.
//!
//! Generic over `C: ConnectionTrait`, so it can be constructed with a
//! `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, Set};
use uuid::Uuid;

use crate::domain::model::{NewUser, User};
use crate::domain::repo::UserStore;
use crate::infra::storage::entity::{ActiveModel as UserAM, Entity as UserEntity};
use crate::infra::storage::mapper::entity_to_domain;

/// SeaORM store impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUserStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUserStore<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UserStore for SeaOrmUserStore<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn create(&self, new_user: NewUser) -> anyhow::Result<User> {
        let now = Utc::now();
        let m = UserAM {
            id: Set(Uuid::new_v4()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let inserted = m.insert(&self.conn).await.context("insert failed")?;
        Ok(entity_to_domain(inserted))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(entity_to_domain))
    }

    async fn update_name(&self, id: Uuid, name: &str) -> anyhow::Result<Option<User>> {
        // Single statement: update the matched row and return it, so the
        // existence check and the write cannot interleave with other writers.
        let m = UserAM {
            id: Set(id),
            name: Set(name.to_string()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        match m.update(&self.conn).await {
            Ok(updated) => Ok(Some(entity_to_domain(updated))),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e).context("update_name failed"),
        }
    }
}
