use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::domain::model::{NewUser, User};
use crate::domain::repo::UserStore;

/// In-memory implementation of the storage port.
///
/// One long-lived mutex guards the whole map; every read-modify-write runs
/// inside it. The lock is scoped tightly around map access and is never held
/// across an await or while encoding a response.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, new_user: NewUser) -> anyhow::Result<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            created_at: now,
            updated_at: now,
        };

        {
            let mut users = self.users.lock();
            users.insert(user.id, user.clone());
        }

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn update_name(&self, id: Uuid, name: &str) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock();
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        user.name = name.to_string();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = InMemoryUserStore::new();

        let a = store
            .create(new_user("Alice", "alice@example.com"))
            .await
            .unwrap();
        let b = store
            .create(new_user("Bob", "bob@example.com"))
            .await
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn find_returns_created_record() {
        let store = InMemoryUserStore::new();

        let created = store
            .create(new_user("Alice", "alice@example.com"))
            .await
            .unwrap();
        let found = store.find_by_id(created.id).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn find_of_unknown_id_is_none() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_name_replaces_only_the_name() {
        let store = InMemoryUserStore::new();

        let created = store
            .create(new_user("Alice", "alice@example.com"))
            .await
            .unwrap();
        let updated = store
            .update_name(created.id, "Alicia")
            .await
            .unwrap()
            .expect("record exists");

        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.created_at, created.created_at);

        let found = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Alicia");
    }

    #[tokio::test]
    async fn update_name_of_unknown_id_is_none_and_inserts_nothing() {
        let store = InMemoryUserStore::new();

        let result = store.update_name(Uuid::new_v4(), "Ghost").await.unwrap();

        assert_eq!(result, None);
        assert!(store.is_empty());
    }
}
