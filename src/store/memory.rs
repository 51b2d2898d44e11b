use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ChirpStore, StoreError};
use crate::models::{Chirp, User};

/// In-process [`ChirpStore`] used by the HTTP tests.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    chirps: RwLock<Vec<Chirp>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn chirp_count(&self) -> usize {
        self.chirps.read().await.len()
    }
}

#[async_trait]
impl ChirpStore for MemoryStore {
    async fn create_user(&self, email: &str) -> Result<User, StoreError> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
        };
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn create_chirp(&self, body: &str, author_id: Uuid) -> Result<Chirp, StoreError> {
        if !self.users.read().await.contains_key(&author_id) {
            return Err(StoreError::UnknownAuthor(author_id));
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id: author_id,
        };
        self.chirps.write().await.push(chirp.clone());
        Ok(chirp)
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Chirp, StoreError> {
        self.chirps
            .read()
            .await
            .iter()
            .find(|chirp| chirp.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn list_chirps(&self) -> Result<Vec<Chirp>, StoreError> {
        let mut chirps = self.chirps.read().await.clone();
        chirps.sort_by_key(|chirp| chirp.created_at);
        Ok(chirps)
    }

    async fn delete_all_users(&self) -> Result<(), StoreError> {
        self.users.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_identity_and_timestamps() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com").await.expect("user");

        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.created_at, user.updated_at);
        assert_ne!(user.id, Uuid::nil());
    }

    #[tokio::test]
    async fn rejects_chirp_from_unknown_author() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();

        let result = store.create_chirp("hello", author).await;

        assert!(matches!(result, Err(StoreError::UnknownAuthor(id)) if id == author));
        assert_eq!(store.chirp_count().await, 0);
    }

    #[tokio::test]
    async fn missing_chirp_is_not_found() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();

        assert!(matches!(
            store.get_chirp(id).await,
            Err(StoreError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn delete_all_users_keeps_chirps_and_is_idempotent() {
        let store = MemoryStore::new();
        let user = store.create_user("a@example.com").await.expect("user");
        store.create_chirp("hello", user.id).await.expect("chirp");

        store.delete_all_users().await.expect("first delete");
        store.delete_all_users().await.expect("second delete");

        assert_eq!(store.user_count().await, 0);
        assert_eq!(store.list_chirps().await.expect("list").len(), 1);
    }
}
