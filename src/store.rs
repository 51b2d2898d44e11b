//! Persistence boundary for users and chirps.
//!
//! Handlers only see [`ChirpStore`]; the Scylla adapter is the production
//! implementation and [`memory::MemoryStore`] backs the test suite.

use async_trait::async_trait;
use scylla::transport::errors::QueryError;
use uuid::Uuid;

use crate::models::{Chirp, User};

#[cfg(test)]
pub mod memory;
pub mod scylla_store;

pub use scylla_store::ScyllaStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("chirp {0} not found")]
    NotFound(Uuid),

    #[error("user {0} does not exist")]
    UnknownAuthor(Uuid),

    #[error("query failed: {0}")]
    Query(#[from] QueryError),

    #[error("malformed row in {table}")]
    MalformedRow { table: &'static str },
}

#[async_trait]
pub trait ChirpStore: Send + Sync {
    /// Insert a user; the store assigns the id and both timestamps.
    async fn create_user(&self, email: &str) -> Result<User, StoreError>;

    /// Insert a chirp whose body has already been moderated.
    async fn create_chirp(&self, body: &str, author_id: Uuid) -> Result<Chirp, StoreError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Chirp, StoreError>;

    /// Every chirp, oldest first.
    async fn list_chirps(&self) -> Result<Vec<Chirp>, StoreError>;

    /// Remove every user. Chirps are left in place.
    async fn delete_all_users(&self) -> Result<(), StoreError>;
}
