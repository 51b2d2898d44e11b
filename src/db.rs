use scylla::transport::errors::{NewSessionError, QueryError};
use scylla::{Session, SessionBuilder};

const SCHEMA: [&str; 3] = [
    "CREATE KEYSPACE IF NOT EXISTS chirpy \
     WITH replication = {'class': 'SimpleStrategy', 'replication_factor': 1}",
    "CREATE TABLE IF NOT EXISTS chirpy.users (\
     id uuid PRIMARY KEY, \
     email text, \
     created_at timestamp, \
     updated_at timestamp)",
    "CREATE TABLE IF NOT EXISTS chirpy.chirps (\
     id uuid PRIMARY KEY, \
     body text, \
     user_id uuid, \
     created_at timestamp, \
     updated_at timestamp)",
];

pub async fn create_session(node: &str) -> Result<Session, NewSessionError> {
    SessionBuilder::new().known_node(node).build().await
}

/// Create the keyspace and tables if they are not there yet.
pub async fn ensure_schema(session: &Session) -> Result<(), QueryError> {
    for statement in SCHEMA {
        session.query(statement, ()).await?;
    }
    Ok(())
}
