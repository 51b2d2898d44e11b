use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use log::debug;
use scylla::frame::response::result::{CqlValue, Row};
use scylla::frame::value::CqlTimestamp;
use scylla::Session;
use uuid::Uuid;

use super::{ChirpStore, StoreError};
use crate::models::{Chirp, User};

const CHIRP_COLUMNS: &str = "id, body, user_id, created_at, updated_at";

/// [`ChirpStore`] backed by the `chirpy` keyspace.
#[derive(Clone)]
pub struct ScyllaStore {
    session: Arc<Session>,
}

impl ScyllaStore {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    async fn user_exists(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = self
            .session
            .query("SELECT id FROM chirpy.users WHERE id = ?", (id,))
            .await?;

        Ok(result.rows.is_some_and(|rows| !rows.is_empty()))
    }
}

#[async_trait]
impl ChirpStore for ScyllaStore {
    async fn create_user(&self, email: &str) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        let (now, timestamp) = now();

        self.session
            .query(
                "INSERT INTO chirpy.users (id, email, created_at, updated_at) VALUES (?, ?, ?, ?)",
                (id, email, timestamp, timestamp),
            )
            .await?;

        Ok(User {
            id,
            created_at: now,
            updated_at: now,
            email: email.to_string(),
        })
    }

    async fn create_chirp(&self, body: &str, author_id: Uuid) -> Result<Chirp, StoreError> {
        if !self.user_exists(author_id).await? {
            return Err(StoreError::UnknownAuthor(author_id));
        }

        let id = Uuid::new_v4();
        let (now, timestamp) = now();

        self.session
            .query(
                format!("INSERT INTO chirpy.chirps ({CHIRP_COLUMNS}) VALUES (?, ?, ?, ?, ?)"),
                (id, body, author_id, timestamp, timestamp),
            )
            .await?;

        Ok(Chirp {
            id,
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id: author_id,
        })
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Chirp, StoreError> {
        let result = self
            .session
            .query(
                format!("SELECT {CHIRP_COLUMNS} FROM chirpy.chirps WHERE id = ?"),
                (id,),
            )
            .await?;

        match result.rows.unwrap_or_default().into_iter().next() {
            Some(row) => chirp_from_row(row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn list_chirps(&self) -> Result<Vec<Chirp>, StoreError> {
        let result = self
            .session
            .query(format!("SELECT {CHIRP_COLUMNS} FROM chirpy.chirps"), ())
            .await?;

        let mut chirps = result
            .rows
            .unwrap_or_default()
            .into_iter()
            .map(chirp_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        sort_oldest_first(&mut chirps);

        debug!("Loaded {} chirps", chirps.len());
        Ok(chirps)
    }

    async fn delete_all_users(&self) -> Result<(), StoreError> {
        self.session.query("TRUNCATE chirpy.users", ()).await?;
        Ok(())
    }
}

/// Chirps from the same millisecond fall back to id order so scans are stable.
fn sort_oldest_first(chirps: &mut [Chirp]) {
    chirps.sort_by_key(|chirp| (chirp.created_at, chirp.id));
}

/// Current time truncated to the millisecond precision Scylla stores.
fn now() -> (DateTime<Utc>, CqlTimestamp) {
    let now = Utc::now().trunc_subsecs(3);
    (now, CqlTimestamp(now.timestamp_millis()))
}

fn chirp_from_row(row: Row) -> Result<Chirp, StoreError> {
    let malformed = || StoreError::MalformedRow { table: "chirps" };
    let mut columns = row.columns.into_iter();

    match (
        columns.next().flatten(),
        columns.next().flatten(),
        columns.next().flatten(),
        columns.next().flatten(),
        columns.next().flatten(),
    ) {
        (
            Some(CqlValue::Uuid(id)),
            Some(CqlValue::Text(body)),
            Some(CqlValue::Uuid(user_id)),
            Some(CqlValue::Timestamp(created_at)),
            Some(CqlValue::Timestamp(updated_at)),
        ) => Ok(Chirp {
            id,
            created_at: timestamp_to_datetime(created_at).ok_or_else(malformed)?,
            updated_at: timestamp_to_datetime(updated_at).ok_or_else(malformed)?,
            body,
            user_id,
        }),
        _ => Err(malformed()),
    }
}

fn timestamp_to_datetime(timestamp: CqlTimestamp) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(timestamp.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(columns: Vec<Option<CqlValue>>) -> Row {
        Row { columns }
    }

    #[test]
    fn decodes_complete_chirp_row() {
        let id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let millis = 1_700_000_000_123;

        let chirp = chirp_from_row(row(vec![
            Some(CqlValue::Uuid(id)),
            Some(CqlValue::Text("hello".to_string())),
            Some(CqlValue::Uuid(user_id)),
            Some(CqlValue::Timestamp(CqlTimestamp(millis))),
            Some(CqlValue::Timestamp(CqlTimestamp(millis))),
        ]))
        .expect("row decodes");

        assert_eq!(chirp.id, id);
        assert_eq!(chirp.user_id, user_id);
        assert_eq!(chirp.body, "hello");
        assert_eq!(chirp.created_at.timestamp_millis(), millis);
    }

    #[test]
    fn rejects_rows_with_missing_columns() {
        let result = chirp_from_row(row(vec![
            Some(CqlValue::Uuid(Uuid::new_v4())),
            None,
            Some(CqlValue::Uuid(Uuid::new_v4())),
        ]));

        assert!(matches!(
            result,
            Err(StoreError::MalformedRow { table: "chirps" })
        ));
    }

    #[test]
    fn same_millisecond_chirps_sort_by_id() {
        let at = DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000).expect("timestamp");
        let earlier = DateTime::<Utc>::from_timestamp_millis(1_699_999_999_999).expect("timestamp");
        let chirp = |id: u128, created_at| Chirp {
            id: Uuid::from_u128(id),
            created_at,
            updated_at: created_at,
            body: "hello".to_string(),
            user_id: Uuid::nil(),
        };
        let mut chirps = vec![chirp(3, at), chirp(1, at), chirp(9, earlier), chirp(2, at)];

        sort_oldest_first(&mut chirps);
        let first_run: Vec<Uuid> = chirps.iter().map(|c| c.id).collect();
        chirps.reverse();
        sort_oldest_first(&mut chirps);
        let second_run: Vec<Uuid> = chirps.iter().map(|c| c.id).collect();

        assert_eq!(
            first_run,
            [9, 1, 2, 3].map(Uuid::from_u128).to_vec()
        );
        assert_eq!(first_run, second_run);
    }

    #[test]
    fn now_has_millisecond_precision() {
        let (now, timestamp) = now();
        assert_eq!(timestamp_to_datetime(timestamp), Some(now));
    }
}
