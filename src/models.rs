use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::moderation::Moderated;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateChirpRequest {
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateChirpRequest {
    pub body: String,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateChirpResponse {
    pub valid: bool,
    pub error: String,
    pub cleaned_body: String,
}

impl From<Moderated> for ValidateChirpResponse {
    fn from(moderated: Moderated) -> Self {
        Self {
            valid: moderated.verdict.is_valid(),
            error: moderated.verdict.error_message().to_string(),
            cleaned_body: moderated.body,
        }
    }
}

/// Payload of `POST /api/chirps`.
///
/// Rejected chirps were never stored, so only the verdict and the masked
/// body are present.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChirpResponse {
    pub valid: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl ChirpResponse {
    pub fn accepted(chirp: Chirp) -> Self {
        Self {
            valid: true,
            error: String::new(),
            id: Some(chirp.id),
            created_at: Some(chirp.created_at),
            updated_at: Some(chirp.updated_at),
            body: chirp.body,
            user_id: Some(chirp.user_id),
        }
    }

    pub fn rejected(moderated: Moderated) -> Self {
        Self {
            valid: false,
            error: moderated.verdict.error_message().to_string(),
            id: None,
            created_at: None,
            updated_at: None,
            body: moderated.body,
            user_id: None,
        }
    }
}
