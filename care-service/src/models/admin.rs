use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin credentials. The admin console fetches this record and compares the
/// password itself, so it is kept as entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub password: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Admin {
    pub fn new(email: String, password: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password,
            created_at: Utc::now(),
        }
    }
}
