use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub message: String,
    pub user_photo: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(name: String, message: String, user_photo: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            message,
            user_photo,
            created_at: Utc::now(),
        }
    }
}
