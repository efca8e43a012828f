use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A portal user. Created either by the social login (`POST /user`) or by
/// signup, in which case `password_hash` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
    pub is_logged_in: bool,
    pub password_hash: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A user arriving through login is logged in from the start.
    pub fn logged_in(email: String, user_name: Option<String>, user_photo: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            user_name,
            user_photo,
            is_logged_in: true,
            password_hash: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn registered(email: String, user_name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            user_name: Some(user_name),
            user_photo: None,
            is_logged_in: false,
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        }
    }
}
