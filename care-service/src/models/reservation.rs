use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub gender: Option<String>,
    pub seat: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(
        name: String,
        phone: Option<String>,
        email: String,
        gender: Option<String>,
        seat: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            phone,
            email,
            gender,
            seat,
            created_at: Utc::now(),
        }
    }
}
