use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub email: String,
    pub city: Option<String>,
    pub zip: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

pub struct NewPayment {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub email: String,
    pub city: Option<String>,
    pub zip: Option<String>,
}

impl Payment {
    pub fn new(details: NewPayment) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: details.first_name,
            last_name: details.last_name,
            date_of_birth: details.date_of_birth,
            phone_number: details.phone_number,
            email: details.email,
            city: details.city,
            zip: details.zip,
            created_at: Utc::now(),
        }
    }
}
