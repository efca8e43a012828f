use crate::models::Admin;
use serde::{Deserialize, Serialize};
use super::{present, Normalize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(required(message = "Email and password are required"))]
    pub email: Option<String>,
    #[validate(required(message = "Email and password are required"))]
    pub password: Option<String>,
}

impl Normalize for CreateAdminRequest {
    fn normalized(self) -> Self {
        Self {
            email: present(self.email),
            password: self.password.filter(|p| !p.is_empty()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub password: String,
    pub created_at: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            password: admin.password,
            created_at: admin.created_at.to_rfc3339(),
        }
    }
}
