use crate::models::User;
use serde::{Deserialize, Serialize};
use super::{present, Normalize};
use validator::Validate;

/// Social login: the client posts the profile it got from the identity provider.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(required(message = "Email is required"))]
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
}

impl Normalize for LoginRequest {
    fn normalized(self) -> Self {
        Self {
            email: present(self.email),
            user_name: present(self.user_name),
            user_photo: present(self.user_photo),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogoutRequest {
    #[validate(required(message = "Email is required"))]
    pub email: Option<String>,
}

impl Normalize for LogoutRequest {
    fn normalized(self) -> Self {
        Self {
            email: present(self.email),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(required(message = "All fields are required"))]
    pub name: Option<String>,
    #[validate(required(message = "All fields are required"))]
    pub email: Option<String>,
    #[validate(required(message = "All fields are required"))]
    pub password: Option<String>,
}

impl Normalize for SignupRequest {
    /// Name and email are trimmed; the password is taken verbatim.
    fn normalized(self) -> Self {
        Self {
            name: present(self.name),
            email: present(self.email),
            password: self.password.filter(|p| !p.is_empty()),
        }
    }
}

/// Public view of a user; the password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub user_name: Option<String>,
    pub user_photo: Option<String>,
    pub is_logged_in: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            user_name: user.user_name,
            user_photo: user.user_photo,
            is_logged_in: user.is_logged_in,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_hides_password_hash() {
        let user = User::registered(
            "asha@example.com".to_string(),
            "Asha".to_string(),
            "$argon2id$v=19$secret".to_string(),
        );
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert_eq!(json["email"], "asha@example.com");
        assert_eq!(json["userName"], "Asha");
        assert_eq!(json["isLoggedIn"], false);
        assert!(json.get("passwordHash").is_none());
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn signup_requires_every_field() {
        let request: SignupRequest =
            serde_json::from_str(r#"{"name":"Asha","email":" ","password":"pw"}"#).unwrap();
        assert!(request.normalized().validate().is_err());
    }

    #[test]
    fn login_accepts_profile_fields() {
        let request: LoginRequest = serde_json::from_str(
            r#"{"email":"asha@example.com","userName":"Asha","userPhoto":"https://img/a.png"}"#,
        )
        .unwrap();
        let request = request.normalized();
        assert!(request.validate().is_ok());
        assert_eq!(request.user_name.as_deref(), Some("Asha"));
    }
}
