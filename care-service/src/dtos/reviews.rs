use crate::models::Review;
use serde::{Deserialize, Serialize};
use super::{present, Normalize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    // Reviews are posted under the signed-in user's name. A missing name is
    // reported alone; the message is only checked once the user is known.
    #[validate(required(message = "Login is required"))]
    pub name: Option<String>,
    pub message: Option<String>,
    pub user_photo: Option<String>,
}

impl Normalize for CreateReviewRequest {
    fn normalized(self) -> Self {
        Self {
            name: present(self.name),
            message: present(self.message),
            user_photo: present(self.user_photo),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub message: String,
    pub user_photo: Option<String>,
    pub created_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            name: review.name,
            message: review.message,
            user_photo: review.user_photo,
            created_at: review.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CreateReviewRequest {
        serde_json::from_str::<CreateReviewRequest>(json)
            .unwrap()
            .normalized()
    }

    #[test]
    fn accepts_camel_case_photo() {
        let request = parse(r#"{"name":"Asha","message":"Great care","userPhoto":"a.png"}"#);
        assert!(request.validate().is_ok());
        assert_eq!(request.user_photo.as_deref(), Some("a.png"));
    }

    #[test]
    fn blank_name_means_not_logged_in() {
        let request = parse(r#"{"name":"  ","message":"Great care"}"#);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(!errors.field_errors().contains_key("message"));
    }

    #[test]
    fn empty_review_only_asks_for_login() {
        let errors = parse("{}").validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn message_is_left_to_the_handler() {
        let request = parse(r#"{"name":"Asha","message":"  "}"#);
        assert!(request.validate().is_ok());
        assert!(request.message.is_none());
    }
}
