pub mod admin;
pub mod forms;
pub mod health;
pub mod info;
pub mod progress;
pub mod reviews;
pub mod users;

pub use admin::{create_admin, get_admin};
pub use forms::{
    create_contact, create_payment, create_reservation, list_contacts, list_payments,
    list_reservations,
};
pub use health::{health_check, metrics_endpoint, not_found, readiness_check, root};
pub use info::{create_info, list_infos};
pub use progress::track_progress;
pub use reviews::{create_review, delete_review, list_reviews};
pub use users::{list_users, login_user, logout_user, signup};

use service_core::error::AppError;

/// Takes a required request field, answering 400 with `message` when it is
/// absent.
pub(crate) fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!(message.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_passes_present_values_through() {
        assert_eq!(required(Some("Asha".to_string()), "Login is required").unwrap(), "Asha");
    }

    #[test]
    fn required_reports_its_message() {
        let err = required(None, "Review is required").unwrap_err();
        assert!(matches!(&err, AppError::BadRequest(e) if e.to_string() == "Review is required"));
    }
}
