pub mod admin;
pub mod forms;
pub mod progress;
pub mod reviews;
pub mod users;

pub use admin::{AdminResponse, CreateAdminRequest};
pub use forms::{
    ContactRequest, ContactResponse, PaymentRequest, PaymentResponse, ReservationRequest,
    ReservationResponse,
};
pub use progress::{ProgressReport, ProgressStatus, UpstreamReport};
pub use reviews::{CreateReviewRequest, ReviewResponse};
pub use users::{LoginRequest, LogoutRequest, SignupRequest, UserResponse};

/// Cleans up a request before validation.
pub trait Normalize {
    fn normalized(self) -> Self;
}

/// Trims a field and treats blank input as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
