pub mod admin;
pub mod contact;
pub mod info;
pub mod payment;
pub mod reservation;
pub mod review;
pub mod user;

pub use admin::Admin;
pub use contact::ContactMessage;
pub use payment::Payment;
pub use reservation::Reservation;
pub use review::Review;
pub use user::User;
