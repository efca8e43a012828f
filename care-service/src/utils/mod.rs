pub mod password;
pub mod uploads;
pub mod validation;

pub use password::{hash_password, Password};
pub use uploads::is_allowed_image;
pub use validation::ValidatedJson;
