pub mod auth;
pub mod error_handler;

pub use auth::BearerAuth;
pub use error_handler::json_errors;
