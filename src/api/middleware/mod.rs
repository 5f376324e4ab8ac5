pub mod auth;
pub mod error_handling;

pub use error_handling::{create_error_handling_middleware, ErrorHandlingConfig};
