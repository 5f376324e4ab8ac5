pub mod accounts;
pub mod health;
pub mod session;

pub use accounts::{create_account_handler, get_account_handler};
pub use health::health_handler;
pub use session::session_handler;
