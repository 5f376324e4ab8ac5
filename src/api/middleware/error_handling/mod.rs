//! Error handling middleware
//!
//! Every error produced while serving a request ends up here and is turned
//! into a single JSON response whose verbosity depends on the deployment
//! [`Mode`](crate::domain::Mode).
//!
//! - config.rs: Configuration structures
//! - responder.rs: Classification and response formatting
//! - sink.rs: The response sink the responder writes to
//! - middleware.rs: Tower layer wiring the responder into the router
//! - sanitizers.rs: Redaction of sensitive keys
//! - utils.rs: Logging of handled errors

pub mod config;
pub mod middleware;
pub mod responder;
pub mod sanitizers;
pub mod sink;
pub mod utils;

pub use config::ErrorHandlingConfig;
pub use middleware::{create_error_handling_middleware, error_response, ErrorHandlingLayer};
pub use responder::ErrorResponder;
pub use sanitizers::ErrorSanitizer;
pub use sink::{JsonSink, ResponseSink};
pub use utils::ErrorUtils;
