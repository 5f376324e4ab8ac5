//! # api_error_responder - Centralized API error formatting
//!
//! Every error raised while serving a request, whether it comes from a
//! database lookup, payload validation, token verification or application
//! code, is turned into one uniform JSON response by a single terminal
//! middleware stage.
//!
//! ## Layers
//!
//! - **Domain**: the error shape, the deployment mode and classification
//! - **Infrastructure**: adapters from `jsonwebtoken`, `validator` and `sqlx`
//!   errors, plus an in-memory account store
//! - **API**: the error responder, its tower layer, handlers and router
//!
//! ## Example Usage
//!
//! ```no_run
//! use api_error_responder::api::middleware::error_handling::{ErrorResponder, JsonSink};
//! use api_error_responder::domain::{Mode, RawError};
//!
//! let responder = ErrorResponder::new(Mode::Production);
//! let mut sink = JsonSink::new();
//! responder.handle(RawError::cast("id", "abc"), &mut sink);
//! // sink now holds 400 {"status": "fail", "message": "Invalid id: abc"}
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use api::errors::ApiError;
pub use api::middleware::error_handling::{ErrorResponder, JsonSink, ResponseSink};
pub use config::Config;
pub use domain::{Mode, OperationalError, RawError};
