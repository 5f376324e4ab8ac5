//! Adapters for external crates and the in-memory account store
//!
//! The error adapters turn failures from `jsonwebtoken`, `validator` and
//! `sqlx` into [`RawError`]s the error responder can classify.
//!
//! [`RawError`]: crate::domain::RawError

pub mod account_store;
pub mod database;
pub mod jwt;
pub mod validation;

pub use account_store::{Account, AccountStore};
pub use database::DATABASE_ERROR;
pub use jwt::{Claims, TokenVerifier};
