use sqlx::error::ErrorKind;

use crate::domain::{FieldFailure, RawError};

/// Name given to database failures that have no user-facing meaning
pub const DATABASE_ERROR: &str = "DatabaseError";

impl From<sqlx::Error> for RawError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::ColumnDecode { index, source } => {
                RawError::cast(index.clone(), source.to_string())
            }
            sqlx::Error::RowNotFound => RawError::app("No record found with that ID", 404),
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or("record");
                match db_err.kind() {
                    ErrorKind::UniqueViolation => RawError::app(
                        format!("Duplicate value for {constraint}. Please use another value"),
                        409,
                    ),
                    ErrorKind::NotNullViolation => RawError::validation([FieldFailure::new(
                        constraint,
                        format!("{constraint} is required"),
                    )]),
                    ErrorKind::CheckViolation => RawError::validation([FieldFailure::new(
                        constraint,
                        format!("{constraint} has an invalid value"),
                    )]),
                    ErrorKind::ForeignKeyViolation => {
                        internal(&err, "Referenced record does not exist")
                    }
                    _ => internal(&err, "Database rejected the operation"),
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => internal(&err, "Database is unavailable"),
            sqlx::Error::Configuration(_) => internal(&err, "Database is misconfigured"),
            _ => internal(&err, "Database query failed"),
        }
    }
}

/// Non-operational error that keeps the driver detail in the stack only
fn internal(err: &sqlx::Error, message: &str) -> RawError {
    RawError::from_source(DATABASE_ERROR, err).with_message(message)
}
