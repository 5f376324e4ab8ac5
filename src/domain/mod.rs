pub mod classification;
pub mod errors;
pub mod mode;
pub mod operational_error;
pub mod raw_error;

pub use classification::{classify, ErrorClass};
pub use mode::Mode;
pub use operational_error::OperationalError;
pub use raw_error::{ErrorName, FieldFailure, RawError};
