//! API request and response types

pub mod catalog;
pub mod error;

pub use catalog::{CapabilityQuery, NameQuery, SizeQuery};
pub use error::{ApiError, ApiErrorResponse};
