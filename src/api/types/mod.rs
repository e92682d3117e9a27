//! API response types

mod error;
mod response;

pub use error::{ApiError, ApiErrorResponse};
pub use response::ResultsResponse;
