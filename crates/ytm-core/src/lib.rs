pub mod error;
pub mod types;

#[cfg(feature = "fixed_income")]
pub mod fixed_income;

pub use error::YtmError;
pub use types::*;

/// Standard result type for all ytm-core operations
pub type YtmResult<T> = Result<T, YtmError>;
