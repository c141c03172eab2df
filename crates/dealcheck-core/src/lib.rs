pub mod amortization;
pub mod analysis;
pub mod error;
pub mod metrics;
pub mod risk;
pub mod types;

pub use error::DealCheckError;
pub use types::*;

/// Standard result type for all dealcheck operations
pub type DealCheckResult<T> = Result<T, DealCheckError>;
