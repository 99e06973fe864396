pub mod amortization;
pub mod error;
pub mod servicing;
pub mod types;

pub use error::LoansError;
pub use types::*;

/// Standard result type for all loan servicing operations
pub type LoansResult<T> = Result<T, LoansError>;
