use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoansError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("month {month} out of range: {reason}")]
    OutOfRange { month: i64, reason: String },

    #[error("user with social security number already exists")]
    DuplicateSocial,

    #[error("could not find {entity} {id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("cannot share with borrower")]
    ShareWithBorrower,

    #[error("storage error: {0}")]
    Storage(String),
}

impl LoansError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        LoansError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
