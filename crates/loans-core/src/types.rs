use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoansError;
use crate::LoansResult;

/// All monetary values crossing the API boundary. Wraps Decimal to prevent
/// accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Integer cents. All schedule accumulation happens in this unit; conversion
/// to `Money` is a display concern.
pub type Cents = i64;

/// Convert a dollar amount to integer cents, exactly.
///
/// Sub-cent precision is rejected rather than truncated: the amount either
/// converts without loss or the input is invalid.
pub fn dollars_to_cents(amount: Money) -> LoansResult<Cents> {
    let scaled = amount * Decimal::ONE_HUNDRED;
    if scaled.fract() != Decimal::ZERO {
        return Err(LoansError::invalid(
            "amount",
            "amount must not have sub-cent precision",
        ));
    }
    scaled
        .to_i64()
        .ok_or_else(|| LoansError::invalid("amount", "amount out of range"))
}

/// Convert integer cents back to a dollar amount.
pub fn cents_to_dollars(cents: Cents) -> Money {
    Decimal::new(cents, 2)
}

/// A registered borrower or viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unique per user; duplicate registration is rejected.
    pub social: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Input for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub social: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A recorded loan. `amount` is stored in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub amount: Cents,
    pub rate: Rate,
    /// Term in months.
    pub term: u32,
    pub borrower_id: i64,
}

/// Input for recording a loan. `amount` is in dollars; conversion to cents
/// happens once, when the loan is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoan {
    pub amount: Money,
    pub rate: Rate,
    pub months: u32,
    pub borrower_id: i64,
}

/// A loan made viewable to a user other than the borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanShare {
    pub user_id: i64,
    pub loan_id: i64,
}
