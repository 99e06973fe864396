//! Amortization engine: fixed monthly payment and month-by-month schedule.
//!
//! All computation runs in integer cents; `Money` values appear only on the
//! output boundary. Every call is pure and owns its own schedule, so the
//! engine is safe to invoke from any number of callers at once.

pub mod payment;
pub mod schedule;

pub use payment::monthly_payment;
pub use schedule::{build_schedule, AmortizationSchedule, MonthlySummary};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoansError;
use crate::types::{Cents, Rate};
use crate::LoansResult;

/// The terms of an amortizing loan: principal in cents, annual rate as a
/// fraction (0.05 = 5%) and term in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Cents,
    pub annual_rate: Rate,
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: Cents, annual_rate: Rate, term_months: u32) -> Self {
        LoanTerms {
            principal,
            annual_rate,
            term_months,
        }
    }

    /// All three terms must be strictly positive. Each violation is its own
    /// failure, reported before any computation starts.
    pub fn validate(&self) -> LoansResult<()> {
        if self.principal <= 0 {
            return Err(LoansError::invalid(
                "principal",
                "loan amount must be positive",
            ));
        }
        if self.annual_rate <= Decimal::ZERO {
            return Err(LoansError::invalid(
                "annual_rate",
                "interest rate must be positive",
            ));
        }
        if self.term_months == 0 {
            return Err(LoansError::invalid(
                "term_months",
                "number of payments must be positive",
            ));
        }
        Ok(())
    }
}
