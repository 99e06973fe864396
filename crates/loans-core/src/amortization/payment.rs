use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::LoansError;
use crate::types::Cents;
use crate::LoansResult;

use super::LoanTerms;

/// Derive the single fixed monthly payment, in cents, that amortizes the
/// loan over its term.
///
/// Standard amortizing-loan formula: with `r` the monthly rate and `n` the
/// term, the payment factor is `r * (1 + r)^n / ((1 + r)^n - 1)`. The result
/// is rounded up to a whole cent and one further cent is added; the schedule
/// builder relies on that bias to land the final balance exactly on zero.
pub fn monthly_payment(terms: &LoanTerms) -> LoansResult<Cents> {
    terms.validate()?;

    // Flat nominal conversion: the annual rate is divided by twelve, not
    // converted to a compounding-equivalent monthly rate.
    let monthly_rate = terms.annual_rate / dec!(12);
    let growth = (Decimal::ONE + monthly_rate)
        .checked_powi(i64::from(terms.term_months))
        .ok_or_else(|| {
            LoansError::invalid("term_months", "growth factor out of range for rate and term")
        })?;
    let factor = monthly_rate * growth / (growth - Decimal::ONE);

    let payment = (Decimal::from(terms.principal) * factor)
        .ceil()
        .to_i64()
        .ok_or_else(|| LoansError::invalid("principal", "payment exceeds the cents range"))?;

    Ok(payment + 1)
}
