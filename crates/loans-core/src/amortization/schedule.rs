use serde::{Deserialize, Serialize};

use crate::error::LoansError;
use crate::types::{cents_to_dollars, Cents, Money, Rate};
use crate::LoansResult;

use super::payment::monthly_payment;
use super::LoanTerms;

/// One month of the repayment schedule. Monetary fields are dollars, exact
/// to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// 1-based position in the schedule.
    pub month: u32,
    pub beginning_balance: Money,
    pub ending_balance: Money,
    /// Interest plus principal collected this month. Equal to the fixed
    /// payment except in the clamped final month.
    pub monthly_payment: Money,
    pub current_interest: Money,
    pub current_principal: Money,
    /// Cumulative principal through this month.
    pub total_principal_paid: Money,
    /// Cumulative interest through this month.
    pub total_interest_paid: Money,
}

/// The full repayment schedule for a loan, one entry per month of the term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// The fixed monthly payment the schedule was built from, in dollars.
    pub payment: Money,
    pub months: Vec<MonthlySummary>,
}

impl AmortizationSchedule {
    /// Retrieve the stored summary for one month. `month` is 1-based and
    /// must fall within the term.
    pub fn month_summary(&self, month: i64) -> LoansResult<&MonthlySummary> {
        if month < 1 {
            return Err(LoansError::OutOfRange {
                month,
                reason: "month must be positive".into(),
            });
        }
        if month > self.months.len() as i64 {
            return Err(LoansError::OutOfRange {
                month,
                reason: "month exceeds term".into(),
            });
        }
        Ok(&self.months[(month - 1) as usize])
    }
}

/// Exact ceiling of `balance * rate / 12`, in cents.
///
/// Integer ceiling division over the rate's mantissa and scale; the product
/// is never formed in binary floating point, where a ceil can land one cent
/// high on an exact integer.
fn monthly_interest(balance: Cents, annual_rate: Rate) -> LoansResult<Cents> {
    let rate = annual_rate.normalize();
    let numer = i128::from(balance)
        .checked_mul(rate.mantissa())
        .ok_or_else(|| LoansError::invalid("annual_rate", "rate precision out of range"))?;
    let denom = 12i128 * 10i128.pow(rate.scale());
    i64::try_from((numer + denom - 1) / denom)
        .map_err(|_| LoansError::invalid("annual_rate", "interest exceeds the cents range"))
}

/// Build the month-by-month repayment schedule for the given terms.
///
/// Derives the fixed payment once, then walks the term with a running
/// balance in integer cents. Interest always rounds up; the final month's
/// principal is clamped to the open balance, which is what retires the loan
/// at exactly zero and absorbs the accumulated rounding.
pub fn build_schedule(terms: &LoanTerms) -> LoansResult<AmortizationSchedule> {
    let payment = monthly_payment(terms)?;

    let mut months = Vec::with_capacity(terms.term_months as usize);
    let mut balance = terms.principal;
    let mut total_principal: Cents = 0;
    let mut total_interest: Cents = 0;

    for month in 1..=terms.term_months {
        let interest = monthly_interest(balance, terms.annual_rate)?;
        let mut principal = payment - interest;
        if balance < principal {
            principal = balance;
        }
        total_interest += interest;
        total_principal += principal;
        let ending = balance - principal;

        months.push(MonthlySummary {
            month,
            beginning_balance: cents_to_dollars(balance),
            ending_balance: cents_to_dollars(ending),
            monthly_payment: cents_to_dollars(interest + principal),
            current_interest: cents_to_dollars(interest),
            current_principal: cents_to_dollars(principal),
            total_principal_paid: cents_to_dollars(total_principal),
            total_interest_paid: cents_to_dollars(total_interest),
        });

        balance = ending;
    }

    Ok(AmortizationSchedule {
        payment: cents_to_dollars(payment),
        months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn million_at_five() -> LoanTerms {
        LoanTerms::new(100_000_000, dec!(0.05), 360)
    }

    fn high_rate() -> LoanTerms {
        LoanTerms::new(121_253_000, dec!(0.115), 360)
    }

    #[test]
    fn test_first_month_million_at_five() {
        let schedule = build_schedule(&million_at_five()).unwrap();
        let first = &schedule.months[0];
        assert_eq!(
            first,
            &MonthlySummary {
                month: 1,
                beginning_balance: dec!(1000000.00),
                ending_balance: dec!(998798.44),
                monthly_payment: dec!(5368.23),
                current_interest: dec!(4166.67),
                current_principal: dec!(1201.56),
                total_principal_paid: dec!(1201.56),
                total_interest_paid: dec!(4166.67),
            }
        );
    }

    #[test]
    fn test_middle_month_million_at_five() {
        let schedule = build_schedule(&million_at_five()).unwrap();
        let summary = schedule.month_summary(158).unwrap();
        assert_eq!(
            summary,
            &MonthlySummary {
                month: 158,
                beginning_balance: dec!(734428.79),
                ending_balance: dec!(732120.68),
                monthly_payment: dec!(5368.23),
                current_interest: dec!(3060.12),
                current_principal: dec!(2308.11),
                total_principal_paid: dec!(267879.32),
                total_interest_paid: dec!(580301.02),
            }
        );
    }

    #[test]
    fn test_last_month_million_at_five() {
        let schedule = build_schedule(&million_at_five()).unwrap();
        let last = schedule.months.last().unwrap();
        assert_eq!(
            last,
            &MonthlySummary {
                month: 360,
                beginning_balance: dec!(5338.68),
                ending_balance: dec!(0.00),
                // Clamped: the closing payment is smaller than the fixed one.
                monthly_payment: dec!(5360.93),
                current_interest: dec!(22.25),
                current_principal: dec!(5338.68),
                total_principal_paid: dec!(1000000.00),
                total_interest_paid: dec!(932555.50),
            }
        );
    }

    #[test]
    fn test_first_month_high_rate() {
        let schedule = build_schedule(&high_rate()).unwrap();
        let first = &schedule.months[0];
        assert_eq!(
            first,
            &MonthlySummary {
                month: 1,
                beginning_balance: dec!(1212530.00),
                ending_balance: dec!(1212142.48),
                monthly_payment: dec!(12007.60),
                current_interest: dec!(11620.08),
                current_principal: dec!(387.52),
                total_principal_paid: dec!(387.52),
                total_interest_paid: dec!(11620.08),
            }
        );
    }

    #[test]
    fn test_last_month_high_rate() {
        let schedule = build_schedule(&high_rate()).unwrap();
        let last = schedule.months.last().unwrap();
        assert_eq!(
            last,
            &MonthlySummary {
                month: 360,
                beginning_balance: dec!(11849.11),
                ending_balance: dec!(0.00),
                monthly_payment: dec!(11962.67),
                current_interest: dec!(113.56),
                current_principal: dec!(11849.11),
                total_principal_paid: dec!(1212530.00),
                total_interest_paid: dec!(3110161.07),
            }
        );
    }

    #[test]
    fn test_schedule_invariants() {
        let cases = [
            LoanTerms::new(100_000_000, dec!(0.05), 360),
            LoanTerms::new(121_253_000, dec!(0.115), 360),
            LoanTerms::new(500_000, dec!(0.03), 12),
            LoanTerms::new(999_999, dec!(0.075), 84),
            LoanTerms::new(1, dec!(0.2), 1),
        ];

        for terms in cases {
            let schedule = build_schedule(&terms).unwrap();
            assert_eq!(schedule.months.len(), terms.term_months as usize);

            // Fully retired by the final period, with the clamp firing there.
            let last = schedule.months.last().unwrap();
            assert_eq!(last.ending_balance, Decimal::ZERO);
            assert_eq!(last.current_principal, last.beginning_balance);
            assert_eq!(last.total_principal_paid, cents_to_dollars(terms.principal));

            let mut principal_sum = Decimal::ZERO;
            for (i, summary) in schedule.months.iter().enumerate() {
                assert_eq!(summary.month as usize, i + 1);
                assert!(summary.ending_balance <= summary.beginning_balance);
                if i > 0 {
                    assert_eq!(
                        summary.beginning_balance,
                        schedule.months[i - 1].ending_balance
                    );
                }
                // Interest is the exact ceiling of balance * rate / 12.
                let balance_cents = crate::types::dollars_to_cents(summary.beginning_balance)
                    .unwrap();
                assert_eq!(
                    summary.current_interest,
                    cents_to_dollars(monthly_interest(balance_cents, terms.annual_rate).unwrap())
                );
                assert_eq!(
                    summary.monthly_payment,
                    summary.current_interest + summary.current_principal
                );
                principal_sum += summary.current_principal;
            }
            assert_eq!(principal_sum, cents_to_dollars(terms.principal));
        }
    }

    #[test]
    fn test_month_summary_matches_index() {
        let schedule = build_schedule(&LoanTerms::new(500_000, dec!(0.03), 12)).unwrap();
        for month in 1..=12i64 {
            assert_eq!(
                schedule.month_summary(month).unwrap(),
                &schedule.months[(month - 1) as usize]
            );
        }
    }

    #[test]
    fn test_month_summary_out_of_range() {
        let schedule = build_schedule(&LoanTerms::new(500_000, dec!(0.03), 12)).unwrap();
        assert_eq!(
            schedule.month_summary(0).unwrap_err(),
            LoansError::OutOfRange {
                month: 0,
                reason: "month must be positive".into(),
            }
        );
        assert_eq!(
            schedule.month_summary(-3).unwrap_err(),
            LoansError::OutOfRange {
                month: -3,
                reason: "month must be positive".into(),
            }
        );
        assert_eq!(
            schedule.month_summary(13).unwrap_err(),
            LoansError::OutOfRange {
                month: 13,
                reason: "month exceeds term".into(),
            }
        );
    }

    #[test]
    fn test_build_schedule_propagates_validation() {
        let err = build_schedule(&LoanTerms::new(0, dec!(0.05), 360)).unwrap_err();
        assert_eq!(
            err,
            LoansError::invalid("principal", "loan amount must be positive")
        );
        let err = build_schedule(&LoanTerms::new(100_000, dec!(0), 360)).unwrap_err();
        assert_eq!(
            err,
            LoansError::invalid("annual_rate", "interest rate must be positive")
        );
        let err = build_schedule(&LoanTerms::new(100_000, dec!(0.05), 0)).unwrap_err();
        assert_eq!(
            err,
            LoansError::invalid("term_months", "number of payments must be positive")
        );
    }

    #[test]
    fn test_interest_ceiling_on_exact_product() {
        // 2400 * 0.05 / 12 = 10 exactly; the ceiling must not round up.
        assert_eq!(monthly_interest(2400, dec!(0.05)).unwrap(), 10);
        // One cent more and the quotient is fractional again.
        assert_eq!(monthly_interest(2401, dec!(0.05)).unwrap(), 11);
    }
}
