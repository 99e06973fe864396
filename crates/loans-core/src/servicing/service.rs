use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{build_schedule, AmortizationSchedule, LoanTerms, MonthlySummary};
use crate::error::LoansError;
use crate::types::{dollars_to_cents, Loan, LoanShare, NewLoan, NewUser, User};
use crate::LoansResult;

/// Result of a share request. Re-sharing an already shared loan is not an
/// error; the share simply already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareOutcome {
    Created,
    AlreadyShared,
}

/// Servicing operations over a storage port: registering borrowers,
/// recording and sharing loans, and answering schedule queries.
///
/// The hosting surface (HTTP or otherwise) is expected to translate the
/// typed errors into its own responses; nothing here blocks or retries.
pub struct LoanService<S> {
    store: S,
}

impl<S: super::store::LoanStore> LoanService<S> {
    pub fn new(store: S) -> Self {
        LoanService { store }
    }

    /// Register a user. The social security identifier must not already be
    /// registered.
    pub fn register_user(&mut self, new: NewUser) -> LoansResult<User> {
        if self.store.find_user_by_social(&new.social)?.is_some() {
            debug!("rejecting registration of {}: social already taken", new.name);
            return Err(LoansError::DuplicateSocial);
        }
        self.store.create_user(new)
    }

    /// Record a loan for an existing borrower. The dollar amount converts to
    /// cents here, exactly once; the stored loan carries cents from then on.
    pub fn create_loan(&mut self, new: NewLoan) -> LoansResult<Loan> {
        if new.amount <= Decimal::ZERO {
            return Err(LoansError::invalid("amount", "loan amount must be positive"));
        }
        if new.rate <= Decimal::ZERO {
            return Err(LoansError::invalid("rate", "rate must be positive"));
        }
        if new.months == 0 {
            return Err(LoansError::invalid("months", "term must be positive"));
        }
        if self.store.find_user_by_id(new.borrower_id)?.is_none() {
            return Err(LoansError::NotFound {
                entity: "user",
                id: new.borrower_id,
            });
        }
        let amount = dollars_to_cents(new.amount)?;
        self.store.create_loan(amount, new.rate, new.months, new.borrower_id)
    }

    pub fn loan(&self, id: i64) -> LoansResult<Loan> {
        self.store
            .find_loan_by_id(id)?
            .ok_or(LoansError::NotFound { entity: "loan", id })
    }

    /// All loans visible to a user: loans they borrowed, then loans shared
    /// with them.
    pub fn loans_for_user(&self, user_id: i64) -> LoansResult<Vec<Loan>> {
        if self.store.find_user_by_id(user_id)?.is_none() {
            return Err(LoansError::NotFound {
                entity: "user",
                id: user_id,
            });
        }
        let mut loans = self.store.loans_for_borrower(user_id)?;
        loans.extend(self.store.shares_for_user(user_id)?);
        Ok(loans)
    }

    /// Make a loan viewable by another user. The borrower cannot be a
    /// viewer of their own loan, and re-sharing is idempotent.
    pub fn share_loan(&mut self, loan_id: i64, user_id: i64) -> LoansResult<ShareOutcome> {
        let loan = self.loan(loan_id)?;
        if loan.borrower_id == user_id {
            return Err(LoansError::ShareWithBorrower);
        }
        if self.store.find_user_by_id(user_id)?.is_none() {
            return Err(LoansError::NotFound {
                entity: "user",
                id: user_id,
            });
        }
        let share = LoanShare { user_id, loan_id };
        if self.store.find_share(share)? {
            debug!("loan {loan_id} already shared with user {user_id}");
            return Ok(ShareOutcome::AlreadyShared);
        }
        self.store.create_share(share)?;
        Ok(ShareOutcome::Created)
    }

    /// The full repayment schedule for a stored loan, built from its cents
    /// amount directly.
    pub fn schedule(&self, loan_id: i64) -> LoansResult<AmortizationSchedule> {
        let loan = self.loan(loan_id)?;
        build_schedule(&LoanTerms::new(loan.amount, loan.rate, loan.term))
    }

    /// One month's summary for a stored loan.
    pub fn month_summary(&self, loan_id: i64, month: i64) -> LoansResult<MonthlySummary> {
        let schedule = self.schedule(loan_id)?;
        Ok(schedule.month_summary(month)?.clone())
    }
}
