use std::collections::BTreeMap;

use crate::error::LoansError;
use crate::types::{Cents, Loan, LoanShare, NewUser, Rate, User};
use crate::LoansResult;

/// Persistence port for the servicing layer.
///
/// The store owns the integrity rules a relational backing would enforce:
/// `social` is unique per user, a loan's borrower must exist, and a share
/// references an existing (user, loan) pair at most once.
pub trait LoanStore {
    fn create_user(&mut self, new: NewUser) -> LoansResult<User>;
    fn find_user_by_id(&self, id: i64) -> LoansResult<Option<User>>;
    fn find_user_by_social(&self, social: &str) -> LoansResult<Option<User>>;

    fn create_loan(
        &mut self,
        amount: Cents,
        rate: Rate,
        term: u32,
        borrower_id: i64,
    ) -> LoansResult<Loan>;
    fn find_loan_by_id(&self, id: i64) -> LoansResult<Option<Loan>>;
    fn loans_for_borrower(&self, borrower_id: i64) -> LoansResult<Vec<Loan>>;

    fn create_share(&mut self, share: LoanShare) -> LoansResult<()>;
    fn find_share(&self, share: LoanShare) -> LoansResult<bool>;
    /// Loans shared with the user, in the order the shares were created.
    fn shares_for_user(&self, user_id: i64) -> LoansResult<Vec<Loan>>;
}

/// In-memory store. Stands in for an embedded database; tests and the CLI
/// session run against it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: BTreeMap<i64, User>,
    loans: BTreeMap<i64, Loan>,
    shares: Vec<LoanShare>,
    next_user_id: i64,
    next_loan_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl LoanStore for MemoryStore {
    fn create_user(&mut self, new: NewUser) -> LoansResult<User> {
        if self.users.values().any(|u| u.social == new.social) {
            return Err(LoansError::DuplicateSocial);
        }
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            name: new.name,
            social: new.social,
            address: new.address,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn find_user_by_id(&self, id: i64) -> LoansResult<Option<User>> {
        Ok(self.users.get(&id).cloned())
    }

    fn find_user_by_social(&self, social: &str) -> LoansResult<Option<User>> {
        Ok(self.users.values().find(|u| u.social == social).cloned())
    }

    fn create_loan(
        &mut self,
        amount: Cents,
        rate: Rate,
        term: u32,
        borrower_id: i64,
    ) -> LoansResult<Loan> {
        if !self.users.contains_key(&borrower_id) {
            return Err(LoansError::Storage(format!(
                "loan references missing borrower {borrower_id}"
            )));
        }
        self.next_loan_id += 1;
        let loan = Loan {
            id: self.next_loan_id,
            amount,
            rate,
            term,
            borrower_id,
        };
        self.loans.insert(loan.id, loan.clone());
        Ok(loan)
    }

    fn find_loan_by_id(&self, id: i64) -> LoansResult<Option<Loan>> {
        Ok(self.loans.get(&id).cloned())
    }

    fn loans_for_borrower(&self, borrower_id: i64) -> LoansResult<Vec<Loan>> {
        Ok(self
            .loans
            .values()
            .filter(|l| l.borrower_id == borrower_id)
            .cloned()
            .collect())
    }

    fn create_share(&mut self, share: LoanShare) -> LoansResult<()> {
        if !self.users.contains_key(&share.user_id) {
            return Err(LoansError::Storage(format!(
                "share references missing user {}",
                share.user_id
            )));
        }
        if !self.loans.contains_key(&share.loan_id) {
            return Err(LoansError::Storage(format!(
                "share references missing loan {}",
                share.loan_id
            )));
        }
        if self.shares.contains(&share) {
            return Err(LoansError::Storage(format!(
                "share of loan {} with user {} already exists",
                share.loan_id, share.user_id
            )));
        }
        self.shares.push(share);
        Ok(())
    }

    fn find_share(&self, share: LoanShare) -> LoansResult<bool> {
        Ok(self.shares.contains(&share))
    }

    fn shares_for_user(&self, user_id: i64) -> LoansResult<Vec<Loan>> {
        self.shares
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| {
                self.loans.get(&s.loan_id).cloned().ok_or_else(|| {
                    LoansError::Storage(format!("share references missing loan {}", s.loan_id))
                })
            })
            .collect()
    }
}
