//! Servicing operations over the persistence port: borrowers, loans and
//! shares, plus the schedule queries that delegate to the engine.

pub mod service;
pub mod store;

pub use service::{LoanService, ShareOutcome};
pub use store::{LoanStore, MemoryStore};
