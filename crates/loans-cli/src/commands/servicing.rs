use rust_decimal_macros::dec;
use serde_json::{json, Value};

use loans_core::servicing::{LoanService, MemoryStore};
use loans_core::{NewLoan, NewUser};

/// Scripted servicing session against the in-memory store: register a
/// borrower and a viewer, record a loan, share it, then answer the queries
/// a hosting service would.
pub fn run_demo() -> Result<Value, Box<dyn std::error::Error>> {
    let mut service = LoanService::new(MemoryStore::new());

    let borrower = service.register_user(NewUser {
        name: "chris".into(),
        social: "123-45-6789".into(),
        address: Some("1 Apple Street".into()),
    })?;
    let viewer = service.register_user(NewUser {
        name: "dana".into(),
        social: "000-45-6780".into(),
        address: None,
    })?;

    let loan = service.create_loan(NewLoan {
        amount: dec!(1000000.00),
        rate: dec!(0.05),
        months: 360,
        borrower_id: borrower.id,
    })?;
    let share = service.share_loan(loan.id, viewer.id)?;

    let visible_to_viewer = service.loans_for_user(viewer.id)?;
    let schedule = service.schedule(loan.id)?;
    let first_month = service.month_summary(loan.id, 1)?;
    let last_month = service.month_summary(loan.id, i64::from(loan.term))?;

    Ok(json!({
        "borrower": borrower,
        "viewer": viewer,
        "loan": loan,
        "share": share,
        "loans_visible_to_viewer": visible_to_viewer,
        "monthly_payment": schedule.payment,
        "first_month": first_month,
        "last_month": last_month,
    }))
}
