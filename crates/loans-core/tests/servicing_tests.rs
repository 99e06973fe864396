use loans_core::amortization::{build_schedule, monthly_payment, LoanTerms};
use loans_core::servicing::{LoanService, MemoryStore, ShareOutcome};
use loans_core::{LoansError, NewLoan, NewUser};
use rust_decimal_macros::dec;

// ===========================================================================
// Engine, end to end through the public API
// ===========================================================================

#[test]
fn test_payment_and_schedule_agree() {
    let terms = LoanTerms::new(100_000_000, dec!(0.05), 360);
    let payment = monthly_payment(&terms).unwrap();
    let schedule = build_schedule(&terms).unwrap();

    // 536,822 cents rounded up from the raw factor, plus the bias cent.
    assert_eq!(payment, 536_823);
    assert_eq!(schedule.payment, dec!(5368.23));

    // Every month but the clamped last one collects exactly the fixed payment.
    for summary in &schedule.months[..359] {
        assert_eq!(summary.monthly_payment, dec!(5368.23));
    }
    assert_eq!(schedule.months[359].monthly_payment, dec!(5360.93));
}

// ===========================================================================
// Servicing flow: register, record, share, query
// ===========================================================================

fn chris() -> NewUser {
    NewUser {
        name: "chris".into(),
        social: "123-45-6789".into(),
        address: Some("1 Apple Street".into()),
    }
}

fn dana() -> NewUser {
    NewUser {
        name: "dana".into(),
        social: "000-45-6780".into(),
        address: None,
    }
}

#[test]
fn test_full_servicing_flow() {
    let mut service = LoanService::new(MemoryStore::new());

    let borrower = service.register_user(chris()).unwrap();
    let viewer = service.register_user(dana()).unwrap();

    let loan = service
        .create_loan(NewLoan {
            amount: dec!(1212530.00),
            rate: dec!(0.115),
            months: 360,
            borrower_id: borrower.id,
        })
        .unwrap();
    // Stored in cents, converted once at the boundary.
    assert_eq!(loan.amount, 121_253_000);

    assert_eq!(
        service.share_loan(loan.id, viewer.id).unwrap(),
        ShareOutcome::Created
    );
    assert_eq!(
        service.share_loan(loan.id, viewer.id).unwrap(),
        ShareOutcome::AlreadyShared
    );

    // The viewer sees the shared loan; the borrower sees their own.
    assert_eq!(service.loans_for_user(viewer.id).unwrap(), vec![loan.clone()]);
    assert_eq!(service.loans_for_user(borrower.id).unwrap(), vec![loan.clone()]);

    // Month queries run off the stored cents amount.
    let first = service.month_summary(loan.id, 1).unwrap();
    assert_eq!(first.current_interest, dec!(11620.08));
    assert_eq!(first.current_principal, dec!(387.52));
    assert_eq!(first.ending_balance, dec!(1212142.48));

    let last = service.month_summary(loan.id, 360).unwrap();
    assert_eq!(last.ending_balance, dec!(0.00));
    assert_eq!(last.total_principal_paid, dec!(1212530.00));
    assert_eq!(last.total_interest_paid, dec!(3110161.07));

    assert!(matches!(
        service.month_summary(loan.id, 361).unwrap_err(),
        LoansError::OutOfRange { .. }
    ));
}
