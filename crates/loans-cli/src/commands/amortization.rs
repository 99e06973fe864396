use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use loans_core::amortization::{build_schedule, monthly_payment, LoanTerms};
use loans_core::{cents_to_dollars, dollars_to_cents};

use crate::input;

/// A loan as described on the command line: dollar amount, annual rate as a
/// fraction (0.05 = 5%), term in months.
#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    pub amount: Decimal,
    pub rate: Decimal,
    pub months: u32,
}

/// Arguments for the fixed monthly payment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount in dollars
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate as a fraction (0.05 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub months: Option<u32>,
}

/// Arguments for the full repayment schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount in dollars
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate as a fraction (0.05 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub months: Option<u32>,
}

/// Arguments for a single month's summary
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MonthArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount in dollars
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate as a fraction (0.05 = 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Month to summarize (1-based)
    #[arg(long)]
    pub month: i64,
}

fn resolve_request(
    input: &Option<String>,
    amount: Option<Decimal>,
    rate: Option<Decimal>,
    months: Option<u32>,
) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        return input::read_json(path);
    }
    if let Some(data) = input::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Ok(LoanRequest {
        amount: amount.ok_or("--amount is required (or provide --input)")?,
        rate: rate.ok_or("--rate is required (or provide --input)")?,
        months: months.ok_or("--months is required (or provide --input)")?,
    })
}

fn to_terms(request: &LoanRequest) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    Ok(LoanTerms::new(
        dollars_to_cents(request.amount)?,
        request.rate,
        request.months,
    ))
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args.input, args.amount, args.rate, args.months)?;
    let payment = monthly_payment(&to_terms(&request)?)?;
    Ok(serde_json::json!({
        "monthly_payment": cents_to_dollars(payment),
    }))
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args.input, args.amount, args.rate, args.months)?;
    let schedule = build_schedule(&to_terms(&request)?)?;
    Ok(serde_json::to_value(schedule.months)?)
}

pub fn run_month(args: MonthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args.input, args.amount, args.rate, args.months)?;
    let schedule = build_schedule(&to_terms(&request)?)?;
    let summary = schedule.month_summary(args.month)?;
    Ok(serde_json::to_value(summary)?)
}
