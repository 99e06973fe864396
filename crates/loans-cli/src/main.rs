mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{MonthArgs, PaymentArgs, ScheduleArgs};

/// Loan servicing calculations from the command line
#[derive(Parser)]
#[command(
    name = "loans",
    version,
    about = "Loan servicing calculations with decimal precision",
    long_about = "A CLI for working with amortizing loans: fixed monthly payments, \
                  month-by-month repayment schedules and single-month summaries, \
                  plus a scripted borrower/loan/share servicing session."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the fixed monthly payment for a loan
    Payment(PaymentArgs),
    /// Build the full month-by-month repayment schedule
    Schedule(ScheduleArgs),
    /// Summarize a single month of the repayment schedule
    Month(MonthArgs),
    /// Run a scripted servicing session against the in-memory store
    Demo,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::amortization::run_payment(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Month(args) => commands::amortization::run_month(args),
        Commands::Demo => commands::servicing::run_demo(),
        Commands::Version => {
            println!("loans {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
