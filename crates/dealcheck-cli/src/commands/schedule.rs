use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use dealcheck_core::amortization;

use crate::output::Report;

/// Arguments for amortization schedule generation
#[derive(Args)]
pub struct ScheduleArgs {
    /// Loan principal
    #[arg(long)]
    pub loan: Option<Decimal>,

    /// Purchase price; with --down, an alternative to --loan
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment percent, used with --price
    #[arg(long, default_value = "20")]
    pub down: Decimal,

    /// Annual interest rate percent (e.g. 7.5)
    #[arg(long)]
    pub rate: Decimal,

    /// Loan term in whole years
    #[arg(long, default_value = "30")]
    pub term: u32,
}

pub fn run(args: ScheduleArgs) -> Result<Report, Box<dyn std::error::Error>> {
    let loan = match (args.loan, args.price) {
        (Some(loan), _) => loan,
        (None, Some(price)) => price - price * args.down / dec!(100),
        (None, None) => return Err("--loan or --price is required".into()),
    };

    let schedule = amortization::generate_schedule(loan, args.rate, args.term)?;
    Ok(Report::Schedule(schedule))
}
