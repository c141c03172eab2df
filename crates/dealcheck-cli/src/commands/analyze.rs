use clap::Args;
use rust_decimal::Decimal;

use dealcheck_core::analysis;
use dealcheck_core::metrics::DealInputs;

use crate::input;
use crate::output::Report;

/// Arguments for full deal analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// All-cash purchase (no financing)
    #[arg(long)]
    pub cash: bool,

    /// Down payment percent (e.g. 20 for 20%)
    #[arg(long, default_value = "20")]
    pub down: Decimal,

    /// Annual interest rate percent (e.g. 7.5)
    #[arg(long, default_value = "0")]
    pub rate: Decimal,

    /// Loan term in whole years
    #[arg(long, default_value = "30")]
    pub term: u32,

    /// Closing costs as percent of price
    #[arg(long, default_value = "0")]
    pub closing: Decimal,

    /// Monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Other monthly income (parking, laundry, etc.)
    #[arg(long, default_value = "0")]
    pub other_income: Decimal,

    /// Vacancy rate percent
    #[arg(long, default_value = "0")]
    pub vacancy: Decimal,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub tax: Decimal,

    /// Monthly insurance premium
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Monthly HOA dues
    #[arg(long, default_value = "0")]
    pub hoa: Decimal,

    /// Property management fee as percent of rent
    #[arg(long, default_value = "0")]
    pub management: Decimal,

    /// Annual maintenance reserve as percent of value
    #[arg(long, default_value = "0")]
    pub maintenance: Decimal,

    /// Annual capex reserve as percent of value
    #[arg(long, default_value = "0")]
    pub capex: Decimal,

    /// Monthly utilities paid by owner
    #[arg(long, default_value = "0")]
    pub utilities: Decimal,

    /// Other monthly expenses
    #[arg(long, default_value = "0")]
    pub other_expenses: Decimal,

    /// Annual appreciation percent (may be negative)
    #[arg(long, default_value = "0")]
    pub appreciation: Decimal,
}

pub fn run(args: AnalyzeArgs) -> Result<Report, Box<dyn std::error::Error>> {
    let inputs: DealInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DealInputs {
            purchase_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            is_cash_purchase: args.cash,
            down_payment_percent: args.down,
            interest_rate: args.rate,
            loan_term_years: args.term,
            closing_cost_percent: args.closing,
            monthly_rent: args.rent.ok_or("--rent is required (or provide --input)")?,
            other_monthly_income: args.other_income,
            vacancy_rate_percent: args.vacancy,
            annual_property_tax: args.tax,
            monthly_insurance: args.insurance,
            monthly_hoa: args.hoa,
            property_management_percent: args.management,
            maintenance_percent: args.maintenance,
            capex_percent: args.capex,
            monthly_utilities: args.utilities,
            other_monthly_expenses: args.other_expenses,
            appreciation_rate_percent: args.appreciation,
            ..DealInputs::default()
        }
    };

    let output = analysis::analyze_deal(&inputs)?;
    Ok(Report::Analysis(Box::new(output)))
}
