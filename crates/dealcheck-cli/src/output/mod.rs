pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use dealcheck_core::amortization::AmortizationSchedule;
use dealcheck_core::analysis::DealAnalysis;
use dealcheck_core::ComputationOutput;

use crate::OutputFormat;

/// Everything a command can hand to a formatter.
pub enum Report {
    Analysis(Box<ComputationOutput<DealAnalysis>>),
    Schedule(AmortizationSchedule),
}

/// Dispatch output to the appropriate formatter.
pub fn render(format: &OutputFormat, report: &Report) {
    match format {
        OutputFormat::Json => json::print_json(report),
        OutputFormat::Table => table::print_table(report),
        OutputFormat::Csv => csv_out::print_csv(report),
        OutputFormat::Minimal => minimal::print_minimal(report),
    }
}
