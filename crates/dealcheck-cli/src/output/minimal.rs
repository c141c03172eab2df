use crate::output::Report;

/// Print just the headline figure: monthly cash flow for an analysis,
/// monthly payment for a schedule.
pub fn print_minimal(report: &Report) {
    match report {
        Report::Analysis(output) => {
            println!("{}", output.result.results.monthly_cash_flow.round_dp(2));
        }
        Report::Schedule(schedule) => {
            println!("{}", schedule.monthly_payment.round_dp(2));
        }
    }
}
