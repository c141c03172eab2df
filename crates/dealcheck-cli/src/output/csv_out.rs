use std::io;

use dealcheck_core::amortization::AmortizationSchedule;
use dealcheck_core::analysis::DealAnalysis;
use dealcheck_core::ComputationOutput;

use crate::output::Report;

/// Write the report as CSV to stdout.
pub fn print_csv(report: &Report) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match report {
        Report::Analysis(output) => write_analysis(&mut wtr, output),
        Report::Schedule(schedule) => write_schedule(&mut wtr, schedule),
    }

    let _ = wtr.flush();
}

fn write_analysis(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    output: &ComputationOutput<DealAnalysis>,
) {
    let r = &output.result.results;

    let rows = [
        ("monthly_mortgage_payment", r.monthly_mortgage_payment.to_string()),
        ("monthly_operating_expenses", r.monthly_operating_expenses.to_string()),
        ("monthly_cash_flow", r.monthly_cash_flow.to_string()),
        ("annual_cash_flow", r.annual_cash_flow.to_string()),
        ("net_operating_income_annual", r.net_operating_income_annual.to_string()),
        ("cap_rate", r.cap_rate.to_string()),
        ("cash_on_cash_return", r.cash_on_cash_return.to_string()),
        (
            "debt_service_coverage_ratio",
            r.debt_service_coverage_ratio
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ),
        ("total_cash_needed", r.total_cash_needed.to_string()),
        ("gross_rent_multiplier", r.gross_rent_multiplier.to_string()),
    ];

    let _ = wtr.write_record(["field", "value"]);
    for (field, value) in rows {
        let _ = wtr.write_record([field, value.as_str()]);
    }
}

fn write_schedule(wtr: &mut csv::Writer<io::StdoutLock<'_>>, schedule: &AmortizationSchedule) {
    let _ = wtr.write_record(["index", "interest", "principal", "balance"]);
    for entry in &schedule.entries {
        let _ = wtr.write_record([
            entry.index.to_string(),
            entry.interest_portion.to_string(),
            entry.principal_portion.to_string(),
            entry.remaining_balance.to_string(),
        ]);
    }
}
