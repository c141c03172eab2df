use colored::{ColoredString, Colorize};
use rust_decimal::Decimal;
use tabled::{builder::Builder, Table};

use dealcheck_core::amortization::AmortizationSchedule;
use dealcheck_core::analysis::DealAnalysis;
use dealcheck_core::risk::{Severity, WarningCode};
use dealcheck_core::ComputationOutput;

use crate::output::Report;

/// Format output as tables using the tabled crate.
pub fn print_table(report: &Report) {
    match report {
        Report::Analysis(output) => print_analysis(output),
        Report::Schedule(schedule) => print_schedule(schedule),
    }
}

fn print_analysis(output: &ComputationOutput<DealAnalysis>) {
    let r = &output.result.results;

    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Monthly mortgage payment", &money(r.monthly_mortgage_payment)]);
    builder.push_record([
        "Monthly operating expenses",
        &money(r.monthly_operating_expenses),
    ]);
    builder.push_record(["Monthly cash flow", &money(r.monthly_cash_flow)]);
    builder.push_record(["Annual cash flow", &money(r.annual_cash_flow)]);
    builder.push_record(["NOI (annual)", &money(r.net_operating_income_annual)]);
    builder.push_record(["Cap rate", &percent(r.cap_rate)]);
    builder.push_record(["Cash-on-cash return", &percent(r.cash_on_cash_return)]);
    builder.push_record([
        "DSCR",
        &r.debt_service_coverage_ratio
            .map(|d| format!("{}x", d.round_dp(2)))
            .unwrap_or_else(|| "n/a (no debt service)".into()),
    ]);
    builder.push_record(["Total cash needed", &money(r.total_cash_needed)]);
    builder.push_record([
        "Gross rent multiplier",
        &r.gross_rent_multiplier.round_dp(2).to_string(),
    ]);
    println!("{}", Table::from(builder));

    let schedule = &output.result.schedule;
    if !schedule.is_empty() {
        println!(
            "\nLoan: {} payments of {}, {} total interest",
            schedule.entries.len(),
            money(schedule.monthly_payment),
            money(schedule.total_interest_paid)
        );
    }

    if !output.result.warnings.is_empty() {
        println!("\nRisk flags:");
        for w in &output.result.warnings {
            println!(
                "  [{}] {}: {}",
                severity_label(w.severity),
                code_label(w.code),
                w.message
            );
        }
    }

    for note in &output.warnings {
        println!("\nNote: {}", note);
    }

    println!("\nMethodology: {}", output.methodology);
}

fn print_schedule(schedule: &AmortizationSchedule) {
    if schedule.is_empty() {
        println!("(no payments: cash purchase or zero-term loan)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Interest", "Principal", "Balance"]);
    for entry in &schedule.entries {
        builder.push_record([
            entry.index.to_string(),
            money(entry.interest_portion),
            money(entry.principal_portion),
            money(entry.remaining_balance),
        ]);
    }
    println!("{}", Table::from(builder));

    println!(
        "\nMonthly payment: {}   Total interest: {}",
        money(schedule.monthly_payment),
        money(schedule.total_interest_paid)
    );
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Danger => "danger".red().bold(),
        Severity::Caution => "caution".yellow(),
        Severity::Info => "info".cyan(),
    }
}

/// Stable SCREAMING_SNAKE_CASE identifier, same as the JSON encoding.
fn code_label(code: WarningCode) -> String {
    serde_json::to_value(code)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}

fn money(value: Decimal) -> String {
    format!("${}", value.round_dp(2))
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.round_dp(2))
}
