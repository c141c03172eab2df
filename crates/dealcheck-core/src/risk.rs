//! Heuristic risk flags evaluated against deal inputs and computed metrics.
//!
//! The rule set is data, not branching: thresholds and severities live in
//! [`RULES`] so they can be tuned and unit-tested per rule without touching
//! the evaluation loop. Rules fire independently in table order and never
//! short-circuit, so output is deterministic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::metrics::{CalculationResults, DealInputs};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Caution,
    Danger,
}

/// Stable identifiers for each rule, serialized as SCREAMING_SNAKE_CASE so
/// downstream consumers can match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    NegativeCashFlow,
    DscrBelowOne,
    DscrMarginal,
    VacancyOptimistic,
    NegativeCoc,
    LowCoc,
    LowReserves,
    LowCapRate,
}

/// A single risk flag. Produced fresh on every evaluation, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealWarning {
    pub severity: Severity,
    pub code: WarningCode,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// Which quantity a rule inspects.
#[derive(Debug, Clone, Copy)]
enum RuleMetric {
    MonthlyCashFlow,
    /// Undefined (cash purchase) skips the rule.
    Dscr,
    VacancyRatePercent,
    CashOnCashReturn,
    /// maintenance_percent + capex_percent
    CombinedReservePercent,
    CapRate,
}

/// Threshold test applied to the metric. Ranges are half-open [lo, hi).
#[derive(Debug, Clone, Copy)]
enum RuleTest {
    Below(Decimal),
    InRange(Decimal, Decimal),
}

impl RuleTest {
    fn matches(&self, value: Decimal) -> bool {
        match *self {
            RuleTest::Below(threshold) => value < threshold,
            RuleTest::InRange(lo, hi) => value >= lo && value < hi,
        }
    }
}

struct WarningRule {
    code: WarningCode,
    severity: Severity,
    metric: RuleMetric,
    test: RuleTest,
    message: &'static str,
}

const RULES: &[WarningRule] = &[
    WarningRule {
        code: WarningCode::NegativeCashFlow,
        severity: Severity::Danger,
        metric: RuleMetric::MonthlyCashFlow,
        test: RuleTest::Below(Decimal::ZERO),
        message: "Deal loses money every month before appreciation",
    },
    WarningRule {
        code: WarningCode::DscrBelowOne,
        severity: Severity::Danger,
        metric: RuleMetric::Dscr,
        test: RuleTest::Below(dec!(1.0)),
        message: "Operating income does not cover debt service",
    },
    WarningRule {
        code: WarningCode::DscrMarginal,
        severity: Severity::Caution,
        metric: RuleMetric::Dscr,
        test: RuleTest::InRange(dec!(1.0), dec!(1.25)),
        message: "Debt service coverage is below the typical 1.25x lender floor",
    },
    WarningRule {
        code: WarningCode::VacancyOptimistic,
        severity: Severity::Caution,
        metric: RuleMetric::VacancyRatePercent,
        test: RuleTest::Below(dec!(5)),
        message: "Vacancy assumption is below the 5% market norm",
    },
    WarningRule {
        code: WarningCode::NegativeCoc,
        severity: Severity::Danger,
        metric: RuleMetric::CashOnCashReturn,
        test: RuleTest::Below(Decimal::ZERO),
        message: "Cash-on-cash return is negative",
    },
    WarningRule {
        code: WarningCode::LowCoc,
        severity: Severity::Caution,
        metric: RuleMetric::CashOnCashReturn,
        test: RuleTest::InRange(Decimal::ZERO, dec!(4)),
        message: "Cash-on-cash return is under 4%",
    },
    WarningRule {
        code: WarningCode::LowReserves,
        severity: Severity::Caution,
        metric: RuleMetric::CombinedReservePercent,
        test: RuleTest::Below(dec!(1)),
        message: "Combined maintenance and capex reserves are under 1% of value per year",
    },
    WarningRule {
        code: WarningCode::LowCapRate,
        severity: Severity::Info,
        metric: RuleMetric::CapRate,
        test: RuleTest::Below(dec!(4)),
        message: "Cap rate is under 4%",
    },
];

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Evaluate every rule against the deal, in table order.
pub fn evaluate(inputs: &DealInputs, results: &CalculationResults) -> Vec<DealWarning> {
    RULES
        .iter()
        .filter_map(|rule| {
            let value = metric_value(rule.metric, inputs, results)?;
            if !rule.test.matches(value) {
                return None;
            }
            Some(DealWarning {
                severity: rule.severity,
                code: rule.code,
                message: format!("{} (currently {})", rule.message, value.round_dp(2)),
            })
        })
        .collect()
}

fn metric_value(
    metric: RuleMetric,
    inputs: &DealInputs,
    results: &CalculationResults,
) -> Option<Decimal> {
    match metric {
        RuleMetric::MonthlyCashFlow => Some(results.monthly_cash_flow),
        RuleMetric::Dscr => results.debt_service_coverage_ratio,
        RuleMetric::VacancyRatePercent => Some(inputs.vacancy_rate_percent),
        RuleMetric::CashOnCashReturn => Some(results.cash_on_cash_return),
        RuleMetric::CombinedReservePercent => {
            Some(inputs.maintenance_percent + inputs.capex_percent)
        }
        RuleMetric::CapRate => Some(results.cap_rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;
    use rust_decimal_macros::dec;

    /// A deal tuned to be unremarkable: positive cash flow, healthy DSCR,
    /// sane vacancy and reserves. Individual tests then degrade one input.
    fn healthy_inputs() -> DealInputs {
        DealInputs {
            purchase_price: dec!(200000),
            down_payment_percent: dec!(25),
            interest_rate: dec!(5.0),
            loan_term_years: 30,
            monthly_rent: dec!(2400),
            vacancy_rate_percent: dec!(6),
            annual_property_tax: dec!(1800),
            monthly_insurance: dec!(90),
            maintenance_percent: dec!(1),
            capex_percent: dec!(0.5),
            ..DealInputs::default()
        }
    }

    fn evaluate_for(inputs: &DealInputs) -> Vec<DealWarning> {
        let results = metrics::calculate(inputs).unwrap();
        evaluate(inputs, &results)
    }

    fn codes(warnings: &[DealWarning]) -> Vec<WarningCode> {
        warnings.iter().map(|w| w.code).collect()
    }

    // --- Baseline ---

    #[test]
    fn test_healthy_deal_raises_no_danger_flags() {
        let warnings = evaluate_for(&healthy_inputs());
        assert!(
            !warnings.iter().any(|w| w.severity == Severity::Danger),
            "Unexpected danger flags: {warnings:?}"
        );
    }

    // --- Individual rules ---

    #[test]
    fn test_negative_cash_flow_flag() {
        let mut inputs = healthy_inputs();
        inputs.monthly_rent = dec!(900);

        let warnings = evaluate_for(&inputs);
        let flag = warnings
            .iter()
            .find(|w| w.code == WarningCode::NegativeCashFlow)
            .expect("NEGATIVE_CASH_FLOW should fire");
        assert_eq!(flag.severity, Severity::Danger);
    }

    #[test]
    fn test_dscr_below_one_flag() {
        let mut inputs = healthy_inputs();
        inputs.monthly_rent = dec!(1100);

        let results = metrics::calculate(&inputs).unwrap();
        assert!(results.debt_service_coverage_ratio.unwrap() < dec!(1.0));

        let warnings = evaluate(&inputs, &results);
        assert!(codes(&warnings).contains(&WarningCode::DscrBelowOne));
        assert!(!codes(&warnings).contains(&WarningCode::DscrMarginal));
    }

    #[test]
    fn test_dscr_marginal_flag() {
        let mut inputs = healthy_inputs();
        inputs.monthly_rent = dec!(1500);

        let results = metrics::calculate(&inputs).unwrap();
        let dscr = results.debt_service_coverage_ratio.unwrap();
        assert!(
            dscr >= dec!(1.0) && dscr < dec!(1.25),
            "Test setup broke: DSCR {dscr} not in marginal band"
        );

        let warnings = evaluate(&inputs, &results);
        assert!(codes(&warnings).contains(&WarningCode::DscrMarginal));
        assert!(!codes(&warnings).contains(&WarningCode::DscrBelowOne));
    }

    #[test]
    fn test_dscr_rules_skip_cash_purchases() {
        let mut inputs = healthy_inputs();
        inputs.is_cash_purchase = true;
        // Gut the income so a zero-coerced DSCR would have fired both rules
        inputs.monthly_rent = dec!(1100);

        let warnings = evaluate_for(&inputs);
        assert!(!codes(&warnings).contains(&WarningCode::DscrBelowOne));
        assert!(!codes(&warnings).contains(&WarningCode::DscrMarginal));
    }

    #[test]
    fn test_optimistic_vacancy_flag() {
        let mut inputs = healthy_inputs();
        inputs.vacancy_rate_percent = dec!(2);

        let warnings = evaluate_for(&inputs);
        let flag = warnings
            .iter()
            .find(|w| w.code == WarningCode::VacancyOptimistic)
            .expect("VACANCY_OPTIMISTIC should fire");
        assert_eq!(flag.severity, Severity::Caution);
    }

    #[test]
    fn test_vacancy_at_threshold_does_not_fire() {
        let mut inputs = healthy_inputs();
        inputs.vacancy_rate_percent = dec!(5);

        let warnings = evaluate_for(&inputs);
        assert!(!codes(&warnings).contains(&WarningCode::VacancyOptimistic));
    }

    #[test]
    fn test_low_coc_band_is_half_open() {
        let mut inputs = healthy_inputs();
        inputs.monthly_rent = dec!(1500);

        let results = metrics::calculate(&inputs).unwrap();
        let coc = results.cash_on_cash_return;
        assert!(
            coc >= Decimal::ZERO && coc < dec!(4),
            "Test setup broke: CoC {coc} not in low band"
        );

        let warnings = evaluate(&inputs, &results);
        assert!(codes(&warnings).contains(&WarningCode::LowCoc));
        assert!(!codes(&warnings).contains(&WarningCode::NegativeCoc));
    }

    #[test]
    fn test_low_reserves_flag() {
        let mut inputs = healthy_inputs();
        inputs.maintenance_percent = dec!(0.25);
        inputs.capex_percent = dec!(0.25);

        let warnings = evaluate_for(&inputs);
        assert!(codes(&warnings).contains(&WarningCode::LowReserves));
    }

    #[test]
    fn test_low_cap_rate_is_info() {
        let mut inputs = healthy_inputs();
        // Drive the cap rate down with an expensive property
        inputs.purchase_price = dec!(600000);
        inputs.down_payment_percent = dec!(100);

        let results = metrics::calculate(&inputs).unwrap();
        assert!(results.cap_rate < dec!(4));

        let warnings = evaluate(&inputs, &results);
        let flag = warnings
            .iter()
            .find(|w| w.code == WarningCode::LowCapRate)
            .expect("LOW_CAP_RATE should fire");
        assert_eq!(flag.severity, Severity::Info);
    }

    // --- Co-firing and ordering ---

    #[test]
    fn test_rules_cofire_independently() {
        let mut inputs = healthy_inputs();
        // Deep negative cash flow: both cash-flow and CoC danger rules fire
        inputs.monthly_rent = dec!(800);

        let results = metrics::calculate(&inputs).unwrap();
        assert!(results.monthly_cash_flow < Decimal::ZERO);

        let fired = codes(&evaluate(&inputs, &results));
        assert!(fired.contains(&WarningCode::NegativeCashFlow));
        assert!(fired.contains(&WarningCode::NegativeCoc));
        assert!(!fired.contains(&WarningCode::LowCoc));
    }

    #[test]
    fn test_warnings_follow_table_order() {
        let mut inputs = healthy_inputs();
        inputs.monthly_rent = dec!(800);
        inputs.vacancy_rate_percent = dec!(2);
        inputs.maintenance_percent = Decimal::ZERO;
        inputs.capex_percent = Decimal::ZERO;

        let fired = codes(&evaluate_for(&inputs));

        let table_order: Vec<WarningCode> = RULES.iter().map(|r| r.code).collect();
        let positions: Vec<usize> = fired
            .iter()
            .map(|c| table_order.iter().position(|t| t == c).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "Warnings out of table order: {fired:?}");
    }

    #[test]
    fn test_messages_embed_observed_value() {
        let mut inputs = healthy_inputs();
        inputs.vacancy_rate_percent = dec!(2);

        let warnings = evaluate_for(&inputs);
        let flag = warnings
            .iter()
            .find(|w| w.code == WarningCode::VacancyOptimistic)
            .unwrap();
        assert!(flag.message.contains('2'), "Message: {}", flag.message);
    }

    // --- Stable serde identifiers ---

    #[test]
    fn test_codes_serialize_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(WarningCode::NegativeCashFlow).unwrap(),
            "NEGATIVE_CASH_FLOW"
        );
        assert_eq!(
            serde_json::to_value(WarningCode::DscrBelowOne).unwrap(),
            "DSCR_BELOW_ONE"
        );
        assert_eq!(
            serde_json::to_value(Severity::Danger).unwrap(),
            "danger"
        );
    }
}
