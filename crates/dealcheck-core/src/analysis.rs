//! Whole-deal analysis: metrics, amortization schedule, and risk flags in
//! one pass over a single input snapshot.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{self, AmortizationSchedule};
use crate::metrics::{self, CalculationResults, DealInputs};
use crate::risk::{self, DealWarning};
use crate::types::{with_metadata, ComputationOutput};
use crate::DealCheckResult;

/// Complete analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub results: CalculationResults,
    /// Empty for cash purchases.
    pub schedule: AmortizationSchedule,
    /// Risk flags in fixed rule order.
    pub warnings: Vec<DealWarning>,
}

/// Run the full pipeline: validate, compute metrics, generate the payment
/// schedule, and evaluate risk rules.
///
/// Returns a `ComputationOutput<DealAnalysis>` whose envelope `warnings`
/// carry input-sanity notes; structured risk flags are in the result.
pub fn analyze_deal(inputs: &DealInputs) -> DealCheckResult<ComputationOutput<DealAnalysis>> {
    let start = Instant::now();
    let mut notes: Vec<String> = Vec::new();

    // Validates the whole input snapshot up front; the schedule call below
    // only sees domain-checked values.
    let results = metrics::calculate(inputs)?;

    let schedule = amortization::generate_schedule(
        inputs.loan_amount(),
        inputs.interest_rate,
        inputs.loan_term_years,
    )?;

    let warnings = risk::evaluate(inputs, &results);

    if inputs.appreciation_rate_percent > dec!(10) {
        notes.push(format!(
            "Appreciation assumption of {}%/yr is above historical norms, verify market data",
            inputs.appreciation_rate_percent
        ));
    }
    if inputs.interest_rate > dec!(15) {
        notes.push(format!(
            "Interest rate of {}% is unusually high, verify loan terms",
            inputs.interest_rate
        ));
    }

    let analysis = DealAnalysis {
        results,
        schedule,
        warnings,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Property Deal Analysis",
        inputs,
        notes,
        elapsed,
        analysis,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::WarningCode;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_inputs() -> DealInputs {
        DealInputs {
            purchase_price: dec!(250000),
            down_payment_percent: dec!(20),
            interest_rate: dec!(7.5),
            loan_term_years: 30,
            closing_cost_percent: dec!(3),
            monthly_rent: dec!(1800),
            vacancy_rate_percent: dec!(5),
            annual_property_tax: dec!(2400),
            monthly_insurance: dec!(150),
            maintenance_percent: dec!(1),
            capex_percent: dec!(0.5),
            ..DealInputs::default()
        }
    }

    #[test]
    fn test_full_pipeline() {
        let output = analyze_deal(&sample_inputs()).unwrap();
        let analysis = &output.result;

        assert_eq!(analysis.schedule.entries.len(), 360);
        assert_eq!(
            analysis.results.monthly_mortgage_payment,
            analysis.schedule.monthly_payment
        );
        // This deal is cash-flow negative at 20% down; flags must reflect it
        assert!(analysis.results.monthly_cash_flow < Decimal::ZERO);
        assert!(analysis
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::NegativeCashFlow));
    }

    #[test]
    fn test_cash_purchase_yields_empty_schedule() {
        let mut inputs = sample_inputs();
        inputs.is_cash_purchase = true;

        let output = analyze_deal(&inputs).unwrap();
        assert!(output.result.schedule.is_empty());
        assert_eq!(
            output.result.results.monthly_mortgage_payment,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_methodology_string() {
        let output = analyze_deal(&sample_inputs()).unwrap();
        assert_eq!(output.methodology, "Rental Property Deal Analysis");
    }

    #[test]
    fn test_envelope_captures_assumptions() {
        let output = analyze_deal(&sample_inputs()).unwrap();
        assert_eq!(
            output.assumptions.get("loan_term_years").and_then(|v| v.as_u64()),
            Some(30)
        );
    }

    #[test]
    fn test_high_appreciation_note() {
        let mut inputs = sample_inputs();
        inputs.appreciation_rate_percent = dec!(12);

        let output = analyze_deal(&inputs).unwrap();
        assert!(output
            .warnings
            .iter()
            .any(|n| n.contains("Appreciation assumption")));
    }

    #[test]
    fn test_invalid_inputs_propagate() {
        let mut inputs = sample_inputs();
        inputs.purchase_price = dec!(-1);
        assert!(analyze_deal(&inputs).is_err());
    }
}
