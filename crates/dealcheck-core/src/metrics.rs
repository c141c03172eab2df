//! Deal metrics: cash flow, return ratios, and cash-needed figures for a
//! rental property purchase.
//!
//! `calculate` is a pure function over an immutable [`DealInputs`] snapshot.
//! Operating expenses deliberately exclude debt service so that cap rate (an
//! unlevered metric) and cash flow (a levered metric) derive from the same
//! base.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization;
use crate::error::DealCheckError;
use crate::types::{Money, Percent, PropertyType};
use crate::DealCheckResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Immutable snapshot of every parameter describing a deal.
///
/// All percentage fields are whole-number percents (7.5 = 7.5%), divided by
/// 100 only at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealInputs {
    // Purchase
    pub purchase_price: Money,
    pub property_type: PropertyType,
    pub is_cash_purchase: bool,

    // Financing
    pub down_payment_percent: Percent,
    /// Annual interest rate (e.g. 7.5 for 7.5%)
    pub interest_rate: Percent,
    /// Whole years; must be > 0 when a loan is requested
    pub loan_term_years: u32,
    pub closing_cost_percent: Percent,

    // Income
    pub monthly_rent: Money,
    pub other_monthly_income: Money,
    pub vacancy_rate_percent: Percent,

    // Expenses
    pub annual_property_tax: Money,
    pub monthly_insurance: Money,
    pub monthly_hoa: Money,
    /// Of collected rent
    pub property_management_percent: Percent,
    /// Of property value, annualized
    pub maintenance_percent: Percent,
    /// Of property value, annualized
    pub capex_percent: Percent,
    pub monthly_utilities: Money,
    pub other_monthly_expenses: Money,

    // Projection
    pub appreciation_rate_percent: Percent,
}

impl DealInputs {
    pub fn down_payment_amount(&self) -> Money {
        self.purchase_price * self.down_payment_percent / HUNDRED
    }

    /// Zero for cash purchases.
    pub fn loan_amount(&self) -> Money {
        if self.is_cash_purchase {
            Decimal::ZERO
        } else {
            self.purchase_price - self.down_payment_amount()
        }
    }

    pub fn closing_costs(&self) -> Money {
        self.purchase_price * self.closing_cost_percent / HUNDRED
    }

    pub fn gross_monthly_income(&self) -> Money {
        self.monthly_rent + self.other_monthly_income
    }
}

/// Derived, stateless result set. Recomputed on every call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    pub monthly_mortgage_payment: Money,
    /// Excludes the mortgage payment by design.
    pub monthly_operating_expenses: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    pub net_operating_income_annual: Money,
    /// Whole-number percent (6.96 = 6.96%)
    pub cap_rate: Percent,
    /// Whole-number percent
    pub cash_on_cash_return: Percent,
    /// None for cash purchases: no debt service to cover. Never coerced
    /// to zero, which would misread a cash deal as high-risk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_service_coverage_ratio: Option<Decimal>,
    pub total_cash_needed: Money,
    pub gross_rent_multiplier: Decimal,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Fail-fast boundary validation. Out-of-domain values are rejected here so
/// callers get a form-level error instead of a misleading zero or NaN.
pub fn validate(inputs: &DealInputs) -> DealCheckResult<()> {
    if inputs.purchase_price < Decimal::ZERO {
        return Err(DealCheckError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price cannot be negative".into(),
        });
    }

    if inputs.interest_rate < Decimal::ZERO {
        return Err(DealCheckError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    if !inputs.is_cash_purchase && inputs.loan_amount() > Decimal::ZERO && inputs.loan_term_years == 0
    {
        return Err(DealCheckError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year when financing is requested".into(),
        });
    }

    let bounded_percents = [
        ("down_payment_percent", inputs.down_payment_percent),
        ("closing_cost_percent", inputs.closing_cost_percent),
        ("vacancy_rate_percent", inputs.vacancy_rate_percent),
        (
            "property_management_percent",
            inputs.property_management_percent,
        ),
        ("maintenance_percent", inputs.maintenance_percent),
        ("capex_percent", inputs.capex_percent),
    ];
    for (field, value) in bounded_percents {
        if value < Decimal::ZERO || value > HUNDRED {
            return Err(DealCheckError::InvalidInput {
                field: field.into(),
                reason: "Percentage must be between 0 and 100".into(),
            });
        }
    }

    let nonnegative_money = [
        ("monthly_rent", inputs.monthly_rent),
        ("other_monthly_income", inputs.other_monthly_income),
        ("annual_property_tax", inputs.annual_property_tax),
        ("monthly_insurance", inputs.monthly_insurance),
        ("monthly_hoa", inputs.monthly_hoa),
        ("monthly_utilities", inputs.monthly_utilities),
        ("other_monthly_expenses", inputs.other_monthly_expenses),
    ];
    for (field, value) in nonnegative_money {
        if value < Decimal::ZERO {
            return Err(DealCheckError::InvalidInput {
                field: field.into(),
                reason: "Amount cannot be negative".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Compute the full metric set for a deal.
///
/// Pure and total over the valid input domain: every ratio is guarded, so
/// degenerate-but-valid cases (zero price, zero rent, cash purchase) yield
/// the documented zero/sentinel values rather than errors.
pub fn calculate(inputs: &DealInputs) -> DealCheckResult<CalculationResults> {
    validate(inputs)?;

    // --- Cash needed at close ---
    let down_payment = inputs.down_payment_amount();
    let loan_amount = inputs.loan_amount();
    let closing_costs = inputs.closing_costs();
    let total_cash_needed = if inputs.is_cash_purchase {
        inputs.purchase_price + closing_costs
    } else {
        down_payment + closing_costs
    };

    // --- Monthly operating expenses (debt service excluded) ---
    let monthly_property_tax = inputs.annual_property_tax / MONTHS_PER_YEAR;
    let monthly_maintenance =
        inputs.purchase_price * inputs.maintenance_percent / HUNDRED / MONTHS_PER_YEAR;
    let monthly_capex = inputs.purchase_price * inputs.capex_percent / HUNDRED / MONTHS_PER_YEAR;
    let monthly_management = inputs.monthly_rent * inputs.property_management_percent / HUNDRED;

    let monthly_operating_expenses = monthly_property_tax
        + inputs.monthly_insurance
        + inputs.monthly_hoa
        + monthly_management
        + monthly_maintenance
        + monthly_capex
        + inputs.monthly_utilities
        + inputs.other_monthly_expenses;

    // --- Income ---
    let effective_monthly_income = inputs.gross_monthly_income()
        * (Decimal::ONE - inputs.vacancy_rate_percent / HUNDRED);

    // --- Debt service ---
    let monthly_mortgage_payment = if loan_amount > Decimal::ZERO {
        let monthly_rate = inputs.interest_rate / HUNDRED / MONTHS_PER_YEAR;
        let total_months = inputs.loan_term_years * 12;
        amortization::monthly_payment(loan_amount, monthly_rate, total_months)?
    } else {
        Decimal::ZERO
    };
    let annual_debt_service = monthly_mortgage_payment * MONTHS_PER_YEAR;

    // --- Outputs ---
    let net_operating_income_annual =
        (effective_monthly_income - monthly_operating_expenses) * MONTHS_PER_YEAR;

    let cap_rate = if inputs.purchase_price > Decimal::ZERO {
        net_operating_income_annual / inputs.purchase_price * HUNDRED
    } else {
        Decimal::ZERO
    };

    let monthly_cash_flow =
        effective_monthly_income - monthly_operating_expenses - monthly_mortgage_payment;
    let annual_cash_flow = monthly_cash_flow * MONTHS_PER_YEAR;

    let cash_on_cash_return = if total_cash_needed > Decimal::ZERO {
        annual_cash_flow / total_cash_needed * HUNDRED
    } else {
        Decimal::ZERO
    };

    let debt_service_coverage_ratio = if annual_debt_service > Decimal::ZERO {
        Some(net_operating_income_annual / annual_debt_service)
    } else {
        None
    };

    let gross_rent_multiplier = if inputs.monthly_rent > Decimal::ZERO {
        inputs.purchase_price / (inputs.monthly_rent * MONTHS_PER_YEAR)
    } else {
        Decimal::ZERO
    };

    Ok(CalculationResults {
        monthly_mortgage_payment,
        monthly_operating_expenses,
        monthly_cash_flow,
        annual_cash_flow,
        net_operating_income_annual,
        cap_rate,
        cash_on_cash_return,
        debt_service_coverage_ratio,
        total_cash_needed,
        gross_rent_multiplier,
    })
}
