//! Fixed-rate loan amortization: monthly payment and full schedule.
//!
//! All math in `rust_decimal::Decimal`. The schedule loop mirrors the
//! standard fixed-payment split: interest on the outstanding balance first,
//! remainder to principal.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::DealCheckError;
use crate::types::{Money, Percent, Rate};
use crate::DealCheckResult;

const MONTHS_PER_YEAR: u32 = 12;

/// One month's payment split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// 1-based payment number.
    pub index: u32,
    pub interest_portion: Money,
    pub principal_portion: Money,
    /// Outstanding balance after this payment.
    pub remaining_balance: Money,
}

/// Full payment schedule plus aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub entries: Vec<PaymentEntry>,
    /// Fixed monthly payment. Zero for an empty schedule.
    pub monthly_payment: Money,
    pub total_interest_paid: Money,
}

impl AmortizationSchedule {
    /// Schedule for a cash purchase or zero-term loan: no payments at all.
    pub fn empty() -> Self {
        AmortizationSchedule {
            entries: Vec::new(),
            monthly_payment: Decimal::ZERO,
            total_interest_paid: Decimal::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Standard fixed-rate payment: P = L * r(1+r)^n / ((1+r)^n - 1).
///
/// A zero rate degenerates to straight-line amortization (L / n).
pub fn monthly_payment(
    loan_amount: Money,
    monthly_rate: Rate,
    total_months: u32,
) -> DealCheckResult<Money> {
    if monthly_rate.is_zero() {
        if total_months == 0 {
            return Err(DealCheckError::DivisionByZero {
                context: "monthly payment with zero rate and zero months".into(),
            });
        }
        return Ok(loan_amount / Decimal::from(total_months));
    }

    let compound = (Decimal::ONE + monthly_rate).powd(Decimal::from(total_months));
    let denominator = compound - Decimal::ONE;

    if denominator.is_zero() {
        return Err(DealCheckError::DivisionByZero {
            context: "mortgage payment denominator".into(),
        });
    }

    Ok(loan_amount * monthly_rate * compound / denominator)
}

/// Generate the full schedule for a fixed-rate loan.
///
/// `loan_amount <= 0` or `term_years == 0` is the cash-purchase / degenerate
/// case and yields an empty schedule, not an error. A negative rate is a
/// caller contract violation and is rejected.
pub fn generate_schedule(
    loan_amount: Money,
    annual_rate: Percent,
    term_years: u32,
) -> DealCheckResult<AmortizationSchedule> {
    if annual_rate < Decimal::ZERO {
        return Err(DealCheckError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    if loan_amount <= Decimal::ZERO || term_years == 0 {
        return Ok(AmortizationSchedule::empty());
    }

    let total_months = term_years * MONTHS_PER_YEAR;
    let monthly_rate = annual_rate / dec!(100) / Decimal::from(MONTHS_PER_YEAR);
    let payment = monthly_payment(loan_amount, monthly_rate, total_months)?;

    let mut entries = Vec::with_capacity(total_months as usize);
    let mut balance = loan_amount;
    let mut total_interest = Decimal::ZERO;

    for index in 1..=total_months {
        let interest = balance * monthly_rate;
        // Final payment absorbs rounding drift so the balance lands at
        // exactly zero.
        let principal = if index == total_months {
            balance
        } else {
            payment - interest
        };

        balance -= principal;
        total_interest += interest;

        entries.push(PaymentEntry {
            index,
            interest_portion: interest,
            principal_portion: principal,
            remaining_balance: balance,
        });
    }

    Ok(AmortizationSchedule {
        entries,
        monthly_payment: payment,
        total_interest_paid: total_interest,
    })
}
