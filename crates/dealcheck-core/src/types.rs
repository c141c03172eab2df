use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Internal use only.
pub type Rate = Decimal;

/// User-facing percentages as whole numbers (7.5 = 7.5%), divided by 100
/// at the point of use. Matches how inputs are entered, never stored as
/// fractions.
pub type Percent = Decimal;

/// Residential property type with its associated unit count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    SingleFamily,
    Duplex,
    Triplex,
    Fourplex,
    /// 5+ units
    MultiFamily,
}

impl PropertyType {
    pub fn units(&self) -> u32 {
        match self {
            PropertyType::SingleFamily => 1,
            PropertyType::Duplex => 2,
            PropertyType::Triplex => 3,
            PropertyType::Fourplex => 4,
            PropertyType::MultiFamily => 5,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    /// Input-sanity notes. Structured risk warnings live in the result itself.
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
