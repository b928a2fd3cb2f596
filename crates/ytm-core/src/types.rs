use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::YtmError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Precision label reported in every computation's metadata.
pub const PRECISION_LABEL: &str = "decimal64 (16 significant digits, half-even)";

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    GBP,
    #[default]
    USD,
    EUR,
    CHF,
    JPY,
    CAD,
    AUD,
    HKD,
    SGD,
    Other(String),
}

impl Currency {
    pub fn code(&self) -> &str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::CHF => "CHF",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::HKD => "HKD",
            Currency::SGD => "SGD",
            Currency::Other(code) => code.as_str(),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = YtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        let currency = match code.as_str() {
            "GBP" => Currency::GBP,
            "USD" => Currency::USD,
            "EUR" => Currency::EUR,
            "CHF" => Currency::CHF,
            "JPY" => Currency::JPY,
            "CAD" => Currency::CAD,
            "AUD" => Currency::AUD,
            "HKD" => Currency::HKD,
            "SGD" => Currency::SGD,
            other if other.len() == 3 && other.chars().all(|c| c.is_ascii_alphabetic()) => {
                Currency::Other(other.to_string())
            }
            _ => {
                return Err(YtmError::InvalidInput {
                    field: "currency".into(),
                    reason: format!("'{}' is not a three-letter currency code", s.trim()),
                })
            }
        };
        Ok(currency)
    }
}

/// A numeric amount tagged with its currency unit.
///
/// Calculations read only `amount`; the unit is carried so callers can keep
/// inputs self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonetaryAmount {
    pub amount: Money,
    #[serde(default)]
    pub currency: Currency,
}

impl MonetaryAmount {
    pub fn new(amount: Money, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Amount in the default currency (USD).
    pub fn of(amount: Money) -> Self {
        Self {
            amount,
            currency: Currency::default(),
        }
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
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
            precision: PRECISION_LABEL.to_string(),
        },
    }
}
