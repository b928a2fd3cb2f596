use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::YtmError;
use crate::types::{with_metadata, ComputationOutput, Currency, MonetaryAmount, Money, Rate};
use crate::YtmResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Significant digits kept after every division (DECIMAL64).
const SIGNIFICANT_DIGITS: u32 = 16;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Input for the approximate yield-to-maturity calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldToMaturityInput {
    /// Annual coupon (interest) payment.
    pub coupon_payment: MonetaryAmount,
    /// Face (par) value repaid at maturity.
    pub face_value: MonetaryAmount,
    /// Current market price of the bond.
    pub price: MonetaryAmount,
    /// Whole years remaining until maturity.
    pub years_to_maturity: u32,
}

/// Where the price sits relative to face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricePosition {
    Discount,
    Par,
    Premium,
}

/// Output of the approximate yield-to-maturity calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldToMaturityOutput {
    /// Approximate annualized yield as a ratio (0.1125 = 11.25%).
    pub ytm: Rate,
    /// (face - price) spread evenly over the years to maturity.
    pub averaged_difference: Money,
    /// Mean of face value and price.
    pub average_price: Money,
    /// Coupon payment / price.
    pub current_yield: Rate,
    pub price_position: PricePosition,
}

// ---------------------------------------------------------------------------
// Public API: formula
// ---------------------------------------------------------------------------

/// Approximate yield to maturity:
///
/// ```text
/// averaged_difference = (face_value - price) / years_to_maturity
/// average_price       = (face_value + price) / 2
/// ytm                 = (coupon_payment + averaged_difference) / average_price
/// ```
///
/// No validation is performed. A zero `years_to_maturity` or a zero
/// `face_value + price` yields [`YtmError::DivisionByZero`]; other degenerate
/// inputs (negative prices, say) produce a result without complaint.
pub fn yield_to_maturity(
    coupon_payment: Money,
    face_value: Money,
    price: Money,
    years_to_maturity: u32,
) -> YtmResult<Rate> {
    let (_, _, ytm) = decompose(coupon_payment, face_value, price, years_to_maturity)?;
    Ok(ytm)
}

/// [`yield_to_maturity`] over monetary amounts. Currency units are ignored.
pub fn yield_to_maturity_of(
    coupon_payment: &MonetaryAmount,
    face_value: &MonetaryAmount,
    price: &MonetaryAmount,
    years_to_maturity: u32,
) -> YtmResult<Rate> {
    yield_to_maturity(
        coupon_payment.amount,
        face_value.amount,
        price.amount,
        years_to_maturity,
    )
}

/// Round to 16 significant digits, ties to even, and drop trailing zeros so
/// `108 / 960` reads `0.1125` rather than carrying the division's full scale.
pub fn round_decimal64(value: Decimal) -> Decimal {
    value
        .round_sf_with_strategy(SIGNIFICANT_DIGITS, RoundingStrategy::MidpointNearestEven)
        .unwrap_or(value)
        .normalize()
}

// ---------------------------------------------------------------------------
// Public API: validated calculation
// ---------------------------------------------------------------------------

/// Validate the inputs, compute the approximate yield to maturity along with
/// its intermediate terms and current yield, and wrap the result in the
/// standard output envelope.
pub fn calculate_yield_to_maturity(
    input: &YieldToMaturityInput,
) -> YtmResult<ComputationOutput<YieldToMaturityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // -- Validation --
    validate_input(input)?;

    let coupon = input.coupon_payment.amount;
    let face = input.face_value.amount;
    let price = input.price.amount;

    if let Some(currencies) = mixed_currencies(input) {
        let msg = format!(
            "Inputs are quoted in different currencies ({}); amounts are used as-is without conversion",
            currencies.join(", ")
        );
        warn!("{}", msg);
        warnings.push(msg);
    }

    let (averaged_difference, average_price, ytm) =
        decompose(coupon, face, price, input.years_to_maturity)?;

    let current_yield = divide(coupon, price, "current yield")?;

    let price_position = if price > face {
        PricePosition::Premium
    } else if price < face {
        PricePosition::Discount
    } else {
        PricePosition::Par
    };

    if ytm < Decimal::ZERO {
        let msg = format!(
            "Negative yield to maturity ({}): the premium over face value exceeds the coupon income",
            ytm
        );
        warn!("{}", msg);
        warnings.push(msg);
    }

    debug!(
        %ytm,
        %averaged_difference,
        %average_price,
        years_to_maturity = input.years_to_maturity,
        "yield to maturity computed"
    );

    let output = YieldToMaturityOutput {
        ytm,
        averaged_difference,
        average_price,
        current_yield,
        price_position,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "formula": "(C + (F - P) / n) / ((F + P) / 2)",
        "precision": "16 significant digits",
        "rounding": "half-even",
        "currency_handling": "units ignored",
    });

    Ok(with_metadata(
        "Approximate Yield to Maturity (average-price method)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Returns (averaged_difference, average_price, ytm).
fn decompose(
    coupon_payment: Money,
    face_value: Money,
    price: Money,
    years_to_maturity: u32,
) -> YtmResult<(Money, Money, Rate)> {
    let discount = face_value
        .checked_sub(price)
        .ok_or_else(|| overflow("face value less price"))?;
    let averaged_difference = divide(
        discount,
        Decimal::from(years_to_maturity),
        "averaged difference",
    )?;

    let total = face_value
        .checked_add(price)
        .ok_or_else(|| overflow("face value plus price"))?;
    // Halving cannot overflow or hit a zero divisor.
    let average_price = round_decimal64(total / dec!(2));

    let income = coupon_payment
        .checked_add(averaged_difference)
        .ok_or_else(|| overflow("coupon plus averaged difference"))?;
    let ytm = divide(income, average_price, "average price")?;

    Ok((averaged_difference, average_price, ytm))
}

fn divide(numerator: Decimal, denominator: Decimal, context: &str) -> YtmResult<Decimal> {
    if denominator.is_zero() {
        return Err(YtmError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .map(round_decimal64)
        .ok_or_else(|| overflow(context))
}

fn overflow(context: &str) -> YtmError {
    YtmError::Overflow {
        context: context.to_string(),
    }
}

fn mixed_currencies(input: &YieldToMaturityInput) -> Option<Vec<String>> {
    let mut seen: Vec<&Currency> = Vec::new();
    for currency in [
        &input.coupon_payment.currency,
        &input.face_value.currency,
        &input.price.currency,
    ] {
        if !seen.contains(&currency) {
            seen.push(currency);
        }
    }
    if seen.len() > 1 {
        Some(seen.iter().map(|c| c.to_string()).collect())
    } else {
        None
    }
}

fn validate_input(input: &YieldToMaturityInput) -> YtmResult<()> {
    if input.face_value.amount <= Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if input.price.amount <= Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "price".into(),
            reason: "Price must be positive".into(),
        });
    }
    if input.coupon_payment.amount < Decimal::ZERO {
        return Err(YtmError::InvalidInput {
            field: "coupon_payment".into(),
            reason: "Coupon payment cannot be negative".into(),
        });
    }
    if input.years_to_maturity == 0 {
        return Err(YtmError::InvalidInput {
            field: "years_to_maturity".into(),
            reason: "Years to maturity must be at least 1".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn discount_bond_input() -> YieldToMaturityInput {
        YieldToMaturityInput {
            coupon_payment: MonetaryAmount::of(dec!(100)),
            face_value: MonetaryAmount::of(dec!(1000)),
            price: MonetaryAmount::of(dec!(920)),
            years_to_maturity: 10,
        }
    }

    // -----------------------------------------------------------------------
    // Formula
    // -----------------------------------------------------------------------

    #[test]
    fn test_reference_discount_bond() {
        let ytm = yield_to_maturity(dec!(100), dec!(1000), dec!(920), 10).unwrap();
        assert_eq!(ytm, dec!(0.1125));
    }

    #[test]
    fn test_decompose_intermediate_terms() {
        let (diff, avg, ytm) = decompose(dec!(100), dec!(1000), dec!(920), 10).unwrap();
        assert_eq!(diff, dec!(8));
        assert_eq!(avg, dec!(960));
        assert_eq!(ytm, dec!(0.1125));
    }

    #[test]
    fn test_par_bond_equals_coupon_over_face() {
        let ytm = yield_to_maturity(dec!(50), dec!(1000), dec!(1000), 7).unwrap();
        assert_eq!(ytm, dec!(50) / dec!(1000));
        assert_eq!(ytm, dec!(0.05));
    }

    #[test]
    fn test_repeating_quotients_rounded_to_sixteen_digits() {
        let (diff, avg, ytm) = decompose(dec!(100), dec!(1000), dec!(950), 3).unwrap();
        assert_eq!(diff, dec!(16.66666666666667));
        assert_eq!(avg, dec!(975));
        assert_eq!(ytm, dec!(0.1196581196581197));
    }

    #[test]
    fn test_zero_years_is_division_by_zero() {
        let err = yield_to_maturity(dec!(100), dec!(1000), dec!(920), 0).unwrap_err();
        match err {
            YtmError::DivisionByZero { context } => assert_eq!(context, "averaged difference"),
            other => panic!("Expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_face_and_price_is_division_by_zero() {
        let err = yield_to_maturity(dec!(100), dec!(0), dec!(0), 5).unwrap_err();
        match err {
            YtmError::DivisionByZero { context } => assert_eq!(context, "average price"),
            other => panic!("Expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_inputs_are_not_validated() {
        // face + price == 0 with non-zero legs still divides by zero
        assert!(yield_to_maturity(dec!(10), dec!(500), dec!(-500), 5).is_err());
        // a price far above face simply yields a negative number
        let ytm = yield_to_maturity(dec!(0), dec!(1000), dec!(1100), 5).unwrap();
        assert_eq!(ytm, dec!(-0.01904761904761905));
    }

    #[test]
    fn test_overflow_is_an_error_not_a_panic() {
        let err = yield_to_maturity(Decimal::ZERO, Decimal::MAX, Decimal::MAX, 1).unwrap_err();
        match err {
            YtmError::Overflow { context } => assert_eq!(context, "face value plus price"),
            other => panic!("Expected Overflow, got {other:?}"),
        }
    }

    #[test]
    fn test_monetary_overload_ignores_currency() {
        let ytm = yield_to_maturity_of(
            &MonetaryAmount::new(dec!(100), Currency::EUR),
            &MonetaryAmount::new(dec!(1000), Currency::JPY),
            &MonetaryAmount::of(dec!(920)),
            10,
        )
        .unwrap();
        assert_eq!(ytm, dec!(0.1125));
    }

    #[test]
    fn test_quotients_carry_no_padding_zeros() {
        let (diff, avg, ytm) = decompose(dec!(100), dec!(1000), dec!(920), 10).unwrap();
        assert_eq!(ytm.to_string(), "0.1125");
        assert_eq!(diff.to_string(), "8");
        assert_eq!(avg.to_string(), "960");

        let par = yield_to_maturity(dec!(50), dec!(1000), dec!(1000), 7).unwrap();
        assert_eq!(par.to_string(), "0.05");
    }

    #[test]
    fn test_round_decimal64_ties_to_even() {
        assert_eq!(
            round_decimal64(dec!(1.0000000000000005)),
            dec!(1.000000000000000)
        );
        assert_eq!(
            round_decimal64(dec!(1.0000000000000015)),
            dec!(1.000000000000002)
        );
        assert_eq!(round_decimal64(dec!(0.1125)), dec!(0.1125));
    }

    // -----------------------------------------------------------------------
    // Envelope
    // -----------------------------------------------------------------------

    #[test]
    fn test_calculate_discount_bond() {
        let out = calculate_yield_to_maturity(&discount_bond_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.ytm, dec!(0.1125));
        assert_eq!(r.averaged_difference, dec!(8));
        assert_eq!(r.average_price, dec!(960));
        assert_eq!(r.current_yield, dec!(0.1086956521739130));
        assert_eq!(r.price_position, PricePosition::Discount);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_calculate_classifies_par_and_premium() {
        let mut input = discount_bond_input();
        input.price = MonetaryAmount::of(dec!(1000));
        let out = calculate_yield_to_maturity(&input).unwrap();
        assert_eq!(out.result.price_position, PricePosition::Par);
        assert_eq!(out.result.ytm, out.result.current_yield);

        input.price = MonetaryAmount::of(dec!(1100));
        let out = calculate_yield_to_maturity(&input).unwrap();
        assert_eq!(out.result.price_position, PricePosition::Premium);
    }

    #[test]
    fn test_calculate_rejects_zero_years() {
        let mut input = discount_bond_input();
        input.years_to_maturity = 0;
        match calculate_yield_to_maturity(&input).unwrap_err() {
            YtmError::InvalidInput { field, .. } => assert_eq!(field, "years_to_maturity"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_calculate_rejects_non_positive_price() {
        let mut input = discount_bond_input();
        input.price = MonetaryAmount::of(Decimal::ZERO);
        match calculate_yield_to_maturity(&input).unwrap_err() {
            YtmError::InvalidInput { field, .. } => assert_eq!(field, "price"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_calculate_warns_on_negative_yield() {
        let input = YieldToMaturityInput {
            coupon_payment: MonetaryAmount::of(Decimal::ZERO),
            face_value: MonetaryAmount::of(dec!(1000)),
            price: MonetaryAmount::of(dec!(1100)),
            years_to_maturity: 5,
        };
        let out = calculate_yield_to_maturity(&input).unwrap();
        assert!(out.result.ytm < Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("Negative yield"));
    }

    #[test]
    fn test_mixed_currencies_listed_in_input_order() {
        let mut input = discount_bond_input();
        input.face_value.currency = Currency::GBP;
        assert_eq!(
            mixed_currencies(&input),
            Some(vec!["USD".to_string(), "GBP".to_string()])
        );
        assert_eq!(mixed_currencies(&discount_bond_input()), None);
    }
}
