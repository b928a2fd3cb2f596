use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use ytm_core::fixed_income::yield_to_maturity::{self, YieldToMaturityInput};
use ytm_core::{Currency, MonetaryAmount};

use crate::input;

/// Arguments for approximate yield-to-maturity
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct YieldToMaturityArgs {
    /// Annual coupon payment (e.g. 100)
    #[arg(long, alias = "coupon")]
    pub coupon_payment: Option<Decimal>,

    /// Face (par) value repaid at maturity
    #[arg(long, alias = "face")]
    pub face_value: Option<Decimal>,

    /// Current market price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Whole years until maturity
    #[arg(long, alias = "years")]
    pub years_to_maturity: Option<u32>,

    /// Currency code applied to all three amounts
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl YieldToMaturityArgs {
    fn has_flags(&self) -> bool {
        self.coupon_payment.is_some()
            || self.face_value.is_some()
            || self.price.is_some()
            || self.years_to_maturity.is_some()
    }

    fn to_input(&self) -> Result<YieldToMaturityInput, Box<dyn std::error::Error>> {
        let currency: Currency = self.currency.parse()?;
        let amount = |value: Decimal| MonetaryAmount::new(value, currency.clone());
        Ok(YieldToMaturityInput {
            coupon_payment: amount(
                self.coupon_payment
                    .ok_or("--coupon-payment is required (or provide --input)")?,
            ),
            face_value: amount(
                self.face_value
                    .ok_or("--face-value is required (or provide --input)")?,
            ),
            price: amount(self.price.ok_or("--price is required (or provide --input)")?),
            years_to_maturity: self
                .years_to_maturity
                .ok_or("--years-to-maturity is required (or provide --input)")?,
        })
    }
}

pub fn run_yield_to_maturity(
    args: YieldToMaturityArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let ytm_input = resolve_input(&args, input::stdin::read_stdin)?;

    tracing::debug!(
        coupon = %ytm_input.coupon_payment,
        face = %ytm_input.face_value,
        price = %ytm_input.price,
        years = ytm_input.years_to_maturity,
        "running yield-to-maturity"
    );

    let result = yield_to_maturity::calculate_yield_to_maturity(&ytm_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Input precedence: `--input` file, then piped stdin, then individual flags.
fn resolve_input(
    args: &YieldToMaturityArgs,
    read_stdin: impl FnOnce() -> Result<Option<Value>, Box<dyn std::error::Error>>,
) -> Result<YieldToMaturityInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        input::file::read_input(path)
    } else if let Some(data) = read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else if args.has_flags() {
        args.to_input()
    } else {
        Err(
            "--input <file.json|file.yaml>, stdin, or --coupon-payment/--face-value/--price/--years-to-maturity required"
                .into(),
        )
    }
}
