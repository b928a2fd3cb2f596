use napi::Result as NapiResult;
use napi_derive::napi;

use ytm_core::fixed_income::yield_to_maturity::{self, YieldToMaturityInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn run_yield_to_maturity(input_json: &str) -> Result<String, ytm_core::YtmError> {
    let input: YieldToMaturityInput = serde_json::from_str(input_json)?;
    let output = yield_to_maturity::calculate_yield_to_maturity(&input)?;
    Ok(serde_json::to_string(&output)?)
}

// ---------------------------------------------------------------------------
// Fixed income
// ---------------------------------------------------------------------------

#[napi]
pub fn yield_to_maturity(input_json: String) -> NapiResult<String> {
    run_yield_to_maturity(&input_json).map_err(to_napi_error)
}
