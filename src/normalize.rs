/// Numeric normalization of rejection rates
///
/// Floats are rounded to four decimal digits before they leave the engine.
/// Rounding is decided on the exact binary value with ties to even, which is
/// what fixed-precision formatting does; the value is formatted and parsed back.
use crate::types::RateValue;

/// Number of decimal digits kept
pub const DIGITS: usize = 4;

/// Round a float rate to [`DIGITS`] digits; integers and placeholders are
/// returned unchanged.
pub fn normalize(value: &RateValue) -> RateValue {
    match value {
        RateValue::Float(x) => RateValue::Float(round_digits(*x, DIGITS)),
        other => other.clone(),
    }
}

fn round_digits(x: f64, digits: usize) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{:.*}", digits, x).parse().unwrap_or(x)
}
