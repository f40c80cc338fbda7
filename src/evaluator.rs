//! The arithmetic core: one operator, two operands, one outcome.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

/// Rendered in place of a quotient when the divisor is zero.
pub const DIVIDE_BY_ZERO: &str = "Error (divide by 0)";

/// Failure to evaluate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Unsupported operator")]
    UnsupportedOperator,
}

/// A recognized operator symbol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Rem, // %
    Pow, // ^
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "^",
        }
    }

    /// Applies the operator.
    pub fn apply(self, a: f64, b: f64) -> Outcome {
        match self {
            Self::Add => Outcome::Number(a + b),
            Self::Sub => Outcome::Number(a - b),
            Self::Mul => Outcome::Number(a * b),
            // -0.0 == 0.0, so a negative-zero divisor also yields the sentinel.
            Self::Div if b == 0.0 => Outcome::DivideByZero,
            Self::Div => Outcome::Number(a / b),
            // f64 `%` truncates: the sign follows the dividend.
            Self::Rem => Outcome::Number(a % b),
            Self::Pow => Outcome::Number(pow(a, b)),
        }
    }
}

/// Exact match on the symbol; surrounding whitespace is not trimmed.
impl FromStr for Operator {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Sub),
            "*" => Ok(Self::Mul),
            "/" => Ok(Self::Div),
            "%" => Ok(Self::Rem),
            "^" => Ok(Self::Pow),
            _   => Err(EvalError::UnsupportedOperator),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successful evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    Number(f64),
    /// Division by zero. A value, not an error; renders as [`DIVIDE_BY_ZERO`].
    DivideByZero,
}

impl Outcome {
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n),
            Self::DivideByZero => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::DivideByZero => f.write_str(DIVIDE_BY_ZERO),
        }
    }
}

/// Evaluates `a <op> b`.
pub fn evaluate(a: f64, b: f64, op: &str) -> Result<Outcome, EvalError> {
    let operator: Operator = op.parse()?;
    let outcome = operator.apply(a, b);
    debug!(a, b, op = operator.as_str(), result = %outcome, "evaluated");
    Ok(outcome)
}

/// `powf`, except that `(±1) ^ (±Infinity | NaN)` is NaN.
/// Rust (like C) returns 1 there.
fn pow(a: f64, b: f64) -> f64 {
    if a.abs() == 1.0 && !b.is_finite() {
        f64::NAN
    } else {
        a.powf(b)
    }
}

/// Renders a number the way JSON clients of this service expect it: the
/// shortest round-trip digits, no trailing `.0`, `NaN`/`Infinity` spelled
/// out, negative zero as `0`, and exponential form outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    // `{:e}` gives "1e21" / "1.5e-7"; positive exponents need an explicit sign.
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(a: f64, b: f64, op: &str) -> f64 {
        evaluate(a, b, op).unwrap().as_number().unwrap()
    }

    #[test]
    fn basic_operators() {
        assert_eq!(number(10.0, 5.0, "+"), 15.0);
        assert_eq!(number(10.0, 5.0, "-"), 5.0);
        assert_eq!(number(10.0, 5.0, "*"), 50.0);
        assert_eq!(number(10.0, 5.0, "/"), 2.0);
        assert_eq!(number(10.0, 3.0, "%"), 1.0);
        assert_eq!(number(2.0, 3.0, "^"), 8.0);
    }

    #[test]
    fn divide_by_zero_is_a_value() {
        let outcome = evaluate(10.0, 0.0, "/").unwrap();
        assert_eq!(outcome, Outcome::DivideByZero);
        assert_eq!(outcome.to_string(), "Error (divide by 0)");

        assert_eq!(evaluate(10.0, -0.0, "/").unwrap(), Outcome::DivideByZero);
        assert_eq!(evaluate(0.0, 0.0, "/").unwrap(), Outcome::DivideByZero);
    }

    #[test]
    fn unsupported_operator() {
        let err = evaluate(10.0, 5.0, "&").unwrap_err();
        assert_eq!(err, EvalError::UnsupportedOperator);
        assert_eq!(err.to_string(), "Unsupported operator");

        assert!(evaluate(1.0, 1.0, "").is_err());
        assert!(evaluate(1.0, 1.0, " +").is_err());
        assert!(evaluate(1.0, 1.0, "**").is_err());
    }

    #[test]
    fn remainder_sign_follows_dividend() {
        assert_eq!(number(-10.0, 3.0, "%"), -1.0);
        assert_eq!(number(10.0, -3.0, "%"), 1.0);
        assert_eq!(number(5.5, 2.0, "%"), 1.5);
        assert!(number(10.0, 0.0, "%").is_nan());
    }

    #[test]
    fn pow_edge_cases() {
        assert_eq!(number(2.0, -1.0, "^"), 0.5);
        assert_eq!(number(9.0, 0.5, "^"), 3.0);
        assert!(number(-8.0, 1.0 / 3.0, "^").is_nan());
        assert!(number(1.0, f64::INFINITY, "^").is_nan());
        assert!(number(-1.0, f64::NEG_INFINITY, "^").is_nan());
        assert!(number(1.0, f64::NAN, "^").is_nan());
        assert_eq!(number(f64::NAN, 0.0, "^"), 1.0);
    }

    #[test]
    fn negative_and_zero_operands() {
        assert_eq!(number(-10.0, 5.0, "+"), -5.0);
        assert_eq!(number(0.0, 5.0, "*"), 0.0);
        assert_eq!(number(0.0, 5.0, "/"), 0.0);
    }

    #[test]
    fn evaluation_is_deterministic() {
        for op in ["+", "-", "*", "/", "%", "^"] {
            assert_eq!(evaluate(7.25, -3.5, op), evaluate(7.25, -3.5, op));
        }
    }

    #[test]
    fn operator_round_trips_through_its_symbol() {
        for op in ["+", "-", "*", "/", "%", "^"] {
            assert_eq!(op.parse::<Operator>().unwrap().to_string(), op);
        }
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e30), "-2.5e+30");
    }
}
