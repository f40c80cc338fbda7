//! Request-body validation for the calculator endpoint.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// Digits with an optional sign and an optional single decimal point.
/// Exponents, whitespace and hex are rejected.
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]*[.])?[0-9]+$").expect("numeric pattern is valid")
});

/// The rule a field broke.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Constraint {
    #[serde(rename = "isNumeric")]
    Numeric,
    #[serde(rename = "isString")]
    String,
}

/// One field-level violation, as sent in the `errors` array.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub msg: &'static str,
    pub path: &'static str,
    pub location: &'static str,
    pub constraint: Constraint,
}

impl FieldError {
    fn new(path: &'static str, constraint: Constraint, value: Option<Value>) -> Self {
        Self {
            kind: "field",
            value,
            msg: "Invalid value",
            path,
            location: "body",
            constraint,
        }
    }
}

/// The body fields as received, before any type checks. Absent fields are
/// `None`; a body that is not a JSON object has no fields at all.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawCalculation {
    pub num1: Option<Value>,
    pub num2: Option<Value>,
    pub operator: Option<Value>,
}

impl From<Value> for RawCalculation {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(map) => Self::from(map),
            _ => Self::default(),
        }
    }
}

impl From<Map<String, Value>> for RawCalculation {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            num1: map.remove("num1"),
            num2: map.remove("num2"),
            operator: map.remove("operator"),
        }
    }
}

/// A request that passed validation. The operator is only known to be a
/// string; whether it is a supported symbol is the evaluator's call.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationRequest {
    pub num1: f64,
    pub num2: f64,
    pub operator: String,
}

/// Checks every field and reports all violations at once, in field order.
pub fn validate(raw: RawCalculation) -> Result<CalculationRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let num1 = numeric(raw.num1, "num1", &mut errors);
    let num2 = numeric(raw.num2, "num2", &mut errors);
    let operator = match raw.operator {
        Some(Value::String(s)) => Some(s),
        other => {
            errors.push(FieldError::new("operator", Constraint::String, other));
            None
        }
    };

    match (num1, num2, operator) {
        (Some(num1), Some(num2), Some(operator)) if errors.is_empty() => {
            Ok(CalculationRequest { num1, num2, operator })
        }
        _ => Err(errors),
    }
}

fn numeric(value: Option<Value>, path: &'static str, errors: &mut Vec<FieldError>) -> Option<f64> {
    let parsed = match &value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if NUMERIC.is_match(s) => s.parse().ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.push(FieldError::new(path, Constraint::Numeric, value));
    }
    parsed
}
