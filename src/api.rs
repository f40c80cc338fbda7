//! `POST /api/calculate`.

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::evaluator::{self, EvalError, format_number};
use crate::request::Request;
use crate::response::{IntoResponse, Json, Response};
use crate::validate::{self, CalculationRequest, FieldError, RawCalculation};

/// Success body. `result` is always a string so the divide-by-zero sentinel
/// and numbers share one field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculationResult {
    pub expression: String,
    pub operator: String,
    pub result: String,
}

#[derive(Serialize)]
struct ValidationFailure {
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
struct Failure {
    error: String,
}

/// Evaluates a validated request into its response body.
pub fn compute(req: &CalculationRequest) -> Result<CalculationResult, EvalError> {
    let outcome = evaluator::evaluate(req.num1, req.num2, &req.operator)?;
    Ok(CalculationResult {
        expression: format!("{} {} {}", format_number(req.num1), req.operator, format_number(req.num2)),
        operator: req.operator.clone(),
        result: outcome.to_string(),
    })
}

pub async fn calculate(req: Request) -> Response {
    // Bodies not declared as JSON, and anything that is not a JSON object,
    // read as a body with no fields.
    let body: Value = if req.is_json() { req.json().unwrap_or(Value::Null) } else { Value::Null };
    let calculation = match validate::validate(RawCalculation::from(body)) {
        Ok(calculation) => calculation,
        Err(errors) => {
            debug!(failing = errors.len(), "calculation rejected by validation");
            return (StatusCode::BAD_REQUEST, Json(ValidationFailure { errors })).into_response();
        }
    };

    match compute(&calculation) {
        Ok(result) => Json(result).into_response(),
        Err(e) => {
            warn!(operator = %calculation.operator, "{e}");
            (StatusCode::BAD_REQUEST, Json(Failure { error: e.to_string() })).into_response()
        }
    }
}
