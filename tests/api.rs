use calcd::{Config, Request, Response, Router};
use http::{Method, StatusCode};
use serde_json::{Value, json};

fn app() -> Router {
    calcd::app(&Config::default())
}

async fn post(body: Value) -> Response {
    let req = Request::new(Method::POST, "/api/calculate")
        .with_header("content-type", "application/json")
        .with_body(body.to_string());
    app().handle(req).await
}

fn body(res: &Response) -> Value {
    serde_json::from_slice(res.body()).expect("response body is JSON")
}

#[tokio::test]
async fn adds_two_numbers() {
    let res = post(json!({"num1": 10, "num2": 5, "operator": "+"})).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(body(&res), json!({"expression": "10 + 5", "operator": "+", "result": "15"}));
}

#[tokio::test]
async fn every_operator() {
    let cases = [
        (10, 5, "-", "10 - 5", "5"),
        (10, 5, "*", "10 * 5", "50"),
        (10, 5, "/", "10 / 5", "2"),
        (10, 3, "%", "10 % 3", "1"),
        (2, 3, "^", "2 ^ 3", "8"),
    ];
    for (num1, num2, operator, expression, result) in cases {
        let res = post(json!({"num1": num1, "num2": num2, "operator": operator})).await;
        assert_eq!(res.status_code(), StatusCode::OK, "{operator}");
        let body = body(&res);
        assert_eq!(body["expression"], expression);
        assert_eq!(body["operator"], operator);
        assert_eq!(body["result"], result);
    }
}

#[tokio::test]
async fn division_by_zero_is_a_result() {
    let res = post(json!({"num1": 10, "num2": 0, "operator": "/"})).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(body(&res)["result"], "Error (divide by 0)");
}

#[tokio::test]
async fn decimals_negatives_and_zero() {
    let res = post(json!({"num1": 10.5, "num2": 2.5, "operator": "+"})).await;
    assert_eq!(body(&res)["result"], "13");

    let res = post(json!({"num1": -10, "num2": 5, "operator": "+"})).await;
    assert_eq!(body(&res)["result"], "-5");

    let res = post(json!({"num1": 0, "num2": 5, "operator": "*"})).await;
    assert_eq!(body(&res)["result"], "0");
}

#[tokio::test]
async fn numeric_strings_are_parsed() {
    let res = post(json!({"num1": "10.50", "num2": "-2", "operator": "*"})).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(body(&res), json!({"expression": "10.5 * -2", "operator": "*", "result": "-21"}));
}

#[tokio::test]
async fn invalid_operands_are_rejected() {
    for payload in [
        json!({"num1": "invalid", "num2": 5, "operator": "+"}),
        json!({"num1": 10, "num2": "invalid", "operator": "+"}),
    ] {
        let res = post(payload).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        let errors = body(&res)["errors"].as_array().cloned().unwrap_or_default();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["constraint"], "isNumeric");
        assert_eq!(errors[0]["value"], "invalid");
    }
}

#[tokio::test]
async fn missing_operator_is_rejected() {
    let res = post(json!({"num1": 10, "num2": 5})).await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&res)["errors"],
        json!([{
            "type": "field",
            "msg": "Invalid value",
            "path": "operator",
            "location": "body",
            "constraint": "isString",
        }])
    );
}

#[tokio::test]
async fn malformed_body_fails_every_field() {
    let req = Request::new(Method::POST, "/api/calculate")
        .with_header("content-type", "application/json")
        .with_body("{num1: 10");
    let res = app().handle(req).await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res)["errors"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn body_without_json_content_type_has_no_fields() {
    let payload = json!({"num1": 10, "num2": 5, "operator": "+"}).to_string();

    let untyped = Request::new(Method::POST, "/api/calculate").with_body(payload.clone());
    let text = Request::new(Method::POST, "/api/calculate")
        .with_header("content-type", "text/plain")
        .with_body(payload.clone());
    for req in [untyped, text] {
        let res = app().handle(req).await;
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&res)["errors"].as_array().map(Vec::len), Some(3));
    }

    let with_charset = Request::new(Method::POST, "/api/calculate")
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(payload);
    let res = app().handle(with_charset).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(body(&res)["result"], "15");
}

#[tokio::test]
async fn unsupported_operator() {
    let res = post(json!({"num1": 10, "num2": 5, "operator": "&"})).await;

    assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&res), json!({"error": "Unsupported operator"}));
}

#[tokio::test]
async fn identical_requests_get_identical_answers() {
    let payload = json!({"num1": 7.25, "num2": -3, "operator": "%"});
    let first = post(payload.clone()).await;
    let second = post(payload).await;

    assert_eq!(first.status_code(), second.status_code());
    assert_eq!(first.body(), second.body());
}

#[tokio::test]
async fn calculate_only_accepts_post() {
    let res = app().handle(Request::new(Method::PUT, "/api/calculate")).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn liveness_probe() {
    let res = app().handle(Request::new(Method::GET, "/healthz")).await;

    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(res.body(), b"ok");
}
