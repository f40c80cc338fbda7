//! # calcd
//!
//! A JSON calculator service. One endpoint takes two operands and an
//! operator symbol and answers with the rendered expression and its result.
//!
//! ```text
//! POST /api/calculate  {"num1": 10, "num2": 5, "operator": "+"}
//! 200                  {"expression": "10 + 5", "operator": "+", "result": "15"}
//! ```
//!
//! Supported operators: `+ - * / % ^`. Division by zero is not an error; its
//! result is the string `"Error (divide by 0)"`.
//!
//! ## Running
//!
//! ```rust,no_run
//! use calcd::{Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), calcd::Error> {
//!     let config = Config::default();
//!     Server::new(&config).serve(calcd::app(&config)).await
//! }
//! ```

use std::sync::Arc;

use http::Method;

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod api;
pub mod assets;
pub mod config;
pub mod evaluator;
pub mod health;
pub mod validate;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{BODY_LIMIT, Server};

/// Builds the full application router for `config`.
pub fn app(config: &Config) -> Router {
    let assets = Arc::new(assets::Assets::new(config.public_dir.clone()));

    Router::new()
        .on(Method::POST, "/api/calculate", api::calculate)
        .on(Method::GET,  "/healthz",       health::liveness)
        .fallback(move |req| {
            let assets = Arc::clone(&assets);
            async move { assets.serve(req).await }
        })
}
