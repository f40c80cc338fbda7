//! `calcd` binary.
//!
//!   RUST_LOG=debug cargo run -- --port 3000
//!
//!   curl -X POST http://localhost:3000/api/calculate \
//!        -H 'content-type: application/json' \
//!        -d '{"num1":10,"num2":5,"operator":"+"}'

use calcd::{Config, Error, Server};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    Server::new(&config).serve(calcd::app(&config)).await
}
