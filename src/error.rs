//! Unified error type.

use thiserror::Error;

/// The error type returned by calcd's fallible server operations.
///
/// Calculator failures (bad input, unknown operator) are HTTP
/// [`Response`](crate::Response) values, not `Error`s. This type only
/// surfaces infrastructure failures: binding to a port or accepting a
/// connection.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
