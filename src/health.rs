//! Liveness probe.
//!
//! ```rust,no_run
//! use calcd::{Router, health};
//! use http::Method;
//!
//! let app = Router::new().on(Method::GET, "/healthz", health::liveness);
//! ```

use crate::{Request, Response};

/// Always `200 OK` with body `"ok"`. The service has no dependencies, so
/// answering at all means it is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}
