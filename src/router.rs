//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. Unmatched `GET`/`HEAD`
//! requests go to the fallback handler when one is set; everything else
//! unmatched is a bare 404.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router. Build it once at startup and pass it to
/// [`Server::serve`](crate::Server::serve).
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// ```rust,no_run
    /// # use calcd::{Request, Response, Router};
    /// # use http::Method;
    /// # async fn calculate(_: Request) -> Response { Response::text("") }
    /// # async fn liveness(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::POST, "/api/calculate", calculate)
    ///     .on(Method::GET,  "/healthz",       liveness);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Handler for `GET`/`HEAD` requests that match no route.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, mut req: Request) -> Response {
        let head = req.method == Method::HEAD;

        let found = self.lookup(&req.method, &req.path).or_else(|| {
            // HEAD falls back to the GET route, minus the body.
            if head { self.lookup(&Method::GET, &req.path) } else { None }
        });

        let response = match found {
            Some((handler, params)) => {
                req.params = params;
                handler.call(req).await
            }
            None => match &self.fallback {
                Some(handler) if head || req.method == Method::GET => handler.call(req).await,
                _ => Response::status(StatusCode::NOT_FOUND),
            },
        };

        if head { response.without_body() } else { response }
    }

    fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
