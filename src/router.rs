//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Requests that match no
//! route go to the fallback handler. `HEAD` falls back to the `GET` tree and
//! is answered without a body.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup; hand it to an [`App`](crate::App).
/// Every registration returns `self` so calls chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    fallback: Option<BoxedHandler<S>>,
}

impl<S: Clone + Send + Sync + 'static> Router<S> {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None }
    }

    /// Register a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route.
    /// Routes are registered once at startup, so this is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    /// Handler for requests no route matches. Without one the router answers
    /// a bodiless `404`.
    pub fn fallback(mut self, handler: impl Handler<S>) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = match self.routes.get(method) {
            Some(tree) => tree,
            None if *method == Method::HEAD => self.routes.get(&Method::GET)?,
            None => return None,
        };
        let matched = tree.at(normalize(path)).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), decode(v)))
            .collect();
        Some((handler, params))
    }

    /// Routes one request to its handler, or to the fallback.
    pub(crate) fn call(&self, mut req: Request, state: S) -> BoxFuture {
        let head = *req.method() == Method::HEAD;
        let fut = match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => {
                req.params = params;
                handler.call(req, state)
            }
            None => match &self.fallback {
                Some(handler) => handler.call(req, state),
                None => Box::pin(async { Response::status(StatusCode::NOT_FOUND) }),
            },
        };
        if head {
            Box::pin(async move { fut.await.without_body() })
        } else {
            fut
        }
    }
}

impl<S: Clone + Send + Sync + 'static> Default for Router<S> {
    fn default() -> Self { Self::new() }
}

/// `/api/products/` and `/api/products` are the same route; `/` stays `/`.
fn normalize(path: &str) -> &str {
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// `%31` reads as `1`. A segment that does not decode to UTF-8 is kept as sent.
fn decode(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_id(req: Request, _: ()) -> Response {
        Response::text(req.param("id").unwrap_or("none").to_owned())
    }

    async fn root(_: Request, _: ()) -> &'static str {
        "root"
    }

    async fn missing(_: Request, _: ()) -> Response {
        Response::status(StatusCode::IM_A_TEAPOT)
    }

    fn router() -> Router<()> {
        Router::new()
            .get("/", root)
            .get("/items/{id}", echo_id)
    }

    #[tokio::test]
    async fn extracts_params() {
        let res = router().call(Request::new(Method::GET, "/items/42"), ()).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn trailing_slash_is_ignored() {
        let res = router().call(Request::new(Method::GET, "/items/7/"), ()).await;
        assert_eq!(res.body(), b"7");

        let res = router().call(Request::new(Method::GET, "/"), ()).await;
        assert_eq!(res.body(), b"root");
    }

    #[tokio::test]
    async fn params_are_percent_decoded() {
        let res = router().call(Request::new(Method::GET, "/items/%31%20a"), ()).await;
        assert_eq!(res.body(), b"1 a");

        let res = router().call(Request::new(Method::GET, "/items/%FF"), ()).await;
        assert_eq!(res.body(), b"%FF");
    }

    #[tokio::test]
    async fn head_uses_get_route_without_body() {
        let res = router().call(Request::new(Method::HEAD, "/items/42"), ()).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn head_on_unknown_path_hits_fallback_without_body() {
        let res = router()
            .fallback(missing)
            .call(Request::new(Method::HEAD, "/nowhere"), ())
            .await;
        assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn method_mismatch_is_unrouted() {
        let res = router().call(Request::new(Method::DELETE, "/"), ()).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn fallback_answers_unmatched() {
        let res = router()
            .fallback(missing)
            .call(Request::new(Method::GET, "/nowhere"), ())
            .await;
        assert_eq!(res.status_code(), StatusCode::IM_A_TEAPOT);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = router().get("/items/{other}", echo_id);
    }
}
