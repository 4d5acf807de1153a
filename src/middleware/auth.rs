use async_trait::async_trait;
use http::header::AUTHORIZATION;
use tracing::debug;

use super::{Middleware, Next};
use crate::error::ApiError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Shared-secret check on the `Authorization` header, applied only to paths
/// at or below `prefix`.
///
/// The header must equal the secret exactly; there is no `Bearer` scheme.
#[derive(Debug, Clone)]
pub struct Authenticate {
    prefix: String,
    token: String,
}

impl Authenticate {
    pub fn scoped(prefix: impl Into<String>, token: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), token: token.into() }
    }

    /// `/api/products` guards `/api/products` and `/api/products/…`, but not
    /// `/api/productsfoo`.
    fn guards(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[async_trait]
impl Middleware for Authenticate {
    async fn handle(&self, req: Request, next: Next) -> Response {
        if !self.guards(req.path()) {
            return next.run(req).await;
        }

        let token = match req.header(AUTHORIZATION.as_str()) {
            Some(token) => token,
            // Present but not readable as ASCII: cannot be the secret.
            None if req.headers().contains_key(AUTHORIZATION) => {
                return ApiError::AuthInvalid.into_response();
            }
            None => return ApiError::AuthMissing.into_response(),
        };
        if token.is_empty() {
            return ApiError::AuthMissing.into_response();
        }
        if token != self.token {
            debug!(path = %req.path(), "rejected token");
            return ApiError::AuthInvalid.into_response();
        }

        next.run(req).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::{Method, StatusCode};

    use super::*;
    use crate::handler::BoxFuture;

    fn run(req: Request) -> impl std::future::Future<Output = Response> {
        let stages: Arc<[Arc<dyn Middleware>]> = Arc::new([
            Arc::new(Authenticate::scoped("/api/products", "secret-token")) as Arc<dyn Middleware>,
        ]);
        let endpoint: crate::middleware::Endpoint =
            Arc::new(|_req: Request| -> BoxFuture { Box::pin(async { Response::text("through") }) });
        Next::new(stages, endpoint).run(req)
    }

    #[test]
    fn prefix_matching_respects_segments() {
        let auth = Authenticate::scoped("/api/products", "t");
        assert!(auth.guards("/api/products"));
        assert!(auth.guards("/api/products/"));
        assert!(auth.guards("/api/products/abc"));
        assert!(!auth.guards("/api/productsfoo"));
        assert!(!auth.guards("/"));
        assert!(!auth.guards("/api"));
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let res = run(Request::new(Method::GET, "/api/products")).await;
        assert_eq!(res.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(res.body(), br#"{"message":"Access denied. No token provided."}"#);
    }

    #[tokio::test]
    async fn empty_header_counts_as_missing() {
        let req = Request::new(Method::GET, "/api/products").with_header("Authorization", "");
        assert_eq!(run(req).await.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_token_is_403() {
        let req = Request::new(Method::GET, "/api/products/1")
            .with_header("Authorization", "Bearer secret-token");
        let res = run(req).await;
        assert_eq!(res.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(res.body(), br#"{"message":"Invalid token"}"#);
    }

    #[tokio::test]
    async fn non_ascii_token_is_403() {
        let req = Request::new(Method::GET, "/api/products").with_header("Authorization", "sécret-token");
        assert!(req.headers().contains_key(AUTHORIZATION));
        assert_eq!(run(req).await.status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn right_token_passes() {
        let req = Request::new(Method::GET, "/api/products").with_header("authorization", "secret-token");
        let res = run(req).await;
        assert_eq!(res.body(), b"through");
    }

    #[tokio::test]
    async fn unguarded_paths_need_no_token() {
        let res = run(Request::new(Method::GET, "/")).await;
        assert_eq!(res.body(), b"through");
    }
}
