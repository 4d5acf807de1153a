use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// Logs every request on the way in. Never short-circuits.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestLogger;

#[async_trait]
impl Middleware for RequestLogger {
    async fn handle(&self, req: Request, next: Next) -> Response {
        let method = req.method().clone();
        let path = req.path().to_owned();
        info!(%method, %path, "{method} request made to {path}");

        let start = Instant::now();
        let res = next.run(req).await;
        debug!(
            %method,
            %path,
            status = res.status_code().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request finished"
        );
        res
    }
}
