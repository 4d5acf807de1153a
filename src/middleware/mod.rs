//! Middleware layer.
//!
//! A stage sees every request before the router does. It can inspect the
//! request, hand it on with [`Next::run`], and look at the response on the
//! way back, or answer on its own and never call `next` at all.
//!
//! Stages run in the order they were added to the [`App`](crate::App):
//!
//! ```text
//! RequestLogger → Recover → Authenticate → Router (→ fallback)
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::Response;

mod auth;
mod logger;
mod recover;

pub use auth::Authenticate;
pub use logger::RequestLogger;
pub use recover::Recover;

/// One link in the request pipeline.
#[async_trait]
pub trait Middleware: Send + Sync + 'static {
    /// Continue with `next.run(req).await`, or short-circuit by returning a
    /// response directly.
    async fn handle(&self, req: Request, next: Next) -> Response;
}

/// The innermost step once every stage has forwarded.
pub(crate) type Endpoint = Arc<dyn Fn(Request) -> BoxFuture + Send + Sync>;

/// The remainder of the pipeline after the current stage.
pub struct Next {
    stages: Arc<[Arc<dyn Middleware>]>,
    index: usize,
    endpoint: Endpoint,
}

impl Next {
    pub(crate) fn new(stages: Arc<[Arc<dyn Middleware>]>, endpoint: Endpoint) -> Self {
        Self { stages, index: 0, endpoint }
    }

    /// Runs the following stages and, after them, the router.
    pub async fn run(self, req: Request) -> Response {
        let stage = self.stages.get(self.index).cloned();
        match stage {
            Some(stage) => {
                let next = Self {
                    stages: self.stages,
                    index: self.index + 1,
                    endpoint: self.endpoint,
                };
                stage.handle(req, next).await
            }
            None => (self.endpoint)(req).await,
        }
    }
}
