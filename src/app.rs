//! The request pipeline: middleware stages wrapped around a router.

use std::sync::Arc;

use crate::handler::BoxFuture;
use crate::middleware::{Endpoint, Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// A router, the state its handlers share, and the stages in front of it.
///
/// Cheap to clone: everything inside is reference-counted. The server keeps
/// one `App` and clones it into every connection task.
#[derive(Clone)]
pub struct App {
    stages: Arc<[Arc<dyn Middleware>]>,
    endpoint: Endpoint,
}

impl App {
    pub fn builder<S: Clone + Send + Sync + 'static>(router: Router<S>, state: S) -> AppBuilder {
        let router = Arc::new(router);
        let endpoint: Endpoint = Arc::new(move |req: Request| -> BoxFuture {
            router.call(req, state.clone())
        });
        AppBuilder { stages: Vec::new(), endpoint }
    }

    /// Runs one request through every stage and the router.
    pub async fn handle(&self, req: Request) -> Response {
        Next::new(Arc::clone(&self.stages), Arc::clone(&self.endpoint))
            .run(req)
            .await
    }
}

/// Collects stages in the order they should run.
pub struct AppBuilder {
    stages: Vec<Arc<dyn Middleware>>,
    endpoint: Endpoint,
}

impl AppBuilder {
    /// Appends a stage. The first stage added sees the request first.
    pub fn stage(mut self, stage: impl Middleware) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn build(self) -> App {
        App { stages: self.stages.into(), endpoint: self.endpoint }
    }
}
