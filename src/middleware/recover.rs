use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::error;

use super::{Middleware, Next};
use crate::error::ApiError;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// Error responder.
///
/// Everything after this stage runs under `catch_unwind`. A panic is logged
/// with its payload and answered with the generic 500 body; the payload never
/// reaches the client.
#[derive(Debug, Default, Clone, Copy)]
pub struct Recover;

#[async_trait]
impl Middleware for Recover {
    async fn handle(&self, req: Request, next: Next) -> Response {
        let method = req.method().clone();
        let path = req.path().to_owned();
        match AssertUnwindSafe(next.run(req)).catch_unwind().await {
            Ok(res) => res,
            Err(payload) => {
                error!(%method, %path, "handler panicked");
                ApiError::Internal(panic_message(payload.as_ref())).into_response()
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
