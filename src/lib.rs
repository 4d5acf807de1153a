//! # stockroom
//!
//! A small HTTP API over an in-memory collection of products.
//!
//! ## The pipeline
//!
//! Every request runs through the same stages, in this order:
//!
//! 1. [`RequestLogger`](middleware::RequestLogger) logs method and path.
//! 2. [`Recover`](middleware::Recover) turns a panic anywhere below it into a
//!    generic `500`.
//! 3. [`Authenticate`](middleware::Authenticate) requires
//!    `Authorization: secret-token` on `/api/products` and below.
//! 4. The [`Router`] dispatches to a handler, or to the `404` fallback.
//!
//! ## Routes
//!
//! | Route | Answer |
//! |---|---|
//! | `GET /` | welcome text |
//! | `GET /api/products` | every product |
//! | `GET /api/products/{id}` | one product, or `404` |
//! | `POST /api/products` | `201` with the new product, or `400` |
//! | `PUT /api/products/{id}` | merged product, or `404` |
//! | `DELETE /api/products/{id}` | `204`, or `404` |
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use stockroom::{Server, Store};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::bind("0.0.0.0:3000".parse().unwrap()).await.unwrap();
//!     server.serve(stockroom::app(Store::seeded())).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handler;
mod product;
mod request;
mod response;
mod router;
mod server;
mod store;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod validate;

pub use app::{App, AppBuilder};
pub use error::{ApiError, Error};
pub use handler::Handler;
pub use http::{Method, StatusCode};
pub use product::{NewProduct, Product, ProductPatch};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use store::Store;

use middleware::{Authenticate, Recover, RequestLogger};

/// The single token the authenticator accepts.
pub const SHARED_SECRET: &str = "secret-token";

/// Path prefix guarded by the authenticator.
pub const PRODUCTS_PREFIX: &str = "/api/products";

/// The product API wired up around `store`.
pub fn app(store: Store) -> App {
    let router = Router::new()
        .get("/", handlers::welcome)
        .get("/api/products", handlers::list)
        .post("/api/products", handlers::create)
        .get("/api/products/{id}", handlers::get)
        .put("/api/products/{id}", handlers::update)
        .delete("/api/products/{id}", handlers::delete)
        .fallback(handlers::not_found);

    App::builder(router, store)
        .stage(RequestLogger)
        .stage(Recover)
        .stage(Authenticate::scoped(PRODUCTS_PREFIX, SHARED_SECRET))
        .build()
}
