//! Route handlers for the product API.

use http::StatusCode;

use crate::error::ApiError;
use crate::product::Product;
use crate::request::Request;
use crate::response::{Json, Response};
use crate::store::Store;
use crate::validate::{CreateProduct, UpdateProduct};

pub const WELCOME: &str = "Welcome to the Product API! Go to /api/products to see all products.";

// GET /
pub async fn welcome(_req: Request, _store: Store) -> &'static str {
    WELCOME
}

// GET /api/products
pub async fn list(_req: Request, store: Store) -> Json<Vec<Product>> {
    Json(store.list_all())
}

// GET /api/products/{id}
pub async fn get(req: Request, store: Store) -> Result<Json<Product>, ApiError> {
    let id = req.param("id").ok_or(ApiError::NotFound)?;
    store.find_by_id(id).map(Json).ok_or(ApiError::NotFound)
}

// POST /api/products → 201
pub async fn create(req: Request, store: Store) -> Result<Response, ApiError> {
    let new = req.json::<CreateProduct>()?.validate()?;
    let product = store.insert(new);
    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .json(&product))
}

// PUT /api/products/{id}
//
// The product is looked up before the body is read, so an unknown id is a
// 404 whatever the body holds.
pub async fn update(req: Request, store: Store) -> Result<Json<Product>, ApiError> {
    let id = req.param("id").ok_or(ApiError::NotFound)?;
    if store.find_by_id(id).is_none() {
        return Err(ApiError::NotFound);
    }
    let patch = req.json::<UpdateProduct>()?.into_patch();
    store.update(id, patch).map(Json).ok_or(ApiError::NotFound)
}

// DELETE /api/products/{id} → 204
pub async fn delete(req: Request, store: Store) -> Result<StatusCode, ApiError> {
    let id = req.param("id").ok_or(ApiError::NotFound)?;
    if store.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Fallback for anything no route matches.
pub async fn not_found(_req: Request, _store: Store) -> ApiError {
    ApiError::NoRoute
}
