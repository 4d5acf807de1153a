//! In-memory product store.
//!
//! The store is the only owner of product records and the only place ids are
//! minted. Every operation takes the lock exactly once and releases it before
//! returning, so writes are serialized and never held across an `.await`.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::product::{self, NewProduct, Product, ProductPatch};

/// Cloneable handle to the shared product collection.
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Arc<Mutex<Vec<Product>>>,
}

impl Store {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the three records every process starts with.
    pub fn seeded() -> Self {
        Self { products: Arc::new(Mutex::new(product::seed())) }
    }

    /// Snapshot of every product in insertion order.
    pub fn list_all(&self) -> Vec<Product> {
        self.products.lock().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Product> {
        self.products.lock().iter().find(|p| p.id == id).cloned()
    }

    /// Appends a product under a freshly generated v4 UUID.
    pub fn insert(&self, new: NewProduct) -> Product {
        let product = new.with_id(Uuid::new_v4().to_string());
        self.products.lock().push(product.clone());
        debug!(id = %product.id, "product inserted");
        product
    }

    /// Merges `patch` into the product with `id`. The id itself never changes.
    pub fn update(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        let mut products = self.products.lock();
        let product = products.iter_mut().find(|p| p.id == id)?;
        patch.apply(product);
        Some(product.clone())
    }

    /// Removes the product with `id`. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut products = self.products.lock();
        match products.iter().position(|p| p.id == id) {
            Some(index) => {
                products.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.products.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.lock().is_empty()
    }
}
