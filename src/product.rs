//! The product record.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A product as stored and as sent on the wire.
///
/// `price` is kept as a JSON number so `10` is echoed back as `10`, not `10.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// A validated product that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

impl NewProduct {
    pub(crate) fn with_id(self, id: String) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            in_stock: self.in_stock,
        }
    }
}

/// Fields to overwrite on an existing product. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Number>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductPatch {
    pub(crate) fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
    }
}

/// The records every fresh process starts with.
pub(crate) fn seed() -> Vec<Product> {
    let product = |id: &str, name: &str, description: &str, price: u64, category: &str, in_stock| Product {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Number::from(price),
        category: category.to_owned(),
        in_stock,
    };
    vec![
        product("1", "Laptop", "High-performance laptop with 16GB RAM", 1200, "electronics", true),
        product("2", "Smartphone", "Latest model with 128GB storage", 800, "electronics", true),
        product("3", "Coffee Maker", "Programmable coffee maker with timer", 50, "kitchen", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_stock_as_camel_case() {
        let json = serde_json::to_value(&seed()[0]).unwrap();
        assert_eq!(json["inStock"], serde_json::Value::Bool(true));
        assert_eq!(json["price"], serde_json::json!(1200));
        assert!(json.get("in_stock").is_none());
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut p = seed().remove(2);
        let before = p.clone();
        ProductPatch::default().apply(&mut p);
        assert_eq!(p, before);
    }
}
