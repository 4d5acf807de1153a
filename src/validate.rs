//! Request payloads and the rules that turn them into store operations.
//!
//! Presence rules follow "truthiness": an empty string and a price of zero
//! count as missing, both on create (rejected) and on update (ignored).
//! `inStock` is the exception on update, where an explicit `false` is applied.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::error::ApiError;
use crate::product::{NewProduct, ProductPatch};

/// Body of `POST /api/products`.
///
/// Every field is optional at the type level so a missing field surfaces as
/// [`ApiError::Validation`] rather than a decoding error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Number>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl CreateProduct {
    /// Requires `name`, `description`, `price` and `category`; defaults
    /// `inStock` to `false`.
    pub fn validate(self) -> Result<NewProduct, ApiError> {
        match (
            present(self.name),
            present(self.description),
            nonzero(self.price),
            present(self.category),
        ) {
            (Some(name), Some(description), Some(price), Some(category)) => Ok(NewProduct {
                name,
                description,
                price,
                category,
                in_stock: self.in_stock.unwrap_or(false),
            }),
            _ => Err(ApiError::Validation),
        }
    }
}

/// Body of `PUT /api/products/{id}`. Any subset of fields.
///
/// Nothing is required here, so a field of the wrong type (`"price": "10"`)
/// is skipped like an absent one instead of failing the whole request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Number>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub in_stock: Option<bool>,
}

impl UpdateProduct {
    /// Drops empty strings and a zero price; keeps `inStock` whenever given.
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: present(self.name),
            description: present(self.description),
            price: nonzero(self.price),
            category: present(self.category),
            in_stock: self.in_stock,
        }
    }
}

/// Any JSON value is accepted; one that is not a `T` reads as `None`.
fn lenient<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(de)?;
    Ok(serde_json::from_value(value).ok())
}

fn present(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.is_empty())
}

fn nonzero(n: Option<Number>) -> Option<Number> {
    n.filter(|n| n.as_f64().is_some_and(|v| v != 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(json: &str) -> Result<NewProduct, ApiError> {
        serde_json::from_str::<CreateProduct>(json).unwrap().validate()
    }

    #[test]
    fn accepts_complete_payload_and_defaults_in_stock() {
        let p = create(r#"{"name":"Mug","description":"Ceramic","price":10,"category":"kitchen"}"#).unwrap();
        assert_eq!(p.name, "Mug");
        assert_eq!(p.price, Number::from(10));
        assert!(!p.in_stock);
    }

    #[test]
    fn keeps_explicit_in_stock() {
        let p = create(r#"{"name":"a","description":"b","price":1.5,"category":"c","inStock":true}"#).unwrap();
        assert!(p.in_stock);
        assert_eq!(p.price.as_f64(), Some(1.5));
    }

    #[test]
    fn rejects_each_missing_field() {
        for json in [
            r#"{"description":"b","price":1,"category":"c"}"#,
            r#"{"name":"a","price":1,"category":"c"}"#,
            r#"{"name":"a","description":"b","category":"c"}"#,
            r#"{"name":"a","description":"b","price":1}"#,
        ] {
            assert!(matches!(create(json), Err(ApiError::Validation)), "{json}");
        }
    }

    #[test]
    fn rejects_falsy_values() {
        assert!(create(r#"{"name":"","description":"b","price":1,"category":"c"}"#).is_err());
        assert!(create(r#"{"name":"a","description":"b","price":0,"category":"c"}"#).is_err());
        assert!(create(r#"{"name":"a","description":"b","price":0.0,"category":"c"}"#).is_err());
        assert!(create(r#"{"name":"a","description":"b","price":null,"category":"c"}"#).is_err());
    }

    #[test]
    fn negative_price_is_allowed() {
        assert!(create(r#"{"name":"a","description":"b","price":-5,"category":"c"}"#).is_ok());
    }

    #[test]
    fn update_drops_falsy_but_keeps_false_in_stock() {
        let patch: UpdateProduct =
            serde_json::from_str(r#"{"name":"","price":0,"category":"toys","inStock":false}"#).unwrap();
        let patch = patch.into_patch();
        assert_eq!(patch.name, None);
        assert_eq!(patch.price, None);
        assert_eq!(patch.category.as_deref(), Some("toys"));
        assert_eq!(patch.in_stock, Some(false));
        assert_eq!(patch.description, None);
    }

    #[test]
    fn update_skips_wrongly_typed_fields() {
        let patch: UpdateProduct =
            serde_json::from_str(r#"{"price":"10","name":"Desk","inStock":"yes","category":7}"#).unwrap();
        let patch = patch.into_patch();
        assert_eq!(patch.price, None);
        assert_eq!(patch.in_stock, None);
        assert_eq!(patch.category, None);
        assert_eq!(patch.name.as_deref(), Some("Desk"));
    }

    #[test]
    fn update_body_that_is_not_an_object_is_still_rejected() {
        assert!(serde_json::from_str::<UpdateProduct>("5").is_err());
    }
}
