//! Order entity
//!
//! An order owns one reference to a user and an ordered list of product
//! references. Neither is checked for existence; both may dangle.

use async_graphql::{Enum, SimpleObject, ID};
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Enum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[graphql(rename_items = "PascalCase")]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
}

/// `user` and `products` are resolved on demand from the stored references
#[derive(Debug, Clone, PartialEq, SimpleObject)]
#[graphql(complex)]
pub struct Order {
    pub id: ID,
    pub status: OrderStatus,
    #[graphql(skip)]
    pub user_id: String,
    #[graphql(skip)]
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFields {
    #[serde(default)]
    pub status: OrderStatus,
    pub user_id: String,
    // Duplicates are meaningful (quantity), so this stays a list
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";

    type Fields = OrderFields;

    fn from_parts(id: ID, fields: OrderFields) -> Self {
        Self {
            id,
            status: fields.status,
            user_id: fields.user_id,
            product_ids: fields.product_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_defaults_to_processing() {
        let fields: OrderFields = serde_json::from_value(json!({ "userId": "u1" })).unwrap();
        assert_eq!(fields.status, OrderStatus::Processing);
        assert!(fields.product_ids.is_empty());
    }

    #[test]
    fn test_stored_shape() {
        let fields = OrderFields {
            status: OrderStatus::Shipped,
            user_id: "u1".to_string(),
            product_ids: vec!["p1".to_string(), "p1".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({ "status": "Shipped", "userId": "u1", "productIds": ["p1", "p1"] })
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<OrderFields, _> =
            serde_json::from_value(json!({ "status": "Cancelled", "userId": "u1" }));
        assert!(result.is_err());
    }
}
