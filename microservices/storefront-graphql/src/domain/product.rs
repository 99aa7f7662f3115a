use async_graphql::{SimpleObject, ID};
use serde::{Deserialize, Serialize};

use super::Entity;

#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Product {
    pub id: ID,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub name: String,
    pub price: f64,
}

impl Entity for Product {
    const COLLECTION: &'static str = "products";

    type Fields = ProductFields;

    fn from_parts(id: ID, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields.name,
            price: fields.price,
        }
    }
}
