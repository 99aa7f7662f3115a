#![allow(dead_code)]

use async_graphql::{Request, Variables};
use serde_json::{json, Value};
use storefront_docstore::MemoryStore;
use storefront_graphql::{build_schema, Stores, StorefrontSchema};

pub async fn schema() -> StorefrontSchema {
    let stores = Stores::open(&MemoryStore::new()).await.unwrap();
    build_schema(stores)
}

/// Run a document and return the full JSON response
pub async fn execute(schema: &StorefrontSchema, query: &str, variables: Value) -> Value {
    let request = Request::new(query).variables(Variables::from_json(variables));
    serde_json::to_value(schema.execute(request).await).unwrap()
}

/// Run a document that must succeed and return its `data`
pub async fn data(schema: &StorefrontSchema, query: &str, variables: Value) -> Value {
    let response = execute(schema, query, variables).await;
    assert!(
        response.get("errors").is_none(),
        "unexpected errors: {}",
        response
    );
    response["data"].clone()
}

pub fn error_messages(response: &Value) -> Vec<String> {
    response["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| e["message"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

pub async fn add_user(schema: &StorefrontSchema, username: &str) -> String {
    let data = data(
        schema,
        "mutation ($u: String!, $p: String!) { addUser(username: $u, password: $p) { id } }",
        json!({ "u": username, "p": "secret" }),
    )
    .await;
    data["addUser"]["id"].as_str().unwrap().to_string()
}

pub async fn add_product(schema: &StorefrontSchema, name: &str, price: f64) -> String {
    let data = data(
        schema,
        "mutation ($n: String!, $p: Float!) { addProduct(name: $n, price: $p) { id } }",
        json!({ "n": name, "p": price }),
    )
    .await;
    data["addProduct"]["id"].as_str().unwrap().to_string()
}

pub async fn add_order(schema: &StorefrontSchema, user_id: &str, product_ids: &[&str]) -> String {
    let data = data(
        schema,
        "mutation ($u: ID!, $p: [ID!]) { addOrder(userId: $u, productIds: $p) { id } }",
        json!({ "u": user_id, "p": product_ids }),
    )
    .await;
    data["addOrder"]["id"].as_str().unwrap().to_string()
}

pub fn unknown_id() -> String {
    storefront_docstore::DocumentId::generate().to_string()
}
