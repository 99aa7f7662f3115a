use async_graphql::{SimpleObject, ID};
use serde::{Deserialize, Serialize};

use super::Entity;

/// A registered user. `password` holds the stored credential, never the
/// plaintext the user registered with.
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFields {
    pub username: String,
    pub password: String,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

    type Fields = UserFields;

    fn from_parts(id: ID, fields: UserFields) -> Self {
        Self {
            id,
            username: fields.username,
            password: fields.password,
        }
    }
}
