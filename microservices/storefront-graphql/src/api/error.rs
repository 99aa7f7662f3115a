//! Mapping service errors onto GraphQL errors

use async_graphql::ErrorExtensions;
use storefront_core::StorefrontError;

use crate::handlers::delete_user::DeleteUserError;

/// Resolver error with `extensions.code` set from the error taxonomy
pub(crate) fn graphql_error(err: StorefrontError) -> async_graphql::Error {
    coded(err.to_string(), err.error_code())
}

pub(crate) fn delete_user_error(err: DeleteUserError) -> async_graphql::Error {
    coded(err.to_string(), err.error_code())
}

fn coded(message: String, code: &'static str) -> async_graphql::Error {
    async_graphql::Error::new(message).extend_with(|_, ext| ext.set("code", code))
}
