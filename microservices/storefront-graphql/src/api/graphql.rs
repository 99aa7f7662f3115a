//! GraphQL schema: entity resolvers plus the query and mutation roots

use async_graphql::{ComplexObject, Context, EmptySubscription, Object, Result, Schema, ID};
use tracing::info;

use super::error::{delete_user_error, graphql_error};
use crate::domain::{Order, OrderStatus, Product, User};
use crate::handlers::delete_user::{self, DeleteUserCommand};
use crate::infrastructure::Stores;

pub type StorefrontSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over an injected storage handle
pub fn build_schema(stores: Stores) -> StorefrontSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(stores)
        .finish()
}

fn stores<'a>(ctx: &Context<'a>) -> Result<&'a Stores> {
    ctx.data::<Stores>()
}

#[ComplexObject]
impl Order {
    /// The owning user; null when the reference dangles
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        stores(ctx)?
            .users
            .get(&self.user_id)
            .await
            .map_err(graphql_error)
    }

    /// One entry per stored reference, in order; dangling references are null
    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<Option<Product>>> {
        stores(ctx)?
            .products
            .get_many(&self.product_ids)
            .await
            .map_err(graphql_error)
    }
}

/// Root query type
#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        stores(ctx)?.users.list().await.map_err(graphql_error)
    }

    async fn user(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<User>> {
        let Some(id) = id else {
            return Ok(None);
        };
        stores(ctx)?.users.get(&id).await.map_err(graphql_error)
    }

    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        stores(ctx)?.products.list().await.map_err(graphql_error)
    }

    async fn product(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Product>> {
        let Some(id) = id else {
            return Ok(None);
        };
        stores(ctx)?.products.get(&id).await.map_err(graphql_error)
    }

    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        stores(ctx)?.orders.list().await.map_err(graphql_error)
    }

    async fn order(&self, ctx: &Context<'_>, id: Option<ID>) -> Result<Option<Order>> {
        let Some(id) = id else {
            return Ok(None);
        };
        stores(ctx)?.orders.get(&id).await.map_err(graphql_error)
    }
}

/// Root mutation type
#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_user(&self, ctx: &Context<'_>, username: String, password: String) -> Result<User> {
        info!(%username, "addUser");
        stores(ctx)?
            .users
            .register(username, &password)
            .await
            .map_err(graphql_error)
    }

    /// Deletes the user's orders first, then the user
    async fn delete_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        info!(id = %id.as_str(), "deleteUser");
        let cmd = DeleteUserCommand { user_id: id.0 };
        let result = delete_user::handle(stores(ctx)?, cmd)
            .await
            .map_err(delete_user_error)?;
        Ok(result.user)
    }

    async fn add_product(&self, ctx: &Context<'_>, name: String, price: f64) -> Result<Product> {
        info!(%name, price, "addProduct");
        stores(ctx)?
            .products
            .create(name, price)
            .await
            .map_err(graphql_error)
    }

    /// Orders referencing the product keep their (now dangling) reference
    async fn delete_product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Product>> {
        info!(id = %id.as_str(), "deleteProduct");
        stores(ctx)?.products.delete(&id).await.map_err(graphql_error)
    }

    async fn add_order(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] status: OrderStatus,
        user_id: ID,
        product_ids: Option<Vec<ID>>,
    ) -> Result<Order> {
        let product_ids: Vec<String> = product_ids
            .unwrap_or_default()
            .into_iter()
            .map(|id| id.0)
            .collect();
        info!(?status, user_id = %user_id.as_str(), products = product_ids.len(), "addOrder");
        stores(ctx)?
            .orders
            .create(status, &user_id, &product_ids)
            .await
            .map_err(graphql_error)
    }

    async fn delete_order(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Order>> {
        info!(id = %id.as_str(), "deleteOrder");
        stores(ctx)?.orders.delete(&id).await.map_err(graphql_error)
    }
}
