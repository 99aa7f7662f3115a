//! Delete user handler
//!
//! Removes a user together with the orders it owns. The steps run strictly
//! in sequence: every owned order is deleted (and awaited) before the user
//! itself is. Nothing here is atomic; a failure part-way leaves the orders
//! deleted so far gone and the user in place.

use storefront_core::StorefrontError;
use tracing::{info, instrument, warn};

use crate::domain::User;
use crate::infrastructure::Stores;

/// Delete user command
pub struct DeleteUserCommand {
    pub user_id: String,
}

/// Delete user result
#[derive(Debug)]
pub struct DeleteUserResult {
    /// The removed user, `None` if no such user existed
    pub user: Option<User>,
    pub orders_deleted: usize,
}

/// Handle delete user
#[instrument(skip(stores, cmd), fields(user_id = %cmd.user_id))]
pub async fn handle(
    stores: &Stores,
    cmd: DeleteUserCommand,
) -> Result<DeleteUserResult, DeleteUserError> {
    let owned = stores
        .orders
        .list_for_user(&cmd.user_id)
        .await
        .map_err(DeleteUserError::Lookup)?;

    let mut orders_deleted = 0;
    for order in &owned {
        if let Err(source) = stores.orders.delete(&order.id).await {
            warn!(
                order_id = %order.id.as_str(),
                orders_deleted,
                remaining = owned.len() - orders_deleted,
                "Order cascade aborted, user kept"
            );
            return Err(DeleteUserError::Cascade {
                order_id: order.id.to_string(),
                orders_deleted,
                source,
            });
        }
        orders_deleted += 1;
    }

    let user = stores
        .users
        .delete(&cmd.user_id)
        .await
        .map_err(DeleteUserError::Delete)?;

    info!(
        orders_deleted,
        user_found = user.is_some(),
        "User deleted"
    );

    Ok(DeleteUserResult {
        user,
        orders_deleted,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("Failed to look up orders: {0}")]
    Lookup(StorefrontError),

    #[error("Failed to delete order {order_id} after {orders_deleted} order(s) were removed: {source}")]
    Cascade {
        order_id: String,
        orders_deleted: usize,
        source: StorefrontError,
    },

    #[error("Failed to delete user: {0}")]
    Delete(StorefrontError),
}

impl DeleteUserError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Cascade { .. } => "CASCADE_FAILED",
            Self::Lookup(source) | Self::Delete(source) => source.error_code(),
        }
    }
}
