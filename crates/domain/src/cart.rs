//! Cart service: resolves the user and item, applies the requested
//! number of add/remove operations, and persists the cart once.

use common::ItemId;
use store::{Cart, Store, StoreError};

use crate::error::DomainError;

/// Which way a cart modification goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartOperation::Add => write!(f, "add"),
            CartOperation::Remove => write!(f, "remove"),
        }
    }
}

/// Service for modifying user carts.
pub struct CartService<S: Store> {
    store: S,
}

impl<S: Store> CartService<S> {
    /// Creates a new cart service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Applies `quantity` units of an add/remove operation to the
    /// user's cart.
    ///
    /// The same resolved item is used for every unit, and the cart is
    /// persisted exactly once per call regardless of quantity
    /// (`quantity == 0` is a legal no-op that still persists the
    /// unchanged cart). Removing more units than the cart holds drains
    /// what is there and ignores the remainder.
    #[tracing::instrument(skip(self))]
    pub async fn modify(
        &self,
        username: &str,
        item_id: ItemId,
        quantity: u32,
        operation: CartOperation,
    ) -> Result<Cart, DomainError> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        let item = self
            .store
            .find_item_by_id(item_id)
            .await?
            .ok_or(DomainError::ItemNotFound(item_id))?;

        let mut cart = self.store.cart_for_user(user.id).await?.ok_or_else(|| {
            DomainError::Store(StoreError::DataCorruption(format!(
                "user {} has no cart",
                user.id
            )))
        })?;

        match operation {
            CartOperation::Add => {
                for _ in 0..quantity {
                    cart.add_item(item.clone());
                }
            }
            CartOperation::Remove => {
                for _ in 0..quantity {
                    if !cart.remove_item(item.id) {
                        break;
                    }
                }
            }
        }

        let cart = self.store.save_cart(cart).await?;
        metrics::counter!("cart_modifications_total").increment(1);
        tracing::info!(
            %username,
            item = %item.name,
            quantity,
            %operation,
            units = cart.len(),
            "cart updated"
        );
        Ok(cart)
    }
}
