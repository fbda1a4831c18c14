//! Submitted order entity.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, UserId};

use crate::cart::Cart;
use crate::item::Item;

/// An order submitted by a user: an immutable snapshot of their cart.
///
/// The item sequence is copied by value at submission time and the
/// total is computed once and frozen, so later cart mutations or
/// catalog repricing never reach back into order history.
#[derive(Debug, Clone, PartialEq)]
pub struct UserOrder {
    pub id: OrderId,
    /// The user who placed the order. The order references the user but
    /// is owned by history, not by the user.
    pub user_id: UserId,
    pub items: Vec<Item>,
    /// Sum of the item prices at submission time; never recomputed.
    pub total: Money,
    pub placed_at: DateTime<Utc>,
}

impl UserOrder {
    /// Builds an order by snapshotting the current contents of a cart.
    ///
    /// The source cart is left untouched; submission does not clear it.
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            id: OrderId::new(),
            user_id: cart.user_id,
            items: cart.items.clone(),
            total: cart.total(),
            placed_at: Utc::now(),
        }
    }
}
