//! Catalog item entity.

use common::{ItemId, Money};

/// A catalog entry that carts and orders reference.
///
/// Items are immutable from the cart/order perspective: a cart or order
/// never changes the item it points at, it only holds or drops the
/// reference. Catalog management (seeding, repricing) happens outside
/// the cart/order flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Unit price in exact cents; never negative.
    pub price: Money,
    pub description: String,
}

impl Item {
    /// Creates a new catalog item with a fresh ID.
    pub fn new(name: impl Into<String>, price: Money, description: impl Into<String>) -> Self {
        debug_assert!(!price.is_negative(), "item price must be non-negative");
        Self {
            id: ItemId::new(),
            name: name.into(),
            price,
            description: description.into(),
        }
    }
}
