//! Order service: submission and history.

use store::{Store, StoreError, UserOrder};

use crate::error::DomainError;

/// Service for submitting orders and reading order history.
pub struct OrderService<S: Store> {
    store: S,
}

impl<S: Store> OrderService<S> {
    /// Creates a new order service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Submits the user's current cart as an order.
    ///
    /// The order is an independent snapshot: the item sequence is
    /// copied and the total computed at this moment. The cart is
    /// deliberately left as-is; submission does not clear it.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self, username: &str) -> Result<UserOrder, DomainError> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        let cart = self.store.cart_for_user(user.id).await?.ok_or_else(|| {
            DomainError::Store(StoreError::DataCorruption(format!(
                "user {} has no cart",
                user.id
            )))
        })?;

        let order = self.store.save_order(UserOrder::from_cart(&cart)).await?;
        metrics::counter!("orders_submitted_total").increment(1);
        tracing::info!(
            %username,
            units = order.items.len(),
            total = %order.total,
            "order submitted"
        );
        Ok(order)
    }

    /// Returns all orders the user has submitted, oldest first.
    ///
    /// A user with no orders gets an empty list, not a not-found.
    #[tracing::instrument(skip(self))]
    pub async fn history(&self, username: &str) -> Result<Vec<UserOrder>, DomainError> {
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;

        Ok(self.store.orders_for_user(user.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{CartOperation, CartService};
    use common::Money;
    use store::{Cart, InMemoryStore, Item, User};

    async fn setup() -> (InMemoryStore, OrderService<InMemoryStore>, Item, Item) {
        let store = InMemoryStore::new();

        let user = User::new("alice", "$argon2id$stub");
        let cart = Cart::new(user.id);
        store.create_user(user, cart).await.unwrap();

        let widget = store
            .create_item(Item::new(
                "Round Widget",
                Money::from_cents(299),
                "A widget that is round",
            ))
            .await
            .unwrap();
        let gadget = store
            .create_item(Item::new(
                "Square Widget",
                Money::from_cents(199),
                "A widget that is square",
            ))
            .await
            .unwrap();

        let service = OrderService::new(store.clone());
        (store, service, widget, gadget)
    }

    #[tokio::test]
    async fn submit_snapshots_the_current_cart() {
        let (store, service, widget, gadget) = setup().await;
        let carts = CartService::new(store.clone());
        carts
            .modify("alice", widget.id, 1, CartOperation::Add)
            .await
            .unwrap();
        carts
            .modify("alice", gadget.id, 1, CartOperation::Add)
            .await
            .unwrap();

        let order = service.submit("alice").await.unwrap();

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total.cents(), 498);
    }

    #[tokio::test]
    async fn submit_does_not_clear_the_cart() {
        let (store, service, widget, _) = setup().await;
        let carts = CartService::new(store.clone());
        carts
            .modify("alice", widget.id, 2, CartOperation::Add)
            .await
            .unwrap();

        service.submit("alice").await.unwrap();

        let alice = store.find_user_by_username("alice").await.unwrap().unwrap();
        let cart = store.cart_for_user(alice.id).await.unwrap().unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[tokio::test]
    async fn submitted_orders_are_independent_of_later_cart_changes() {
        let (store, service, widget, _) = setup().await;
        let carts = CartService::new(store.clone());
        carts
            .modify("alice", widget.id, 2, CartOperation::Add)
            .await
            .unwrap();

        let order = service.submit("alice").await.unwrap();

        carts
            .modify("alice", widget.id, 2, CartOperation::Remove)
            .await
            .unwrap();

        let history = service.history("alice").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, order.id);
        assert_eq!(history[0].items.len(), 2);
        assert_eq!(history[0].total.cents(), 598);
    }

    #[tokio::test]
    async fn submitting_an_empty_cart_yields_an_empty_order() {
        let (_, service, _, _) = setup().await;

        let order = service.submit("alice").await.unwrap();

        assert!(order.items.is_empty());
        assert_eq!(order.total, Money::zero());
    }

    #[tokio::test]
    async fn submit_for_unknown_user_is_not_found() {
        let (store, service, _, _) = setup().await;

        let result = service.submit("ghost").await;
        assert!(matches!(result, Err(DomainError::UserNotFound(_))));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn history_for_unknown_user_is_not_found() {
        let (_, service, _, _) = setup().await;

        let result = service.history("ghost").await;
        assert!(matches!(result, Err(DomainError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn empty_history_is_an_empty_list() {
        let (_, service, _, _) = setup().await;

        let history = service.history("alice").await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn history_comes_back_in_submission_order() {
        let (store, service, widget, _) = setup().await;
        let carts = CartService::new(store.clone());

        carts
            .modify("alice", widget.id, 1, CartOperation::Add)
            .await
            .unwrap();
        let first = service.submit("alice").await.unwrap();

        carts
            .modify("alice", widget.id, 1, CartOperation::Add)
            .await
            .unwrap();
        let second = service.submit("alice").await.unwrap();

        let history = service.history("alice").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, first.id);
        assert_eq!(history[1].id, second.id);
    }
}
