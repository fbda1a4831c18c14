use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{ItemId, UserId};

use crate::{
    Cart, Item, Result, StoreError, User, UserOrder,
    store::Store,
};

/// In-memory store implementation for tests and local development.
///
/// Stores everything behind `RwLock`ed maps and provides the same
/// interface as the PostgreSQL implementation. Items and orders keep
/// insertion order.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    items: Arc<RwLock<Vec<Item>>>,
    carts: Arc<RwLock<HashMap<UserId, Cart>>>,
    orders: Arc<RwLock<Vec<UserOrder>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored, across all users.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all stored data.
    pub async fn clear(&self) {
        self.users.write().await.clear();
        self.items.write().await.clear();
        self.carts.write().await.clear();
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_user(&self, user: User, cart: Cart) -> Result<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username already exists: {}",
                user.username
            )));
        }

        let mut carts = self.carts.write().await;
        carts.insert(cart.user_id, cart);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn create_item(&self, item: Item) -> Result<Item> {
        let mut items = self.items.write().await;
        items.push(item.clone());
        Ok(item)
    }

    async fn list_items(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.clone())
    }

    async fn find_item_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|i| i.name == name).cloned().collect())
    }

    async fn cart_for_user(&self, user_id: UserId) -> Result<Option<Cart>> {
        let carts = self.carts.read().await;
        Ok(carts.get(&user_id).cloned())
    }

    async fn save_cart(&self, cart: Cart) -> Result<Cart> {
        let mut carts = self.carts.write().await;
        carts.insert(cart.user_id, cart.clone());
        Ok(cart)
    }

    async fn save_order(&self, order: UserOrder) -> Result<UserOrder> {
        let mut orders = self.orders.write().await;
        orders.push(order.clone());
        Ok(order)
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }
}
