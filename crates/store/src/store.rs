use async_trait::async_trait;

use common::{ItemId, UserId};

use crate::{Cart, Item, Result, User, UserOrder};

/// Core trait for persistence implementations.
///
/// The domain services are generic over this trait; it is the only way
/// they touch storage. All implementations must be thread-safe
/// (Send + Sync). No method performs domain validation; callers
/// resolve and validate entities before writing.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persists a new user together with their (empty) cart.
    ///
    /// The two writes are atomic: a user is never visible without its
    /// cart. Fails with [`crate::StoreError::Conflict`] if the username
    /// is already taken.
    async fn create_user(&self, user: User, cart: Cart) -> Result<User>;

    /// Looks up a user by id.
    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Looks up a user by their unique username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Persists a new catalog item.
    async fn create_item(&self, item: Item) -> Result<Item>;

    /// Returns the full catalog.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Looks up a catalog item by id.
    async fn find_item_by_id(&self, id: ItemId) -> Result<Option<Item>>;

    /// Returns all catalog items with exactly the given name.
    async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>>;

    /// Returns the cart owned by the given user.
    ///
    /// Every user is created with a cart, so `None` here means the
    /// user does not exist (or the data is corrupt), not that the cart
    /// is empty.
    async fn cart_for_user(&self, user_id: UserId) -> Result<Option<Cart>>;

    /// Persists the full current state of a cart, replacing its stored
    /// item sequence. Returns the persisted cart.
    async fn save_cart(&self, cart: Cart) -> Result<Cart>;

    /// Persists a submitted order. Orders are append-only; an order is
    /// never updated after this call.
    async fn save_order(&self, order: UserOrder) -> Result<UserOrder>;

    /// Returns all orders placed by the given user, oldest first
    /// (submission order).
    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>>;
}
