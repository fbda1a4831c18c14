use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use common::{CartId, ItemId, Money, OrderId, UserId};

use crate::{
    Cart, Item, Result, StoreError, User, UserOrder,
    store::Store,
};

/// PostgreSQL-backed store implementation.
///
/// Cart rows reference the live catalog, so a cart's total follows the
/// current item prices. Order rows carry denormalized item copies, so
/// a submitted order is immune to later catalog changes.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_user(row: &PgRow) -> Result<User> {
        Ok(User {
            id: UserId::from_uuid(row.try_get::<Uuid, _>("id")?),
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
        })
    }

    fn row_to_item(row: &PgRow) -> Result<Item> {
        Ok(Item {
            id: ItemId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            price: Money::from_cents(row.try_get::<i64, _>("price_cents")?),
            description: row.try_get("description")?,
        })
    }

    async fn items_for_order(&self, order_id: OrderId) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT item_id AS id, name, price_cents, description
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn create_user(&self, user: User, cart: Cart) -> Result<User> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(&user.username)
        .bind(&user.password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return StoreError::Conflict(format!(
                    "username already exists: {}",
                    user.username
                ));
            }
            StoreError::Database(e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO carts (id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(cart.id.as_uuid())
        .bind(cart.user_id.as_uuid())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create_item(&self, item: Item) -> Result<Item> {
        sqlx::query(
            r#"
            INSERT INTO items (id, name, price_cents, description)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(&item.name)
        .bind(item.price.cents())
        .bind(&item.description)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    async fn list_items(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price_cents, description
            FROM items
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn find_item_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price_cents, description
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_item).transpose()
    }

    async fn find_items_by_name(&self, name: &str) -> Result<Vec<Item>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price_cents, description
            FROM items
            WHERE name = $1
            ORDER BY price_cents ASC
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn cart_for_user(&self, user_id: UserId) -> Result<Option<Cart>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let cart_id = CartId::from_uuid(row.try_get::<Uuid, _>("id")?);

        let item_rows = sqlx::query(
            r#"
            SELECT i.id, i.name, i.price_cents, i.description
            FROM cart_items ci
            JOIN items i ON i.id = ci.item_id
            WHERE ci.cart_id = $1
            ORDER BY ci.position ASC
            "#,
        )
        .bind(cart_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let items = item_rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Cart {
            id: cart_id,
            user_id,
            items,
        }))
    }

    async fn save_cart(&self, cart: Cart) -> Result<Cart> {
        let mut tx = self.pool.begin().await?;

        // The cart row exists from user creation; the insert only fires
        // for carts persisted outside that path (e.g. test fixtures).
        sqlx::query(
            r#"
            INSERT INTO carts (id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(cart.id.as_uuid())
        .bind(cart.user_id.as_uuid())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart.id.as_uuid())
            .execute(&mut *tx)
            .await?;

        for (position, item) in cart.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO cart_items (cart_id, position, item_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(cart.id.as_uuid())
            .bind(position as i32)
            .bind(item.id.as_uuid())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(cart_id = %cart.id, units = cart.items.len(), "cart saved");
        Ok(cart)
    }

    async fn save_order(&self, order: UserOrder) -> Result<UserOrder> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, total_cents, placed_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.user_id.as_uuid())
        .bind(order.total.cents())
        .bind(order.placed_at)
        .execute(&mut *tx)
        .await?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, position, item_id, name, price_cents, description)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(order.id.as_uuid())
            .bind(position as i32)
            .bind(item.id.as_uuid())
            .bind(&item.name)
            .bind(item.price.cents())
            .bind(&item.description)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(order_id = %order.id, total = %order.total, "order saved");
        Ok(order)
    }

    async fn orders_for_user(&self, user_id: UserId) -> Result<Vec<UserOrder>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, total_cents, placed_at
            FROM orders
            WHERE user_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let id = OrderId::from_uuid(row.try_get::<Uuid, _>("id")?);
            orders.push(UserOrder {
                id,
                user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
                items: self.items_for_order(id).await?,
                total: Money::from_cents(row.try_get::<i64, _>("total_cents")?),
                placed_at: row.try_get::<DateTime<Utc>, _>("placed_at")?,
            });
        }

        Ok(orders)
    }
}
