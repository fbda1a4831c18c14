//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use store::{Cart, Item, Money, PostgresStore, Store, StoreError, User, UserId, UserOrder};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Run migrations once through a temporary pool
            let temp_pool = sqlx::PgPool::connect(&connection_string).await.unwrap();
            PostgresStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::query("TRUNCATE TABLE users, items, carts, cart_items, orders, order_items CASCADE")
        .execute(&pool)
        .await
        .unwrap();

    PostgresStore::new(pool)
}

fn widget() -> Item {
    Item::new("Round Widget", Money::from_cents(299), "A widget that is round")
}

fn gadget() -> Item {
    Item::new("Square Widget", Money::from_cents(199), "A widget that is square")
}

async fn create_test_user(store: &PostgresStore, username: &str) -> User {
    let user = User::new(username, "$argon2id$stub");
    let cart = Cart::new(user.id);
    store.create_user(user, cart).await.unwrap()
}

#[tokio::test]
async fn create_user_and_look_up() {
    let store = get_test_store().await;
    let user = create_test_user(&store, "alice").await;

    let by_username = store.find_user_by_username("alice").await.unwrap();
    assert_eq!(by_username.as_ref().map(|u| u.id), Some(user.id));

    let by_id = store.find_user_by_id(user.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.username), Some("alice".to_string()));

    assert!(store.find_user_by_username("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let store = get_test_store().await;
    create_test_user(&store, "alice").await;

    let dup = User::new("alice", "$argon2id$stub");
    let cart = Cart::new(dup.id);
    let result = store.create_user(dup, cart).await;

    assert!(matches!(result, Err(StoreError::Conflict(_))));
}

#[tokio::test]
async fn new_user_starts_with_an_empty_cart() {
    let store = get_test_store().await;
    let user = create_test_user(&store, "alice").await;

    let cart = store.cart_for_user(user.id).await.unwrap().unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.user_id, user.id);

    assert!(store.cart_for_user(UserId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn item_queries() {
    let store = get_test_store().await;
    let round = store.create_item(widget()).await.unwrap();
    let square = store.create_item(gadget()).await.unwrap();

    let all = store.list_items().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].name, "Round Widget");
    assert_eq!(all[1].name, "Square Widget");

    let by_id = store.find_item_by_id(round.id).await.unwrap();
    assert_eq!(by_id, Some(round));

    let by_name = store.find_items_by_name("Square Widget").await.unwrap();
    assert_eq!(by_name, vec![square]);
    assert!(store.find_items_by_name("Hexagonal Widget").await.unwrap().is_empty());
}

#[tokio::test]
async fn save_cart_round_trips_order_and_duplicates() {
    let store = get_test_store().await;
    let user = create_test_user(&store, "alice").await;
    let w = store.create_item(widget()).await.unwrap();
    let g = store.create_item(gadget()).await.unwrap();

    let mut cart = store.cart_for_user(user.id).await.unwrap().unwrap();
    cart.add_item(w.clone());
    cart.add_item(g.clone());
    cart.add_item(w.clone());
    store.save_cart(cart).await.unwrap();

    let reloaded = store.cart_for_user(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.items, vec![w.clone(), g.clone(), w.clone()]);
    assert_eq!(reloaded.total().cents(), 299 + 199 + 299);

    // Saving again replaces the sequence rather than appending to it.
    let mut cart = reloaded;
    cart.remove_item(w.id);
    store.save_cart(cart).await.unwrap();

    let reloaded = store.cart_for_user(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.items, vec![g, w]);
}

#[tokio::test]
async fn orders_round_trip_in_submission_order() {
    let store = get_test_store().await;
    let user = create_test_user(&store, "alice").await;
    let w = store.create_item(widget()).await.unwrap();

    let mut cart = store.cart_for_user(user.id).await.unwrap().unwrap();
    cart.add_item(w.clone());
    let first = store.save_order(UserOrder::from_cart(&cart)).await.unwrap();

    cart.add_item(w.clone());
    let second = store.save_order(UserOrder::from_cart(&cart)).await.unwrap();

    let history = store.orders_for_user(user.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, first.id);
    assert_eq!(history[0].items.len(), 1);
    assert_eq!(history[0].total.cents(), 299);
    assert_eq!(history[1].id, second.id);
    assert_eq!(history[1].items.len(), 2);
    assert_eq!(history[1].total.cents(), 598);
}

#[tokio::test]
async fn empty_history_is_empty_not_an_error() {
    let store = get_test_store().await;
    let user = create_test_user(&store, "alice").await;

    let history = store.orders_for_user(user.id).await.unwrap();
    assert!(history.is_empty());
}
