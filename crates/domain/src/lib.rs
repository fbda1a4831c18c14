//! Domain services for the shopcart backend.
//!
//! This crate holds the operations the transport layer delegates to:
//! - [`CartService`] for adding/removing units on a user's cart
//! - [`OrderService`] for submitting order snapshots and reading history
//! - [`UserService`] for registration with password policy and hashing
//!
//! Services are generic over the [`store::Store`] trait and perform no
//! locking of their own: every call is a single read-modify-persist
//! sequence.

pub mod cart;
pub mod error;
pub mod order;
pub mod user;

pub use cart::{CartOperation, CartService};
pub use error::DomainError;
pub use order::OrderService;
pub use user::UserService;
