//! Data access layer for user records.
//!
//! The auth core consumes the store through the `UserStore` trait;
//! `PgUserStore` is the Postgres-backed implementation.

pub mod models;
pub mod store;

pub use models::{NewUser, User, UserUpdate};
pub use store::{PgUserStore, UserStore};
