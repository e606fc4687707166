//! HTTP handlers for pets, store orders and users.

pub mod pets;
pub mod store;
pub mod users;
