//! Adapters for the external services Yuna is built on: the public anime
//! catalog (search), the hosted document store (the user's list), and the
//! hosted identity provider (sessions).
//!
//! Each adapter is a thin typed client over the service's REST surface;
//! consistency and durability guarantees are entirely the backing
//! service's.

pub mod catalog;
pub mod identity;
pub mod store;
