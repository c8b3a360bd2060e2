pub mod client;
pub mod error;
pub mod types;

pub use client::ListStoreClient;
pub use error::StoreError;
