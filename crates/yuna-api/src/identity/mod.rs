pub mod client;
pub mod error;
pub mod types;

pub use client::IdentityClient;
pub use error::{AuthError, AuthFailure};
