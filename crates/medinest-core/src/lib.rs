//! Session and navigation core of the MediNest healthcare portal.
//!
//! - [`session`]: who is signed in, persisted to a [`storage::KeyValueStorage`]
//! - [`navigation`]: which screen is shown, and the access redirects
//! - [`storage`]: the durable key-value contract and an in-memory backend
//! - [`config`]: `config.toml` models

pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::MedinestError;
