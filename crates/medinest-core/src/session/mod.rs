//! Session domain module.
//!
//! This module contains the authentication session, its durable
//! persistence, and the store that keeps both consistent.
//!
//! # Module Structure
//!
//! - `model`: Session state, identity, user record and the pure transition
//! - `token`: Synthetic per-login session tokens
//! - `persistence`: Write-through adapter over `KeyValueStorage`
//! - `store`: `SessionStore`, the owner of the session
//!
//! # Usage
//!
//! ```ignore
//! use medinest_core::session::{SessionStore, User, UserType};
//! ```

mod model;
mod persistence;
mod store;
mod token;

// Re-export public API
pub use model::{Identity, Session, SessionEvent, User, UserType};
pub use persistence::{DEFAULT_NAMESPACE, SessionPersistence, StorageKeys};
pub use store::SessionStore;
pub use token::generate_session_token;
