//! Application layer of the MediNest portal.
//!
//! [`PortalApp`] is the one handle a hosting shell holds: it is built once at
//! startup over an explicit storage backend and forwards every user action
//! to the session store and navigation controller in the right order.

pub mod portal;

pub use portal::{PortalApp, PortalSnapshot};
