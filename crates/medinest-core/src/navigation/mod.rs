//! Navigation domain module.
//!
//! - `view`: The closed set of screens and their access classes
//! - `state`: Current view plus back-stack
//! - `rules`: Pure transitions (`navigate`, `go_back`, `reconcile`)
//! - `controller`: `NavigationController`, the owner of the state

mod controller;
mod rules;
mod state;
mod view;

pub use controller::NavigationController;
pub use rules::{AuthStatus, go_back, navigate, reconcile};
pub use state::NavigationState;
pub use view::{Access, View};
