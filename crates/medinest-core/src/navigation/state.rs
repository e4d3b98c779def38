use serde::{Deserialize, Serialize};

use crate::navigation::view::View;

/// The displayed view and the stack of views visited before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub current_view: View,
    /// Oldest first; the last element is what `go_back` returns to.
    pub history: Vec<View>,
}

impl NavigationState {
    /// `home` with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh navigation root at `view`.
    pub fn rooted_at(view: View) -> Self {
        Self {
            current_view: view,
            history: Vec::new(),
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// The view `go_back` would pop, before any redirect applies.
    pub fn previous_view(&self) -> Option<View> {
        self.history.last().copied()
    }
}
