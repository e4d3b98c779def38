//! Pure navigation transitions.
//!
//! Each function maps the current [`NavigationState`] (and, where access
//! matters, the [`AuthStatus`]) to the next state. Nothing here touches the
//! session or storage, so the redirect rules can be tested directly.

use crate::navigation::state::NavigationState;
use crate::navigation::view::View;
use crate::session::{Session, UserType};

/// The slice of the session that navigation depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Anonymous,
    SignedIn(UserType),
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::SignedIn(_))
    }

    /// Where a session lands by default: its dashboard, or `home`.
    pub fn default_view(&self) -> View {
        match self {
            AuthStatus::Anonymous => View::Home,
            AuthStatus::SignedIn(user_type) => View::dashboard_for(*user_type),
        }
    }
}

impl From<&Session> for AuthStatus {
    fn from(session: &Session) -> Self {
        match session.user_type() {
            Some(user_type) if session.is_authenticated() => AuthStatus::SignedIn(user_type),
            _ => AuthStatus::Anonymous,
        }
    }
}

/// Pushes the current view and moves to `target`. Navigating to the view
/// already displayed changes nothing, so the history top never equals the
/// current view.
pub fn navigate(state: &NavigationState, target: View) -> NavigationState {
    if state.current_view == target {
        return state.clone();
    }

    let mut history = state.history.clone();
    history.push(state.current_view);
    NavigationState {
        current_view: target,
        history,
    }
}

/// Pops the history, redirecting where the popped view no longer fits the
/// session:
///
/// - empty history: the default view for `auth`
/// - signed in and popping an entry view: the dashboard, history cleared
/// - anonymous and popping a dashboard: `home`, history cleared
pub fn go_back(state: &NavigationState, auth: AuthStatus) -> NavigationState {
    let mut history = state.history.clone();
    let Some(previous) = history.pop() else {
        return NavigationState::rooted_at(auth.default_view());
    };

    if auth.is_authenticated() && previous.is_entry() {
        return NavigationState::rooted_at(auth.default_view());
    }

    if !auth.is_authenticated() && previous.is_dashboard() {
        return NavigationState::rooted_at(View::Home);
    }

    NavigationState {
        current_view: previous,
        history,
    }
}

/// Forces the view to agree with the session:
///
/// - signed in on an entry view: the dashboard, history cleared
/// - anonymous on a protected view: `home`, history cleared
///
/// Any other state is returned unchanged.
pub fn reconcile(auth: AuthStatus, state: &NavigationState) -> NavigationState {
    let view = state.current_view;
    match auth {
        AuthStatus::SignedIn(_) if view.is_entry() => {
            NavigationState::rooted_at(auth.default_view())
        }
        AuthStatus::Anonymous if view.is_protected() => NavigationState::rooted_at(View::Home),
        _ => state.clone(),
    }
}
