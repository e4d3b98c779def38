//! Navigation controller: owns the current view and the back-stack.

use tracing::{debug, info};

use crate::navigation::rules::{self, AuthStatus};
use crate::navigation::state::NavigationState;
use crate::navigation::view::View;

/// Tracks which screen is displayed and enforces the access redirects.
///
/// The controller never reads the session itself; callers pass the current
/// [`AuthStatus`] into every operation. Explicit navigation (`navigate_to`,
/// `go_back`) reconciles the result before returning; auth-state changes
/// must be followed by a call to [`NavigationController::reconcile`].
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    state: NavigationState,
}

impl NavigationController {
    /// Starts at `home` with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigates to `target`, then applies the access rules.
    ///
    /// Targeting the view already displayed is a no-op: nothing is pushed
    /// onto the history, so `can_go_back` is unchanged.
    pub fn navigate_to(&mut self, target: View, auth: AuthStatus) -> &NavigationState {
        let next = rules::navigate(&self.state, target);
        debug!(from = %self.state.current_view, to = %target, "Navigate");
        self.state = next;
        self.reconcile(auth);
        &self.state
    }

    /// Returns to the previous view, redirecting where the session requires.
    pub fn go_back(&mut self, auth: AuthStatus) -> &NavigationState {
        let next = rules::go_back(&self.state, auth);
        debug!(from = %self.state.current_view, to = %next.current_view, "Go back");
        self.state = next;
        self.reconcile(auth);
        &self.state
    }

    /// Forces the current view to agree with `auth`. Returns `true` if a
    /// redirect happened.
    pub fn reconcile(&mut self, auth: AuthStatus) -> bool {
        let next = rules::reconcile(auth, &self.state);
        if next == self.state {
            return false;
        }

        info!(
            from = %self.state.current_view,
            to = %next.current_view,
            authenticated = auth.is_authenticated(),
            "Redirecting"
        );
        self.state = next;
        true
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_view(&self) -> View {
        self.state.current_view
    }

    pub fn history(&self) -> &[View] {
        &self.state.history
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserType;

    const PATIENT: AuthStatus = AuthStatus::SignedIn(UserType::Patient);

    #[test]
    fn test_initial_state() {
        let nav = NavigationController::new();
        assert_eq!(nav.current_view(), View::Home);
        assert!(nav.history().is_empty());
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_history_discipline() {
        let mut nav = NavigationController::new();
        nav.navigate_to(View::Setup, AuthStatus::Anonymous);
        nav.navigate_to(View::Privacy, AuthStatus::Anonymous);
        assert!(nav.can_go_back());

        nav.go_back(AuthStatus::Anonymous);
        assert_eq!(nav.current_view(), View::Setup);
        assert_eq!(nav.history(), &[View::Home]);

        nav.go_back(AuthStatus::Anonymous);
        assert_eq!(nav.current_view(), View::Home);
        assert!(nav.history().is_empty());

        nav.go_back(AuthStatus::Anonymous);
        assert_eq!(nav.current_view(), View::Home);
    }

    #[test]
    fn test_navigate_to_protected_while_anonymous_lands_home() {
        let mut nav = NavigationController::new();
        nav.navigate_to(View::Privacy, AuthStatus::Anonymous);
        let state = nav.navigate_to(View::Prescriptions, AuthStatus::Anonymous);
        assert_eq!(state, &NavigationState::rooted_at(View::Home));
    }

    #[test]
    fn test_navigate_to_entry_while_signed_in_lands_on_dashboard() {
        let mut nav = NavigationController::new();
        nav.reconcile(PATIENT);
        nav.navigate_to(View::Fitness, PATIENT);
        nav.navigate_to(View::PatientAuth, PATIENT);
        assert_eq!(nav.current_view(), View::PatientDashboard);
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_reconcile_reports_redirects() {
        let mut nav = NavigationController::new();
        assert!(!nav.reconcile(AuthStatus::Anonymous));
        assert!(nav.reconcile(PATIENT));
        assert_eq!(nav.current_view(), View::PatientDashboard);
        assert!(!nav.reconcile(PATIENT));
    }

    #[test]
    fn test_navigate_to_current_view_keeps_history() {
        let mut nav = NavigationController::new();
        nav.navigate_to(View::Home, AuthStatus::Anonymous);
        assert!(!nav.can_go_back());

        nav.navigate_to(View::Privacy, AuthStatus::Anonymous);
        nav.navigate_to(View::Privacy, AuthStatus::Anonymous);
        assert_eq!(nav.history(), &[View::Home]);
    }
}
