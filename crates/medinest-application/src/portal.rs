//! The portal shell handle: session and navigation wired together.

use medinest_core::error::Result;
use medinest_core::navigation::{AuthStatus, NavigationController, NavigationState, View};
use medinest_core::session::{Session, SessionStore, StorageKeys, User, UserType};
use medinest_core::storage::KeyValueStorage;
use serde::Serialize;
use tracing::{debug, warn};

/// Everything a screen needs to render, in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSnapshot {
    pub is_authenticated: bool,
    pub user_type: Option<UserType>,
    pub user: Option<User>,
    pub current_view: View,
    pub history: Vec<View>,
    pub can_go_back: bool,
}

/// Owns the [`SessionStore`] and the [`NavigationController`] for one
/// running portal.
///
/// Construction runs the one-time session load, so a `PortalApp` is never
/// observable in the loading state. Reconciliation runs after every
/// auth-state transition and every explicit navigation, always against the
/// session state that was just committed.
///
/// # Example
///
/// ```
/// use medinest_application::PortalApp;
/// use medinest_core::navigation::View;
/// use medinest_core::session::{User, UserType};
/// use medinest_core::storage::MemoryStorage;
///
/// let mut app = PortalApp::start(MemoryStorage::new());
/// assert_eq!(app.current_view(), View::Home);
///
/// app.login(User::new().with_attribute("name", "Alice"), UserType::Patient)
///     .unwrap();
/// assert_eq!(app.current_view(), View::PatientDashboard);
/// ```
#[derive(Debug)]
pub struct PortalApp<S> {
    session: SessionStore<S>,
    navigation: NavigationController,
}

impl<S: KeyValueStorage> PortalApp<S> {
    /// Loads the session from `storage` and settles the initial view.
    pub fn start(storage: S) -> Self {
        Self::start_with_keys(storage, StorageKeys::default())
    }

    pub fn start_with_keys(storage: S, keys: StorageKeys) -> Self {
        let mut session = SessionStore::with_keys(storage, keys);
        session.initialize();

        let mut app = Self {
            session,
            navigation: NavigationController::new(),
        };
        app.reconcile();
        app
    }

    /// Signs in and moves to the account's dashboard. On a storage failure
    /// nothing changes and the error is returned.
    pub fn login(&mut self, user: User, user_type: UserType) -> Result<()> {
        self.session.login(user, user_type)?;
        self.reconcile();
        Ok(())
    }

    /// Signs out. If the stored session cannot be cleared the user stays
    /// signed in and the error is returned.
    pub fn logout(&mut self) -> Result<()> {
        let result = self.session.logout();
        self.reconcile();
        result
    }

    /// Shallow-merges profile attributes onto the signed-in user.
    pub fn update_user(&mut self, partial: User) -> Result<()> {
        self.session.update_user(partial)
    }

    pub fn navigate_to(&mut self, view: View) -> &NavigationState {
        let auth = self.auth_status();
        self.navigation.navigate_to(view, auth)
    }

    /// Parses a view identifier and navigates to it. Unknown identifiers are
    /// rejected and the current view is kept.
    pub fn navigate_to_id(&mut self, view_id: &str) -> Result<&NavigationState> {
        let view = view_id.parse::<View>().inspect_err(|e| {
            warn!(error = %e, "Rejected navigation");
        })?;
        Ok(self.navigate_to(view))
    }

    pub fn go_back(&mut self) -> &NavigationState {
        let auth = self.auth_status();
        self.navigation.go_back(auth)
    }

    fn reconcile(&mut self) {
        let auth = self.auth_status();
        if self.navigation.reconcile(auth) {
            debug!(view = %self.navigation.current_view(), "View reconciled with session");
        }
    }

    pub fn auth_status(&self) -> AuthStatus {
        AuthStatus::from(self.session.session())
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    pub fn session_store(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigation.state()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.session.user_type()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_view(&self) -> View {
        self.navigation.current_view()
    }

    pub fn history(&self) -> &[View] {
        self.navigation.history()
    }

    pub fn can_go_back(&self) -> bool {
        self.navigation.can_go_back()
    }

    pub fn snapshot(&self) -> PortalSnapshot {
        PortalSnapshot {
            is_authenticated: self.is_authenticated(),
            user_type: self.user_type(),
            user: self.user().cloned(),
            current_view: self.current_view(),
            history: self.history().to_vec(),
            can_go_back: self.can_go_back(),
        }
    }

    /// Shuts the portal down, handing back its storage.
    pub fn into_storage(self) -> S {
        self.session.into_storage()
    }
}
