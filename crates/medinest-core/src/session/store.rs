//! Session store: authentication identity plus its durable copy.

use tracing::{debug, error, info, warn};

use crate::error::{MedinestError, Result};
use crate::session::model::{Identity, Session, SessionEvent, User, UserType};
use crate::session::persistence::{SessionPersistence, StorageKeys};
use crate::session::token::generate_session_token;
use crate::storage::KeyValueStorage;

/// Owns the in-memory [`Session`] and keeps durable storage in step with it.
///
/// Every mutation computes the next state with [`Session::apply`], writes it
/// through [`SessionPersistence`], and only then commits it in memory. A
/// failed write is logged and returned; storage is rolled back and the
/// in-memory session is left as it was.
///
/// # Example
///
/// ```
/// use medinest_core::session::{SessionStore, User, UserType};
/// use medinest_core::storage::MemoryStorage;
///
/// let mut store = SessionStore::new(MemoryStorage::new());
/// store.initialize();
/// store
///     .login(User::new().with_attribute("name", "Alice"), UserType::Patient)
///     .unwrap();
/// assert!(store.is_authenticated());
/// ```
#[derive(Debug)]
pub struct SessionStore<S> {
    session: Session,
    persistence: SessionPersistence<S>,
}

impl<S: KeyValueStorage> SessionStore<S> {
    /// Creates a store over `storage` with the default key namespace.
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, StorageKeys::default())
    }

    pub fn with_keys(storage: S, keys: StorageKeys) -> Self {
        Self {
            session: Session::new(),
            persistence: SessionPersistence::new(storage, keys),
        }
    }

    /// Hydrates the session from durable storage. Runs once; later calls
    /// return the current session unchanged.
    ///
    /// A stored record that cannot be read or parsed is discarded (all three
    /// keys are removed) and the session starts anonymous.
    pub fn initialize(&mut self) -> &Session {
        if self.session.is_ready() {
            debug!("Session store already initialized");
            return &self.session;
        }

        let identity = match self.persistence.load() {
            Ok(identity) => identity,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted session");
                if let Err(e) = self.persistence.clear() {
                    error!(error = %e, "Failed to clear persisted session");
                }
                None
            }
        };

        if let Some(identity) = &identity {
            info!(user_type = %identity.user_type, "Restored persisted session");
        }

        self.session = self.session.apply(SessionEvent::Hydrated(identity));
        &self.session
    }

    /// Signs a user in with a fresh session token merged into `user`.
    pub fn login(&mut self, user: User, user_type: UserType) -> Result<()> {
        let user = user.with_attribute(User::SESSION_TOKEN_FIELD, generate_session_token());
        let next = self
            .session
            .apply(SessionEvent::LoggedIn(Identity::new(user, user_type)));

        if let Some(identity) = next.identity() {
            if let Err(e) = self.persistence.save(identity) {
                error!(error = %e, %user_type, "Error during login");
                return Err(e);
            }
        }

        info!(%user_type, "User logged in");
        self.session = next;
        Ok(())
    }

    /// Signs the user out. Idempotent.
    ///
    /// If the durable keys cannot be removed the user stays signed in, both
    /// in memory and in storage, and the error is returned.
    pub fn logout(&mut self) -> Result<()> {
        if let Err(e) = self.persistence.clear() {
            error!(error = %e, "Error during logout");
            return Err(e);
        }

        if self.session.identity().is_some() {
            info!("User logged out");
        }
        self.session = self.session.apply(SessionEvent::LoggedOut);
        Ok(())
    }

    /// Shallow-merges `partial` onto the current user. All-or-nothing: the
    /// in-memory user changes only if the durable write succeeded.
    pub fn update_user(&mut self, partial: User) -> Result<()> {
        if self.session.identity().is_none() {
            warn!("Ignoring user update without a signed-in user");
            return Err(MedinestError::NotAuthenticated);
        }

        let next = self.session.apply(SessionEvent::UserUpdated(partial));
        if let Some(user) = next.user() {
            if let Err(e) = self.persistence.save_user(user) {
                error!(error = %e, "Error updating user");
                return Err(e);
            }
        }

        debug!("User profile updated");
        self.session = next;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.session.user()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.session.user_type()
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_ready()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn keys(&self) -> &StorageKeys {
        self.persistence.keys()
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }
}
