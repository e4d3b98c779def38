//! Write-through persistence of the session identity.
//!
//! Three flat keys under an application namespace:
//!
//! | Key                  | Value                                   |
//! |----------------------|-----------------------------------------|
//! | `<ns>_auth`          | `"true"` when authenticated             |
//! | `<ns>_user`          | JSON user record incl. `sessionToken`   |
//! | `<ns>_user_type`     | `"patient"` or `"doctor"`               |

use tracing::error;

use crate::error::Result;
use crate::session::model::{Identity, User, UserType};
use crate::storage::KeyValueStorage;

/// Namespace used when no configuration overrides it.
pub const DEFAULT_NAMESPACE: &str = "medinest";

const AUTH_FLAG_VALUE: &str = "true";

/// The three storage keys the session lives under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub auth: String,
    pub user: String,
    pub user_type: String,
}

impl StorageKeys {
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            auth: format!("{namespace}_auth"),
            user: format!("{namespace}_user"),
            user_type: format!("{namespace}_user_type"),
        }
    }

    fn all(&self) -> [&str; 3] {
        [&self.auth, &self.user, &self.user_type]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }
}

/// Persists a session identity into a [`KeyValueStorage`].
#[derive(Debug)]
pub struct SessionPersistence<S> {
    storage: S,
    keys: StorageKeys,
}

impl<S: KeyValueStorage> SessionPersistence<S> {
    pub fn new(storage: S, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Reads the stored identity.
    ///
    /// - `Ok(None)`: no complete authenticated record is stored
    /// - `Err`: a record is stored but cannot be parsed, or storage failed
    pub fn load(&self) -> Result<Option<Identity>> {
        let flag = self.storage.get_item(&self.keys.auth)?;
        let user = self.storage.get_item(&self.keys.user)?;
        let user_type = self.storage.get_item(&self.keys.user_type)?;

        match (flag.as_deref(), user, user_type) {
            (Some(AUTH_FLAG_VALUE), Some(user), Some(user_type)) => {
                let user = User::from_json(&user)?;
                let user_type = user_type.parse::<UserType>()?;
                Ok(Some(Identity::new(user, user_type)))
            }
            _ => Ok(None),
        }
    }

    /// Writes a full identity. All-or-nothing: if any key fails to write,
    /// the keys already written are restored to their previous values.
    ///
    /// The auth flag is dropped first and set last, so a save that fails
    /// and cannot be rolled back leaves the session signed out rather than
    /// pointing at a mix of old and new records.
    pub fn save(&mut self, identity: &Identity) -> Result<()> {
        let user = identity.user.to_json()?;
        write_keys(
            &mut self.storage,
            &[
                (self.keys.auth.as_str(), None),
                (self.keys.user.as_str(), Some(user.as_str())),
                (self.keys.user_type.as_str(), Some(identity.user_type.as_str())),
                (self.keys.auth.as_str(), Some(AUTH_FLAG_VALUE)),
            ],
        )
    }

    /// Rewrites the user record only.
    pub fn save_user(&mut self, user: &User) -> Result<()> {
        let json = user.to_json()?;
        self.storage.set_item(&self.keys.user, &json)
    }

    /// Removes all three keys, auth flag first. All-or-nothing like
    /// [`SessionPersistence::save`].
    pub fn clear(&mut self) -> Result<()> {
        let removals = self.keys.all().map(|key| (key, None::<&str>));
        write_keys(&mut self.storage, &removals)
    }
}

/// Applies `writes` in order (`None` removes the key). On the first failure
/// every write already applied is undone, newest first, and the failure is
/// returned.
fn write_keys<S: KeyValueStorage>(
    storage: &mut S,
    writes: &[(&str, Option<&str>)],
) -> Result<()> {
    let previous = writes
        .iter()
        .map(|(key, _)| storage.get_item(key))
        .collect::<Result<Vec<_>>>()?;

    for (index, (key, value)) in writes.iter().enumerate() {
        let written = match value {
            Some(value) => storage.set_item(key, value),
            None => storage.remove_item(key),
        };
        if let Err(e) = written {
            rollback(storage, &writes[..index], &previous[..index]);
            return Err(e);
        }
    }
    Ok(())
}

fn rollback<S: KeyValueStorage>(
    storage: &mut S,
    applied: &[(&str, Option<&str>)],
    previous: &[Option<String>],
) {
    for ((key, _), value) in applied.iter().zip(previous).rev() {
        let restored = match value {
            Some(value) => storage.set_item(key, value),
            None => storage.remove_item(key),
        };
        if let Err(e) = restored {
            error!(key, error = %e, "Failed to restore storage key");
        }
    }
}
