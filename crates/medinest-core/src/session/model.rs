//! Session domain models.
//!
//! A session is either anonymous or carries an [`Identity`]: the user record
//! and the user type together. Keeping both inside one `Option` means a user
//! without a type (or a type without a user) cannot be represented.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::error::{MedinestError, Result};

/// The two kinds of portal accounts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserType {
    Patient,
    Doctor,
}

impl UserType {
    /// The literal persisted under the user-type storage key.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = MedinestError;

    fn from_str(value: &str) -> Result<Self> {
        UserType::iter()
            .find(|user_type| user_type.as_str() == value)
            .ok_or_else(|| MedinestError::UnknownUserType(value.to_string()))
    }
}

/// An opaque bag of profile attributes.
///
/// The core never interprets the profile beyond a few well-known fields; it
/// serializes to a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    /// Attribute holding the synthetic per-login token.
    pub const SESSION_TOKEN_FIELD: &'static str = "sessionToken";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the attribute as a string slice if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn session_token(&self) -> Option<&str> {
        self.get_str(Self::SESSION_TOKEN_FIELD)
    }

    /// Shallow merge: every attribute of `partial` overwrites the same key
    /// here, all other attributes are retained.
    pub fn merge(&mut self, partial: User) {
        self.0.extend(partial.0);
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the record as a compact JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a JSON object. Anything other than an object is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Map<String, Value>> for User {
    fn from(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }
}

/// An authenticated identity: the user record and its account type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user: User,
    pub user_type: UserType,
}

impl Identity {
    pub fn new(user: User, user_type: UserType) -> Self {
        Self { user, user_type }
    }
}

/// Events that move a [`Session`] from one state to the next.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The one-time startup load finished, with or without a stored identity.
    Hydrated(Option<Identity>),
    LoggedIn(Identity),
    LoggedOut,
    /// Shallow-merge these attributes onto the current user.
    UserUpdated(User),
}

/// In-memory session state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    identity: Option<Identity>,
    ready: bool,
}

impl Session {
    /// A session that has not finished its startup load.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pure transition: computes the state that follows `event`.
    ///
    /// `UserUpdated` on an anonymous session leaves it unchanged.
    pub fn apply(&self, event: SessionEvent) -> Session {
        match event {
            SessionEvent::Hydrated(identity) => Session {
                identity,
                ready: true,
            },
            SessionEvent::LoggedIn(identity) => Session {
                identity: Some(identity),
                ready: self.ready,
            },
            SessionEvent::LoggedOut => Session {
                identity: None,
                ready: self.ready,
            },
            SessionEvent::UserUpdated(partial) => {
                let mut next = self.clone();
                if let Some(identity) = next.identity.as_mut() {
                    identity.user.merge(partial);
                }
                next
            }
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.identity.as_ref().map(|identity| &identity.user)
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.identity.as_ref().map(|identity| identity.user_type)
    }

    /// Whether the startup load has completed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_authenticated(&self) -> bool {
        self.ready && self.identity.is_some()
    }
}
