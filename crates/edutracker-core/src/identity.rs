//! Login and session identity.
//!
//! Credentials are matched in the clear against the user collection. The
//! signed-in user is kept in an external [`SessionStore`] under
//! [`CURRENT_IDENTITY_KEY`]; a stored identity that cannot be read is thrown
//! away and the caller is treated as signed out.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::{Role, User};
use crate::store::EntityStore;

/// Session key holding the serialized signed-in user.
pub const CURRENT_IDENTITY_KEY: &str = "currentUser";

/// Find the first user whose email and password both match exactly.
pub fn authenticate<S: EntityStore + ?Sized>(store: &S, email: &str, secret: &str) -> Option<User> {
    let found = store
        .list_users()
        .iter()
        .find(|u| u.email == email && u.password == secret)
        .cloned();
    match &found {
        Some(user) => tracing::debug!(user_id = user.id, role = %user.role, "authenticated"),
        None => tracing::debug!(email, "authentication failed"),
    }
    found
}

// ---------------------------------------------------------------------------
// Session storage
// ---------------------------------------------------------------------------

/// String key-value storage that outlives a single request.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Session storage held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: BTreeMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Session storage kept in a JSON object on disk, so a sign-in survives
/// between separate CLI invocations.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current entries. A missing file counts as empty; a file that does not
    /// parse is deleted and counts as empty.
    fn entries(&self) -> BTreeMap<String, String> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("discarding unreadable session file {}: {}", self.path.display(), e);
                if let Err(e) = std::fs::remove_file(&self.path) {
                    tracing::warn!("failed to remove session file {}: {}", self.path.display(), e);
                }
                BTreeMap::new()
            }
        }
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries).context("failed to serialize session")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write session to {}", self.path.display()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().remove(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries();
        entries.insert(key.to_string(), value);
        self.write(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.entries();
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Signed-in identity
// ---------------------------------------------------------------------------

/// Authenticate and, on success, store the user (without its secret) as the
/// current identity.
pub fn sign_in<S, T>(store: &S, session: &mut T, email: &str, secret: &str) -> Result<Option<User>>
where
    S: EntityStore + ?Sized,
    T: SessionStore + ?Sized,
{
    let Some(user) = authenticate(store, email, secret) else {
        return Ok(None);
    };
    let blob = serde_json::to_string(&user.without_secret()).context("failed to serialize user")?;
    session.set(CURRENT_IDENTITY_KEY, blob)?;
    Ok(Some(user))
}

/// Forget the current identity.
pub fn sign_out<T: SessionStore + ?Sized>(session: &mut T) -> Result<()> {
    session.remove(CURRENT_IDENTITY_KEY)
}

/// The signed-in user, if any.
///
/// A stored value that does not parse as a user is removed and reported as
/// no session.
pub fn current_identity<T: SessionStore + ?Sized>(session: &mut T) -> Option<User> {
    let blob = session.get(CURRENT_IDENTITY_KEY)?;
    match serde_json::from_str::<User>(&blob) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("discarding corrupt session identity: {}", e);
            if let Err(e) = session.remove(CURRENT_IDENTITY_KEY) {
                tracing::warn!("failed to discard session identity: {:#}", e);
            }
            None
        }
    }
}

/// Outcome of checking the current identity against a page's required role.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Granted(User),
    /// Nobody is signed in; send them to the login screen.
    Unauthenticated,
    /// Signed in with a different role; send them to their own page.
    WrongRole(User),
}

pub fn guard<T: SessionStore + ?Sized>(session: &mut T, required: Role) -> Access {
    match current_identity(session) {
        None => Access::Unauthenticated,
        Some(user) if user.role == required => Access::Granted(user),
        Some(user) => Access::WrongRole(user),
    }
}
