//! The user store: the authoritative list of user records.
//!
//! Every mutation updates the in-memory list and then synchronously writes the
//! whole list, JSON-encoded, under [`STORAGE_KEY`]. A successful write raises
//! the "saved" notification flag that the UI turns into a transient message.
use tracing::{debug, info, warn};

use crate::error::{Context, Result};
use crate::model::{IdGenerator, UserRecord};
use crate::storage::KeyValueStore;

/// Key the serialized user list is stored under.
pub const STORAGE_KEY: &str = "awesomeUsers";

pub struct UsersStore<S: KeyValueStore> {
    users: Vec<UserRecord>,
    show_snackbar: bool,
    storage: S,
    ids: IdGenerator,
}

impl<S: KeyValueStore> UsersStore<S> {
    /// Load the list from `storage`, or start with one placeholder record when
    /// nothing usable is stored.
    ///
    /// Stored data that fails to decode is treated the same as missing data.
    /// Errors from the storage backend itself are returned.
    pub fn initialize(storage: S) -> Result<Self> {
        let saved = storage.get_item(STORAGE_KEY)?;
        let loaded = match saved {
            Some(raw) => match serde_json::from_str::<Vec<UserRecord>>(&raw) {
                Ok(users) => Some(users),
                Err(e) => {
                    warn!(error = %e, "stored users could not be decoded, using defaults");
                    None
                }
            },
            None => None,
        };

        let (users, ids) = match loaded {
            Some(users) => {
                let ids = IdGenerator::seeded(&users);
                (users, ids)
            }
            None => {
                let mut ids = IdGenerator::default();
                (vec![UserRecord::placeholder(ids.next_id())], ids)
            }
        };
        info!(count = users.len(), "user store initialized");

        Ok(Self { users, show_snackbar: false, storage, ids })
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn show_snackbar(&self) -> bool {
        self.show_snackbar
    }

    /// Lower the notification flag once the UI has shown it.
    pub fn dismiss_notification(&mut self) {
        self.show_snackbar = false;
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Append a placeholder record with a fresh id and persist. Returns the id.
    pub fn add_user(&mut self) -> Result<i64> {
        let id = self.ids.next_id();
        self.users.push(UserRecord::placeholder(id));
        info!(id, "user added");
        self.save_data()?;
        Ok(id)
    }

    /// Replace every record whose id matches `data.id`. Unknown ids change nothing
    /// but the list is still persisted.
    pub fn update_user(&mut self, data: &UserRecord) -> Result<()> {
        let mut matched = 0usize;
        self.users = std::mem::take(&mut self.users)
            .into_iter()
            .map(|user| {
                if user.id == data.id {
                    matched += 1;
                    data.clone()
                } else {
                    user
                }
            })
            .collect();
        if matched == 0 {
            debug!(id = data.id, "update for unknown id ignored");
        } else {
            info!(id = data.id, "user updated");
        }
        self.save_data()
    }

    /// Remove every record with `id`.
    pub fn delete_user(&mut self, id: i64) -> Result<()> {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        info!(id, removed = before - self.users.len(), "user deleted");
        self.save_data()
    }

    fn save_data(&mut self) -> Result<()> {
        let body = serde_json::to_string(&self.users)
            .with_ctx(|| "encode user list".to_string())?;
        self.storage.set_item(STORAGE_KEY, &body)?;
        debug!(bytes = body.len(), count = self.users.len(), "user list persisted");
        self.show_snackbar = true;
        Ok(())
    }
}
