//! Application state types and entry glue.
//!
//! Defines the enums and structs that model the TUI state on top of the
//! [`UsersStore`], and re-exports the event loop as `run`.
//!
pub mod config;
pub mod keymap;
pub mod theme;
pub mod update;

use std::time::{Duration, Instant};

use crate::model::{Tag, UserRecord, UserType, format_tags, parse_tags};
use crate::search;
use crate::storage::KeyValueStore;
use crate::store::UsersStore;

pub use keymap::Keymap;
pub use theme::Theme;

/// How long the "Saved" acknowledgment stays in the status bar.
pub const SNACKBAR_TIMEOUT: Duration = Duration::from_secs(3);

/// The store as owned by the running app.
pub type AppStore = UsersStore<Box<dyn KeyValueStore>>;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Fields of the edit form, in tab order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormField {
    Login,
    Password,
    UserType,
    Tags,
    Save,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Login,
        FormField::Password,
        FormField::UserType,
        FormField::Tags,
        FormField::Save,
    ];

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Login => "Login",
            FormField::Password => "Password",
            FormField::UserType => "Type",
            FormField::Tags => "Tags",
            FormField::Save => "Save",
        }
    }
}

/// Working copy of one record while it is being edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserForm {
    pub id: i64,
    pub field: FormField,
    pub login: String,
    pub password: String,
    pub user_type: UserType,
    /// Tags as typed, `;`-separated.
    pub tags: String,
    /// Tags as loaded; written back unchanged unless `tags` was edited.
    pub original_tags: Vec<Tag>,
    pub tags_edited: bool,
    pub reveal_password: bool,
}

impl UserForm {
    pub fn from_record(rec: &UserRecord) -> Self {
        Self {
            id: rec.id,
            field: FormField::Login,
            login: rec.login.clone(),
            password: rec.password.clone(),
            user_type: rec.user_type,
            tags: format_tags(&rec.tags),
            original_tags: rec.tags.clone(),
            tags_edited: false,
            reveal_password: false,
        }
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id,
            login: self.login.clone(),
            password: self.password.clone(),
            user_type: self.user_type,
            tags: if self.tags_edited {
                parse_tags(&self.tags)
            } else {
                self.original_tags.clone()
            },
        }
    }

    /// Text buffer behind the focused field, if it is a text field. Taking
    /// the tags buffer marks the tags as edited.
    pub fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Login => Some(&mut self.login),
            FormField::Password => Some(&mut self.password),
            FormField::Tags => {
                self.tags_edited = true;
                Some(&mut self.tags)
            }
            FormField::UserType | FormField::Save => None,
        }
    }
}

/// Modal dialogs.
#[derive(Clone, Debug)]
pub enum ModalState {
    UserForm(UserForm),
    DeleteConfirm { selected: usize, id: i64 },
    Help { scroll: u16 },
    Info { message: String },
}

pub struct AppState {
    pub started_at: Instant,
    pub store: AppStore,
    /// Records currently shown, after the search filter.
    pub users: Vec<UserRecord>,
    pub selected_user_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub search_query: String,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub show_keybinds: bool,
    /// When the current "Saved" acknowledgment was first drawn.
    pub snackbar_since: Option<Instant>,
}

impl AppState {
    pub fn new(store: AppStore, theme: Theme, keymap: Keymap) -> Self {
        let users = store.users().to_vec();
        Self {
            started_at: Instant::now(),
            store,
            users,
            selected_user_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            search_query: String::new(),
            theme,
            keymap,
            modal: None,
            show_keybinds: false,
            snackbar_since: None,
        }
    }

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.users.get(self.selected_user_index)
    }

    /// Rebuild the visible list from the store, keeping the selection in range.
    pub fn refresh_view(&mut self) {
        self.users = search::filter_users(self.store.users(), &self.search_query);
        if self.selected_user_index >= self.users.len() {
            self.selected_user_index = self.users.len().saturating_sub(1);
        }
    }

    /// Select the visible record with `id`, if shown.
    pub fn select_id(&mut self, id: i64) {
        if let Some(idx) = self.users.iter().position(|u| u.id == id) {
            self.selected_user_index = idx;
        }
    }

    /// Restart the acknowledgment timer after a store mutation.
    pub fn mark_saved(&mut self) {
        self.snackbar_since = None;
    }

    /// Advance UI timers: start the acknowledgment timer when the store raised
    /// its flag, and lower the flag once [`SNACKBAR_TIMEOUT`] has passed.
    pub fn tick(&mut self, now: Instant) {
        if !self.store.show_snackbar() {
            self.snackbar_since = None;
            return;
        }
        match self.snackbar_since {
            None => self.snackbar_since = Some(now),
            Some(since) if now.duration_since(since) >= SNACKBAR_TIMEOUT => {
                self.store.dismiss_notification();
                self.snackbar_since = None;
            }
            Some(_) => {}
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn app() -> AppState {
        let store = AppStore::initialize(Box::new(MemoryStore::new())).unwrap();
        AppState::new(store, Theme::dark(), Keymap::default())
    }

    #[test]
    fn form_round_trips_record() {
        let rec = UserRecord {
            id: 9,
            login: "amy".into(),
            password: "pw".into(),
            user_type: UserType::Local,
            tags: vec![Tag::new("a"), Tag::new("b")],
        };
        let form = UserForm::from_record(&rec);
        assert_eq!(form.tags, "a; b");
        assert_eq!(form.to_record(), rec);
    }

    #[test]
    fn untouched_tags_are_written_back_verbatim() {
        let rec = UserRecord {
            id: 4,
            login: "kim".into(),
            tags: vec![Tag::new("a;b"), Tag::new(" padded "), Tag::new("")],
            ..UserRecord::default()
        };
        let mut form = UserForm::from_record(&rec);
        form.login.push('!');
        let out = form.to_record();
        assert_eq!(out.tags, rec.tags);
        assert_eq!(out.login, "kim!");
        assert_eq!(UserForm::from_record(&rec).to_record(), rec);
    }

    #[test]
    fn edited_tags_are_reparsed() {
        let rec = UserRecord {
            id: 4,
            tags: vec![Tag::new(" padded ")],
            ..UserRecord::default()
        };
        let mut form = UserForm::from_record(&rec);
        form.field = FormField::Tags;
        if let Some(buf) = form.active_text_mut() {
            buf.push_str("; x");
        }
        assert_eq!(form.to_record().tags, vec![Tag::new("padded"), Tag::new("x")]);
    }

    #[test]
    fn form_fields_wrap() {
        assert_eq!(FormField::Save.next(), FormField::Login);
        assert_eq!(FormField::Login.prev(), FormField::Save);
        assert_eq!(FormField::Password.next(), FormField::UserType);
    }

    #[test]
    fn snackbar_hides_after_timeout() {
        let mut app = app();
        app.store.add_user().unwrap();
        let t0 = Instant::now();
        app.tick(t0);
        assert!(app.store.show_snackbar());
        app.tick(t0 + Duration::from_secs(1));
        assert!(app.store.show_snackbar());
        app.tick(t0 + SNACKBAR_TIMEOUT);
        assert!(!app.store.show_snackbar());
        assert!(app.snackbar_since.is_none());
    }

    #[test]
    fn refresh_clamps_selection() {
        let mut app = app();
        let id = app.store.add_user().unwrap();
        app.refresh_view();
        app.select_id(id);
        assert_eq!(app.selected_user_index, 1);
        app.store.delete_user(id).unwrap();
        app.refresh_view();
        assert_eq!(app.selected_user_index, 0);
    }
}
