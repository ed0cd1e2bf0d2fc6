// Integration tests for usrform-manager

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_path(tag: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    path.push(format!("ufm_{tag}_{}_{}", std::process::id(), nonce));
    path
}

// 1) File-backed store survives a restart
#[test]
fn file_store_round_trip_across_restarts() {
    use usrform_manager::storage::FileStore;
    use usrform_manager::{Tag, UserType, UsersStore};

    let path = unique_path("storage").with_extension("json");

    let mut store = UsersStore::initialize(FileStore::open(&path).unwrap()).unwrap();
    assert_eq!(store.users().len(), 1);
    let id = store.add_user().unwrap();
    let mut rec = store.get(id).unwrap().clone();
    rec.login = "operator".into();
    rec.password = "plain".into();
    rec.user_type = UserType::Local;
    rec.tags = vec![Tag::new("night"), Tag::new("shift")];
    store.update_user(&rec).unwrap();
    let first_id = store.users()[0].id;
    store.delete_user(first_id).unwrap();
    let expected = store.users().to_vec();
    drop(store);

    let reopened = UsersStore::initialize(FileStore::open(&path).unwrap()).unwrap();
    assert_eq!(reopened.users(), expected.as_slice());
    assert_eq!(reopened.users()[0].login, "operator");

    // The file is a key-value map whose value is the JSON-encoded list
    let raw = std::fs::read_to_string(&path).unwrap();
    let outer: std::collections::BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
    let inner: serde_json::Value = serde_json::from_str(&outer["awesomeUsers"]).unwrap();
    assert_eq!(inner[0]["tag"][1]["text"], "shift");
    assert_eq!(inner[0]["userType"], "local");

    let _ = std::fs::remove_file(&path);
}

// 2) Write failures surface to the caller
#[test]
fn unwritable_storage_reports_error() {
    use usrform_manager::UsersStore;
    use usrform_manager::storage::FileStore;

    // A directory appearing where the storage file should be makes the write fail
    let path = unique_path("blocked");
    let mut store = UsersStore::initialize(FileStore::open(&path).unwrap()).unwrap();
    std::fs::create_dir_all(&path).unwrap();

    let err = store.add_user().unwrap_err();
    assert!(err.to_string().contains("write"));
    assert!(!store.show_snackbar());

    let _ = std::fs::remove_dir_all(&path);
}

// 3) Theme and keymap config files are created and read back
#[test]
fn config_files_init_and_roundtrip() {
    use usrform_manager::app::{Keymap, Theme};

    let dir = unique_path("conf");
    let theme_path = dir.join("theme.conf");
    let keys_path = dir.join("keybinds.conf");

    let t = Theme::load_or_init(&theme_path);
    assert!(theme_path.exists());
    assert_eq!(Theme::from_file(&theme_path), Some(t));

    std::fs::write(&theme_path, "title = #102030\n").unwrap();
    let custom = Theme::load_or_init(&theme_path);
    assert_eq!(custom.title, ratatui::style::Color::Rgb(0x10, 0x20, 0x30));

    let _km = Keymap::load_or_init(&keys_path);
    assert!(keys_path.exists());
    std::fs::write(&keys_path, "NewUser = a\n").unwrap();
    let km = Keymap::load_or_init(&keys_path);
    let key = crossterm::event::KeyEvent::new(
        crossterm::event::KeyCode::Char('a'),
        crossterm::event::KeyModifiers::NONE,
    );
    assert_eq!(km.resolve(&key), Some(usrform_manager::app::keymap::KeyAction::NewUser));

    let _ = std::fs::remove_dir_all(&dir);
}

// 4) Driving the app through key presses persists through the storage seam
#[test]
fn key_driven_session_persists_changes() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use usrform_manager::app::update::handle_key;
    use usrform_manager::app::{AppState, AppStore, Keymap, Theme};
    use usrform_manager::storage::FileStore;

    let path = unique_path("session").with_extension("json");
    let press = |c: KeyCode| KeyEvent::new(c, KeyModifiers::NONE);

    let store = AppStore::initialize(Box::new(FileStore::open(&path).unwrap())).unwrap();
    let mut app = AppState::new(store, Theme::dark(), Keymap::default());

    // edit the placeholder in place
    handle_key(&mut app, press(KeyCode::Enter)).unwrap();
    for c in "root".chars() {
        handle_key(&mut app, press(KeyCode::Char(c))).unwrap();
    }
    handle_key(&mut app, press(KeyCode::Enter)).unwrap();
    assert!(app.store.show_snackbar());

    let reopened = AppStore::initialize(Box::new(FileStore::open(&path).unwrap())).unwrap();
    assert_eq!(reopened.users().len(), 1);
    assert_eq!(reopened.users()[0].login, "root");

    let _ = std::fs::remove_file(&path);
}
