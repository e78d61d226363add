use super::{presentation, SettingKey, Settings, SettingsStore};
use std::fs;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tempfile::TempDir;

static PRESENTATION: Mutex<()> = Mutex::new(());

/// Serialises tests that load or save settings, since both publish the process-wide flag.
pub(crate) fn presentation_lock() -> MutexGuard<'static, ()> {
    PRESENTATION.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn test_missing_file_gives_defaults() {
    let _lock = presentation_lock();
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::load(&dir.path().join("settings.json"));
    assert_eq!(*store.get(), Settings::default());
    assert!(store.get().include_header_in_selection);
    assert!(!store.get().always_show_icons);
}

#[test]
fn test_partial_file_merges_over_defaults() {
    let _lock = presentation_lock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"showCopyButton": false, "unknownKey": 3}"#).unwrap();

    let store = SettingsStore::load(&path);
    assert!(!store.get().show_copy_button);
    assert!(store.get().show_select_button);
    assert!(store.get().include_header_in_selection);
}

#[test]
fn test_broken_file_falls_back_to_defaults() {
    let _lock = presentation_lock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    let store = SettingsStore::load(&path);
    assert_eq!(*store.get(), Settings::default());
}

#[test]
fn test_save_writes_whole_object_and_bumps_revision() {
    let _lock = presentation_lock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let mut store = SettingsStore::load(&path);

    store.toggle(SettingKey::IncludeHeader).unwrap();
    assert_eq!(store.revision(), 1);
    assert!(!store.get().include_header_in_selection);

    let written = fs::read_to_string(&path).unwrap();
    for key in [
        "alwaysShowIcons",
        "includeHeaderInSelection",
        "showSelectButton",
        "showCopyButton",
    ] {
        assert!(written.contains(key), "missing {key} in {written}");
    }
    assert!(!path.with_extension("json.tmp").exists());

    let reloaded = SettingsStore::load(&path);
    assert_eq!(reloaded.get(), store.get());
}

#[test]
fn test_get_and_set_cover_every_key() {
    let mut settings = Settings::default();
    for key in SettingKey::ALL {
        let before = settings.get(key);
        settings.set(key, !before);
        assert_eq!(settings.get(key), !before, "{}", key.name());
        assert!(!key.description().is_empty());
    }
}

#[test]
fn test_presentation_follows_load_and_save() {
    let _lock = presentation_lock();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, r#"{"alwaysShowIcons": true}"#).unwrap();

    let mut store = SettingsStore::load(&path);
    assert!(presentation::always_show());

    store.toggle(SettingKey::AlwaysShowIcons).unwrap();
    assert!(!presentation::always_show());

    let mut next = *store.get();
    next.always_show_icons = true;
    store.save(next).unwrap();
    assert!(presentation::always_show());

    presentation::clear();
    assert!(!presentation::always_show());
}
