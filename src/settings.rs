//! User-facing settings for section commands and their heading icons.
//!
//! Settings are persisted as one JSON object. Loading merges whatever keys the file has over the
//! defaults, and saving rewrites the whole object at once. Every save bumps a revision so the
//! rendering surfaces can tell their icons are stale and re-place them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
/// Persisted preferences.
pub struct Settings {
    /// Show heading icons permanently instead of only on the hovered or focused heading.
    pub always_show_icons: bool,
    /// Start the selection at the heading line rather than the line after it.
    pub include_header_in_selection: bool,
    /// Offer the select button.
    pub show_select_button: bool,
    /// Offer the copy button.
    pub show_copy_button: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            always_show_icons: false,
            include_header_in_selection: true,
            show_select_button: true,
            show_copy_button: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One toggle in the settings view.
pub enum SettingKey {
    /// [`Settings::always_show_icons`].
    AlwaysShowIcons,
    /// [`Settings::include_header_in_selection`].
    IncludeHeader,
    /// [`Settings::show_select_button`].
    ShowSelectButton,
    /// [`Settings::show_copy_button`].
    ShowCopyButton,
}

impl SettingKey {
    /// Display order in the settings view.
    pub const ALL: [Self; 4] = [
        Self::AlwaysShowIcons,
        Self::IncludeHeader,
        Self::ShowSelectButton,
        Self::ShowCopyButton,
    ];

    #[must_use]
    /// Short label.
    pub fn name(self) -> &'static str {
        match self {
            Self::AlwaysShowIcons => "Always Show Icons",
            Self::IncludeHeader => "Include Header in Selection",
            Self::ShowSelectButton => "Show Select Button",
            Self::ShowCopyButton => "Show Copy Button",
        }
    }

    #[must_use]
    /// One-line explanation shown under the label.
    pub fn description(self) -> &'static str {
        match self {
            Self::AlwaysShowIcons => {
                "If disabled, icons only show on the hovered or focused heading."
            }
            Self::IncludeHeader => {
                "If enabled, the heading itself is included in the selection/copy."
            }
            Self::ShowSelectButton => "Show the button to select the section content.",
            Self::ShowCopyButton => "Show the button to copy the section content.",
        }
    }
}

impl Settings {
    #[must_use]
    /// Current value of one toggle.
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::AlwaysShowIcons => self.always_show_icons,
            SettingKey::IncludeHeader => self.include_header_in_selection,
            SettingKey::ShowSelectButton => self.show_select_button,
            SettingKey::ShowCopyButton => self.show_copy_button,
        }
    }

    /// Sets one toggle.
    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::AlwaysShowIcons => self.always_show_icons = value,
            SettingKey::IncludeHeader => self.include_header_in_selection = value,
            SettingKey::ShowSelectButton => self.show_select_button = value,
            SettingKey::ShowCopyButton => self.show_copy_button = value,
        }
    }
}

/// Settings cached in memory, backed by a JSON file.
///
/// Reads are served from the cache; [`SettingsStore::save`] writes the whole object.
pub struct SettingsStore {
    path: PathBuf,
    current: Settings,
    revision: u64,
}

impl SettingsStore {
    #[must_use]
    /// Loads settings from `path`, falling back to defaults for a missing or broken file.
    ///
    /// Publishes the icon visibility to [`presentation`].
    pub fn load(path: &Path) -> Self {
        let current = match Self::read(path) {
            Ok(Some(settings)) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Ok(None) => Settings::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings: {e}");
                Settings::default()
            }
        };
        presentation::set_always_show(current.always_show_icons);

        Self {
            path: path.to_path_buf(),
            current,
            revision: 0,
        }
    }

    fn read(path: &Path) -> Result<Option<Settings>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[must_use]
    /// The cached settings.
    pub fn get(&self) -> &Settings {
        &self.current
    }

    #[must_use]
    /// Counter bumped by every successful save.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the settings and writes them out as a whole.
    ///
    /// The file is written to a sibling temporary and renamed into place, so readers never see a
    /// half-written object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or any file operation fails; the cache is left unchanged.
    pub fn save(&mut self, settings: Settings) -> Result<()> {
        let json = serde_json::to_string_pretty(&settings)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        self.current = settings;
        self.revision += 1;
        presentation::set_always_show(settings.always_show_icons);
        tracing::info!(path = %self.path.display(), revision = self.revision, "saved settings");
        Ok(())
    }

    /// Flips one toggle and saves.
    ///
    /// # Errors
    ///
    /// Propagates [`SettingsStore::save`] failures.
    pub fn toggle(&mut self, key: SettingKey) -> Result<()> {
        let mut next = self.current;
        next.set(key, !next.get(key));
        self.save(next)
    }
}

/// Process-wide icon visibility read by the renderer at paint time.
///
/// Set when settings load, updated on save, cleared at shutdown.
pub mod presentation {
    use std::sync::atomic::{AtomicBool, Ordering};

    static ALWAYS_SHOW: AtomicBool = AtomicBool::new(false);

    /// Publishes the always-show flag.
    pub fn set_always_show(value: bool) {
        ALWAYS_SHOW.store(value, Ordering::Relaxed);
    }

    #[must_use]
    /// Whether icons are painted on every heading.
    pub fn always_show() -> bool {
        ALWAYS_SHOW.load(Ordering::Relaxed)
    }

    /// Resets to hover-only.
    pub fn clear() {
        ALWAYS_SHOW.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
#[path = "tests/settings.rs"]
pub(crate) mod tests;
