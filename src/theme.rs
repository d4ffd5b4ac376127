use crate::storage::PrefStore;
use crate::types::ThemeMode;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key holding the theme preference string.
pub const THEME_KEY: &str = "theme";

/// Storage key holding the serialized UI preferences.
pub const UI_PREFS_KEY: &str = "ui";

pub const FONT_PX_MIN: i32 = 12;
pub const FONT_PX_MAX: i32 = 22;
const FONT_PX_DEFAULT: i32 = 14;

/// Owns the current theme and its persistence. Storage failures are logged
/// and the in-memory value keeps working.
pub struct ThemeManager {
    store: PrefStore,
    current: ThemeMode,
}

impl ThemeManager {
    /// Resolve the startup theme once: stored preference, or dark.
    pub fn startup(store: PrefStore) -> Self {
        let current = stored_in(&store).unwrap_or_default();
        Self { store, current }
    }

    pub fn current(&self) -> ThemeMode {
        self.current
    }

    pub fn stored(&self) -> Option<ThemeMode> {
        stored_in(&self.store)
    }

    /// Set and best-effort persist the theme.
    pub fn apply(&mut self, mode: ThemeMode) {
        self.current = mode;
        if let Err(err) = self.store.set(THEME_KEY, mode.as_str()) {
            warn!("unable to persist theme preference: {err}");
        }
    }

    /// Apply a raw preference string; anything but "light" becomes dark.
    pub fn set_theme(&mut self, value: &str) {
        self.apply(ThemeMode::parse(value));
    }

    /// Flip between light and dark, returning the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.current.flipped();
        self.apply(next);
        next
    }

    /// Label for the transient theme-change notification.
    pub fn notification_label(mode: ThemeMode) -> &'static str {
        match mode {
            ThemeMode::Light => "\u{2600}\u{fe0f} Light Mode",
            ThemeMode::Dark => "\u{1f319} Dark Mode",
        }
    }
}

fn stored_in(store: &PrefStore) -> Option<ThemeMode> {
    store.get(THEME_KEY).map(|raw| ThemeMode::parse(&raw))
}

/// Display preferences beyond the theme itself.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiPrefs {
    pub font_px: i32,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            font_px: FONT_PX_DEFAULT,
        }
    }
}

impl UiPrefs {
    pub fn load(store: &PrefStore) -> Self {
        store
            .get(UI_PREFS_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, store: &PrefStore) {
        match serde_json::to_string(self) {
            Ok(raw) => {
                if let Err(err) = store.set(UI_PREFS_KEY, &raw) {
                    warn!("unable to persist ui preferences: {err}");
                }
            }
            Err(err) => warn!("unable to serialize ui preferences: {err}"),
        }
    }

    pub fn with_font_delta(self, delta: i32) -> Self {
        Self {
            font_px: (self.font_px + delta).clamp(FONT_PX_MIN, FONT_PX_MAX),
        }
    }
}

pub struct ThemeDefinition {
    pub css: &'static str,
    pub wordmark_class: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            wordmark_class: "header-wordmark",
        },
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            wordmark_class: "header-wordmark header-wordmark-light",
        },
    }
}

const DARK_THEME: &str = r#"
:root {
    --color-bg-primary: #0b0b0d;
    --color-bg-overlay: rgba(0, 0, 0, 0.85);
    --color-text-primary: #f2f2f2;
    --color-text-muted: #9b9b9b;
    --color-border: #2a2a2a;
    --color-surface-muted: #161618;
    --color-input-bg: #0b0b0d;
    --color-user-msg-bg: #f2f2f2;
    --color-user-msg-text: #0b0b0d;
    --color-model-msg-bg: #161618;
    --color-model-msg-text: #f2f2f2;
    --color-error-accent: #ff5d47;
    --color-toast-bg: #161618;
    --color-toast-text: #f2f2f2;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-border); }
.composer textarea:focus { border-color: var(--color-text-muted); }
.btn:hover { background: var(--color-surface-muted); }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-bg-overlay: rgba(255, 255, 255, 0.92);
    --color-text-primary: #111111;
    --color-text-muted: #606060;
    --color-border: #c2c2c2;
    --color-surface-muted: #ececec;
    --color-input-bg: #ffffff;
    --color-user-msg-bg: #111111;
    --color-user-msg-text: #ffffff;
    --color-model-msg-bg: #f0f0f0;
    --color-model-msg-text: #111111;
    --color-error-accent: #c62d1b;
    --color-toast-bg: #f0f0f0;
    --color-toast-text: #111111;
}
body { background: var(--color-bg-primary); color: var(--color-text-primary); }
.composer textarea { background: var(--color-input-bg); color: var(--color-text-primary); border-color: var(--color-border); }
.composer textarea:focus { border-color: var(--color-text-muted); }
.btn:hover { background: var(--color-surface-muted); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, PrefStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PrefStore::at(dir.path());
        (dir, store)
    }

    #[test]
    fn startup_defaults_to_dark_without_stored_value() {
        let (_dir, store) = store();
        let manager = ThemeManager::startup(store);
        assert_eq!(manager.current(), ThemeMode::Dark);
        assert_eq!(manager.stored(), None);
    }

    #[test]
    fn startup_resolves_stored_preference() {
        let (_dir, store) = store();
        store.set(THEME_KEY, "light").expect("seed store");
        let manager = ThemeManager::startup(store);
        assert_eq!(manager.current(), ThemeMode::Light);
    }

    #[test]
    fn apply_persists_the_preference_string() {
        let (_dir, store) = store();
        let mut manager = ThemeManager::startup(store.clone());
        manager.apply(ThemeMode::Light);
        assert_eq!(store.get(THEME_KEY), Some("light".to_string()));
    }

    #[test]
    fn set_theme_normalizes_unknown_values() {
        let (_dir, store) = store();
        let mut manager = ThemeManager::startup(store.clone());
        manager.set_theme("anything-else");
        assert_eq!(manager.current(), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY), Some("dark".to_string()));
    }

    #[test]
    fn toggling_twice_restores_the_original_mode() {
        let (_dir, store) = store();
        let mut manager = ThemeManager::startup(store);
        let original = manager.current();
        manager.toggle();
        manager.toggle();
        assert_eq!(manager.current(), original);
    }

    #[test]
    fn toggle_survives_an_unwritable_store() {
        let manager_store = PrefStore::at("/dev/null/not-a-directory");
        let mut manager = ThemeManager::startup(manager_store);
        assert_eq!(manager.toggle(), ThemeMode::Light);
        assert_eq!(manager.current(), ThemeMode::Light);
    }

    #[test]
    fn ui_prefs_round_trip_and_clamp() {
        let (_dir, store) = store();
        let prefs = UiPrefs::default().with_font_delta(100);
        assert_eq!(prefs.font_px, FONT_PX_MAX);
        prefs.save(&store);
        assert_eq!(UiPrefs::load(&store), prefs);
        assert_eq!(prefs.with_font_delta(-100).font_px, FONT_PX_MIN);
    }
}
