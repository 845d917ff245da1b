//! Theme tables and the persisted theme choice.
//!
//! A theme name resolves to a fixed palette of hex colors; the renderer
//! parses them (falling back on malformed strings) so this module stays free
//! of any drawing types. The chosen name is persisted to a small TOML state
//! file and read back synchronously at startup, before the first frame, so
//! the deck never flashes the wrong theme.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Light => f.write_str("light"),
            ThemeName::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            other => Err(format!("unknown theme '{other}'; expected light or dark")),
        }
    }
}

/// Presentation attributes resolved from a theme name. All values are hex
/// color strings; consumers parse them with their own fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub dot: &'static str,
    pub glow: &'static str,
    pub accent: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#f8fafc",
    surface: "#ffffff",
    text: "#1f2937",
    muted: "#6b7280",
    dot: "#6b7280",
    glow: "#7c3aed",
    accent: "#7c3aed",
};

const DARK: Palette = Palette {
    background: "#0f1117",
    surface: "#161a22",
    text: "#e5e7eb",
    muted: "#9ca3af",
    dot: "#9ca3af",
    glow: "#8b5cf6",
    accent: "#a78bfa",
};

impl Palette {
    pub fn for_theme(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => LIGHT,
            ThemeName::Dark => DARK,
        }
    }
}

/// The persisted theme choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeState {
    pub theme: ThemeName,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            theme: ThemeName::Dark,
        }
    }
}

impl ThemeState {
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn persist(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self)
            .map_err(|err| ConfigError::Invalid(format!("failed to serialize theme state: {err}")))?;
        std::fs::write(path, serialized)?;
        Ok(())
    }
}

/// Owns the current theme and guards against overlapping toggles: a second
/// toggle requested while a transition is still in flight is a no-op.
#[derive(Debug)]
pub struct ThemeSwitcher {
    current: ThemeName,
    in_flight: bool,
}

impl ThemeSwitcher {
    pub fn new(initial: ThemeName) -> Self {
        Self {
            current: initial,
            in_flight: false,
        }
    }

    pub fn current(&self) -> ThemeName {
        self.current
    }

    /// Starts a toggle and returns the new theme, or `None` while a previous
    /// toggle has not completed yet.
    pub fn begin_toggle(&mut self) -> Option<ThemeName> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.current = self.current.toggled();
        Some(self.current)
    }

    /// Marks the running transition as finished.
    pub fn complete_toggle(&mut self) {
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_name_round_trips_through_strings() {
        assert_eq!("light".parse::<ThemeName>().unwrap(), ThemeName::Light);
        assert_eq!("DARK".parse::<ThemeName>().unwrap(), ThemeName::Dark);
        assert!("sepia".parse::<ThemeName>().is_err());
        assert_eq!(ThemeName::Light.to_string(), "light");
    }

    #[test]
    fn palettes_differ_per_theme() {
        let light = Palette::for_theme(ThemeName::Light);
        let dark = Palette::for_theme(ThemeName::Dark);
        assert_ne!(light.background, dark.background);
        assert_ne!(light.text, dark.text);
    }

    #[test]
    fn rapid_double_toggle_is_a_no_op() {
        let mut switcher = ThemeSwitcher::new(ThemeName::Dark);
        assert_eq!(switcher.begin_toggle(), Some(ThemeName::Light));
        // Second toggle before the first transition completes.
        assert_eq!(switcher.begin_toggle(), None);
        assert_eq!(switcher.current(), ThemeName::Light);
        switcher.complete_toggle();
        assert_eq!(switcher.begin_toggle(), Some(ThemeName::Dark));
    }

    #[test]
    fn state_persists_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("theme.toml");
        let state = ThemeState {
            theme: ThemeName::Light,
        };
        state.persist(&path).unwrap();
        let loaded = ThemeState::load_or_default(&path).unwrap();
        assert_eq!(loaded.theme, ThemeName::Light);
    }

    #[test]
    fn missing_state_defaults_to_dark() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ThemeState::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.theme, ThemeName::Dark);
    }
}
