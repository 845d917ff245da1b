//! Declarative site configuration.
//!
//! A single TOML file describes the window, the dot-grid background, the
//! section rotation, and the contact relay credentials. Everything has a
//! default, so an absent file yields a usable configuration.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub mod theme;

pub use theme::{Palette, ThemeName, ThemeState, ThemeSwitcher};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub version: u32,
    pub width: u32,
    pub height: u32,
    /// Frame-rate cap; absent or 0 means uncapped.
    pub fps: Option<f32>,
    /// Theme used when no persisted choice exists yet.
    pub theme: Option<ThemeName>,
    pub dots: DotSettings,
    pub rotation: RotationSettings,
    pub contact: ContactSettings,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            version: 1,
            width: 1280,
            height: 720,
            fps: Some(60.0),
            theme: None,
            dots: DotSettings::default(),
            rotation: RotationSettings::default(),
            contact: ContactSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DotSettings {
    /// Distance between dot centers, pixels.
    pub spacing: u32,
    /// Dot radius, pixels.
    pub radius: f32,
    /// Hex color for the dots; malformed values fall back at the renderer.
    pub color: Option<String>,
    /// Hex color for the pulsing glow.
    pub glow: Option<String>,
}

impl Default for DotSettings {
    fn default() -> Self {
        Self {
            spacing: 28,
            radius: 1.5,
            color: None,
            glow: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationModeSetting {
    Continuous,
    Shuffle,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RotationSettings {
    pub mode: RotationModeSetting,
    /// How long each section stays on the hero card.
    #[serde(deserialize_with = "deserialize_duration")]
    pub dwell: Duration,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            mode: RotationModeSetting::Continuous,
            dwell: Duration::from_secs(12),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactSettings {
    pub service_id: Option<String>,
    pub template_id: Option<String>,
    pub public_key: Option<String>,
    pub reply_to: Option<String>,
    /// How long a success confirmation stays visible.
    #[serde(deserialize_with = "deserialize_duration")]
    pub status_dismiss: Duration,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            service_id: None,
            template_id: None,
            public_key: None,
            reply_to: None,
            status_dismiss: Duration::from_secs(5),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Loads `path` when it exists, otherwise the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }
        if self.dots.spacing == 0 {
            return Err(ConfigError::Invalid(
                "dots.spacing must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Frame cap normalised the way the pacer expects: 0 means uncapped.
    pub fn effective_fps(&self) -> Option<f32> {
        self.fps.filter(|fps| *fps > 0.0)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;
    impl<'de> de::Visitor<'de> for Visitor {
        type Value = Duration;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a duration as number of seconds or human-readable string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Duration::from_secs(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0 {
                return Err(E::custom("duration must not be negative"));
            }
            Ok(Duration::from_secs(v as u64))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v < 0.0 {
                return Err(E::custom("duration must not be negative"));
            }
            Ok(Duration::from_secs_f64(v))
        }
    }
    deserializer.deserialize_any(Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_empty_input() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.dots.spacing, 28);
        assert_eq!(config.rotation.dwell, Duration::from_secs(12));
        assert_eq!(config.contact.status_dismiss, Duration::from_secs(5));
    }

    #[test]
    fn parses_a_full_config() {
        let config = SiteConfig::from_toml_str(
            r##"
version = 1
width = 1920
height = 1080
fps = 30
theme = "light"

[dots]
spacing = 20
radius = 2.0
color = "#9ca3af"
glow = "#8b5cf6"

[rotation]
mode = "shuffle"
dwell = "45s"

[contact]
service_id = "svc_123"
template_id = "tpl_456"
public_key = "pk_789"
status_dismiss = 8
"##,
        )
        .unwrap();
        assert_eq!(config.theme, Some(ThemeName::Light));
        assert_eq!(config.rotation.mode, RotationModeSetting::Shuffle);
        assert_eq!(config.rotation.dwell, Duration::from_secs(45));
        assert_eq!(config.contact.service_id.as_deref(), Some("svc_123"));
        assert_eq!(config.contact.status_dismiss, Duration::from_secs(8));
    }

    #[test]
    fn durations_accept_humantime_strings() {
        let config = SiteConfig::from_toml_str(
            r#"
[rotation]
dwell = "1m 30s"
"#,
        )
        .unwrap();
        assert_eq!(config.rotation.dwell, Duration::from_secs(90));
    }

    #[test]
    fn rejects_unknown_version() {
        let err = SiteConfig::from_toml_str("version = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_zero_spacing() {
        let err = SiteConfig::from_toml_str("[dots]\nspacing = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_fps_is_uncapped() {
        let config = SiteConfig::from_toml_str("fps = 0").unwrap();
        assert_eq!(config.effective_fps(), None);
        let config = SiteConfig::from_toml_str("fps = 30").unwrap();
        assert_eq!(config.effective_fps(), Some(30.0));
    }
}
