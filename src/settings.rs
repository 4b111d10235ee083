//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Game settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Visual settings
    pub visual: VisualSettings,
    /// Gameplay settings
    pub gameplay: GameplaySettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub hard_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate_cw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate_ccw: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(key) => vec![key],
        OneOrMany::Many(keys) => keys,
    })
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &Vec<String>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match keys.as_slice() {
        [key] => serializer.serialize_str(key),
        _ => keys.serialize(serializer),
    }
}

/// Visual settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Ghost (landing projection) visibility
    pub show_ghost: bool,
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

/// Gameplay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Gravity interval in milliseconds
    pub tick_ms: u64,
    /// Fixed block sequence seed; random when unset
    pub seed: Option<u64>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            hard_drop: vec!["Space".to_string()],
            rotate_cw: vec!["Up".to_string(), "x".to_string()],
            rotate_ccw: vec!["z".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: "solid".to_string(),
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            seed: None,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the platform config file, or fall back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`. A missing file is created with the
    /// defaults so there is something to edit; an unreadable or malformed
    /// one is left alone and the defaults are used.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|e| {
                tracing::warn!("{}: {}, using defaults", path.display(), e);
                Self::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let settings = Self::default();
                match settings.save_to(path) {
                    Ok(()) => tracing::info!("wrote default settings to {}", path.display()),
                    Err(e) => tracing::warn!("could not write {}: {}", path.display(), e),
                }
                settings
            }
            Err(e) => {
                tracing::warn!("{}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings from a TOML document
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    /// Save settings to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl VisualSettings {
    /// Get the (block, ghost) characters based on style
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", ".."),
            "round" => ("()", ".."),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.gameplay.tick_ms, 500);
        assert!(settings.gameplay.seed.is_none());
        assert!(settings.visual.show_ghost);
        assert_eq!(settings.keys.hard_drop, vec!["Space"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(
            r#"
            [gameplay]
            seed = 42

            [keys]
            move_left = "a"
            rotate_cw = ["w", "Up"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.gameplay.seed, Some(42));
        assert_eq!(settings.gameplay.tick_ms, 500);
        assert_eq!(settings.keys.move_left, vec!["a"]);
        assert_eq!(settings.keys.rotate_cw, vec!["w", "Up"]);
        assert_eq!(settings.keys.move_right, vec!["Right"]);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let err = Settings::from_toml("[gameplay]\ntick_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.gameplay.seed = Some(7);
        settings.visual.block_style = "bracket".to_string();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed = Settings::from_toml(&text).unwrap();
        assert_eq!(parsed.gameplay.seed, Some(7));
        assert_eq!(parsed.keys.rotate_cw, settings.keys.rotate_cw);
        assert_eq!(parsed.visual.block_chars(), ("[]", ".."));
    }

    /// Fresh directory under the system temp dir, unique per test and process
    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join("blockfall-tests")
            .join(format!("{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_then_load_from_disk() {
        let dir = scratch_dir("save-load");
        let path = dir.join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.gameplay.seed = Some(99);
        settings.gameplay.tick_ms = 250;
        settings.keys.quit = vec!["q".to_string()];
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.gameplay.seed, Some(99));
        assert_eq!(loaded.gameplay.tick_ms, 250);
        assert_eq!(loaded.keys.quit, vec!["q"]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = scratch_dir("missing");
        let path = dir.join("settings.toml");

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.gameplay.tick_ms, 500);
        let written = Settings::from_toml(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.keys.rotate_cw, loaded.keys.rotate_cw);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_on_disk_is_not_overwritten() {
        let dir = scratch_dir("malformed");
        let path = dir.join("settings.toml");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "tick_ms = [").unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.gameplay.tick_ms, 500);
        assert_eq!(fs::read_to_string(&path).unwrap(), "tick_ms = [");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_under_a_file_is_io_error() {
        let dir = scratch_dir("io-error");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let err = Settings::default()
            .save_to(&blocker.join("settings.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));

        let _ = fs::remove_dir_all(&dir);
    }
}
