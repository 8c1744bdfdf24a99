// SPDX-License-Identifier: MPL-2.0
//! This module handles toast configuration: option types, built-in
//! defaults, and loading/saving user defaults to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use bulma_toast::config::{self, Position, ToastOptions};
//! use std::path::PathBuf;
//!
//! // Load existing defaults
//! let mut defaults = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! defaults.position = Some(Position::BottomCenter);
//!
//! // Save the modified defaults
//! config::save(&defaults).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/test_settings.toml");
//! config::save_to_path(&defaults, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.position, Some(Position::BottomCenter));
//! ```

pub mod defaults;
mod options;
mod position;

pub use defaults::*;
pub use options::{Animation, Message, ToastConfig, ToastOptions};
pub use position::{Offsets, Position};

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "BulmaToast";

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads user defaults from the platform config directory.
///
/// A missing file yields empty options.
pub fn load() -> Result<ToastOptions> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ToastOptions::default())
}

pub fn save(options: &ToastOptions) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(options, &path);
    }
    Ok(())
}

/// Loads options from `path`. Malformed TOML yields empty options.
pub fn load_from_path(path: &Path) -> Result<ToastOptions> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "ignoring malformed toast settings");
        ToastOptions::default()
    }))
}

pub fn save_to_path(options: &ToastOptions, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(options)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_options() {
        let options = ToastOptions::default()
            .with_duration(4000)
            .with_position(Position::BottomLeft)
            .with_dismissible(true)
            .with_animation(Animation::new("fadeIn", "fadeOut"));
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&options, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, options);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, ToastOptions::default());
    }

    #[test]
    fn load_from_missing_path_is_an_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let err = load_from_path(&temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, crate::error::Error::Io(_)));
    }

    #[test]
    fn saved_file_uses_camel_case_keys() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        let options = ToastOptions::default()
            .with_close_on_click(false)
            .with_pause_on_hover(true);

        save_to_path(&options, &config_path).expect("failed to save config");
        let content = fs::read_to_string(&config_path).expect("failed to read config");

        assert!(content.contains("closeOnClick = false"));
        assert!(content.contains("pauseOnHover = true"));
        assert!(!content.contains("duration"));
    }
}
