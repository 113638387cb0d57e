//! Finding and reading `settings.json`.

use std::path::{Path, PathBuf};

use orbview_core::{ConfigError, Settings};

/// `<config dir>/orbview/settings.json`, if the platform has a config directory.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("orbview").join("settings.json"))
}

/// Reads settings from `path`. A missing file yields the defaults with an info note,
/// an unreadable or malformed one yields the defaults with a warning.
///
/// Runs before the logger exists, so messages are returned instead of logged.
pub fn load_or_default(path: Option<&Path>) -> (Settings, Option<(log::Level, String)>) {
    let Some(path) = path else {
        return (
            Settings::default(),
            Some((
                log::Level::Info,
                "No config directory available, using default settings".to_string(),
            )),
        );
    };

    match Settings::load(path) {
        Ok(settings) => (settings, None),
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => (
            Settings::default(),
            Some((
                log::Level::Info,
                format!("No settings at {}, using defaults", path.display()),
            )),
        ),
        Err(e) => (
            Settings::default(),
            Some((
                log::Level::Warn,
                format!("Ignoring settings at {}: {e}", path.display()),
            )),
        ),
    }
}
