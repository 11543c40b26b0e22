//! Application settings.
//!
//! Settings are read from a single TOML file:
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info"
//! max-files = 3
//! directory = "logs"
//!
//! [navigation]
//! deep-link-scheme = "wavecast"
//! start-link = "wavecast://library"  # Optional
//! ```
//!
//! Every field has a default, so partial files are accepted.

use crate::navigation::deep_link::DEFAULT_SCHEME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_PATH: &str = "Settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub logging: LoggingSettings,
    pub navigation: NavigationSettings,
}

/// Configuration of the structured log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Filter directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// Number of run logs kept on disk (0 = keep all).
    pub max_files: usize,
    /// Log directory, relative to the working directory.
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigationSettings {
    /// Scheme accepted by the deep link resolver.
    pub deep_link_scheme: String,
    /// Deep link of the destination pushed on top of home at start-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_link: Option<String>,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        NavigationSettings {
            deep_link_scheme: DEFAULT_SCHEME.to_string(),
            start_link: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults.
    ///
    /// Never fails. A missing file silently yields defaults; an unreadable or
    /// malformed one yields defaults with a message on stderr.
    ///
    /// # Diagnostic Output
    ///
    /// Settings are loaded before logging is initialized, so diagnostics go
    /// to stderr instead of `tracing`.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Settings {
        let path = path.as_ref();
        if !path.exists() {
            return Settings::default();
        }

        match crate::helpers::load_toml::<Settings, _>(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("failed to load settings: {:#}; using defaults", e);
                Settings::default()
            }
        }
    }
}
