use icy_flow_engine::{LineMode, StyleId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "icy_flow";

/// Lazily initialized project directories (computed once on first access)
static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

/// Defaults for the command line tool, stored in `settings.toml`.
///
/// Every command line flag that has a counterpart here overrides it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canvas width used when an edit starts a new diagram
    pub columns: i32,
    /// Canvas height used when an edit starts a new diagram
    pub rows: i32,
    pub style: StyleId,
    pub line_mode: LineMode,
    /// Drop glyphs outside the accepted set when loading instead of failing
    pub skip_unrecognized: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 40,
            style: StyleId::default(),
            line_mode: LineMode::default(),
            skip_unrecognized: false,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.toml";

    pub fn load() -> Self {
        let Some(options_file) = Self::config_file() else {
            return Self::default();
        };
        if !options_file.exists() {
            return Self::default();
        }

        match fs::read_to_string(&options_file) {
            Ok(txt) => match Self::from_toml(&txt) {
                Ok(settings) => return settings,
                Err(err) => log::error!("Error parsing {}: {}", options_file.display(), err),
            },
            Err(err) => log::error!("Error reading options file: {}", err),
        }
        Self::default()
    }

    /// # Errors
    ///
    /// Returns the parse error if `txt` is not a valid settings document.
    pub fn from_toml(txt: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(txt)
    }

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(Self::FILE_NAME))
    }
}
