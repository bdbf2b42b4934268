/// User settings
///
/// Read once at startup from `<config dir>/comic-strip/settings.json`.
/// Every field is optional in the file; anything missing keeps its default.
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Edge length of staged thumbnails in pixels
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 96;

/// File extensions offered by the image picker
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub thumbnail_size: u32,
    pub extensions: Vec<String>,
    pub dark_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            dark_theme: true,
        }
    }
}

impl Settings {
    /// Load settings from the user's config directory, falling back to
    /// defaults when the file is absent or broken
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::read(&path) {
            Ok(settings) => {
                tracing::info!(path = %path.display(), "loaded settings");
                settings
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "using default settings: {err}");
                Self::default()
            }
        }
    }

    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.thumbnail_size = settings.thumbnail_size.max(1);

        // The picker filter needs at least one extension
        if settings.extensions.is_empty() {
            tracing::warn!("no image extensions configured, using the defaults");
            settings.extensions = Settings::default().extensions;
        }
        Ok(settings)
    }

    /// Where the settings file lives
    /// - Linux: ~/.config/comic-strip/settings.json
    /// - macOS: ~/Library/Application Support/comic-strip/settings.json
    /// - Windows: %APPDATA%\comic-strip\settings.json
    fn path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("comic-strip");
        path.push("settings.json");
        Some(path)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
