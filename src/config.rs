//! Configuration file support.
//!
//! Viewer preferences and keybindings serialize to a versioned JSON
//! document. Missing fields fall back to defaults so partial files load.

use dualview_ui::Color;
use serde::{Deserialize, Serialize};

use crate::constants::{ANNOTATION_LINE_WIDTH, DEFAULT_ANNOTATION_COLOR, DEFAULT_REVEAL_PERCENT};
use crate::error::{Result, ViewerError};
use crate::keybindings::KeyBindings;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level (for loggers that take a max level).
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Where a wheel tick zooms about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZoomAnchor {
    /// Scale about the element center; pan is untouched.
    #[default]
    Center,
    /// Keep the image point under the cursor fixed.
    Cursor,
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Viewer configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// User preferences
    #[serde(default)]
    pub preferences: ViewerPreferences,

    /// Keybinding configuration
    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_app_name() -> String {
    "dualview".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Stroke color for new annotations
    #[serde(default = "default_annotation_color")]
    pub annotation_color: Color,

    /// Stroke width for annotations, in surface pixels
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Wheel zoom anchor
    #[serde(default)]
    pub zoom_anchor: ZoomAnchor,

    /// Reveal slider position on entering compare mode
    #[serde(default = "default_reveal_percent")]
    pub default_reveal_percent: f32,
}

fn default_annotation_color() -> Color {
    DEFAULT_ANNOTATION_COLOR
}

fn default_line_width() -> f32 {
    ANNOTATION_LINE_WIDTH
}

fn default_reveal_percent() -> f32 {
    DEFAULT_REVEAL_PERCENT
}

impl Default for ViewerPreferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            annotation_color: default_annotation_color(),
            line_width: default_line_width(),
            zoom_anchor: ZoomAnchor::default(),
            default_reveal_percent: default_reveal_percent(),
        }
    }
}

impl ViewerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: ViewerPreferences::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize configuration from JSON.
    ///
    /// Out-of-range preferences are clamped rather than rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ViewerError::VersionMismatch {
                expected: CONFIG_VERSION,
                found: config.version,
            });
        }

        let prefs = &mut config.preferences;
        prefs.default_reveal_percent = prefs.default_reveal_percent.clamp(0.0, 100.0);
        if !(prefs.line_width.is_finite() && prefs.line_width > 0.0) {
            prefs.line_width = ANNOTATION_LINE_WIDTH;
        }

        Ok(config)
    }

    /// Read configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// LocalStorage key for WASM config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "dualview-config";

    /// Try to load configuration from localStorage (WASM only).
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}
