//! Scrollsync configuration management and parsing
//!
//! TOML configuration for logging and for the scroller the host container
//! draws next to the terminal surface.

#![warn(missing_docs)]
#![deny(unsafe_code)]

use scrollsync_core::logging::{LogLevel, LoggingConfig};
use scrollsync_core::ScrollSyncError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// Width reserved by a regular-size legacy scroller, in pixels
pub const DEFAULT_LEGACY_SCROLLER_WIDTH: f64 = 15.0;

/// Main configuration structure for scrollsync
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Scrollbar configuration
    pub scrollbar: ScrollbarConfig,
}

/// Whether the host shows a scroller at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollbarVisibility {
    /// Let the platform decide
    #[default]
    System,
    /// Never show a scroller
    Never,
}

/// How the platform draws its scroller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollerStyle {
    /// Scroller floats over content and takes no space
    #[default]
    Overlay,
    /// Scroller occupies an opaque gutter beside the content
    Legacy,
}

/// Scrollbar-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollbarConfig {
    /// Scroller visibility
    pub visibility: ScrollbarVisibility,
    /// Scroller style reported by the platform
    pub style: ScrollerStyle,
    /// Gutter width used when the style is legacy
    pub legacy_width: f64,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            visibility: ScrollbarVisibility::System,
            style: ScrollerStyle::Overlay,
            legacy_width: DEFAULT_LEGACY_SCROLLER_WIDTH,
        }
    }
}

impl ScrollbarConfig {
    /// Whether the host should display a scroller
    pub fn scroller_visible(&self) -> bool {
        self.visibility == ScrollbarVisibility::System
    }

    /// Pixels the renderer must keep free on the trailing edge so terminal
    /// columns never land under an opaque scroller gutter.
    pub fn scroller_inset(&self) -> f64 {
        match (self.visibility, self.style) {
            (ScrollbarVisibility::System, ScrollerStyle::Legacy) => self.legacy_width,
            _ => 0.0,
        }
    }
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file
    #[instrument(name = "config_load", skip(path))]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> scrollsync_core::Result<Self> {
        let path = path.as_ref();
        info!(
            subsystem = "config",
            config_file = ?path,
            "Loading configuration from file"
        );

        let content = std::fs::read_to_string(path).map_err(|e| {
            error!(
                subsystem = "config",
                config_file = ?path,
                error = %e,
                "Failed to read configuration file"
            );
            ScrollSyncError::Configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml(&content).map_err(|e| {
            error!(
                subsystem = "config",
                config_file = ?path,
                error = %e,
                "Failed to parse configuration file"
            );
            ScrollSyncError::Configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(
            subsystem = "config",
            config_file = ?path,
            logging_level = ?config.logging.global_level,
            scroller_style = ?config.scrollbar.style,
            scroller_visibility = ?config.scrollbar.visibility,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML document
    pub fn to_toml(&self) -> scrollsync_core::Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            error!(
                subsystem = "config",
                error = %e,
                "Failed to serialize configuration"
            );
            ScrollSyncError::Configuration(format!("Failed to serialize config: {}", e))
        })
    }

    /// Save configuration to file
    #[instrument(name = "config_save", skip(self, path))]
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> scrollsync_core::Result<()> {
        let path = path.as_ref();
        info!(
            subsystem = "config",
            config_file = ?path,
            "Saving configuration to file"
        );

        let content = self.to_toml()?;

        std::fs::write(path, content).map_err(|e| {
            error!(
                subsystem = "config",
                config_file = ?path,
                error = %e,
                "Failed to write configuration file"
            );
            ScrollSyncError::Configuration(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(
            subsystem = "config",
            config_file = ?path,
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> scrollsync_core::Result<PathBuf> {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("scrollsync")
        } else {
            warn!(
                subsystem = "config",
                "No standard config directory found, using current directory"
            );
            PathBuf::from(".")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration with fallback to defaults
    #[instrument(name = "config_load_or_default")]
    pub fn load_or_default() -> Self {
        match Self::default_config_path() {
            Ok(path) if path.exists() => match Self::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        subsystem = "config",
                        config_file = ?path,
                        error = %e,
                        "Failed to load config file, using defaults"
                    );
                    Self::default()
                }
            },
            Ok(path) => {
                debug!(
                    subsystem = "config",
                    config_file = ?path,
                    "Configuration file does not exist, using defaults"
                );
                Self::default()
            }
            Err(e) => {
                warn!(
                    subsystem = "config",
                    error = %e,
                    "Failed to determine config path, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Update logging level for a specific module
    #[instrument(name = "config_update_log_level", skip(self))]
    pub fn update_log_level(&mut self, module: &str, level: LogLevel) {
        debug!(
            subsystem = "config",
            module = module,
            level = ?level,
            "Updating log level for module"
        );
        self.logging.module_levels.insert(module.to_string(), level);
    }

    /// Validate configuration values
    #[instrument(name = "config_validate", skip(self))]
    pub fn validate(&self) -> scrollsync_core::Result<()> {
        debug!(subsystem = "config", "Validating configuration");

        let width = self.scrollbar.legacy_width;
        if !width.is_finite() || width < 0.0 {
            error!(
                subsystem = "config",
                legacy_width = width,
                "Invalid legacy scroller width"
            );
            return Err(ScrollSyncError::Configuration(
                "Legacy scroller width must be a finite, non-negative number".to_string(),
            ));
        }

        debug!(subsystem = "config", "Configuration validation passed");
        Ok(())
    }
}
