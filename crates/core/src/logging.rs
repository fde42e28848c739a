//! Scrollsync structured logging infrastructure
//!
//! Centralized logging configuration with per-crate level controls and
//! structured metadata. The synchronizer logs its guard paths at `debug`
//! and its per-drag-event path at `trace`, so `info` stays quiet during
//! normal scrolling.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Environment variable that overrides the configured filter
pub const LOG_ENV_VAR: &str = "SCROLLSYNC_LOG";

/// Logging configuration for scrollsync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (applies when module-specific level not set)
    pub global_level: LogLevel,
    /// Per-module log level overrides
    pub module_levels: HashMap<String, LogLevel>,
    /// Whether to include timestamps in log output
    pub include_timestamps: bool,
    /// Whether to include severity levels in log output
    pub include_severity: bool,
    /// Whether to include subsystem/module names in log output
    pub include_subsystem: bool,
    /// Whether to use JSON format for structured output
    pub json_format: bool,
    /// Whether to use ANSI colors in output (when not JSON)
    pub use_colors: bool,
}

/// Log levels for scrollsync modules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show all logs including trace
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above (default)
    #[default]
    Info,
    /// Show warnings and above
    Warn,
    /// Show only errors
    Error,
    /// Disable all logging for this module
    Off,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_level: LogLevel::Info,
            module_levels: HashMap::new(),
            include_timestamps: true,
            include_severity: true,
            include_subsystem: true,
            json_format: false,
            use_colors: true,
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
            // tracing has no "off" level; callers filter Off out before converting
            LogLevel::Off => Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

/// Module names for per-module logging configuration
pub mod modules {
    /// Core module logging identifier
    pub const CORE: &str = "scrollsync_core";
    /// Configuration module logging identifier
    pub const CONFIG: &str = "scrollsync_config";
    /// Synchronization core logging identifier
    pub const SURFACE: &str = "scrollsync_surface";
    /// CLI module logging identifier
    pub const CLI: &str = "scrollsync_cli";
}

/// Initialize the logging system with the given configuration
pub fn init_logging(config: &LoggingConfig) -> crate::Result<()> {
    let env_filter = build_env_filter(config);
    let registry = Registry::default().with(env_filter);

    if config.json_format {
        let json_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_timer(ChronoUtc::rfc_3339());

        registry.with(json_layer).try_init().map_err(|e| {
            crate::ScrollSyncError::Configuration(format!(
                "Failed to initialize JSON logging: {}",
                e
            ))
        })?;
    } else if config.include_timestamps {
        let fmt_layer = fmt::layer()
            .with_target(config.include_subsystem)
            .with_level(config.include_severity)
            .with_ansi(config.use_colors)
            .with_timer(ChronoUtc::rfc_3339());

        registry.with(fmt_layer).try_init().map_err(|e| {
            crate::ScrollSyncError::Configuration(format!("Failed to initialize logging: {}", e))
        })?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(config.include_subsystem)
            .with_level(config.include_severity)
            .with_ansi(config.use_colors)
            .without_time();

        registry.with(fmt_layer).try_init().map_err(|e| {
            crate::ScrollSyncError::Configuration(format!("Failed to initialize logging: {}", e))
        })?;
    }

    Ok(())
}

/// Build the filter directives implied by a configuration, without the
/// environment override
pub fn filter_directives(config: &LoggingConfig) -> Vec<String> {
    let mut directives = Vec::new();

    if config.global_level != LogLevel::Off {
        let global_level: Level = config.global_level.into();
        directives.push(format!("scrollsync={}", global_level));
    }

    let mut overrides: Vec<_> = config.module_levels.iter().collect();
    overrides.sort_by(|a, b| a.0.cmp(b.0));
    for (module, level) in overrides {
        if *level == LogLevel::Off {
            directives.push(format!("{}=off", module));
        } else {
            let tracing_level: Level = (*level).into();
            directives.push(format!("{}={}", module, tracing_level));
        }
    }

    directives
}

/// Build an environment filter from the logging configuration
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    let mut filter = EnvFilter::new("");

    for directive in filter_directives(config) {
        match directive.parse() {
            Ok(parsed) => filter = filter.add_directive(parsed),
            Err(e) => {
                // Subscriber isn't installed yet, so stderr is all we have
                eprintln!("Ignoring invalid log directive '{}': {}", directive, e);
            }
        }
    }

    if let Ok(env_filter) = std::env::var(LOG_ENV_VAR) {
        for part in env_filter.split(',').filter(|p| !p.trim().is_empty()) {
            if let Ok(env_directive) = part.trim().parse() {
                filter = filter.add_directive(env_directive);
            }
        }
    }

    filter
}

/// Get default development logging configuration
pub fn dev_config() -> LoggingConfig {
    let mut config = LoggingConfig {
        global_level: LogLevel::Debug,
        use_colors: true,
        json_format: false,
        ..LoggingConfig::default()
    };

    config
        .module_levels
        .insert(modules::SURFACE.to_string(), LogLevel::Debug);
    config
        .module_levels
        .insert(modules::CLI.to_string(), LogLevel::Debug);

    config
}

/// Get default production logging configuration
pub fn prod_config() -> LoggingConfig {
    let mut config = LoggingConfig {
        global_level: LogLevel::Info,
        use_colors: false,
        json_format: true,
        ..LoggingConfig::default()
    };

    config
        .module_levels
        .insert(modules::SURFACE.to_string(), LogLevel::Warn);
    config
        .module_levels
        .insert(modules::CONFIG.to_string(), LogLevel::Info);
    config
        .module_levels
        .insert(modules::CLI.to_string(), LogLevel::Info);

    config
}

/// Get CI/testing logging configuration
pub fn ci_config() -> LoggingConfig {
    let mut config = LoggingConfig {
        global_level: LogLevel::Info,
        use_colors: false,
        json_format: true,
        include_timestamps: true,
        include_severity: true,
        include_subsystem: true,
        ..LoggingConfig::default()
    };

    config
        .module_levels
        .insert(modules::CORE.to_string(), LogLevel::Debug);
    config
        .module_levels
        .insert(modules::SURFACE.to_string(), LogLevel::Trace);

    config
}
