//! Application configuration.

use serde::{Deserialize, Serialize};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default conversion settings.
    pub conversion: ConversionDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default conversion parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionDefaults {
    /// Images per output video.
    pub batch_size: usize,

    /// Seconds each image is shown.
    pub clip_secs: f64,

    /// Output frame rate.
    pub fps: u32,

    /// Target video bitrate (kbit/s).
    pub video_bitrate_kbps: u32,

    /// Encoder thread count passed to the backend.
    pub encode_threads: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "slidereel=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            conversion: ConversionDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ConversionDefaults {
    fn default() -> Self {
        Self {
            batch_size: 10,
            clip_secs: 2.0,
            fps: 24,
            video_bitrate_kbps: 4000,
            encode_threads: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            std::path::PathBuf::from(home).join(".config")
        });
    base.join("slidereel").join("config.json")
}
