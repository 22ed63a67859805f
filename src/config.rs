//! Editor tuning and backend location settings.
//!
//! Both structures load from JSON with every field optional, so an empty
//! object (or a missing file) yields the defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable consulted for the backend base URL.
pub const API_URL_ENV: &str = "AREA_API_URL";
/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Interaction constants of the canvas editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Size of one grid cell in world units.
    #[serde(alias = "gridPx")]
    pub grid_px: f64,
    /// Screen-space radius within which a pending connection snaps to a port.
    #[serde(alias = "snapRadiusPx")]
    pub snap_radius_px: f64,
    /// Vertical distance below which connections are drawn as straight lines.
    #[serde(alias = "straightThreshold")]
    pub straight_threshold: f64,
    #[serde(alias = "recenterPadding")]
    pub recenter_padding: f64,
    #[serde(alias = "recenterDurationMs")]
    pub recenter_duration_ms: f64,
    /// Clearance kept between an orthogonal route and the nodes it avoids.
    #[serde(alias = "routeMargin")]
    pub route_margin: f64,
    /// Length of the straight segment leaving a port before the route turns.
    #[serde(alias = "routeStub")]
    pub route_stub: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_px: 20.0,
            snap_radius_px: 40.0,
            straight_threshold: 5.0,
            recenter_padding: 48.0,
            recenter_duration_ms: 400.0,
            route_margin: 16.0,
            route_stub: 24.0,
        }
    }
}

impl EditorConfig {
    /// Loads the configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: EditorConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        debug!(path = %path.display(), grid = config.grid_px, "loaded editor config");
        Ok(config)
    }

    /// Rejects values the canvas math cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("gridPx", self.grid_px),
            ("snapRadiusPx", self.snap_radius_px),
            ("recenterDurationMs", self.recenter_duration_ms),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must be a positive number, got {}", value),
                });
            }
        }
        let non_negative = [
            ("straightThreshold", self.straight_threshold),
            ("recenterPadding", self.recenter_padding),
            ("routeMargin", self.route_margin),
            ("routeStub", self.route_stub),
        ];
        for (key, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Settings persisted by the client, mirroring the stored API URL override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(rename = "apiUrl", alias = "api_url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl StoredSettings {
    /// Reads stored settings. A missing file is not an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "saved client settings");
        Ok(())
    }
}

/// Where the REST backend lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Resolves the base URL: explicit override, then stored settings, then
    /// the `AREA_API_URL` environment variable, then the built-in default.
    pub fn resolve(
        override_url: Option<&str>,
        stored: &StoredSettings,
    ) -> Result<Self, ConfigError> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::resolve_with_env(override_url, stored, env_url.as_deref())
    }

    /// Same as [`ClientConfig::resolve`] with the environment value supplied
    /// by the caller.
    pub fn resolve_with_env(
        override_url: Option<&str>,
        stored: &StoredSettings,
        env_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let candidate = [override_url, stored.api_url.as_deref(), env_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        let api_base_url = normalize_base_url(candidate)?;
        debug!(url = %api_base_url, "resolved api base url");
        Ok(Self { api_base_url })
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(url: &str) -> Result<String, ConfigError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            key: "apiUrl".to_string(),
            message: format!("'{}' must start with http:// or https://", url),
        });
    }
    Ok(url.trim_end_matches('/').to_string())
}
