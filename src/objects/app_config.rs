use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "mediaload-config";
/// Lower bound for `poll_interval_ms`; below it every job would poll back to back.
pub const MIN_POLL_INTERVAL_MS: u32 = 100;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub poll_interval_ms: u32,
    pub completed_retention_ms: u32,
    pub toast_duration_ms: u32,
    pub long_press_ms: u32,
    pub clamp_progress: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".into(),
            poll_interval_ms: 1_000,
            completed_retention_ms: 5_000,
            toast_duration_ms: 3_000,
            long_press_ms: 800,
            clamp_progress: true,
        }
    }
}

impl AppConfig {
    /// Defaults, overlaid with the JSON object stored under `mediaload-config`
    /// in local storage (if any).
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(STORAGE_KEY).ok().flatten());

        match stored {
            Some(json) => match Self::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("ignoring stored configuration: {}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;

        config.poll_interval_ms = config.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_overlay_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"poll_interval_ms": 2500}"#).unwrap();

        assert_eq!(config.poll_interval_ms, 2500);
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.completed_retention_ms, 5_000);
        assert!(config.clamp_progress);
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let config = AppConfig::from_json(r#"{"poll_interval_ms": 0}"#).unwrap();

        assert_eq!(config.poll_interval_ms, MIN_POLL_INTERVAL_MS);
    }

    #[test]
    fn invalid_overlay_is_an_error() {
        assert!(AppConfig::from_json("{poll").is_err());
        assert!(AppConfig::from_json(r#"{"toast_duration_ms": "soon"}"#).is_err());
    }
}
