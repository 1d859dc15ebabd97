//! Configuration module

use serde::Deserialize;

use crate::error::{BraviaError, Result};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub device: DeviceConfig,
}

/// Where the television lives and how to authenticate with it
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Base address, e.g. `http://192.168.1.20`. Used verbatim as a prefix.
    pub server: String,
    pub psk: String,
    /// Per-request timeout; 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DeviceConfig {
    pub fn new(server: impl Into<String>, psk: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            psk: psk.into(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load from `config/bravia.*` (optional) overlaid by `BRAVIA__DEVICE__*`.
    pub fn load() -> Result<Self> {
        Self::load_from("config/bravia")
    }

    pub fn load_from(path: &str) -> Result<Self> {
        Self::load_with_env(path, "BRAVIA")
    }

    fn load_with_env(path: &str, env_prefix: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(env_prefix).separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;

        if config.device.server.is_empty() {
            return Err(BraviaError::Config("device.server is empty".to_string()));
        }
        if config.device.psk.is_empty() {
            return Err(BraviaError::Config("device.psk is empty".to_string()));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    // Nothing sets this, so BRAVIA__* in the caller's shell can't leak in
    const TEST_ENV_PREFIX: &str = "BRAVIA_CONFIG_TEST";

    /// Write `contents` to a private temp dir, load it, then remove the dir
    fn load_toml(name: &str, contents: &str) -> Result<Config> {
        let dir: PathBuf = std::env::temp_dir().join(format!(
            "bravia-config-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bravia.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        drop(file);

        let stem = path.with_extension("");
        let result = Config::load_with_env(&stem.to_string_lossy(), TEST_ENV_PREFIX);
        std::fs::remove_dir_all(&dir).unwrap();
        result
    }

    #[test]
    fn test_load_defaults_timeout() {
        let config = load_toml(
            "defaults",
            "[device]\nserver = \"http://10.0.0.5\"\npsk = \"0000\"\n",
        )
        .unwrap();
        assert_eq!(config.device.server, "http://10.0.0.5");
        assert_eq!(config.device.psk, "0000");
        assert_eq!(config.device.timeout_secs, 10);
    }

    #[test]
    fn test_load_explicit_timeout() {
        let config = load_toml(
            "timeout",
            "[device]\nserver = \"http://10.0.0.5\"\npsk = \"0000\"\ntimeout_secs = 3\n",
        )
        .unwrap();
        assert_eq!(config.device.timeout_secs, 3);
    }

    #[test]
    fn test_load_rejects_empty_psk() {
        let err = load_toml(
            "empty_psk",
            "[device]\nserver = \"http://10.0.0.5\"\npsk = \"\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, BraviaError::Config(_)));
    }

    #[test]
    fn test_load_rejects_missing_device_section() {
        assert!(matches!(
            load_toml("missing", "[other]\nkey = 1\n"),
            Err(BraviaError::Config(_))
        ));
    }

    #[test]
    fn test_device_config_new_uses_default_timeout() {
        let cfg = DeviceConfig::new("http://tv", "1234");
        assert_eq!(cfg.timeout_secs, 10);
    }
}
