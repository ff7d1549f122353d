//! Client settings, layered from defaults, an optional `taskly.toml` and the
//! environment.
//!
//! Environment keys use the `TASKLY_` prefix and `__` between sections, so
//! `TASKLY_API__BASE_URL` sets `api.base_url`. The legacy `NEXT_PUBLIC_BASE_URL`
//! variable is still honored as the default base URL.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const LEGACY_BASE_URL_VAR: &str = "NEXT_PUBLIC_BASE_URL";
pub const CONFIG_FILE: &str = "taskly.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Api {
    pub base_url: String,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct SessionSettings {
    /// Where the file-backed session lives. Platform data dir when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Settings {
    pub api: Api,
    #[serde(default)]
    pub session: SessionSettings,
}

impl Settings {
    /// Load from `.env`, `taskly.toml` in the working directory and the
    /// process environment.
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(Path::new(CONFIG_FILE), utf8_vars(std::env::vars_os()))
    }

    /// Load from an explicit config file and set of environment variables.
    pub fn load(file: &Path, vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let default_base_url = vars
            .get(LEGACY_BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let config = Config::builder()
            .set_default("api.base_url", default_base_url)?
            .add_source(
                File::from(file)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("TASKLY")
                    .prefix_separator("_")
                    .separator("__")
                    .source(Some(vars)),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Keep the variables whose name and value are both valid UTF-8.
fn utf8_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn missing_file() -> PathBuf {
        std::env::temp_dir().join("taskly-settings-test-does-not-exist.toml")
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load(&missing_file(), HashMap::new()).unwrap();
        assert_eq!(settings.api.base_url, "http://localhost:8080");
        assert!(settings.session.dir.is_none());
    }

    #[test]
    fn test_legacy_variable() {
        let settings = Settings::load(
            &missing_file(),
            vars(&[("NEXT_PUBLIC_BASE_URL", "https://legacy.example.com")]),
        )
        .unwrap();
        assert_eq!(settings.api.base_url, "https://legacy.example.com");
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taskly.toml");
        std::fs::write(
            &file,
            "[api]\nbase_url = \"https://file.example.com\"\n\n[session]\ndir = \"/tmp/taskly-session\"\n",
        )
        .unwrap();

        let from_file = Settings::load(&file, HashMap::new()).unwrap();
        assert_eq!(from_file.api.base_url, "https://file.example.com");
        assert_eq!(from_file.session.dir, Some(PathBuf::from("/tmp/taskly-session")));

        let settings = Settings::load(
            &file,
            vars(&[
                ("TASKLY_API__BASE_URL", "https://env.example.com"),
                ("NEXT_PUBLIC_BASE_URL", "https://legacy.example.com"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.api.base_url, "https://env.example.com");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_variables_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = utf8_vars([
            (OsString::from("TASKLY_API__BASE_URL"), OsString::from("https://env.example.com")),
            (OsString::from("TASKLY_BROKEN"), OsString::from_vec(vec![0xff, 0xfe])),
            (OsString::from_vec(vec![0xff]), OsString::from("value")),
        ]);
        assert_eq!(vars.len(), 1);

        let settings = Settings::load(&missing_file(), vars).unwrap();
        assert_eq!(settings.api.base_url, "https://env.example.com");
    }
}
