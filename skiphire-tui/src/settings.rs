use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use skiphire_core::CatalogQuery;
use skiphire_provider_wewantwaste::BASE_URL;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "skiphire.toml";
const ENV_PREFIX: &str = "SKIPHIRE";

#[derive(Debug, Error)]
pub(crate) enum SettingsError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub catalog: CatalogSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct CatalogSettings {
    pub base_url: String,
    pub postcode: String,
    pub area: String,
    /// Whole-request timeout; unset means wait for the server.
    pub timeout_secs: Option<u64>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            postcode: "NR32".to_owned(),
            area: "Lowestoft".to_owned(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub(crate) struct LogSettings {
    /// Log file; stdout belongs to the terminal UI, so nothing is logged without one.
    pub file: Option<PathBuf>,
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_owned(),
        }
    }
}

impl Settings {
    /// Load settings from `path` (or `skiphire.toml` when it exists) and `SKIPHIRE__*` variables.
    ///
    /// An explicitly given file must exist; the default one may be missing. A file that exists
    /// but does not parse is always an error.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_from(
            path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE)),
            path.is_some(),
        )
    }

    fn load_from(path: &Path, required: bool) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }

    /// Replace location parts given on the command line.
    pub(crate) fn apply_overrides(
        &mut self,
        postcode: Option<String>,
        area: Option<String>,
        base_url: Option<String>,
    ) {
        if let Some(postcode) = postcode {
            self.catalog.postcode = postcode;
        }
        if let Some(area) = area {
            self.catalog.area = area;
        }
        if let Some(base_url) = base_url {
            self.catalog.base_url = base_url;
        }
    }

    pub(crate) fn query(&self) -> CatalogQuery {
        CatalogQuery::new(self.catalog.postcode.trim(), self.catalog.area.trim())
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.catalog.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn defaults_target_lowestoft_without_timeout() {
        let settings = Settings::default();
        assert_eq!(settings.query(), CatalogQuery::new("NR32", "Lowestoft"));
        assert_eq!(settings.catalog.base_url, BASE_URL);
        assert_eq!(settings.timeout(), None);
        assert!(settings.log.file.is_none());
        assert_eq!(settings.log.filter, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [catalog]
            postcode = "IP1"
            area = "Ipswich"
            timeout_secs = 5

            [log]
            file = "skiphire.log"
            filter = "debug"
            "#,
        );

        let settings = Settings::load(Some(file.path())).expect("config loads");

        assert_eq!(settings.query(), CatalogQuery::new("IP1", "Ipswich"));
        assert_eq!(settings.catalog.base_url, BASE_URL);
        assert_eq!(settings.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.log.file.as_deref(), Some(Path::new("skiphire.log")));
        assert_eq!(settings.log.filter, "debug");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");
        assert!(Settings::load(Some(&missing)).is_err());
    }

    #[test]
    fn malformed_file_is_an_error_even_when_optional() {
        let file = write_config("[catalog\npostcode = \"IP1\"\n");
        assert!(Settings::load_from(file.path(), false).is_err());
        assert!(Settings::load(Some(file.path())).is_err());
    }

    #[test]
    fn missing_optional_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings =
            Settings::load_from(&dir.path().join("skiphire.toml"), false).expect("defaults load");
        assert_eq!(settings.catalog.base_url, BASE_URL);
        assert_eq!(settings.log.filter, "info");
    }

    #[test]
    fn command_line_overrides_win() {
        let mut settings = Settings::default();
        settings.apply_overrides(
            Some("CB1".to_owned()),
            None,
            Some("http://localhost:8080/api".to_owned()),
        );

        assert_eq!(settings.query(), CatalogQuery::new("CB1", "Lowestoft"));
        assert_eq!(settings.catalog.base_url, "http://localhost:8080/api");
    }
}
