use crate::{
    catalog::{builtin, Catalog},
    error::{Error, Result},
};
use log::{debug, LevelFilter};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fs, io, path::Path, path::PathBuf};

/// Default configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "chime.toml";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Catalog document to use instead of the shipped one.
    pub catalog: Option<PathBuf>,
    pub log_level: String,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog: None,
            log_level: "warn".to_string(),
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    pub fn from_toml_str(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&data)
    }

    /// Like [`Config::from_path`], but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    /// Parsed log level. Unknown names are rejected like any other bad value.
    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level.parse().map_err(|_| Error::InvalidValue {
            value: self.log_level.clone(),
            expected: "log level",
        })
    }

    /// The configured catalog, or the shipped one.
    pub fn catalog(&self) -> Result<Cow<'static, Catalog>> {
        match &self.catalog {
            Some(path) => Ok(Cow::Owned(Catalog::from_path(path)?)),
            None => Ok(Cow::Borrowed(builtin())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let cfg = Config::from_toml_str("format = \"json\"").unwrap();
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.log_level, "warn");
        assert!(cfg.catalog.is_none());
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn roundtrip() {
        let cfg = Config {
            catalog: Some(PathBuf::from("data/parameters.json")),
            log_level: "debug".into(),
            format: OutputFormat::Json,
        };
        let data = toml::to_string(&cfg).unwrap();
        assert_eq!(Config::from_toml_str(&data).unwrap(), cfg);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(Config::from_toml_str("format = \"xml\""), Err(Error::Toml(_))));
        assert!(Config::from_toml_str("log_level = ").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load_or_default("does/not/exist/chime.toml").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(matches!(
            Config::from_path("does/not/exist/chime.toml"),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn misspelled_log_level_is_an_error() {
        let cfg = Config::from_toml_str("log_level = \"debgu\"").unwrap();
        match cfg.level_filter() {
            Err(Error::InvalidValue { value, expected }) => {
                assert_eq!(value, "debgu");
                assert_eq!(expected, "log level");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn level_and_catalog() {
        let mut cfg = Config::default();
        assert_eq!(cfg.level_filter().unwrap(), LevelFilter::Warn);
        cfg.log_level = "debug".into();
        assert_eq!(cfg.level_filter().unwrap(), LevelFilter::Debug);

        assert_eq!(cfg.catalog().unwrap().len(), builtin().len());
        cfg.catalog = Some(concat!(env!("CARGO_MANIFEST_DIR"), "/data/parameters.json").into());
        assert_eq!(&*cfg.catalog().unwrap(), builtin());
    }
}
