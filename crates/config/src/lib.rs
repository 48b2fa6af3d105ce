//! Layered configuration.
//!
//! [`Settings`] are built from, in increasing order of precedence:
//!
//! 1. Built-in defaults.
//! 2. A configuration file. TOML, YAML or JSON, picked by file extension.
//!    Without an explicit path, `config.toml` in the platform configuration
//!    directory is used if it exists.
//! 3. Environment variables prefixed with `SIFT_`, with `__` separating
//!    nested keys (`SIFT_SCAN__CACHING=false`).
//!
//! ```toml
//! [scan]
//! roots = ["/home/me/receipts", "/mnt/archive/receipts"]
//! recursive = true
//! caching = true
//! extensions = ["pdf"]
//! concurrency = 4
//!
//! [search]
//! case_insensitive = true
//! wildcard = false
//! ```

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use sift_query::SearchQuery;
use sift_search::ScanConfiguration;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const ENV_PREFIX: &str = "SIFT_";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Everything the `sift` command can be configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scan: ScanConfiguration,
    pub search: SearchDefaults,
}

/// How search text is interpreted when the command line doesn't say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub case_insensitive: bool,
    pub wildcard: bool,
}
impl SearchDefaults {
    pub fn query(&self, text: impl Into<String>) -> SearchQuery {
        SearchQuery {
            text: text.into(),
            case_insensitive: self.case_insensitive,
            wildcard: self.wildcard,
        }
    }
}

/// `config.toml` inside the platform's configuration directory for sift, if
/// the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "sift").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl Settings {
    /// Loads settings from defaults, a configuration file and the environment.
    ///
    /// # Errors
    /// - [`ErrorKind::NotFound`] if `path` is given but doesn't exist. A
    ///   missing default configuration file is not an error.
    /// - [`ErrorKind::UnsupportedFormat`] for unknown file extensions.
    /// - [`ErrorKind::Invalid`] if any layer holds a value of the wrong type,
    ///   or a concurrency of zero.
    #[instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)?.extract().or_raise(|| ErrorKind::Invalid)
    }

    /// The layered [`Figment`] behind [`load`](Self::load), for callers that
    /// want to merge in more providers of their own.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        let file = match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|path| path.is_file()),
        };
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "Reading configuration file");
            figment = match file.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
                Some("toml") => figment.merge(Toml::file_exact(&file)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(&file)),
                Some("json") => figment.merge(Json::file_exact(&file)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(file)),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    // Every test runs inside a Jail: it serializes access to the process
    // environment and gives each test its own working directory.

    #[test]
    fn test_defaults_without_a_file() {
        Jail::expect_with(|_jail| {
            let settings: Settings = Settings::figment(None).unwrap().extract().unwrap();
            assert_eq!(settings.scan, ScanConfiguration::default());
            assert_eq!(settings.search, SearchDefaults::default());
            Ok(())
        });
    }

    #[rstest]
    #[case(
        "sift.toml",
        "[scan]\nroots = [\"/receipts\"]\ncaching = false\nconcurrency = 4\n[search]\nwildcard = true\n"
    )]
    #[case(
        "sift.YAML",
        "scan:\n  roots: [/receipts]\n  caching: false\n  concurrency: 4\nsearch:\n  wildcard: true\n"
    )]
    #[case(
        "sift.json",
        r#"{"scan": {"roots": ["/receipts"], "caching": false, "concurrency": 4}, "search": {"wildcard": true}}"#
    )]
    fn test_file_formats(#[case] name: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(name, contents)?;
            let settings = Settings::load(Some(Path::new(name))).unwrap();
            assert_eq!(settings.scan.roots, vec![PathBuf::from("/receipts")]);
            assert!(!settings.scan.caching);
            assert_eq!(settings.scan.concurrency.get(), 4);
            // Unset keys keep their defaults.
            assert!(settings.scan.recursive);
            assert_eq!(settings.scan.extensions, vec!["pdf"]);
            assert!(settings.search.wildcard);
            assert!(!settings.search.case_insensitive);
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("sift.toml", "[scan]\nroots = [\"/receipts\"]\nrecursive = true\n")?;
            jail.set_env("SIFT_SCAN__RECURSIVE", "false");
            jail.set_env("SIFT_SEARCH__CASE_INSENSITIVE", "true");
            let settings = Settings::load(Some(Path::new("sift.toml"))).unwrap();
            assert_eq!(settings.scan.roots, vec![PathBuf::from("/receipts")]);
            assert!(!settings.scan.recursive);
            assert!(settings.search.case_insensitive);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|_jail| {
            let err = Settings::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::NotFound(PathBuf::from("missing.toml")));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_format() {
        Jail::expect_with(|jail| {
            jail.create_file("sift.ini", "[scan]\n")?;
            let err = Settings::load(Some(Path::new("sift.ini"))).unwrap_err();
            assert_eq!(*err, ErrorKind::UnsupportedFormat(PathBuf::from("sift.ini")));
            Ok(())
        });
    }

    #[rstest]
    #[case::zero_concurrency("[scan]\nconcurrency = 0\n")]
    #[case::wrong_type("[scan]\ncaching = \"sometimes\"\n")]
    fn test_invalid_values(#[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file("sift.toml", contents)?;
            let err = Settings::load(Some(Path::new("sift.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::Invalid);
            Ok(())
        });
    }

    #[test]
    fn test_search_defaults_build_queries() {
        let defaults = SearchDefaults {
            case_insensitive: true,
            wildcard: true,
        };
        assert_eq!(defaults.query("*.99"), SearchQuery::wildcard("*.99").case_insensitive(true));
        assert_eq!(SearchDefaults::default().query("MILK"), SearchQuery::literal("MILK"));
    }
}
