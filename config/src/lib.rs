//! Load configuration from XDG `config.toml` and project `.env`, then apply it to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! harper reads all of its settings (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`, `TAVILY_API_KEY`,
//! `HARPER_ADDR`, ...) from the environment, so this is the only place files are consulted.

mod dotenv;
mod xdg_toml;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env {path}: {message}")]
    Dotenv { path: PathBuf, message: String },
}

/// Where an applied variable came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSource {
    DotEnv,
    Xdg,
}

impl fmt::Display for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DotEnv => f.write_str(".env"),
            Self::Xdg => f.write_str("config.toml"),
        }
    }
}

/// Keys set by [`load_and_apply`], sorted by key. Values are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedEnv {
    pub applied: Vec<(String, EnvSource)>,
}

impl AppliedEnv {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.applied.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn source_of(&self, key: &str) -> Option<EnvSource> {
        self.applied
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, source)| *source)
    }
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set (so existing env has highest priority).
///
/// Order of precedence when a key is missing in the process environment:
/// 1. Value from project `.env` (current directory or `override_dir` if given)
/// 2. Value from `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]` table
///
/// * `app_name`: e.g. `"harper"`, used for the XDG path `~/.config/<app_name>/config.toml`.
/// * `override_dir`: if `Some`, look for `.env` in this directory instead of the current one.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<AppliedEnv, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir)?;

    let keys: BTreeSet<&String> = xdg_map.keys().chain(dotenv_map.keys()).collect();
    let mut report = AppliedEnv::default();
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        let chosen = match dotenv_map.get(key) {
            Some(v) => Some((v, EnvSource::DotEnv)),
            None => xdg_map.get(key).map(|v| (v, EnvSource::Xdg)),
        };
        if let Some((value, source)) = chosen {
            std::env::set_var(key, value);
            debug!(key = %key, source = %source, "applied config value");
            report.applied.push((key.clone(), source));
        }
    }
    Ok(report)
}

/// Serializes tests that touch process-wide variables. Hold it (via [`with_xdg_home`]) for
/// every environment read or write in a test.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn with_xdg_home<T>(dir: &Path, f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    let prev = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir);
    let out = f();
    match prev {
        Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn write_xdg(root: &Path, app: &str, body: &str) {
        let app_dir = root.join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn existing_env_wins() {
        let xdg = tempfile::tempdir().unwrap();
        write_xdg(xdg.path(), "harper", "[env]\nHARPER_CFG_EXISTING = \"from_xdg\"\n");
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(dotenv_dir.path().join(".env"), "HARPER_CFG_EXISTING=from_dotenv\n").unwrap();

        let (value, report) = with_xdg_home(xdg.path(), || {
            env::set_var("HARPER_CFG_EXISTING", "from_env");
            let report = load_and_apply("harper", Some(dotenv_dir.path()));
            let value = env::var("HARPER_CFG_EXISTING");
            env::remove_var("HARPER_CFG_EXISTING");
            (value, report)
        });
        let report = report.unwrap();
        assert_eq!(value.as_deref(), Ok("from_env"));
        assert_eq!(report.source_of("HARPER_CFG_EXISTING"), None);
    }

    #[test]
    fn no_config_is_ok_and_empty() {
        let xdg = tempfile::tempdir().unwrap();
        let empty = tempfile::tempdir().unwrap();
        let report = with_xdg_home(xdg.path(), || load_and_apply("harper", Some(empty.path())))
            .unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn dotenv_overrides_xdg() {
        let xdg = tempfile::tempdir().unwrap();
        write_xdg(
            xdg.path(),
            "harper",
            "[env]\nHARPER_CFG_PRIORITY = \"from_xdg\"\nHARPER_CFG_XDG_ONLY = \"xdg\"\n",
        );
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(dotenv_dir.path().join(".env"), "HARPER_CFG_PRIORITY=from_dotenv\n").unwrap();

        let (priority, xdg_only, report) = with_xdg_home(xdg.path(), || {
            env::remove_var("HARPER_CFG_PRIORITY");
            env::remove_var("HARPER_CFG_XDG_ONLY");
            let report = load_and_apply("harper", Some(dotenv_dir.path()));
            let priority = env::var("HARPER_CFG_PRIORITY");
            let xdg_only = env::var("HARPER_CFG_XDG_ONLY");
            env::remove_var("HARPER_CFG_PRIORITY");
            env::remove_var("HARPER_CFG_XDG_ONLY");
            (priority, xdg_only, report)
        });
        let report = report.unwrap();

        assert_eq!(priority.as_deref(), Ok("from_dotenv"));
        assert_eq!(xdg_only.as_deref(), Ok("xdg"));
        assert_eq!(report.keys(), vec!["HARPER_CFG_PRIORITY", "HARPER_CFG_XDG_ONLY"]);
        assert_eq!(report.source_of("HARPER_CFG_PRIORITY"), Some(EnvSource::DotEnv));
        assert_eq!(report.source_of("HARPER_CFG_XDG_ONLY"), Some(EnvSource::Xdg));
    }

    #[test]
    fn invalid_xdg_toml_fails_with_xdg_parse_error() {
        let xdg = tempfile::tempdir().unwrap();
        write_xdg(xdg.path(), "harper", "invalid [[[\n");
        let empty = tempfile::tempdir().unwrap();
        let result = with_xdg_home(xdg.path(), || load_and_apply("harper", Some(empty.path())));
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }
}
