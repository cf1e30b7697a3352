//! Load the `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::LoadError;

/// `XDG_CONFIG_HOME` when set and non-empty, else the platform config dir.
fn config_home() -> Result<PathBuf, LoadError> {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => dirs::config_dir()
            .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".into())),
    }
}

fn xdg_config_path(app_name: &str) -> Result<Option<PathBuf>, LoadError> {
    let path = config_home()?.join(app_name).join("config.toml");
    Ok(path.is_file().then_some(path))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Returns env key-value pairs from `[env]`. Missing file or section returns an empty map.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = xdg_config_path(app_name)? else {
        return Ok(HashMap::new());
    };
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::with_xdg_home;

    fn app_with_config(app: &str, body: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();
        dir
    }

    #[test]
    fn missing_config_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = with_xdg_home(dir.path(), || load_env_map("harper")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn reads_env_table() {
        let dir = app_with_config(
            "harper",
            "[env]\nOPENAI_API_KEY = \"sk-toml\"\nHARPER_MAX_ITERATIONS_CAP = \"10\"\n",
        );
        let map = with_xdg_home(dir.path(), || load_env_map("harper")).unwrap();
        assert_eq!(map.get("OPENAI_API_KEY").map(String::as_str), Some("sk-toml"));
        assert_eq!(map.get("HARPER_MAX_ITERATIONS_CAP").map(String::as_str), Some("10"));
    }

    #[test]
    fn config_without_env_section_returns_empty_map() {
        let dir = app_with_config("harper", "[other]\nkey = \"ignored\"\n");
        let map = with_xdg_home(dir.path(), || load_env_map("harper")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn invalid_toml_returns_xdg_parse_error() {
        let dir = app_with_config("harper", "not valid toml [[[\n");
        let result = with_xdg_home(dir.path(), || load_env_map("harper"));
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }
}
