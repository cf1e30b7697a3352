//! Read a project `.env` into a key-value map. Applying it is left to the caller.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// `.env` in `override_dir`, else in the current directory, if it is a file.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Parsed `.env`. Missing file returns an empty map; a malformed line is an error.
pub fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, LoadError> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let to_err = |e: ::dotenv::Error| LoadError::Dotenv {
        path: path.clone(),
        message: e.to_string(),
    };
    let mut out = HashMap::new();
    for item in ::dotenv::from_path_iter(&path).map_err(to_err)? {
        let (key, value) = item.map_err(to_err)?;
        out.insert(key, value);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Result<HashMap<String, String>, LoadError> {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), content).unwrap();
        load_env_map(Some(dir.path()))
    }

    #[test]
    fn missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn reads_pairs_and_skips_comments() {
        let m = load("# keys\nOPENAI_API_KEY=sk-1\n\nHARPER_ADDR=127.0.0.1:9000\n").unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("OPENAI_API_KEY").map(String::as_str), Some("sk-1"));
        assert_eq!(m.get("HARPER_ADDR").map(String::as_str), Some("127.0.0.1:9000"));
    }

    #[test]
    fn quoted_values() {
        let m = load("A=\"hello world\"\nB='single quoted'\n").unwrap();
        assert_eq!(m.get("A").map(String::as_str), Some("hello world"));
        assert_eq!(m.get("B").map(String::as_str), Some("single quoted"));
    }

    #[test]
    fn empty_value() {
        let m = load("KEY=\nOTHER=val\n").unwrap();
        assert_eq!(m.get("KEY").map(String::as_str), Some(""));
        assert_eq!(m.get("OTHER").map(String::as_str), Some("val"));
    }

    #[test]
    fn malformed_line_is_error() {
        assert!(matches!(load("NOT A PAIR\n"), Err(LoadError::Dotenv { .. })));
    }
}
