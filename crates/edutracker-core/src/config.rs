//! edutracker configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::MemoryStore;

/// Top-level edutracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdutrackerConfig {
    /// Where the signed-in identity is kept between invocations.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
    /// Default output directory for exported reports.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    /// JSON dataset to load instead of the built-in classroom.
    #[serde(default)]
    pub fixture: Option<PathBuf>,
}

fn default_session_file() -> PathBuf {
    PathBuf::from("./.edutracker-session.json")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("./edutracker-reports")
}

impl Default for EdutrackerConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
            report_dir: default_report_dir(),
            fixture: None,
        }
    }
}

impl EdutrackerConfig {
    /// Build the entity store this configuration points at.
    pub fn open_store(&self) -> Result<MemoryStore> {
        match &self.fixture {
            Some(path) => MemoryStore::load_fixture(path),
            None => Ok(MemoryStore::seeded()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `edutracker.toml` in the current directory
/// 2. `~/.config/edutracker/config.toml`
///
/// Environment variable override: `EDUTRACKER_SESSION_FILE`.
pub fn load_config() -> Result<EdutrackerConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EdutrackerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("edutracker.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => EdutrackerConfig::default(),
    };

    if let Ok(session_file) = std::env::var("EDUTRACKER_SESSION_FILE") {
        config.session_file = PathBuf::from(session_file);
    }

    Ok(config)
}

/// Parse a TOML config string and expand `${VAR}` references in its paths.
pub fn parse_config(content: &str) -> Result<EdutrackerConfig> {
    let mut config: EdutrackerConfig = toml::from_str(content)?;
    config.session_file = resolve_path(&config.session_file);
    config.report_dir = resolve_path(&config.report_dir);
    config.fixture = config.fixture.as_deref().map(resolve_path);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("edutracker"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EDUTRACKER_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_EDUTRACKER_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_EDUTRACKER_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        std::env::remove_var("_EDUTRACKER_TEST_VAR");
    }

    #[test]
    fn unterminated_reference_is_left_alone() {
        assert_eq!(resolve_env_vars("${OPEN"), "${OPEN");
    }

    #[test]
    fn default_config() {
        let config = EdutrackerConfig::default();
        assert_eq!(config.session_file, PathBuf::from("./.edutracker-session.json"));
        assert_eq!(config.report_dir, PathBuf::from("./edutracker-reports"));
        assert!(config.fixture.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config(
            r#"
report_dir = "out"
fixture = "class.json"
"#,
        )
        .unwrap();
        assert_eq!(config.report_dir, PathBuf::from("out"));
        assert_eq!(config.fixture, Some(PathBuf::from("class.json")));
        assert_eq!(config.session_file, default_session_file());
    }

    #[test]
    fn parse_expands_env_vars_in_paths() {
        std::env::set_var("_EDUTRACKER_TEST_DIR", "/tmp/grades");
        let config = parse_config(r#"report_dir = "${_EDUTRACKER_TEST_DIR}/reports""#).unwrap();
        assert_eq!(config.report_dir, PathBuf::from("/tmp/grades/reports"));
        std::env::remove_var("_EDUTRACKER_TEST_DIR");
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn default_store_is_seeded() {
        let store = EdutrackerConfig::default().open_store().unwrap();
        assert_eq!(crate::store::EntityStore::list_results(&store).len(), 50);
    }
}
