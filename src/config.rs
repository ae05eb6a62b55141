//! Where the goal list lives and where exports go.
//!
//! Store path precedence: `--store` / `GOALPLAN_STORE` > `.goalplan/goals.json`
//! under the nearest ancestor holding `.goalplan/` or `.git/` > the current
//! directory. An optional `config.json` beside the store may set `exportDir`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const PLAN_DIR: &str = ".goalplan";
pub const STORE_FILE: &str = "goals.json";
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the store path.
pub const STORE_ENV: &str = "GOALPLAN_STORE";
/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GOALPLAN_LOG";

/// Settings read from `config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub export_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Read `path`, falling back to defaults if it is missing or malformed.
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerConfig {
    pub store_path: PathBuf,
    pub export_dir: PathBuf,
}

impl PlannerConfig {
    /// Resolve paths for a run started in `cwd`.
    pub fn resolve(store_override: Option<PathBuf>, cwd: &Path) -> Self {
        let store_path = store_override
            .unwrap_or_else(|| find_project_root(cwd).join(PLAN_DIR).join(STORE_FILE));

        let config_path = store_path
            .parent()
            .map(|dir| dir.join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        let file = FileConfig::load(&config_path);

        let export_dir = match file.export_dir {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };

        Self {
            store_path,
            export_dir,
        }
    }

    /// Resolve from the process's current directory.
    pub fn from_env(store_override: Option<PathBuf>) -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve(store_override, &cwd)
    }
}

/// Nearest ancestor of `start` containing `.goalplan/` or `.git/`, else `start`.
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = start;
    loop {
        if current.join(PLAN_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return start.to_path_buf(),
        }
    }
}
