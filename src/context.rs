use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Overrides the application directory.
pub const HOME_ENV: &str = "JOLTIC_HOME";
/// Overrides the ssh program that gets launched.
pub const SSH_ENV: &str = "JOLTIC_SSH";

const DIR_NAME: &str = ".joltic";
const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "connect.log";

/// Where joltic keeps its config and log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    dir: PathBuf,
}

impl AppContext {
    /// Resolve the app directory from the process environment.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| Error::config(format!("could not determine current directory: {e}")))?;
        Self::locate(get_env_path(HOME_ENV), dirs::home_dir(), &cwd)
    }

    /// Directory precedence:
    /// 1) explicit override (created if missing)
    /// 2) ~/.joltic if writable
    /// 3) ./.joltic if writable
    pub fn locate(override_dir: Option<PathBuf>, home: Option<PathBuf>, cwd: &Path) -> Result<Self> {
        if let Some(dir) = override_dir {
            let dir = expand_tilde(&dir);
            fs::create_dir_all(&dir).map_err(|e| {
                Error::config(format!(
                    "{HOME_ENV} points at {} which cannot be created: {e}",
                    dir.display()
                ))
            })?;
            return Ok(Self { dir });
        }

        if let Some(home) = home {
            let dir = home.join(DIR_NAME);
            if ensure_writable_dir(&dir) {
                return Ok(Self { dir });
            }
            debug!("{} is not writable, trying the current directory", dir.display());
        }

        let dir = cwd.join(DIR_NAME);
        if ensure_writable_dir(&dir) {
            return Ok(Self { dir });
        }

        Err(Error::config(
            "Unable to determine a writable configuration directory",
        ))
    }

    /// Use `dir` as-is, without probing it.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }
}

/// The log location used when the app directory is unusable.
pub fn fallback_log_file(cwd: &Path) -> PathBuf {
    cwd.join(DIR_NAME).join(LOG_FILE)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Create `path` and check that a file can be created inside it.
pub fn ensure_writable_dir(path: &Path) -> bool {
    if fs::create_dir_all(path).is_err() {
        return false;
    }
    tempfile::NamedTempFile::new_in(path).is_ok()
}

fn get_env_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}
