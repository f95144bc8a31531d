use crate::core::error::Result;
use git2::Repository;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILENAME: &str = ".starlist.yml";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::home_dir().unwrap_or_default().join(".config")),
        "macos" => dirs::home_dir()
            .unwrap_or_default()
            .join("Library/Application Support"),
        _ => dirs::config_dir().unwrap_or_default(),
    };

    Ok(base.join("starlist"))
}

/// User-level config file, used when the root has no `.starlist.yml`.
pub fn get_user_config_file() -> Result<PathBuf> {
    Ok(get_config_directory()?.join("config.yml"))
}

/// Working tree of the git repository containing `start`, or `start` itself.
pub fn resolve_root(start: &Path) -> PathBuf {
    match Repository::discover(start) {
        Ok(repo) => match repo.workdir() {
            Some(workdir) => workdir.to_path_buf(),
            None => {
                log::debug!("Repository at {} is bare, using {}", repo.path().display(), start.display());
                start.to_path_buf()
            }
        },
        Err(e) => {
            log::debug!("No git repository above {} ({e}), using it as root", start.display());
            start.to_path_buf()
        }
    }
}
