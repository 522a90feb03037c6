//! Config file location.
//!
//! Lookup order: `--dir`, `CINEADMIN_CONFIG_DIR`, `$XDG_CONFIG_HOME/cineadmin`,
//! then `$HOME/.config/cineadmin`. Blank variables count as unset.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "CINEADMIN_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "cineadmin";

/// Environment values consulted when no `--dir` is given.
#[derive(Debug, Default)]
pub struct ConfigEnv {
    /// `CINEADMIN_CONFIG_DIR`.
    pub config_dir: Option<OsString>,
    /// `XDG_CONFIG_HOME`.
    pub xdg_config_home: Option<OsString>,
    /// `HOME`.
    pub home: Option<OsString>,
}

impl ConfigEnv {
    /// Reads the relevant variables from the process environment.
    fn from_process() -> Self {
        Self {
            config_dir: std::env::var_os(CONFIG_DIR_ENV),
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME"),
            home: std::env::var_os("HOME"),
        }
    }
}

fn present(value: Option<&OsString>) -> Option<&Path> {
    value.filter(|v| !v.is_empty()).map(Path::new)
}

/// Picks the config file path from the `--dir` flag and `env`.
///
/// # Errors
///
/// Returns an error if neither the flag nor any variable names a directory.
pub fn pick_config_path(dir: Option<&Path>, env: &ConfigEnv) -> Result<PathBuf> {
    if let Some(dir) = dir.or_else(|| present(env.config_dir.as_ref())) {
        return Ok(dir.join(CONFIG_FILE));
    }
    if let Some(xdg) = present(env.xdg_config_home.as_ref()) {
        return Ok(xdg.join(APP_DIR).join(CONFIG_FILE));
    }
    let Some(home) = present(env.home.as_ref()) else {
        bail!("cannot locate the config file: pass --dir, set {CONFIG_DIR_ENV}, or set HOME");
    };
    Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE))
}

/// Resolves the config file path against the process environment.
///
/// # Errors
///
/// Returns an error if no directory can be determined.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    pick_config_path(dir.map(PathBuf::as_path), &ConfigEnv::from_process())
}
