use std::{env, io, path::PathBuf};

use anyhow::{anyhow, Result};

const APPLICATION_NAME: &str = "daycoach";

/// Directory for logs. `$XDG_STATE_HOME/daycoach` or `$HOME/.local/state/daycoach`, created if
/// missing.
pub fn create_application_default_path() -> Result<PathBuf> {
    let path = xdg_dir("XDG_STATE_HOME", ".local/state")?;

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

/// Default location of the configuration file. The file itself is optional.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(xdg_dir("XDG_CONFIG_HOME", ".config")?.join("config.toml"))
}

fn xdg_dir(variable: &str, home_fallback: &str) -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let _ = (variable, home_fallback);
        let mut path = PathBuf::from(
            env::var("APPDATA").map_err(|_| anyhow!("APPDATA should be present on Windows"))?,
        );
        path.push(APPLICATION_NAME);
        Ok(path)
    }
    #[cfg(not(windows))]
    {
        let mut path = env::var(variable)
            .map(PathBuf::from)
            .or_else(|_| {
                env::var("HOME").map(|home| {
                    let mut path = PathBuf::from(home);
                    path.push(home_fallback);
                    path
                })
            })
            .map_err(|_| anyhow!("Couldn't find neither {variable} nor HOME"))?;
        path.push(APPLICATION_NAME);
        Ok(path)
    }
}

/// Expands a leading `~/` using `$HOME`. Other paths are returned untouched.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), env::var("HOME")) {
        (Some(rest), Ok(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
