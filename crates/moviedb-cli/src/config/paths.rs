//! Config file location.

use std::path::PathBuf;

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory name under the XDG config root.
const APP_DIR: &str = "moviedb";

/// Resolves the config file path from the process environment.
///
/// See [`resolve_config_path_with`].
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    resolve_config_path_with(dir, |name| std::env::var(name).ok())
}

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set, returns `$XDG_CONFIG_HOME/moviedb/config.toml`.
/// - Otherwise returns `~/.config/moviedb/config.toml`.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path_with(
    dir: Option<&PathBuf>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    let root = match (lookup("XDG_CONFIG_HOME"), lookup("HOME")) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".config"),
        _ => bail!("neither XDG_CONFIG_HOME nor HOME environment variable is set"),
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/moviedb-project");

        // Act
        let path = resolve_config_path_with(Some(&dir), |_| None).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/moviedb-project/config.toml"));
    }

    #[test]
    fn test_resolve_prefers_xdg_config_home() {
        // Arrange & Act
        let path = resolve_config_path_with(None, |name| match name {
            "XDG_CONFIG_HOME" => Some(String::from("/xdg")),
            "HOME" => Some(String::from("/home/user")),
            _ => None,
        })
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/moviedb/config.toml"));
    }

    #[test]
    fn test_resolve_falls_back_to_home() {
        // Arrange & Act
        let path = resolve_config_path_with(None, |name| {
            (name == "HOME").then(|| String::from("/home/user"))
        })
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/user/.config/moviedb/config.toml"));
    }

    #[test]
    fn test_resolve_without_home_fails() {
        // Arrange & Act
        let result = resolve_config_path_with(None, |_| None);

        // Assert
        assert!(result.is_err());
    }
}
