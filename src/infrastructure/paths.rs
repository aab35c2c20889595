//! Path resolution inside the Zellij plugin sandbox.

use crate::domain::Result;
use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// Returns the directory zsplash writes its trace file to.
///
/// `/host` is the cwd of the last focused terminal (usually the home
/// directory), so this normally lands in `~/.local/share/zellij/zsplash`.
///
/// # Examples
///
/// ```
/// use zsplash::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/zsplash"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/zsplash")
}

/// Creates the data directory if needed and returns it.
///
/// # Errors
///
/// Returns [`ZsplashError::Io`](crate::ZsplashError::Io) when the directory
/// cannot be created, typically because the plugin lacks host filesystem
/// access.
pub fn ensure_data_dir() -> Result<PathBuf> {
    create_dir(get_data_dir())
}

fn create_dir(dir: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Rewrites a leading `~` to the sandbox host mount.
///
/// Used for user supplied paths such as `theme_file`.
///
/// # Examples
///
/// ```
/// use zsplash::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/zsplash.toml"), "/etc/zsplash.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
