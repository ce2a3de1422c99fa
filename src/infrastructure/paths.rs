//! Filesystem locations for skatemap state.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SKATEMAP_DATA_DIR";

/// Returns the directory holding trace output.
///
/// Resolution order:
/// 1. `$SKATEMAP_DATA_DIR`
/// 2. `$XDG_DATA_HOME/skatemap`
/// 3. `$HOME/.local/share/skatemap`
/// 4. `skatemap` under the system temp directory
#[must_use]
pub fn data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_data_dir(explicit: Option<PathBuf>, xdg: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return dir;
    }
    if let Some(xdg) = xdg.filter(|p| p.is_absolute()) {
        return xdg.join("skatemap");
    }
    home.map_or_else(
        || std::env::temp_dir().join("skatemap"),
        |home| home.join(".local").join("share").join("skatemap"),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use skatemap::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/etc/skatemap.toml"), std::path::PathBuf::from("/etc/skatemap.toml"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let dir = resolve_data_dir(
            Some(PathBuf::from("/srv/skatemap")),
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/rider")),
        );
        assert_eq!(dir, PathBuf::from("/srv/skatemap"));
    }

    #[test]
    fn falls_back_to_home_share() {
        let dir = resolve_data_dir(None, None, Some(PathBuf::from("/home/rider")));
        assert_eq!(dir, PathBuf::from("/home/rider/.local/share/skatemap"));
    }

    #[test]
    fn relative_xdg_is_ignored() {
        let dir = resolve_data_dir(None, Some(PathBuf::from("relative")), Some(PathBuf::from("/home/rider")));
        assert_eq!(dir, PathBuf::from("/home/rider/.local/share/skatemap"));
    }
}
