//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Directory holding the plugin's trace files.
///
/// `/host` is the cwd of the last focused terminal (usually `$HOME`), so this
/// normally resolves to `~/.local/share/zellij/rentaldesk`.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("rentaldesk")
}

/// Maps a `~`-relative path from the plugin configuration into the sandbox.
///
/// # Examples
///
/// ```
/// use rentaldesk::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/desk.toml"), "/host/themes/desk.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/desk.toml"), "/etc/desk.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host() {
        assert_eq!(data_dir(), PathBuf::from("/host/.local/share/zellij/rentaldesk"));
    }

    #[test]
    fn only_leading_home_tilde_expands() {
        assert_eq!(expand_tilde("~desk/theme.toml"), "~desk/theme.toml");
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
    }
}
