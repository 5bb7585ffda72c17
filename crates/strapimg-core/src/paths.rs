//! Local resource paths

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the current user's home directory
///
/// Only `~` and `~/...` are expanded. If the home directory is unknown the
/// path is returned as given.
pub fn expand_home(path: &str) -> PathBuf {
    match dirs::home_dir() {
        Some(home) => expand_home_with(path, &home),
        None => PathBuf::from(path),
    }
}

/// Expand a leading `~` against an explicit home directory
pub fn expand_home_with(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Path of a resource blob: `{dir}/{id}.{ext}`, or `{dir}/{id}` without extension
pub fn resource_file(resources_dir: &Path, id: &str, file_extension: &str) -> PathBuf {
    if file_extension.is_empty() {
        resources_dir.join(id)
    } else {
        resources_dir.join(format!("{}.{}", id, file_extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_prefix() {
        let home = Path::new("/home/alex");
        assert_eq!(
            expand_home_with("~/.config/joplin-desktop/resources", home),
            PathBuf::from("/home/alex/.config/joplin-desktop/resources")
        );
        assert_eq!(expand_home_with("~", home), PathBuf::from("/home/alex"));
    }

    #[test]
    fn test_expand_home_leaves_other_paths() {
        let home = Path::new("/home/alex");
        assert_eq!(
            expand_home_with("/srv/joplin/resources", home),
            PathBuf::from("/srv/joplin/resources")
        );
        // Only a leading tilde is expanded
        assert_eq!(
            expand_home_with("/data/~/resources", home),
            PathBuf::from("/data/~/resources")
        );
        // ~user is not supported
        assert_eq!(expand_home_with("~bob/res", home), PathBuf::from("~bob/res"));
    }

    #[test]
    fn test_expand_home_uses_real_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home("~/res"), home.join("res"));
    }

    #[test]
    fn test_resource_file() {
        let dir = Path::new("/res");
        assert_eq!(
            resource_file(dir, "abc", "png"),
            PathBuf::from("/res/abc.png")
        );
        assert_eq!(resource_file(dir, "abc", ""), PathBuf::from("/res/abc"));
    }
}
