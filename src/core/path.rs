use std::path::{Path, PathBuf};

pub fn resolve_path(base_dir: &Path, configured: &str) -> PathBuf {
    let path = PathBuf::from(configured);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(configured: &str) -> String {
    let home = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());
    match (configured.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            format!("{}{}", home.display(), rest)
        }
        _ => configured.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_base() {
        let base = Path::new("/work");
        assert_eq!(resolve_path(base, "tmp"), PathBuf::from("/work/tmp"));
        assert_eq!(resolve_path(base, "/var/tmp"), PathBuf::from("/var/tmp"));
    }

    #[test]
    fn non_home_paths_are_untouched() {
        assert_eq!(expand_home("/tmp/ghosts"), "/tmp/ghosts");
        assert_eq!(expand_home("~user/x"), "~user/x");
    }
}
