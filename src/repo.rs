//! Repository detection by walking parent directories.

use std::path::{Path, PathBuf};
use tracing::trace;

/// Name of the directory marking a git repository
pub const REPO_MARKER: &str = ".git";

/// Visits `start` and each of its parents in turn, stopping at the first
/// directory for which `visit` returns true.
///
/// Returns the directory where the walk stopped, or `None` if the filesystem
/// root was passed without `visit` asking to stop.
pub fn walk_ancestors<F>(start: &Path, mut visit: F) -> Option<PathBuf>
where
    F: FnMut(&Path) -> bool,
{
    start
        .ancestors()
        .find(|&dir| visit(dir))
        .map(Path::to_path_buf)
}

/// Find the nearest directory at or above `start` that contains a `.git`
/// directory.
///
/// Stat failures (for example permission errors) count as "marker absent".
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    walk_ancestors(start, |dir| {
        let found = dir.join(REPO_MARKER).is_dir();
        trace!(dir = %dir.display(), found, "checked for repository marker");
        found
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_marker_in_start_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert_eq!(find_repo_root(dir.path()), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_finds_marker_in_ancestor() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_repo_root(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_nearest_marker_wins() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let inner = dir.path().join("vendor").join("dep");
        fs::create_dir_all(inner.join(".git")).unwrap();

        assert_eq!(find_repo_root(&inner), Some(inner.clone()));
    }

    #[test]
    fn test_marker_file_is_not_a_repository() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".git"), "gitdir: elsewhere").unwrap();

        let found = find_repo_root(dir.path());
        assert_ne!(found, Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_walk_ancestors_visits_in_order() {
        let mut seen = Vec::new();
        let stop = walk_ancestors(Path::new("/a/b/c"), |dir| {
            seen.push(dir.to_path_buf());
            dir == Path::new("/a")
        });

        assert_eq!(stop, Some(PathBuf::from("/a")));
        assert_eq!(
            seen,
            vec![
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
                PathBuf::from("/a"),
            ]
        );
    }

    #[test]
    fn test_walk_ancestors_exhausts_to_root() {
        let mut visited = 0;
        let stop = walk_ancestors(Path::new("/x/y"), |_| {
            visited += 1;
            false
        });

        assert_eq!(stop, None);
        assert_eq!(visited, 3);
    }
}
