use crate::repo::walk_ancestors;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the per-directory ignore file
pub const IGNORE_FILE: &str = ".gitignore";

/// Combined ignore patterns from every `.gitignore` between the invocation
/// directory and the effective root.
///
/// Paths are matched relative to the invocation directory.
pub struct IgnoreRules {
    gitignore: Gitignore,
}

impl IgnoreRules {
    /// Rules that match nothing
    pub fn empty() -> Self {
        Self {
            gitignore: Gitignore::empty(),
        }
    }

    /// Read `.gitignore` files from `cwd` up to and including `root`.
    ///
    /// Files closer to `cwd` are added first. Missing or unreadable files are
    /// skipped, as are individual patterns that fail to parse.
    pub fn load(cwd: &Path, root: &Path) -> Self {
        let mut builder = GitignoreBuilder::new(cwd);

        walk_ancestors(cwd, |dir| {
            let path = dir.join(IGNORE_FILE);
            match fs::read_to_string(&path) {
                Ok(contents) => {
                    debug!(path = %path.display(), "loading ignore file");
                    for line in contents.lines() {
                        if let Err(e) = builder.add_line(None, line) {
                            warn!("Invalid ignore pattern '{}' in {}: {}", line, path.display(), e);
                        }
                    }
                }
                Err(e) => debug!(path = %path.display(), error = %e, "no ignore file"),
            }
            dir == root
        });

        Self::from_builder(&builder)
    }

    /// Build rules from literal pattern lines, as if read from one file in `cwd`
    pub fn from_patterns<I, S>(cwd: &Path, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GitignoreBuilder::new(cwd);
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if let Err(e) = builder.add_line(None, pattern) {
                warn!("Invalid ignore pattern '{}': {}", pattern, e);
            }
        }
        Self::from_builder(&builder)
    }

    fn from_builder(builder: &GitignoreBuilder) -> Self {
        let gitignore = builder.build().unwrap_or_else(|e| {
            warn!("Failed to compile ignore rules: {}", e);
            Gitignore::empty()
        });
        debug!(patterns = gitignore.num_ignores(), "ignore rules ready");
        Self { gitignore }
    }

    /// Check a path relative to the invocation directory.
    ///
    /// A path is ignored when it or any of its parent directories matches,
    /// so `build/` excludes everything under `build` at any depth.
    pub fn is_ignored(&self, relative: &Path, is_dir: bool) -> bool {
        if relative.as_os_str().is_empty() || relative.has_root() {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(relative, is_dir)
            .is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_rules_match_nothing() {
        let rules = IgnoreRules::empty();
        assert!(!rules.is_ignored(Path::new("anything.txt"), false));
        assert!(!rules.is_ignored(Path::new("target"), true));
    }

    #[test]
    fn test_directory_pattern_covers_descendants() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::from_patterns(dir.path(), ["build/"]);

        assert!(rules.is_ignored(Path::new("build"), true));
        assert!(rules.is_ignored(Path::new("build/out/app.js"), false));
        assert!(rules.is_ignored(Path::new("pkg/build"), true));
        assert!(!rules.is_ignored(Path::new("build"), false));
        assert!(!rules.is_ignored(Path::new("src/build.rs"), false));
    }

    #[test]
    fn test_negation_pattern() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::from_patterns(dir.path(), ["*.log", "!keep.log"]);

        assert!(rules.is_ignored(Path::new("debug.log"), false));
        assert!(!rules.is_ignored(Path::new("keep.log"), false));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::from_patterns(dir.path(), ["# secrets", "", "secret.txt"]);

        assert!(rules.is_ignored(Path::new("secret.txt"), false));
        assert!(!rules.is_ignored(Path::new("# secrets"), false));
    }

    #[test]
    fn test_load_combines_files_up_to_root() {
        let root = TempDir::new().unwrap();
        let cwd = root.path().join("app");
        fs::create_dir(&cwd).unwrap();
        fs::write(root.path().join(IGNORE_FILE), "*.tmp\n").unwrap();
        fs::write(cwd.join(IGNORE_FILE), "dist/\n").unwrap();

        let rules = IgnoreRules::load(&cwd, root.path());

        assert!(rules.is_ignored(Path::new("scratch.tmp"), false));
        assert!(rules.is_ignored(Path::new("dist/index.js"), false));
        assert!(!rules.is_ignored(Path::new("src/main.rs"), false));
    }

    #[test]
    fn test_load_stops_at_root() {
        let outer = TempDir::new().unwrap();
        let root = outer.path().join("repo");
        fs::create_dir(&root).unwrap();
        fs::write(outer.path().join(IGNORE_FILE), "*.rs\n").unwrap();

        let rules = IgnoreRules::load(&root, &root);

        assert!(!rules.is_ignored(Path::new("main.rs"), false));
    }

    #[test]
    fn test_load_without_ignore_files() {
        let dir = TempDir::new().unwrap();
        let rules = IgnoreRules::load(dir.path(), dir.path());
        assert!(!rules.is_ignored(Path::new("a.txt"), false));
    }

    #[test]
    fn test_ignore_file_can_ignore_itself() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), ".gitignore\n").unwrap();

        let rules = IgnoreRules::load(dir.path(), dir.path());

        assert!(rules.is_ignored(Path::new(IGNORE_FILE), false));
    }
}
