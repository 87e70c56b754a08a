use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, trace, warn};
use path_clean::clean;
use std::{
    ffi::OsStr,
    fs,
    path::{Component, Path, PathBuf},
};

use crate::{
    constants::{DEFAULT_IGNORE_RULES, VCS_DIR},
    error::RewriteError,
};

/// Compiled exclusion rules, loaded once and shared read-only by the walker.
///
/// Patterns follow gitignore semantics and are anchored at `base`, the
/// directory that holds the rule source.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    base: PathBuf,
    matcher: Gitignore,
}

impl IgnoreRules {
    /// Load rules from an ignore file.
    ///
    /// An unreadable file is not an error: the default rules are used instead
    /// and a warning is logged.
    pub fn load(source: &Path) -> Self {
        let base = normalize_path(source.parent().unwrap_or(Path::new("")));
        debug!("Loading ignore rules from {} (base {})", source.display(), base.display());

        match fs::read_to_string(source) {
            Ok(text) => match compile(&base, Some(source), text.lines()) {
                Ok(matcher) => {
                    debug!("Loaded {} ignore rules", matcher.num_ignores() + matcher.num_whitelists());
                    Self { base, matcher }
                }
                Err(e) => {
                    warn!(
                        "Could not compile ignore rules from {}: {}, using defaults {:?}",
                        source.display(),
                        e,
                        DEFAULT_IGNORE_RULES
                    );
                    Self::defaults(&base)
                }
            },
            Err(e) => {
                let err = RewriteError::ConfigRead { path: source.to_path_buf(), source: e };
                warn!("{}, using default ignore rules {:?}", err, DEFAULT_IGNORE_RULES);
                Self::defaults(&base)
            }
        }
    }

    /// Rules parsed from gitignore-formatted text, anchored at `base`.
    pub fn from_text(base: &Path, text: &str) -> Self {
        let base = normalize_path(base);
        match compile(&base, None, text.lines()) {
            Ok(matcher) => Self { base, matcher },
            Err(e) => {
                warn!("Could not compile ignore rules: {}, using defaults", e);
                Self::defaults(&base)
            }
        }
    }

    /// The fallback rule set (`dist/`, `node_modules/`, `bin/`).
    pub fn defaults(base: &Path) -> Self {
        let base = normalize_path(base);
        let matcher = compile(&base, None, DEFAULT_IGNORE_RULES.iter().copied()).unwrap_or_else(|e| {
            warn!("Could not compile default ignore rules: {}", e);
            Gitignore::empty()
        });
        Self { base, matcher }
    }

    /// Directory the patterns are anchored at
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Whether `path` should be skipped by the walker.
    ///
    /// The traversal root is never excluded. Anything inside a `.git`
    /// directory always is. Otherwise the path and its parents are matched
    /// up to, but not including, the traversal root; the first rule that
    /// matches decides. Paths outside `base` are matched relative to the
    /// traversal root instead, so the rules still apply when the walk starts
    /// somewhere other than the directory holding the rule source.
    pub fn is_excluded(&self, path: &Path, traversal_root: &Path) -> bool {
        let abs = normalize_path(path);
        let root = normalize_path(traversal_root);
        if abs == root {
            trace!("Traversal root is never excluded: {}", path.display());
            return false;
        }

        if path.components().any(|c| c == Component::Normal(OsStr::new(VCS_DIR))) {
            trace!("Excluding version-control path: {}", path.display());
            return true;
        }

        let anchor = if abs.starts_with(&self.base) { self.base.as_path() } else { root.as_path() };

        let mut is_dir = abs.is_dir();
        let mut current = Some(abs.as_path());
        while let Some(candidate) = current {
            if candidate == root {
                break;
            }
            let Ok(rel) = candidate.strip_prefix(anchor) else {
                trace!("Path {} is outside {}", candidate.display(), anchor.display());
                break;
            };
            if rel.as_os_str().is_empty() {
                break;
            }

            let matched = self.matcher.matched(rel, is_dir);
            if matched.is_ignore() {
                trace!("Matched ignore rule at {}", rel.display());
                return true;
            }
            if matched.is_whitelist() {
                return false;
            }

            current = candidate.parent();
            is_dir = true;
        }
        false
    }
}

fn compile<'a>(
    base: &Path,
    origin: Option<&Path>,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Gitignore, ignore::Error> {
    let mut builder = GitignoreBuilder::new(base);
    for line in lines {
        if let Err(e) = builder.add_line(origin.map(Path::to_path_buf), line) {
            warn!("Skipping invalid ignore pattern '{}': {}", line, e);
        }
    }
    builder.build()
}

/// Absolute, lexically cleaned form of `path`; `..` segments are folded
/// without touching the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let path = if path.as_os_str().is_empty() { Path::new(".") } else { path };
    match std::path::absolute(path) {
        Ok(abs) => clean(abs),
        Err(_) => clean(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_missing_ignore_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let dist_file = create_test_file(root, "dist/a.ts", "");
        let nm_file = create_test_file(root, "node_modules/pkg/index.ts", "");
        let bin_file = create_test_file(root, "bin/cli.ts", "");
        let src_file = create_test_file(root, "src/a.ts", "");

        let rules = IgnoreRules::load(&root.join(".gitignore"));

        assert!(rules.is_excluded(&root.join("dist"), root));
        assert!(rules.is_excluded(&dist_file, root));
        assert!(rules.is_excluded(&nm_file, root));
        assert!(rules.is_excluded(&bin_file, root));
        assert!(!rules.is_excluded(&src_file, root));
    }

    #[test]
    fn test_load_reads_patterns_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let ignore_file = create_test_file(root, ".gitignore", "# generated\ngenerated/\n*.gen.ts\n");
        create_test_file(root, "generated/a.ts", "");
        let gen_file = create_test_file(root, "src/types.gen.ts", "");
        let dist_file = create_test_file(root, "dist/a.ts", "");

        let rules = IgnoreRules::load(&ignore_file);

        assert!(rules.is_excluded(&root.join("generated"), root));
        assert!(rules.is_excluded(&gen_file, root));
        // Defaults are not merged in when the file is readable
        assert!(!rules.is_excluded(&dist_file, root));
    }

    #[test]
    fn test_negation_re_includes_path() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let keep = create_test_file(root, "out/keep.ts", "");
        let drop = create_test_file(root, "out/drop.ts", "");

        let rules = IgnoreRules::from_text(root, "out/*\n!out/keep.ts\n");

        assert!(rules.is_excluded(&drop, root));
        assert!(!rules.is_excluded(&keep, root));
    }

    #[test]
    fn test_anchored_pattern_only_matches_at_base() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "build/a.ts", "");
        create_test_file(root, "src/build/b.ts", "");

        let rules = IgnoreRules::from_text(root, "/build\n");

        assert!(rules.is_excluded(&root.join("build"), root));
        assert!(!rules.is_excluded(&root.join("src/build"), root));
    }

    #[test]
    fn test_traversal_root_is_never_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let dist = root.join("dist");
        fs::create_dir_all(&dist).unwrap();

        let rules = IgnoreRules::defaults(root);

        assert!(rules.is_excluded(&dist, root));
        assert!(!rules.is_excluded(&dist, &dist));
    }

    #[test]
    fn test_parents_above_traversal_root_do_not_exclude() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let file = create_test_file(root, "dist/esm/a.ts", "");
        let dist = root.join("dist");

        let rules = IgnoreRules::defaults(root);

        assert!(rules.is_excluded(&file, root));
        assert!(!rules.is_excluded(&file, &dist));
    }

    #[test]
    fn test_git_directory_always_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let hook = create_test_file(root, ".git/hooks/pre-commit.ts", "");
        let workflow = create_test_file(root, ".github/workflows/ci.ts", "");

        let rules = IgnoreRules::from_text(root, "");

        assert!(rules.is_excluded(&root.join(".git"), root));
        assert!(rules.is_excluded(&hook, root));
        assert!(!rules.is_excluded(&workflow, root));
    }

    #[test]
    fn test_paths_outside_base_match_relative_to_traversal_root() {
        let rules_dir = TempDir::new().unwrap();
        let other_dir = TempDir::new().unwrap();
        let outside = create_test_file(other_dir.path(), "dist/a.ts", "");
        let kept = create_test_file(other_dir.path(), "src/a.ts", "");

        let rules = IgnoreRules::defaults(rules_dir.path());

        assert!(rules.is_excluded(&other_dir.path().join("dist"), other_dir.path()));
        assert!(rules.is_excluded(&outside, other_dir.path()));
        assert!(!rules.is_excluded(&kept, other_dir.path()));
    }

    #[test]
    fn test_relative_paths_are_normalized() {
        let path = normalize_path(Path::new("src/../src/./lib"));
        assert!(path.is_absolute());
        assert!(path.ends_with("src/lib"));
        assert_eq!(normalize_path(Path::new("")), normalize_path(Path::new(".")));
    }
}
