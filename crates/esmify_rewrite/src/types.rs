use std::{ops::Range, path::PathBuf};

/// One `import ... from '<specifier>'` / `export ... from '<specifier>'`
/// clause found in a file, borrowed from the file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecifierMatch<'a> {
    pub keyword: &'a str,
    /// Everything between the keyword and `from`, verbatim
    pub bindings: &'a str,
    pub specifier: &'a str,
    /// Byte range of `specifier` inside the text, quotes excluded
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecifier {
    /// Absolute path the original specifier points at
    pub path: PathBuf,
    /// Text to splice back in place of the original specifier
    pub specifier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RewriteSummary {
    pub dirs_visited: usize,
    pub files_rewritten: usize,
    pub files_unchanged: usize,
    pub paths_ignored: usize,
    /// Per-file and per-directory failures, sorted by path
    pub failures: Vec<Failure>,
}

