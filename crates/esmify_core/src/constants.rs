//! Constants for file extensions and default exclusion rules.
//!
//! The rewriter only understands one compiled-language pairing: TypeScript
//! sources compiled in place to `.js` output. Everything that depends on that
//! pairing is kept here.

/// Extensions of files whose specifiers get rewritten
pub const SOURCE_EXTENSIONS: &[&str] = &["ts"];

/// Extension appended to extension-less relative specifiers
pub const OUTPUT_EXTENSION: &str = "js";

/// Files whose presence turns a directory specifier into `<dir>/index.js`
pub const INDEX_FILES: &[&str] = &["index.ts", "index.d.ts"];

/// Ignore file read when none is given on the command line
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Rules used when the ignore file cannot be read
pub const DEFAULT_IGNORE_RULES: &[&str] = &["dist/", "node_modules/", "bin/"];

/// Version-control metadata directory, never traversed
pub const VCS_DIR: &str = ".git";
