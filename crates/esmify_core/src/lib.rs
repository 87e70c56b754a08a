//! Core utilities for esmify.
//!
//! This crate provides the pieces shared by the specifier rewriter:
//! - The fixed extension and index-file tables
//! - Loading gitignore-style exclusion rules and testing paths against them
//! - The error taxonomy for per-file and per-directory failures

mod constants;
mod error;
mod ignore_rules;

// Re-export public API
pub use constants::{
    DEFAULT_IGNORE_FILE, DEFAULT_IGNORE_RULES, INDEX_FILES, OUTPUT_EXTENSION, SOURCE_EXTENSIONS,
    VCS_DIR,
};
pub use error::RewriteError;
pub use ignore_rules::{IgnoreRules, normalize_path};
