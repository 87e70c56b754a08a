//! Relative import specifier rewriting for compiled TypeScript output.
//!
//! Strict ESM loaders refuse to guess file extensions or directory index
//! files. This crate walks a tree of `.ts` files and rewrites every relative
//! `import ... from` / `export ... from` specifier to an explicit `.js` path,
//! turning directory imports into `<dir>/index.js`.
//!
//! # Examples
//!
//! ```no_run
//! use esmify_rewrite::{Config, run_rewrite};
//! use std::io::{BufWriter, Write};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     path: std::path::PathBuf::from("dist"),
//!     ignore_file: std::path::PathBuf::from(".gitignore"),
//! };
//!
//! let summary = run_rewrite(cfg)?;
//!
//! let mut stdout = BufWriter::new(std::io::stdout());
//! esmify_rewrite::print_summary(&mut stdout, &summary)?;
//! stdout.flush()?;
//! # Ok(())
//! # }
//! ```

mod config;
mod reporter;
mod rewriter;
mod runner;
mod types;
mod walker;

// Re-export public API
pub use config::Config;
pub use reporter::{print_failures, print_summary};
pub use rewriter::{find_specifiers, resolve_specifier, rewrite_file, rewrite_specifiers};
pub use runner::run_rewrite;
pub use types::{Failure, ResolvedSpecifier, RewriteSummary, SpecifierMatch};
pub use walker::process_path;
