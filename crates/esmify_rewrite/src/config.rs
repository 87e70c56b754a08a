use clap::Parser;
use esmify_core::DEFAULT_IGNORE_FILE;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "esmify")]
#[command(about = "Rewrite relative import specifiers in compiled TypeScript to explicit .js paths")]
pub struct Config {
    /// File or directory to process
    pub path: PathBuf,

    /// Gitignore-style file listing paths to skip
    #[arg(long, default_value = DEFAULT_IGNORE_FILE)]
    pub ignore_file: PathBuf,
}
