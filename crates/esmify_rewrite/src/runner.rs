use anyhow::{Context, Result};
use esmify_core::IgnoreRules;
use log::{debug, info};

use crate::{config::Config, types::RewriteSummary, walker::process_path};

pub fn run_rewrite(cfg: Config) -> Result<RewriteSummary> {
    info!("Starting specifier rewrite from {}", cfg.path.display());

    debug!("Loading ignore rules from {}", cfg.ignore_file.display());
    let rules = IgnoreRules::load(&cfg.ignore_file);
    debug!("Ignore rules anchored at {}", rules.base().display());

    let summary = process_path(&cfg.path, &rules)
        .with_context(|| format!("Cannot rewrite specifiers under {}", cfg.path.display()))?;

    info!(
        "Specifier rewrite complete. {} files rewritten, {} unchanged, {} failures",
        summary.files_rewritten,
        summary.files_unchanged,
        summary.failures.len()
    );
    debug!("Visited {} directories, ignored {} paths", summary.dirs_visited, summary.paths_ignored);

    Ok(summary)
}
