use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use log::debug;

use crate::types::RewriteSummary;

/// Show `path` relative to the traversal root when it lives underneath it
fn display_path(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

pub fn print_failures<W: Write>(
    writer: &mut W,
    summary: &RewriteSummary,
    root: &Path,
) -> io::Result<()> {
    if summary.failures.is_empty() {
        return Ok(());
    }
    debug!("Printing {} failures", summary.failures.len());

    writeln!(
        writer,
        "{} {} path(s) left untouched\n",
        "⚠".yellow().bold(),
        summary.failures.len().to_string().yellow()
    )?;

    for (idx, failure) in summary.failures.iter().enumerate() {
        let is_last = idx == summary.failures.len() - 1;
        let prefix = if is_last { "└──" } else { "├──" };
        let rail = if is_last { " " } else { "│" };
        writeln!(
            writer,
            "{}  {}\n{}     {}",
            prefix.dimmed(),
            display_path(root, &failure.path).bright_white().bold(),
            rail.dimmed(),
            failure.message.red()
        )?;
    }
    writeln!(writer)?;

    writer.flush()?;
    Ok(())
}

pub fn print_summary<W: Write>(writer: &mut W, summary: &RewriteSummary) -> io::Result<()> {
    let mark = if summary.failures.is_empty() { "✓".green().bold() } else { "✗".red().bold() };

    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{} {}", mark, "Summary".bold())?;
    writeln!(writer, "  Files rewritten: {}", summary.files_rewritten.to_string().green().bold())?;
    writeln!(writer, "  Files unchanged: {}", summary.files_unchanged.to_string().cyan())?;
    writeln!(writer, "  Failures: {}", summary.failures.len().to_string().red())?;
    writeln!(writer, "  Directories visited: {}", summary.dirs_visited.to_string().cyan())?;
    writeln!(writer, "  Paths ignored: {}", summary.paths_ignored.to_string().dimmed())?;

    writer.flush()?;
    Ok(())
}
