use dashmap::DashMap;
use esmify_core::{IgnoreRules, RewriteError, SOURCE_EXTENSIONS};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
    thread,
};

use crate::{
    rewriter::rewrite_file,
    types::{Failure, RewriteSummary},
};

/// Walk `path` and rewrite every source file underneath it.
///
/// Per-file and per-directory failures are logged and collected in the
/// summary. The only error returned is for a starting path that is empty or
/// does not exist.
pub fn process_path(path: &Path, rules: &IgnoreRules) -> Result<RewriteSummary, RewriteError> {
    if path.as_os_str().is_empty() {
        return Err(RewriteError::InvalidInvocation {
            path: path.to_path_buf(),
            reason: "path is empty".to_string(),
        });
    }
    if let Err(e) = fs::metadata(path) {
        return Err(RewriteError::InvalidInvocation {
            path: path.to_path_buf(),
            reason: e.to_string(),
        });
    }

    let walker = Walker::new(rules, path);
    walker.walk(path);
    Ok(walker.finish())
}

struct Walker<'a> {
    rules: &'a IgnoreRules,
    root: PathBuf,
    dirs_visited: AtomicUsize,
    files_rewritten: AtomicUsize,
    files_unchanged: AtomicUsize,
    paths_ignored: AtomicUsize,
    failures: DashMap<PathBuf, String>,
}

impl<'a> Walker<'a> {
    fn new(rules: &'a IgnoreRules, root: &Path) -> Self {
        Self {
            rules,
            root: root.to_path_buf(),
            dirs_visited: AtomicUsize::new(0),
            files_rewritten: AtomicUsize::new(0),
            files_unchanged: AtomicUsize::new(0),
            paths_ignored: AtomicUsize::new(0),
            failures: DashMap::new(),
        }
    }

    fn walk(&self, path: &Path) {
        if self.rules.is_excluded(path, &self.root) {
            debug!("PATH [ignored] -> {}", path.display());
            self.paths_ignored.fetch_add(1, Ordering::Relaxed);
            return;
        }

        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(source) => {
                self.fail(path, RewriteError::Stat { path: path.to_path_buf(), source });
                return;
            }
        };

        if meta.is_dir() {
            // Following directory symlinks can loop back into an ancestor
            if path != self.root.as_path() && path.is_symlink() {
                debug!("DIR [symlink, skipped] -> {}", path.display());
                return;
            }
            self.walk_dir(path);
        } else if is_source_file(path) {
            self.process_file(path);
        } else {
            trace!("Skipping non-source file: {}", path.display());
        }
    }

    fn walk_dir(&self, dir: &Path) {
        info!("DIR -> {}", dir.display());
        self.dirs_visited.fetch_add(1, Ordering::Relaxed);

        let entries = match list_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.fail(dir, e);
                return;
            }
        };
        trace!("Thread {:?} listed {} entries in {}", thread::current().id(), entries.len(), dir.display());

        entries.par_iter().for_each(|entry| self.walk(entry));
    }

    /// Rewrite one source file. Only files whose content changed are written
    /// and logged at info; unchanged files are logged at debug and show up in
    /// the unchanged count of the summary.
    fn process_file(&self, file: &Path) {
        match rewrite_file(file) {
            Ok(true) => {
                info!("FILE updated -> {}", file.display());
                self.files_rewritten.fetch_add(1, Ordering::Relaxed);
            }
            Ok(false) => {
                debug!("FILE unchanged -> {}", file.display());
                self.files_unchanged.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => self.fail(file, e),
        }
    }

    fn fail(&self, path: &Path, err: RewriteError) {
        warn!("Failed to process {}: {}", path.display(), err);
        self.failures.insert(path.to_path_buf(), err.to_string());
    }

    fn finish(self) -> RewriteSummary {
        let mut failures: Vec<Failure> = self
            .failures
            .into_iter()
            .map(|(path, message)| Failure { path, message })
            .collect();
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        RewriteSummary {
            dirs_visited: self.dirs_visited.into_inner(),
            files_rewritten: self.files_rewritten.into_inner(),
            files_unchanged: self.files_unchanged.into_inner(),
            paths_ignored: self.paths_ignored.into_inner(),
            failures,
        }
    }
}

/// Immediate children of `dir`, sorted by path.
fn list_dir(dir: &Path) -> Result<Vec<PathBuf>, RewriteError> {
    let to_err = |source| RewriteError::DirectoryList { path: dir.to_path_buf(), source };

    let mut entries = fs::read_dir(dir)
        .map_err(to_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_err)?;
    entries.sort();
    Ok(entries)
}

fn is_source_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
