use esmify_core::{INDEX_FILES, OUTPUT_EXTENSION, RewriteError, normalize_path};
use log::{debug, trace};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use crate::types::{ResolvedSpecifier, SpecifierMatch};

/// `import|export <bindings> from '<relative specifier>'`
///
/// Bindings are either a brace group or the shortest run of anything up to
/// `from`. The specifier must start with one or more `./` or `../` segments
/// and stays on one line.
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b(import|export)\s+(\{[^}]*\}|[\s\S]*?)\s+from\s+['"]((?:\.{1,2}/)+.*?)['"]"#)
        .expect("specifier pattern must compile")
});

/// Find every relative import/export specifier in `content`, in order.
pub fn find_specifiers(content: &str) -> Vec<SpecifierMatch<'_>> {
    SPECIFIER_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let keyword = caps.get(1)?;
            let bindings = caps.get(2)?;
            let specifier = caps.get(3)?;
            Some(SpecifierMatch {
                keyword: keyword.as_str(),
                bindings: bindings.as_str(),
                specifier: specifier.as_str(),
                range: specifier.range(),
            })
        })
        .collect()
}

/// Work out what `specifier`, written inside `file_path`, should become.
///
/// The specifier is resolved against the directory of `file_path`. A
/// directory target becomes `<specifier>/index.js` if it holds an index
/// source or declaration file, and is an error otherwise. Anything else gets
/// `.js` appended unless the specifier text already has an extension.
pub fn resolve_specifier(
    file_path: &Path,
    specifier: &str,
) -> Result<ResolvedSpecifier, RewriteError> {
    let base = file_path.parent().unwrap_or(Path::new(""));
    let resolved = normalize_path(&base.join(specifier));
    trace!("Resolved '{}' from {} to {}", specifier, file_path.display(), resolved.display());

    let rewritten = if is_directory(&resolved) {
        if !has_index_file(&resolved) {
            return Err(RewriteError::UnresolvableDirectoryImport {
                specifier: specifier.to_string(),
                file: file_path.to_path_buf(),
                dir: resolved,
            });
        }
        let rewritten = format!("{}/index.{}", specifier.trim_end_matches('/'), OUTPUT_EXTENSION);
        debug!("Converted directory import '{}' -> '{}'", specifier, rewritten);
        rewritten
    } else if has_extension(specifier) {
        specifier.to_string()
    } else {
        format!("{}.{}", specifier, OUTPUT_EXTENSION)
    };

    Ok(ResolvedSpecifier { path: resolved, specifier: rewritten })
}

/// Rewrite every relative specifier in `content`.
///
/// Only the specifier text is replaced; keywords, bindings, whitespace and
/// quotes are copied through untouched. The first unresolvable directory
/// import aborts the whole file.
pub fn rewrite_specifiers(content: &str, file_path: &Path) -> Result<String, RewriteError> {
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for m in find_specifiers(content) {
        let resolved = resolve_specifier(file_path, m.specifier)?;
        if resolved.specifier != m.specifier {
            trace!("{} '{}' -> '{}'", m.keyword, m.specifier, resolved.specifier);
        }
        out.push_str(&content[last..m.range.start]);
        out.push_str(&resolved.specifier);
        last = m.range.end;
    }

    out.push_str(&content[last..]);
    Ok(out)
}

/// Read, rewrite and write back one source file.
///
/// Returns whether the file changed. Nothing is written when the content is
/// already up to date or when rewriting fails.
pub fn rewrite_file(path: &Path) -> Result<bool, RewriteError> {
    let content = fs::read_to_string(path).map_err(|source| RewriteError::FileIo {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;

    let updated = rewrite_specifiers(&content, path)?;
    if updated == content {
        return Ok(false);
    }

    fs::write(path, updated).map_err(|source| RewriteError::FileIo {
        action: "write",
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}

fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

fn has_index_file(dir: &Path) -> bool {
    INDEX_FILES.iter().map(|name| dir.join(name)).any(|p: PathBuf| p.is_file())
}

fn has_extension(specifier: &str) -> bool {
    Path::new(specifier).extension().is_some()
}
