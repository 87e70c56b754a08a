use std::{io, path::PathBuf};
use thiserror::Error;

/// Failures raised while walking a tree and rewriting specifiers.
///
/// Everything except [`RewriteError::InvalidInvocation`] is scoped to a single
/// file or directory: the walker logs it and carries on with the siblings.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("could not read ignore rules from {}: {source}", .path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("could not list directory {}: {source}", .path.display())]
    DirectoryList { path: PathBuf, source: io::Error },

    #[error("could not stat {}: {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error(
        "could not resolve directory import '{specifier}' in {}: no index file in {}",
        .file.display(),
        .dir.display()
    )]
    UnresolvableDirectoryImport { specifier: String, file: PathBuf, dir: PathBuf },

    #[error("could not {action} {}: {source}", .path.display())]
    FileIo { action: &'static str, path: PathBuf, source: io::Error },

    #[error("invalid path '{}': {reason}", .path.display())]
    InvalidInvocation { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_directory_import_names_specifier_and_file() {
        let err = RewriteError::UnresolvableDirectoryImport {
            specifier: "./missing".to_string(),
            file: PathBuf::from("src/a.ts"),
            dir: PathBuf::from("/project/src/missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("'./missing'"));
        assert!(msg.contains("src/a.ts"));
        assert!(msg.contains("/project/src/missing"));
    }

    #[test]
    fn test_io_and_invocation_messages() {
        let invalid = RewriteError::InvalidInvocation {
            path: PathBuf::from("nope"),
            reason: "path is empty".into(),
        };
        assert_eq!(invalid.to_string(), "invalid path 'nope': path is empty");

        let io_err = RewriteError::FileIo {
            action: "write",
            path: PathBuf::from("a.ts"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(io_err.to_string(), "could not write a.ts: denied");
    }
}
