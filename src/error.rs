//! Typed errors for the section store and the raw section eraser
//!
//! Field-level problems are not errors: the validator repairs them and
//! reports them as [`ValidationWarning`](crate::validate::ValidationWarning).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::keyfile::ParseError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but has no such section
    #[error("no section \"{section}\" in configuration file")]
    NotFound { section: String },

    /// The file could not be parsed at all
    #[error("failed to parse configuration file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Reading, writing, copying or moving a file failed
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The name cannot be written as a `[section]` header
    #[error("invalid section name {name:?}")]
    InvalidSectionName { name: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: ParseError) -> Self {
        StoreError::Parse {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_found(section: &str) -> Self {
        StoreError::NotFound {
            section: section.to_string(),
        }
    }

    /// True for the "file does not exist" flavour of [`StoreError::Io`]
    pub fn is_missing_file(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_cause_is_not_repeated_in_message() {
        let err = StoreError::parse("/tmp/rc", ParseError::InvalidUtf8 { line: 2 });
        assert_eq!(err.to_string(), "failed to parse configuration file /tmp/rc");
        assert_eq!(err.source().unwrap().to_string(), "line 2: invalid UTF-8");

        let err = StoreError::io("/tmp/rc", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "I/O error on /tmp/rc");
        assert!(err.is_missing_file());
    }
}
