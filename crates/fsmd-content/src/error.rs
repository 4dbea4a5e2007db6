//! Error type for content resolution.

use std::path::PathBuf;

use fsmd_storage::StorageError;

/// Content resolution failure.
///
/// "Not found" is never one of these: a missing page resolves to the
/// not-found page with `found = false`.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The file store failed for a reason other than a missing file.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Malformed front-matter header.
    #[error("invalid front matter in {}: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },

    /// File content is not valid UTF-8.
    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },
}

impl ContentError {
    /// Store path of the file that caused the failure, if known.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Storage(err) => err.path.as_deref(),
            Self::FrontMatter { path, .. } | Self::Encoding { path } => Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use fsmd_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_front_matter_display() {
        let err = ContentError::FrontMatter {
            path: PathBuf::from("markdown/docs/intro.md"),
            message: "invalid YAML".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "invalid front matter in markdown/docs/intro.md: invalid YAML"
        );
        assert_eq!(err.path(), Some(Path::new("markdown/docs/intro.md")));
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let storage = StorageError::new(StorageErrorKind::PermissionDenied).with_path("markdown/a.md");
        let expected = storage.to_string();

        let err = ContentError::from(storage);

        assert_eq!(err.to_string(), expected);
        assert_eq!(err.path(), Some(Path::new("markdown/a.md")));
    }
}
