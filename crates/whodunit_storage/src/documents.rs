//! Finished-script persistence.

use std::path::PathBuf;
use whodunit_error::{StorageError, StorageErrorKind, WhodunitResult};
use whodunit_interface::DocumentSink;

/// Writes each document to `{base}/{title}.md`.
///
/// Spaces in the title become underscores; path separators are replaced so
/// a generated title can never escape the base directory.
#[derive(Debug, Clone)]
pub struct DocumentDirectory {
    base_path: PathBuf,
}

impl DocumentDirectory {
    /// Create a document directory rooted at `base_path`.
    ///
    /// The directory itself is created lazily on first save.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// File name a document with `title` is saved under.
    ///
    /// # Examples
    ///
    /// ```
    /// use whodunit_storage::DocumentDirectory;
    ///
    /// assert_eq!(DocumentDirectory::file_name("雪夜 迷踪"), "雪夜_迷踪.md");
    /// assert_eq!(DocumentDirectory::file_name("a/b"), "a_b.md");
    /// assert_eq!(DocumentDirectory::file_name("  "), "untitled.md");
    /// ```
    pub fn file_name(title: &str) -> String {
        let stem: String = title
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '/' | '\\' | ':' | '\0' => '_',
                other => other,
            })
            .collect();
        let stem = stem.trim_matches('.');
        if stem.is_empty() {
            "untitled.md".to_string()
        } else {
            format!("{stem}.md")
        }
    }
}

impl DocumentSink for DocumentDirectory {
    type Location = PathBuf;

    #[tracing::instrument(skip(self, content), fields(base = %self.base_path.display(), bytes = content.len()))]
    fn save(&self, title: &str, content: &str) -> WhodunitResult<PathBuf> {
        std::fs::create_dir_all(&self.base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                self.base_path.display(),
                e
            )))
        })?;

        let path = self.base_path.join(Self::file_name(title));
        std::fs::write(&path, content).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        tracing::info!(path = %path.display(), "Saved script document");
        Ok(path)
    }
}
