//! Prompt template lookup.

use std::path::{Path, PathBuf};
use whodunit_error::{StorageError, StorageErrorKind, WhodunitResult};
use whodunit_interface::TemplateSource;

/// Templates compiled into the binary, keyed by name.
pub const BUNDLED_TEMPLATES: &[(&str, &str)] = &[
    (
        "script_info_writer",
        include_str!("../prompts/script_info_writer.txt"),
    ),
    (
        "character_outline_writer",
        include_str!("../prompts/character_outline_writer.txt"),
    ),
    (
        "character_info_writer",
        include_str!("../prompts/character_info_writer.txt"),
    ),
    (
        "clue_search_writer",
        include_str!("../prompts/clue_search_writer.txt"),
    ),
    ("discuss_writer", include_str!("../prompts/discuss_writer.txt")),
];

/// Template source backed by `{dir}/{name}.txt` files.
///
/// A name with no file in the override directory resolves to the bundled
/// template of the same name.
#[derive(Debug, Clone, Default)]
pub struct PromptDirectory {
    dir: Option<PathBuf>,
}

impl PromptDirectory {
    /// Serve only the bundled templates.
    pub fn bundled() -> Self {
        Self { dir: None }
    }

    /// Serve templates from `dir`, falling back to the bundled set.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` exists but is not a directory.
    #[tracing::instrument(skip(dir))]
    pub fn with_override(dir: impl Into<PathBuf>) -> WhodunitResult<Self> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            return Err(StorageError::new(StorageErrorKind::InvalidPath(format!(
                "{} is not a directory",
                dir.display()
            )))
            .into());
        }
        tracing::debug!(path = %dir.display(), "Using prompt override directory");
        Ok(Self { dir: Some(dir) })
    }

    /// Override directory, if any.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn bundled_template(name: &str) -> Option<&'static str> {
        BUNDLED_TEMPLATES
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, text)| *text)
    }
}

impl TemplateSource for PromptDirectory {
    fn load(&self, name: &str) -> WhodunitResult<String> {
        if let Some(dir) = &self.dir {
            let path = dir.join(format!("{name}.txt"));
            if path.is_file() {
                tracing::debug!(template = name, path = %path.display(), "Loading template from disk");
                return std::fs::read_to_string(&path).map_err(|e| {
                    StorageError::new(StorageErrorKind::FileRead(format!(
                        "{}: {}",
                        path.display(),
                        e
                    )))
                    .into()
                });
            }
        }

        Self::bundled_template(name)
            .map(str::to_string)
            .ok_or_else(|| StorageError::new(StorageErrorKind::TemplateNotFound(name.to_string())).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_templates_carry_their_placeholders() {
        let source = PromptDirectory::bundled();
        assert!(source.load("script_info_writer").unwrap().contains("{theme}"));
        assert!(source.load("character_outline_writer").unwrap().contains("{intro}"));
        assert!(source.load("character_info_writer").unwrap().contains("{character_intro}"));
        assert!(source.load("clue_search_writer").unwrap().contains("{character_content}"));
        assert!(source.load("discuss_writer").unwrap().contains("{clue}"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let source = PromptDirectory::bundled();
        assert!(source.load("no_such_template").is_err());
    }
}
