//! Catalog configuration.

use std::env::VarError;
use std::path::PathBuf;

use crate::Result;
use crate::kind::Kind;

/// Environment variable overriding the content root.
pub const CONTENT_DIR_ENV: &str = "AGENT_CATALOG_CONTENT_DIR";

/// Content root used when [`CONTENT_DIR_ENV`] is unset, relative to the
/// working directory.
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Where the catalog reads its documents from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory holding `agents/`, `skills/` and `workflows/`.
    pub content_root: PathBuf,
}

impl CatalogConfig {
    /// Configuration for an explicit content root.
    #[must_use]
    pub fn new(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
        }
    }

    /// Resolve the content root from the environment.
    ///
    /// Uses [`CONTENT_DIR_ENV`] when set and non-empty, otherwise
    /// `<current dir>/content`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EnvVar` if the variable is not valid Unicode, or
    /// `Error::Io` if the current directory cannot be determined.
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONTENT_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Ok(Self::new(dir)),
            Ok(_) | Err(VarError::NotPresent) => {
                Ok(Self::new(std::env::current_dir()?.join(DEFAULT_CONTENT_DIR)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Directory holding documents of `kind`.
    #[must_use]
    pub fn kind_dir(&self, kind: Kind) -> PathBuf {
        self.content_root.join(kind.dir_name())
    }
}
