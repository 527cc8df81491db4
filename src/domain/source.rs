use crate::expand_tilde;
use anyhow::{Result, bail};
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Where the engine should read the media from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator {
    path: PathBuf,
}

impl SourceLocator {
    /// Accepts a plain path, a `~/` path or a `file://` url.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("Empty source locator");
        }

        let path = match raw.strip_prefix("file://") {
            Some(stripped) => PathBuf::from(stripped),
            None if raw.contains("://") => bail!("Unsupported source scheme: {raw}"),
            None => expand_tilde(raw)?,
        };

        Ok(SourceLocator { path })
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        SourceLocator { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension, used as the screen title.
    pub fn display_name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Asset properties the engine resolves before reporting readiness.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum AssetKey {
    Playable,
    HasProtectedContent,
}

#[derive(Debug, Clone)]
pub struct OpenRequest {
    pub source: SourceLocator,
    pub keys: Vec<AssetKey>,
}

impl OpenRequest {
    pub fn new(source: SourceLocator) -> Self {
        OpenRequest {
            source,
            keys: vec![AssetKey::Playable, AssetKey::HasProtectedContent],
        }
    }
}
