//! Documents on disk: reading, indexing and atomic per-document writes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{FrameError, Result};
use crate::frame::FrameIndex;

/// One text snapshot of a document, identified by its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a document. Invalid UTF-8 is an error: rewriting it lossily
    /// would change bytes outside the intended edit.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FrameError::io(path, e))?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// File name used in user-facing messages.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// A fresh frame index of the current text.
    pub fn index(&self) -> FrameIndex {
        FrameIndex::from_text(&self.text)
    }

    /// Like [`Document::index`], but an index without frames is an error.
    pub fn indexed(&self) -> Result<FrameIndex> {
        let index = self.index();
        if index.is_empty() {
            return Err(FrameError::EmptyDocument {
                path: self.path.clone(),
            });
        }
        Ok(index)
    }
}

/// Replace `path` with `text` in one step.
///
/// The text is written to a temporary file next to the target, which then
/// takes over the target's permissions and is renamed onto it. A failure
/// leaves the original untouched.
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let err = |e| FrameError::io(path, e);

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir).map_err(err)?;
    tmp.write_all(text.as_bytes()).map_err(err)?;
    tmp.as_file().sync_all().map_err(err)?;

    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions()).map_err(err)?;
    }
    tmp.persist(path).map_err(|e| err(e.error))?;

    info!(path = %path.display(), bytes = text.len(), "wrote document");
    Ok(())
}

/// Whether two paths name the same document on disk.
pub fn same_document(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
