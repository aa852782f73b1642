//! Frame listings: the plain text table and its JSON envelope.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::frame::LineSpan;

/// JSON schema version for [`FrameListing`].
///
/// Bump this when making non-backwards-compatible changes to the JSON structure.
pub const SCHEMA_VERSION: u32 = 1;

pub const TOOL_NAME: &str = "moveframe";

pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level JSON written by `--list --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameListing {
    pub schema_version: u32,

    pub tool: ToolInfo,

    pub source: SourceInfo,

    pub frames: Vec<FrameEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Identifies the exact snapshot the positions and spans refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Hex MD5 of the document bytes.
    pub md5: String,

    pub byte_len: u64,

    pub line_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEntry {
    /// 1-indexed position used by `--from` / `--to`.
    pub position: usize,
    pub title: String,
    pub open_line: usize,
    pub span: LineSpan,
}

impl FrameListing {
    pub fn from_document(doc: &Document) -> Self {
        let text = doc.text();
        let frames = doc
            .index()
            .iter()
            .map(|(position, frame)| FrameEntry {
                position,
                title: frame.title(),
                open_line: frame.open_line,
                span: frame.span,
            })
            .collect();

        Self {
            schema_version: SCHEMA_VERSION,
            tool: ToolInfo {
                name: TOOL_NAME.to_string(),
                version: TOOL_VERSION.to_string(),
            },
            source: SourceInfo {
                path: Some(doc.path().to_string_lossy().to_string()),
                md5: format!("{:x}", md5::compute(text.as_bytes())),
                byte_len: text.len() as u64,
                line_count: text.split('\n').count() as u64,
            },
            frames,
        }
    }
}

/// Human readable listing, one `  N: title` row per frame.
pub fn render_text(doc: &Document) -> String {
    let index = doc.index();
    if index.is_empty() {
        return format!("No frames found in {}", doc.path().display());
    }

    let mut out = format!("Frames in {}:", doc.name());
    for (position, frame) in index.iter() {
        out.push_str(&format!("\n  {}: {}", position, frame.title()));
    }
    out
}
