//! Position algebra: turn frame positions into concrete line edits.
//!
//! Plans are computed from a fresh `FrameIndex` of each document and are
//! consumed immediately by [`crate::mutate`]. Every check happens here,
//! before any text is produced.

use tracing::debug;

use crate::document::Document;
use crate::error::{FrameError, Result};
use crate::frame::{Frame, FrameIndex, LineSpan};
use crate::range::{self, PositionSet, Role};

/// Whether a cross-document transfer keeps the source frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Move,
    Copy,
}

/// Text inserted into a line stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Line offset into the stream after all removals were applied.
    pub at: usize,
    pub text: String,
}

/// All changes to one document: removals first, then at most one insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentEdit {
    /// Removed line ranges of the original text, ascending and disjoint.
    pub removals: Vec<LineSpan>,
    pub insertion: Option<Insertion>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPlan {
    /// Nothing to change.
    Unchanged,
    /// One document is edited.
    InPlace(DocumentEdit),
    /// Frames go from one document into another. `source` is `None` for copies.
    Transfer {
        source: Option<DocumentEdit>,
        destination: DocumentEdit,
    },
}

/// Remove the selected frames from `doc`.
///
/// Each frame is removed on its own, so lines between selected frames stay.
pub fn plan_delete(doc: &Document, sources: &PositionSet) -> Result<EditPlan> {
    let index = doc.indexed()?;
    sources.validate(index.len(), Role::Source)?;

    Ok(EditPlan::InPlace(DocumentEdit {
        removals: frame_spans(&index, sources),
        insertion: None,
    }))
}

/// Move a contiguous run of frames to `dest` within the same document.
///
/// `dest` is the position the first moved frame ends up at, counted among
/// the frames that are not moving. Positions past the remaining frames
/// append after the last of them.
pub fn plan_move_within(doc: &Document, sources: &PositionSet, dest: usize) -> Result<EditPlan> {
    let index = doc.indexed()?;
    sources.validate(index.len(), Role::Source)?;
    range::validate_position(dest, index.len() + 1, Role::Destination)?;

    if !sources.is_contiguous() {
        return Err(FrameError::NonContiguous {
            positions: sources
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(","),
        });
    }
    if sources.len() == 1 && sources.first() == dest {
        return Ok(EditPlan::Unchanged);
    }

    let (first, last) = match (index.get(sources.first()), index.get(sources.last())) {
        (Some(first), Some(last)) => (first.span, last.span),
        _ => unreachable!("positions validated against the index"),
    };
    require_closed(doc, sources.iter().filter_map(|pos| index.get(pos).map(|f| (pos, f))))?;
    let moved = first.cover(last);
    let removed = moved.len();

    // lines after the moved run shift up by its length.
    let shift = |line: usize| if line >= moved.end { line - removed } else { line };

    let mut kept = 0usize;
    let mut at = None;
    let mut last_kept = None;
    for (pos, frame) in index.iter() {
        if sources.contains(pos) {
            continue;
        }
        kept += 1;
        if kept == dest {
            at = Some(shift(frame.span.start));
            break;
        }
        last_kept = Some((pos, frame));
    }
    if at.is_none() {
        require_closed(doc, last_kept)?;
    }

    let line_count = doc.text().split('\n').count();
    let at = at
        .or(last_kept.map(|(_, f)| shift(f.span.end)))
        .unwrap_or(line_count - removed);

    debug!(
        moved_start = moved.start,
        moved_end = moved.end,
        dest,
        at,
        "planned in-place move"
    );

    Ok(EditPlan::InPlace(DocumentEdit {
        removals: vec![moved],
        insertion: Some(Insertion {
            at,
            text: span_text(doc.text(), moved),
        }),
    }))
}

/// Duplicate the selected frames at `dest` in the same document.
pub fn plan_copy_within(doc: &Document, sources: &PositionSet, dest: usize) -> Result<EditPlan> {
    let index = doc.indexed()?;
    sources.validate(index.len(), Role::Source)?;
    let insertion = insertion_into(doc, &index, sources, doc, &index, dest)?;

    Ok(EditPlan::InPlace(DocumentEdit {
        removals: Vec::new(),
        insertion: Some(insertion),
    }))
}

/// Insert the selected frames of `source` at `dest` in `destination`, and for
/// [`Transfer::Move`] remove them from `source`.
pub fn plan_transfer(
    source: &Document,
    sources: &PositionSet,
    destination: &Document,
    dest: usize,
    transfer: Transfer,
) -> Result<EditPlan> {
    let src_index = source.indexed()?;
    sources.validate(src_index.len(), Role::Source)?;

    let dest_index = destination.index();
    let insertion = insertion_into(source, &src_index, sources, destination, &dest_index, dest)?;

    debug!(
        dest,
        at = insertion.at,
        dest_frames = dest_index.len(),
        ?transfer,
        "planned cross-document transfer"
    );

    let source_edit = match transfer {
        Transfer::Move => Some(DocumentEdit {
            removals: frame_spans(&src_index, sources),
            insertion: None,
        }),
        Transfer::Copy => None,
    };

    Ok(EditPlan::Transfer {
        source: source_edit,
        destination: DocumentEdit {
            removals: Vec::new(),
            insertion: Some(insertion),
        },
    })
}

/// Insertion of the selected frames of `source` before frame `dest` of
/// `destination`; `dest` one past the last frame appends after it.
fn insertion_into(
    source: &Document,
    src_index: &FrameIndex,
    sources: &PositionSet,
    destination: &Document,
    dest_index: &FrameIndex,
    dest: usize,
) -> Result<Insertion> {
    range::validate_position(dest, dest_index.len() + 1, Role::Destination)?;
    require_closed(source, sources.iter().filter_map(|pos| src_index.get(pos).map(|f| (pos, f))))?;

    // a document without frames takes the payload at its very top.
    let at = match (dest_index.get(dest), dest_index.last()) {
        (Some(frame), _) => frame.span.start,
        (None, Some(last)) => {
            require_closed(destination, Some((dest_index.len(), last)))?;
            last.span.end
        }
        (None, None) => 0,
    };
    debug_assert!(at <= destination.text().split('\n').count());

    let text = sources
        .iter()
        .filter_map(|pos| src_index.get(pos))
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Insertion { at, text })
}

/// Fail with `Unterminated` on the first frame that runs to end of input.
fn require_closed<'a>(
    doc: &Document,
    frames: impl IntoIterator<Item = (usize, &'a Frame)>,
) -> Result<()> {
    match frames.into_iter().find(|(_, f)| !f.closed) {
        Some((position, _)) => Err(FrameError::Unterminated {
            path: doc.path().to_path_buf(),
            position,
        }),
        None => Ok(()),
    }
}

fn frame_spans(index: &FrameIndex, sources: &PositionSet) -> Vec<LineSpan> {
    sources
        .iter()
        .filter_map(|pos| index.get(pos))
        .map(|f| f.span)
        .collect()
}

fn span_text(text: &str, span: LineSpan) -> String {
    text.split('\n')
        .skip(span.start)
        .take(span.len())
        .collect::<Vec<_>>()
        .join("\n")
}
