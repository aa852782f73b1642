//! Frame scanner.
//!
//! A single forward pass over the document's lines. Each frame definition
//! becomes a `Frame` whose span also covers the run of comment lines sitting
//! directly above its opening marker. The scanner is total: every input,
//! including unterminated frames, yields spans that are ordered,
//! non-overlapping and within bounds.

mod util;

pub use util::{LineKind, classify, split_lines};

use tracing::debug;

use crate::frame::{Frame, LineSpan};

/// Find every frame definition in `text`, in document order.
pub fn find_frames(text: &str) -> Vec<Frame> {
    let lines = split_lines(text);
    let mut frames = Vec::new();

    // lines below `floor` already belong to an earlier frame.
    let mut floor = 0usize;
    let mut i = 0usize;

    while i < lines.len() {
        let (end, closed) = match classify(lines[i]) {
            LineKind::Open => matching_close(&lines, i),
            LineKind::Shorthand => (i + 1, true),
            // \againframe and everything else
            _ => {
                i += 1;
                continue;
            }
        };

        if !closed {
            debug!(line = i + 1, "unterminated frame runs to end of input");
        }

        let start = absorb_comments(&lines, i, floor);
        frames.push(Frame {
            span: LineSpan::new(start, end),
            open_line: i,
            text: lines[start..end].join("\n"),
            closed,
        });

        floor = end;
        i = end;
    }

    debug!(frames = frames.len(), lines = lines.len(), "scanned frames");
    frames
}

/// Walk upwards from the opening marker over contiguous comment lines.
/// A blank or non-comment line, or the previous frame, stops the walk.
fn absorb_comments(lines: &[&str], open: usize, floor: usize) -> usize {
    let mut start = open;
    while start > floor && util::is_comment(lines[start - 1]) {
        start -= 1;
    }
    start
}

/// Exclusive end of the frame opened at `open`, and whether its depth got
/// back to zero. Nested `\begin{frame}` pairs stay inside the outer frame;
/// end of input closes whatever is still open.
fn matching_close(lines: &[&str], open: usize) -> (usize, bool) {
    let mut depth = 1usize;
    let mut end = open + 1;
    while end < lines.len() && depth > 0 {
        match classify(lines[end]) {
            LineKind::Open => depth += 1,
            LineKind::Close => depth -= 1,
            _ => {}
        }
        end += 1;
    }
    (end, depth == 0)
}
