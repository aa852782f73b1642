//! Frames and the frame index of one document snapshot.
//!
//! A `FrameIndex` is a pure function of the text it was built from. It is
//! never cached across an edit: callers rebuild it from the current text
//! whenever they need positions again.

mod span;
mod title;

pub use span::*;
pub use title::{NO_TITLE, frame_title};

use crate::scan;

/// One frame definition, including any comment lines absorbed above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub span: LineSpan,

    /// Line holding the opening marker (`\begin{frame}` or `\frame{`).
    pub open_line: usize,

    /// The span's lines joined with `\n`.
    pub text: String,

    /// False when input ended before the matching `\end{frame}`.
    pub closed: bool,
}

impl Frame {
    /// The frame text starting at the opening marker, without absorbed comments.
    pub fn opening_text(&self) -> &str {
        let mut rest = self.text.as_str();
        for _ in self.span.start..self.open_line {
            rest = rest.split_once('\n').map_or("", |(_, tail)| tail);
        }
        rest
    }

    pub fn title(&self) -> String {
        frame_title(self.opening_text())
    }
}

/// Frames of a document in document order, addressed by 1-indexed position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameIndex {
    frames: Vec<Frame>,
}

impl FrameIndex {
    pub fn from_text(text: &str) -> Self {
        Self {
            frames: scan::find_frames(text),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame at a 1-indexed `position`.
    pub fn get(&self, position: usize) -> Option<&Frame> {
        position
            .checked_sub(1)
            .and_then(|idx| self.frames.get(idx))
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate `(position, frame)` pairs, positions starting at 1.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Frame)> {
        self.frames.iter().enumerate().map(|(idx, f)| (idx + 1, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\\frame{\\titlepage}\n\
% intro\n\
% more\n\
\\begin{frame}{Intro}\n\
\\end{frame}\n";

    #[test]
    fn positions_are_one_indexed() {
        let index = FrameIndex::from_text(DOC);
        assert_eq!(index.len(), 2);
        assert!(index.get(0).is_none());
        assert_eq!(index.get(1).unwrap().span, LineSpan::new(0, 1));
        assert_eq!(index.get(2).unwrap().span, LineSpan::new(1, 5));
        assert!(index.get(3).is_none());

        let positions: Vec<usize> = index.iter().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn opening_text_skips_absorbed_comments() {
        let index = FrameIndex::from_text(DOC);
        let frame = index.get(2).unwrap();
        assert_eq!(frame.open_line, 3);
        assert!(frame.text.starts_with("% intro\n"));
        assert_eq!(frame.opening_text(), "\\begin{frame}{Intro}\n\\end{frame}");
        assert_eq!(frame.title(), "Intro");
    }

    #[test]
    fn commented_out_title_is_ignored() {
        let doc = "% \\begin{frame}{Old title}\n\\begin{frame}\n\\end{frame}";
        let index = FrameIndex::from_text(doc);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(1).unwrap().title(), NO_TITLE);
    }
}
