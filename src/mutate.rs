//! Apply a [`DocumentEdit`] to a line stream.
//!
//! Pure functions: the complete new text is produced or an error is
//! returned, nothing in between. Lines are split and joined on `\n` only,
//! so every byte outside the edit is preserved.

use crate::error::{FrameError, Result};
use crate::plan::DocumentEdit;
use crate::scan::split_lines;

/// Remove `edit.removals` (descending, so earlier offsets stay valid), then
/// splice in the insertion.
pub fn apply<'a>(lines: &[&'a str], edit: &'a DocumentEdit) -> Result<Vec<&'a str>> {
    let mut out = lines.to_vec();

    let mut removals = edit.removals.clone();
    removals.sort_by(|a, b| b.start.cmp(&a.start));
    let mut floor = usize::MAX;
    for span in &removals {
        if span.end > out.len() || span.end > floor || span.start > span.end {
            return Err(FrameError::StaleEdit {
                line: span.end,
                line_count: lines.len(),
            });
        }
        out.drain(span.start..span.end);
        floor = span.start;
    }

    if let Some(ins) = &edit.insertion {
        if ins.at > out.len() {
            return Err(FrameError::StaleEdit {
                line: ins.at,
                line_count: out.len(),
            });
        }
        out.splice(ins.at..ins.at, ins.text.split('\n'));
    }

    Ok(out)
}

/// [`apply`] over the text of a whole document.
pub fn apply_to_text(text: &str, edit: &DocumentEdit) -> Result<String> {
    let lines = split_lines(text);
    Ok(apply(&lines, edit)?.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameIndex, LineSpan};
    use crate::plan::Insertion;

    #[test]
    fn removals_apply_from_the_bottom_up() {
        let edit = DocumentEdit {
            removals: vec![LineSpan::new(0, 1), LineSpan::new(2, 4)],
            insertion: None,
        };
        assert_eq!(apply_to_text("a\nb\nc\nd\ne", &edit).unwrap(), "b\ne");
    }

    #[test]
    fn insertion_offset_is_after_removals() {
        let edit = DocumentEdit {
            removals: vec![LineSpan::new(0, 1)],
            insertion: Some(Insertion {
                at: 2,
                text: "x\ny".to_string(),
            }),
        };
        assert_eq!(apply_to_text("a\nb\nc\nd", &edit).unwrap(), "b\nc\nx\ny\nd");
    }

    #[test]
    fn delete_then_reinsert_is_identity() {
        let text = "\\documentclass{beamer}\n\
% keep me\n\
\\begin{frame}{A}\n\
\\end{frame}\n\
\n\
\\frame{\\titlepage}\n";
        let index = FrameIndex::from_text(text);
        let frame = index.get(1).unwrap();

        let removed = apply_to_text(
            text,
            &DocumentEdit {
                removals: vec![frame.span],
                insertion: None,
            },
        )
        .unwrap();
        assert!(!removed.contains("keep me"));

        let restored = apply_to_text(
            &removed,
            &DocumentEdit {
                removals: Vec::new(),
                insertion: Some(Insertion {
                    at: frame.span.start,
                    text: frame.text.clone(),
                }),
            },
        )
        .unwrap();
        assert_eq!(restored, text);
    }

    #[test]
    fn stale_edits_fail_without_output() {
        let edit = DocumentEdit {
            removals: vec![LineSpan::new(3, 9)],
            insertion: None,
        };
        let err = apply_to_text("a\nb", &edit).unwrap_err();
        assert!(matches!(err, FrameError::StaleEdit { line: 9, line_count: 2 }));

        let edit = DocumentEdit {
            removals: Vec::new(),
            insertion: Some(Insertion {
                at: 5,
                text: "x".to_string(),
            }),
        };
        assert!(apply_to_text("a\nb", &edit).is_err());
    }

    #[test]
    fn overlapping_removals_are_rejected() {
        let edit = DocumentEdit {
            removals: vec![LineSpan::new(0, 3), LineSpan::new(2, 4)],
            insertion: None,
        };
        assert!(matches!(
            apply_to_text("a\nb\nc\nd\ne", &edit),
            Err(FrameError::StaleEdit { .. })
        ));
    }
}
