//! Lightweight fuzz-style tests; no external fuzz harness required.

use moveframe::document::Document;
use moveframe::frame::{Frame, FrameIndex};
use moveframe::mutate;
use moveframe::plan::{self, EditPlan, Transfer};
use moveframe::range::PositionSet;

fn check_frames(frames: &[Frame], line_count: usize) {
    let mut prev_end = 0usize;
    for f in frames {
        assert!(f.span.start <= f.span.end, "invalid span: {:?}", f.span);
        assert!(
            f.span.end <= line_count,
            "span out of bounds (lines={line_count}): {:?}",
            f.span
        );
        assert!(f.span.start >= prev_end, "overlapping spans at {:?}", f.span);
        assert!(
            (f.span.start..f.span.end).contains(&f.open_line),
            "opening line outside span: {f:?}"
        );
        prev_end = f.span.end;
    }
}

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn gen_range(&mut self, hi: usize) -> usize {
        (self.next_u64() as usize) % hi
    }
}

fn gen_beamer_like(rng: &mut XorShift64, lines: usize) -> String {
    // restrict to lines the scanner cares about, so we hit interesting paths.
    const DICT: &[&str] = &[
        "\\begin{frame}{T}",
        "  \\begin{frame}[t]",
        "\\end{frame}",
        "\t\\end{frame}\r",
        "\\frame{\\titlepage}",
        "\\againframe{intro}",
        "% comment",
        "   %indented",
        "",
        "text",
        "\\section{S}",
    ];
    let mut out = Vec::with_capacity(lines);
    for _ in 0..lines {
        out.push(DICT[rng.gen_range(DICT.len())]);
    }
    out.join("\n")
}

/// Frames of a document in which every frame is closed, built from blocks
/// separated by filler lines.
fn gen_balanced(rng: &mut XorShift64, frames: usize) -> String {
    const FILLER: &[&str] = &["", "text", "% loose", "\\againframe{x}", "\\section{S}"];
    let mut out: Vec<String> = Vec::new();
    for k in 0..frames {
        for _ in 0..rng.gen_range(3) {
            out.push(FILLER[rng.gen_range(FILLER.len())].to_string());
        }
        for _ in 0..rng.gen_range(2) {
            out.push("% lead".to_string());
        }
        if rng.gen_range(3) == 0 {
            out.push(format!("\\frame{{\\f{k}}}"));
        } else {
            out.push(format!("\\begin{{frame}}{{F{k}}}"));
            if rng.gen_range(4) == 0 {
                out.push("\\begin{frame}{nested}".to_string());
                out.push("\\end{frame}".to_string());
            }
            out.push("body".to_string());
            out.push("\\end{frame}".to_string());
        }
    }
    out.push(String::new());
    out.join("\n")
}

fn sorted_titles(text: &str) -> Vec<String> {
    let mut v: Vec<String> = FrameIndex::from_text(text)
        .iter()
        .map(|(_, f)| f.title())
        .collect();
    v.sort();
    v
}

#[test]
fn fuzz_scan_random_inputs_total_and_in_bounds() {
    // keep cases bounded so this doesn't slow down normal `cargo test` too much.
    let mut rng = XorShift64::new(0xC0FFEE);
    for _case in 0..2_000 {
        let n = rng.gen_range(80);
        let input = gen_beamer_like(&mut rng, n);
        let index = FrameIndex::from_text(&input);
        check_frames(index.frames(), input.split('\n').count());

        // only the last frame can run to end of input.
        let frames = index.frames();
        if let Some((_, head)) = frames.split_last() {
            assert!(head.iter().all(|f| f.closed), "{input:?}");
        }
    }
}

#[test]
fn fuzz_delete_then_reinsert_is_identity() {
    let mut rng = XorShift64::new(0xBEEF);
    for _case in 0..500 {
        let n = rng.gen_range(60);
        let input = gen_beamer_like(&mut rng, n);
        let doc = Document::new("fuzz.tex", input.as_str());
        let index = doc.index();
        if index.is_empty() {
            continue;
        }
        let pos = rng.gen_range(index.len()) + 1;
        let frame = index.get(pos).unwrap();

        let EditPlan::InPlace(edit) =
            plan::plan_delete(&doc, &PositionSet::parse(&pos.to_string()).unwrap()).unwrap()
        else {
            panic!("delete must plan in place");
        };
        let removed = mutate::apply_to_text(&input, &edit).unwrap();
        let restored = mutate::apply_to_text(
            &removed,
            &plan::DocumentEdit {
                removals: Vec::new(),
                insertion: Some(plan::Insertion {
                    at: frame.span.start,
                    text: frame.text.clone(),
                }),
            },
        )
        .unwrap();
        assert_eq!(restored, input);
    }
}

#[test]
fn fuzz_moves_conserve_frames() {
    let mut rng = XorShift64::new(0x5EED);
    for _case in 0..500 {
        let count = rng.gen_range(8) + 1;
        let input = gen_balanced(&mut rng, count);
        let doc = Document::new("fuzz.tex", input.as_str());
        let before = sorted_titles(&input);
        assert_eq!(before.len(), count, "{input:?}");

        let first = rng.gen_range(count) + 1;
        let last = first + rng.gen_range(count - first + 1);
        let sources = PositionSet::parse(&format!("{first}-{last}")).unwrap();
        let dest = rng.gen_range(count + 1) + 1;

        match plan::plan_move_within(&doc, &sources, dest).unwrap() {
            EditPlan::InPlace(edit) => {
                let out = mutate::apply_to_text(&input, &edit).unwrap();
                check_frames(
                    FrameIndex::from_text(&out).frames(),
                    out.split('\n').count(),
                );
                assert_eq!(sorted_titles(&out), before, "{first}-{last} -> {dest}: {input:?}");
            }
            EditPlan::Unchanged => assert!(first == last && first == dest),
            other => panic!("unexpected plan {other:?}"),
        }

        // moving into a copy of itself through the cross-document path.
        let other = Document::new("other.tex", input.as_str());
        let EditPlan::Transfer {
            source: Some(src_edit),
            destination,
        } = plan::plan_transfer(&doc, &sources, &other, dest, Transfer::Move).unwrap()
        else {
            panic!("expected a move transfer");
        };
        let new_src = mutate::apply_to_text(&input, &src_edit).unwrap();
        let new_dst = mutate::apply_to_text(&input, &destination).unwrap();
        let moved = last - first + 1;
        assert_eq!(sorted_titles(&new_src).len(), count - moved);
        assert_eq!(sorted_titles(&new_dst).len(), count + moved);
    }
}
