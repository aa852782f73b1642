//! Stdin-driven AFL++ target for the frame scanner and planner.
//!
//! Input layout: byte 0 picks the source frame (modulo the frame count),
//! byte 1 picks the destination (modulo the frame count plus one), and the
//! rest is the document, decoded lossily as UTF-8. Each input is scanned,
//! moved in place and deleted from, with the frame count checked after
//! every edit.
//!
//! ```bash
//! cargo afl build --release --features afl_fuzz --bin moveframe_afl_scan
//! cargo afl fuzz -i fuzz/afl/in -o fuzz/afl/out target/release/moveframe_afl_scan
//! ```
//!
//! A failed assertion unwinds, which AFL++ would not count as a crash, so
//! `main` turns any panic into `abort()`.

use std::io::Read;

use moveframe::FrameError;
use moveframe::document::Document;
use moveframe::frame::{Frame, FrameIndex};
use moveframe::mutate;
use moveframe::plan::{self, EditPlan};
use moveframe::range::PositionSet;

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

fn check_frames(frames: &[Frame], line_count: usize) {
    let mut prev_end = 0usize;
    for f in frames {
        assert!(f.span.start <= f.span.end, "invalid span: {:?}", f.span);
        assert!(f.span.end <= line_count, "span out of bounds (lines={line_count}): {:?}", f.span);
        assert!(f.span.start >= prev_end, "overlapping spans at {:?}", f.span);
        assert!(
            (f.span.start..f.span.end).contains(&f.open_line),
            "opening line outside span: {f:?}"
        );
        prev_end = f.span.end;
    }
}

fn run_one_input(data: &[u8]) {
    if data.len() < 2 || data.len() > MAX_INPUT_LEN {
        return;
    }

    // the first two bytes pick the source and destination positions.
    let (selector, body) = data.split_at(2);
    let src = String::from_utf8_lossy(body).to_string();
    let line_count = src.split('\n').count();

    let index = FrameIndex::from_text(&src);
    check_frames(index.frames(), line_count);
    if index.is_empty() {
        return;
    }

    let n = index.len();
    let from = selector[0] as usize % n + 1;
    let dest = selector[1] as usize % (n + 1) + 1;
    let Ok(positions) = PositionSet::parse(&from.to_string()) else {
        return;
    };
    let doc = Document::new("fuzz.tex", src.as_str());

    // a planned in-place move must keep the frame count; the planner
    // refuses moves that an unterminated frame would swallow.
    match plan::plan_move_within(&doc, &positions, dest) {
        Ok(EditPlan::InPlace(edit)) => {
            let out = mutate::apply_to_text(&src, &edit).unwrap();
            let after = FrameIndex::from_text(&out);
            check_frames(after.frames(), out.split('\n').count());
            assert_eq!(after.len(), n, "move changed frame count");
        }
        Ok(EditPlan::Unchanged) => assert_eq!(from, dest),
        Ok(EditPlan::Transfer { .. }) => unreachable!("in-place move planned a transfer"),
        Err(FrameError::Unterminated { .. }) => assert!(index.frames().iter().any(|f| !f.closed)),
        Err(e) => panic!("unexpected planning error: {e}"),
    }

    // a delete must drop exactly the selected frame.
    if let EditPlan::InPlace(edit) = plan::plan_delete(&doc, &positions).unwrap() {
        let out = mutate::apply_to_text(&src, &edit).unwrap();
        assert_eq!(FrameIndex::from_text(&out).len(), n - 1, "delete miscounted");
    }
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
