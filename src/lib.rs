pub mod document;
pub mod error;
pub mod frame;
pub mod listing;
pub mod mutate;
pub mod plan;
pub mod range;
pub mod scan;

pub use error::{FrameError, Result};

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use document::Document;
use plan::{EditPlan, Transfer};
use range::PositionSet;

/// What to do with the frames of the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Delete,
    Move,
    Copy,
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Delete => "delete",
            Action::Move => "move",
            Action::Copy => "copy",
        }
    }
}

/// One invocation against one input document (and optionally one output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub input: PathBuf,
    pub action: Action,

    /// Source position token (`N` or `N-M`).
    pub from: Option<String>,

    /// Destination position token (`N`).
    pub to: Option<String>,

    /// Destination document; `None` edits the input in place.
    pub output: Option<PathBuf>,

    /// Emit listings as JSON.
    pub json: bool,
}

impl Request {
    pub fn new(input: impl Into<PathBuf>, action: Action) -> Self {
        Self {
            input: input.into(),
            action,
            from: None,
            to: None,
            output: None,
            json: false,
        }
    }

    pub fn positions(mut self, token: impl Into<String>) -> Self {
        self.from = Some(token.into());
        self
    }

    pub fn destination(mut self, token: impl Into<String>) -> Self {
        self.to = Some(token.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

/// Options controlling how edited documents are written on disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// If true, compute every change but write nothing.
    pub dry_run: bool,
}

/// A user-facing result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(String),
    Deleted {
        positions: String,
        document: String,
    },
    Moved {
        positions: String,
        to: usize,
        document: String,
    },
    Copied {
        positions: String,
        to: usize,
        document: String,
    },
    Inserted {
        positions: String,
        to: usize,
        document: String,
    },
    Removed {
        positions: String,
        document: String,
    },
    Unchanged,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Listed(text) => f.write_str(text),
            Outcome::Deleted {
                positions,
                document,
            } => write!(f, "Deleted frame(s) {positions} from {document}"),
            Outcome::Moved {
                positions,
                to,
                document,
            } => write!(f, "Moved frame(s) {positions} to position {to} in {document}"),
            Outcome::Copied {
                positions,
                to,
                document,
            } => write!(f, "Copied frame(s) {positions} to position {to} in {document}"),
            Outcome::Inserted {
                positions,
                to,
                document,
            } => write!(f, "Inserted frame(s) {positions} at position {to} in {document}"),
            Outcome::Removed {
                positions,
                document,
            } => write!(f, "Removed frame(s) {positions} from {document}"),
            Outcome::Unchanged => f.write_str("Nothing to do: source and destination are the same"),
        }
    }
}

/// The complete new text of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: PathBuf,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub outcomes: Vec<Outcome>,

    /// In write order; at most one entry per document.
    pub changes: Vec<Change>,
}

/// Run one request: validate, plan, produce every new text, then write each
/// affected document once (unless `opts.dry_run`).
///
/// Any error is returned before the first write.
pub fn execute(request: &Request, opts: &WriteOptions) -> Result<Report> {
    if !request.input.exists() {
        return Err(FrameError::InputNotFound {
            path: request.input.clone(),
        });
    }
    let source = Document::load(&request.input)?;
    warn_unterminated(&source);

    let report = match request.action {
        Action::List => list(&source, request.json)?,
        Action::Delete => delete(&source, required(&request.from, "--from", Action::Delete)?)?,
        Action::Move => relocate(&source, request, Transfer::Move)?,
        Action::Copy => relocate(&source, request, Transfer::Copy)?,
    };

    if opts.dry_run {
        debug!(changes = report.changes.len(), "dry run, nothing written");
        return Ok(report);
    }
    for change in &report.changes {
        document::write_atomic(&change.path, &change.text)?;
    }
    Ok(report)
}

fn list(source: &Document, json: bool) -> Result<Report> {
    let text = if json {
        let listing = listing::FrameListing::from_document(source);
        // prettify JSON so it's easy to inspect / diff.
        serde_json::to_string_pretty(&listing)?
    } else {
        listing::render_text(source)
    };

    Ok(Report {
        outcomes: vec![Outcome::Listed(text)],
        changes: Vec::new(),
    })
}

fn delete(source: &Document, from: &str) -> Result<Report> {
    let positions = PositionSet::parse(from)?;
    let plan = plan::plan_delete(source, &positions)?;

    let outcome = Outcome::Deleted {
        positions: positions.label(),
        document: source.name(),
    };
    in_place_report(source, plan, outcome)
}

fn relocate(source: &Document, request: &Request, transfer: Transfer) -> Result<Report> {
    let from = required(&request.from, "--from", request.action)?;
    let to = required(&request.to, "--to", request.action)?;
    let positions = PositionSet::parse(from)?;
    let dest = range::parse_position(to)?;

    let cross = request
        .output
        .as_deref()
        .filter(|out| !document::same_document(out, source.path()));

    let Some(output) = cross else {
        let (plan, outcome) = match transfer {
            Transfer::Move => (
                plan::plan_move_within(source, &positions, dest)?,
                Outcome::Moved {
                    positions: positions.label(),
                    to: dest,
                    document: source.name(),
                },
            ),
            Transfer::Copy => (
                plan::plan_copy_within(source, &positions, dest)?,
                Outcome::Copied {
                    positions: positions.label(),
                    to: dest,
                    document: source.name(),
                },
            ),
        };
        return in_place_report(source, plan, outcome);
    };

    if !output.exists() {
        return Err(FrameError::MissingDestination {
            path: output.to_path_buf(),
        });
    }
    let destination = Document::load(output)?;
    warn_unterminated(&destination);
    let plan = plan::plan_transfer(source, &positions, &destination, dest, transfer)?;

    let EditPlan::Transfer {
        source: source_edit,
        destination: destination_edit,
    } = plan
    else {
        return Ok(unchanged());
    };

    let mut report = Report::default();
    report.changes.push(Change {
        path: destination.path().to_path_buf(),
        text: mutate::apply_to_text(destination.text(), &destination_edit)?,
    });
    report.outcomes.push(Outcome::Inserted {
        positions: positions.label(),
        to: dest,
        document: destination.name(),
    });

    if let Some(edit) = source_edit {
        report.changes.push(Change {
            path: source.path().to_path_buf(),
            text: mutate::apply_to_text(source.text(), &edit)?,
        });
        report.outcomes.push(Outcome::Removed {
            positions: positions.label(),
            document: source.name(),
        });
    }

    info!(
        from = %source.path().display(),
        to = %destination.path().display(),
        positions = %positions.label(),
        dest,
        "planned transfer"
    );
    Ok(report)
}

fn in_place_report(source: &Document, plan: EditPlan, outcome: Outcome) -> Result<Report> {
    let EditPlan::InPlace(edit) = plan else {
        return Ok(unchanged());
    };

    let text = mutate::apply_to_text(source.text(), &edit)?;
    if text == source.text() {
        return Ok(unchanged());
    }

    Ok(Report {
        outcomes: vec![outcome],
        changes: vec![Change {
            path: source.path().to_path_buf(),
            text,
        }],
    })
}

fn warn_unterminated(doc: &Document) {
    for (position, frame) in doc.index().iter().filter(|(_, f)| !f.closed) {
        warn!(
            path = %doc.path().display(),
            position,
            line = frame.open_line + 1,
            "frame has no matching \\end{{frame}}; it runs to end of input"
        );
    }
}

fn unchanged() -> Report {
    Report {
        outcomes: vec![Outcome::Unchanged],
        changes: Vec::new(),
    }
}

fn required<'a>(
    value: &'a Option<String>,
    name: &'static str,
    action: Action,
) -> Result<&'a str> {
    value.as_deref().ok_or(FrameError::MissingArgument {
        name,
        action: action.as_str(),
    })
}
