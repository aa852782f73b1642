use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use moveframe::{Action, Request, WriteOptions};

const EXAMPLES: &str = "\
Examples:
  moveframe lecture.tex --list                      # List all frames
  moveframe lecture.tex --from 5 --to 3             # Move frame 5 to position 3
  moveframe lecture.tex --from 3-5 --to 1           # Move frames 3-5 to position 1
  moveframe lecture.tex --from 4-12 --delete        # Delete frames 4-12
  moveframe a.tex -o b.tex --from 2-4 --to 1 --copy # Copy frames to another file";

/// Move, copy or delete beamer frames within a file or across files.
#[derive(Parser, Debug)]
#[command(name = "moveframe", version, after_help = EXAMPLES)]
struct Args {
    /// Source .tex file
    input: PathBuf,

    /// Frame number or range to act on (1-indexed, e.g. 5 or 3-5)
    #[arg(long = "from", value_name = "N|N-M")]
    from: Option<String>,

    /// Destination position (1-indexed)
    #[arg(long = "to", value_name = "N")]
    to: Option<String>,

    /// Destination file (defaults to in-place)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Copy mode: keep the original frames
    #[arg(long)]
    copy: bool,

    /// Move mode: remove frames from the source (the default)
    #[arg(long = "move")]
    move_frames: bool,

    /// Delete the selected frame(s)
    #[arg(long)]
    delete: bool,

    /// List all frames with their numbers
    #[arg(long)]
    list: bool,

    /// Print the listing as JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Print the resulting documents instead of writing them
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn action(&self) -> Action {
        if self.list {
            Action::List
        } else if self.delete {
            Action::Delete
        } else if self.copy && !self.move_frames {
            Action::Copy
        } else {
            Action::Move
        }
    }

    fn into_request(self) -> (Request, WriteOptions) {
        let request = Request {
            action: self.action(),
            input: self.input,
            from: self.from,
            to: self.to,
            output: self.output,
            json: self.json,
        };
        let opts = WriteOptions {
            dry_run: self.dry_run,
        };
        (request, opts)
    }
}

fn main() -> ExitCode {
    // logs go to stderr; stdout carries listings and results.
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let (request, opts) = Args::parse().into_request();

    match moveframe::execute(&request, &opts) {
        Ok(report) => {
            for outcome in &report.outcomes {
                println!("{outcome}");
            }
            if opts.dry_run {
                for change in &report.changes {
                    println!("--- {}", change.path.display());
                    println!("{}", change.text);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "request failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
