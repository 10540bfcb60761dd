//! Script command
//!
//! Usage: vlab script <FILE> [--apply-repairs]
//!
//! One command per line; blank lines and lines starting with `#` are
//! skipped.

use clap::Args;
use std::path::PathBuf;

use vlab_core::ExError;
use vlab_core_types::{CommandSource, RequestContext};

use super::{finish, open_lab, print_outcome, SessionArgs};

#[derive(Debug, Args)]
pub struct ScriptArgs {
    /// Script file to run
    pub file: PathBuf,

    /// Accept the suggested repair when a line can't be applied
    #[arg(long)]
    pub apply_repairs: bool,
}

/// Command lines of a script, in order.
pub fn script_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Execute script command
pub fn execute(session: &SessionArgs, args: ScriptArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.file)
        .map_err(|e| format!("cannot read {}: {}", args.file.display(), e))?;
    let mut lab = open_lab(session)?;

    let mut failed = 0;
    for line in script_lines(&text) {
        let ctx = RequestContext::new(CommandSource::Script);
        let outcome = lab
            .run_command_with(line, &ctx)
            .map_err(|e| ExError::from(e).with_op("run_command"))?;
        print_outcome(session, &outcome);

        if !outcome.is_failure() {
            continue;
        }
        match outcome.suggestion() {
            Some(suggestion) if args.apply_repairs => {
                let repaired = lab
                    .run_repair(suggestion)
                    .map_err(|e| ExError::from(e).with_op("run_repair"))?;
                print_outcome(session, &repaired);
                if repaired.is_failure() {
                    failed += 1;
                }
            }
            _ => failed += 1,
        }
    }

    finish(session, &lab)?;

    if failed > 0 {
        return Err(format!("{} script line(s) could not be applied", failed).into());
    }
    Ok(())
}
