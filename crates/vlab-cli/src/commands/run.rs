//! Run command
//!
//! Usage: vlab run <COMMAND>... [--preset <TITLE>] [--domain <ID>] [--json]

use clap::Args;

use vlab_core::ExError;

use super::{finish, open_lab, print_line, print_outcome, SessionArgs};
use vlab_engine::report::FeedbackLine;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Commands to run in order; quote each one
    #[arg(required = true)]
    pub commands: Vec<String>,

    /// Load a preset of the active domain before the first command
    #[arg(long, value_name = "TITLE")]
    pub preset: Option<String>,
}

/// Execute run command
pub fn execute(session: &SessionArgs, args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut lab = open_lab(session)?;

    if let Some(title) = &args.preset {
        let preset = lab
            .apply_preset(lab.active(), title)
            .map_err(|e| ExError::from(e).with_op("apply_preset"))?;
        print_line(
            session,
            &FeedbackLine::hint(format!("Loaded preset {} ({}).", preset.title, preset.subtitle)),
        );
    }

    let mut failed = 0;
    for command in &args.commands {
        let outcome = lab
            .run_command(command)
            .map_err(|e| ExError::from(e).with_op("run_command"))?;
        if outcome.is_failure() {
            failed += 1;
        }
        print_outcome(session, &outcome);
    }

    finish(session, &lab)?;

    if failed > 0 {
        return Err(format!("{} of {} command(s) could not be applied", failed, args.commands.len()).into());
    }
    Ok(())
}
