//! Examples command
//!
//! Usage: vlab examples [--domain <ID>] [--run]

use clap::Args;

use vlab_core::{DomainId, ExError};
use vlab_engine::example_command;

use super::{finish, open_lab, print_outcome, SessionArgs};

#[derive(Debug, Args)]
pub struct ExamplesArgs {
    /// Run the example for the active domain instead of listing
    #[arg(long)]
    pub run: bool,
}

/// Execute examples command
pub fn execute(session: &SessionArgs, args: ExamplesArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.run {
        let mut lab = open_lab(session)?;
        let outcome = lab
            .run_command(example_command(lab.active()))
            .map_err(|e| ExError::from(e).with_op("run_command"))?;
        print_outcome(session, &outcome);
        return finish(session, &lab);
    }

    let domains: Vec<DomainId> = match session.domain {
        Some(domain) => vec![domain],
        None => DomainId::ALL.to_vec(),
    };
    for domain in domains {
        println!("{:<6} {}", domain.as_str(), example_command(domain));
    }
    Ok(())
}
