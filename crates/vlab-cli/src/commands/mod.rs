//! CLI subcommands and the session plumbing they share

pub mod examples;
pub mod presets;
pub mod repl;
pub mod run;
pub mod script;

use clap::Args;
use std::path::{Path, PathBuf};

use vlab_core::logging_facility;
use vlab_core::{DomainId, ExError};
use vlab_engine::report::{series_csv, FeedbackLine, Tone};
use vlab_engine::{CommandOutcome, Lab, LabConfig};

/// Flags accepted by every subcommand.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Domain active at start (rc, titr, ohm, vsepr, bh)
    #[arg(long, global = true)]
    pub domain: Option<DomainId>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the final state and series as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Write the final series as CSV
    #[arg(long, global = true, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Emit structured logs on stderr using the configured profile
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Load configuration, start logging if asked, and open a lab on the
/// requested domain.
pub fn open_lab(args: &SessionArgs) -> Result<Lab, Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => LabConfig::load(path).map_err(|e| ExError::from(e).with_op("load_config"))?,
        None => LabConfig::default(),
    };
    if args.verbose {
        logging_facility::init(config.log_profile);
    }

    let mut lab = Lab::new(config);
    if let Some(domain) = args.domain {
        lab.switch_to(domain);
    }
    Ok(lab)
}

/// Print one line with a tone marker. Under `--json` feedback goes to
/// stderr so stdout stays machine-readable.
pub fn print_line(args: &SessionArgs, line: &FeedbackLine) {
    let marker = match line.tone {
        Tone::Ok => "✓",
        Tone::Hint => "›",
        Tone::Error => "✗",
    };
    if args.json {
        eprintln!("{} {}", marker, line.text);
    } else {
        println!("{} {}", marker, line.text);
    }
}

pub fn print_outcome(args: &SessionArgs, outcome: &CommandOutcome) {
    for line in &outcome.feedback {
        print_line(args, line);
    }
}

/// Emit the session's final JSON snapshot and CSV export, if requested.
pub fn finish(args: &SessionArgs, lab: &Lab) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &args.csv {
        write_csv(path, lab)?;
    }
    if args.json {
        let json = lab.snapshot_json().map_err(ExError::from)?;
        println!("{}", json);
    }
    Ok(())
}

fn write_csv(path: &Path, lab: &Lab) -> Result<(), Box<dyn std::error::Error>> {
    let series = lab
        .series()
        .ok_or("no series to export; plot something first")?;
    std::fs::write(path, series_csv(series))?;
    Ok(())
}
