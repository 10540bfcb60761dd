//! Interactive command loop
//!
//! Usage: vlab repl
//!
//! Plain lines are lab commands. Lines starting with `:` control the
//! session: `:fix`, `:preset <TITLE>`, `:domain <ID>`, `:reset`,
//! `:history`, `:state`, `:help`, `:quit`.

use std::io::{BufRead, IsTerminal, Write};

use vlab_core::{DomainId, ExError};
use vlab_core_types::RequestContext;
use vlab_engine::report::FeedbackLine;
use vlab_engine::{apply_engine_command, EngineCommand, EngineCommandResult, Lab};

use super::{finish, open_lab, print_line, print_outcome, SessionArgs};

const HELP: &str = ":fix  :preset <TITLE>  :domain <ID>  :reset  :history  :state  :quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplInput {
    Engine(EngineCommand),
    History,
    State,
    Help,
    Quit,
    /// `:fix` with no pending suggestion, or an unknown `:` word
    Invalid(String),
}

/// Interpret a non-empty input line against the session.
pub fn interpret(line: &str, lab: &Lab, pending_fix: Option<&str>) -> ReplInput {
    let Some(meta) = line.strip_prefix(':') else {
        return ReplInput::Engine(EngineCommand::Run {
            text: line.to_string(),
            context: RequestContext::default(),
        });
    };

    let (word, rest) = meta
        .split_once(char::is_whitespace)
        .map_or((meta, ""), |(w, r)| (w, r.trim()));
    match word {
        "q" | "quit" | "exit" => ReplInput::Quit,
        "h" | "help" => ReplInput::Help,
        "history" => ReplInput::History,
        "state" => ReplInput::State,
        "reset" => ReplInput::Engine(EngineCommand::Reset),
        "fix" => match pending_fix {
            Some(suggestion) => ReplInput::Engine(EngineCommand::AcceptRepair {
                suggestion: suggestion.to_string(),
            }),
            None => ReplInput::Invalid("nothing to fix".to_string()),
        },
        "preset" if !rest.is_empty() => ReplInput::Engine(EngineCommand::ApplyPreset {
            domain: lab.active(),
            title: rest.to_string(),
        }),
        "domain" => match rest.parse::<DomainId>() {
            Ok(to) => ReplInput::Engine(EngineCommand::Switch { to }),
            Err(e) => ReplInput::Invalid(ExError::from(e).to_string()),
        },
        _ => ReplInput::Invalid(format!("unknown command :{}; try {}", word, HELP)),
    }
}

/// Execute repl command
pub fn execute(session: &SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut lab = open_lab(session)?;
    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut pending_fix: Option<String> = None;
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("vlab:{}> ", lab.active());
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match interpret(line, &lab, pending_fix.as_deref()) {
            ReplInput::Quit => break,
            ReplInput::Help => print_line(session, &FeedbackLine::hint(HELP)),
            ReplInput::History => {
                for (i, entry) in lab.history().iter().enumerate() {
                    print_line(session, &FeedbackLine::hint(format!("{}. {}", i + 1, entry)));
                }
            }
            ReplInput::State => println!("{}", lab.snapshot_json().map_err(ExError::from)?),
            ReplInput::Invalid(message) => print_line(session, &FeedbackLine::error(message)),
            ReplInput::Engine(cmd) => match apply_engine_command(cmd, &mut lab) {
                Ok(EngineCommandResult::Command(outcome)) => {
                    pending_fix = outcome.suggestion().map(str::to_string);
                    print_outcome(session, &outcome);
                }
                Ok(EngineCommandResult::PresetApplied(preset)) => print_line(
                    session,
                    &FeedbackLine::hint(format!("Loaded preset {} ({}).", preset.title, preset.subtitle)),
                ),
                Ok(EngineCommandResult::Switched(to)) => print_line(
                    session,
                    &FeedbackLine::hint(format!("Switched to {}.", to.label())),
                ),
                Ok(EngineCommandResult::Reset(_)) => print_line(
                    session,
                    &FeedbackLine::hint("Experiment reset to starter values."),
                ),
                Err(e) => print_line(session, &FeedbackLine::error(ExError::from(e).to_string())),
            },
        }
    }

    finish(session, &lab)
}
