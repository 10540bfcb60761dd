//! Engine-level commands that act on a whole lab session.

use vlab_core::errors::Result;
use vlab_core::DomainId;
use vlab_core_types::RequestContext;

use crate::lab::{CommandOutcome, Lab};
use crate::presets::Preset;

/// Session operations reachable without going through the text parser,
/// plus free-text commands themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Parse and execute free text.
    Run {
        text: String,
        context: RequestContext,
    },
    /// Accept the repair offered for a failed command.
    AcceptRepair { suggestion: String },
    /// Load a named preset into its domain.
    ApplyPreset { domain: DomainId, title: String },
    /// Make a domain active.
    Switch { to: DomainId },
    /// Restore the active domain's starter values.
    Reset,
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Command(Box<CommandOutcome>),
    PresetApplied(&'static Preset),
    Switched(DomainId),
    Reset(DomainId),
}

/// Apply an engine command to `lab`.
///
/// # Errors
///
/// `EmptyCommand` for blank text, `PresetNotFound` for unknown presets.
pub fn apply_engine_command(cmd: EngineCommand, lab: &mut Lab) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Run { text, context } => {
            let outcome = lab.run_command_with(&text, &context)?;
            Ok(EngineCommandResult::Command(Box::new(outcome)))
        }
        EngineCommand::AcceptRepair { suggestion } => {
            let outcome = lab.run_repair(&suggestion)?;
            Ok(EngineCommandResult::Command(Box::new(outcome)))
        }
        EngineCommand::ApplyPreset { domain, title } => {
            let preset = lab.apply_preset(domain, &title)?;
            Ok(EngineCommandResult::PresetApplied(preset))
        }
        EngineCommand::Switch { to } => {
            lab.switch_to(to);
            Ok(EngineCommandResult::Switched(lab.active()))
        }
        EngineCommand::Reset => {
            let domain = lab.active();
            lab.reset();
            Ok(EngineCommandResult::Reset(domain))
        }
    }
}
