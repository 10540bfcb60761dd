//! Lab session
//!
//! Owns the live [`LabState`], the last plotted series and the command
//! history. Every free-text command runs start to finish through
//! `parse` → `execute_with` under one `run_command` boundary:
//!
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure (only empty commands fail)

use serde::Serialize;
use std::time::Instant;
use uuid::Uuid;

use vlab_core::actions::ParsedAction;
use vlab_core::errors::{Result, VlabError};
use vlab_core::{
    execute_with, explain_failure, log_op_end, log_op_error, log_op_start, parse, DomainId,
    Execution, FailureReport, LabState, ParseResult, SampledSeries,
};
use vlab_core_types::{RequestContext, RequestId};

use crate::config::LabConfig;
use crate::presets::{find_preset, Preset};
use crate::report::{render_failure, render_feedback, FeedbackLine};

/// Everything one command produced.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutcome {
    pub request_id: RequestId,
    /// Trimmed command text
    pub command: String,
    pub parse: ParseResult,
    pub execution: Execution,
    pub feedback: Vec<FeedbackLine>,
    /// Present when no action was applied
    pub failure: Option<FailureReport>,
}

impl CommandOutcome {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Repaired command text offered by the failure explanation.
    pub fn suggestion(&self) -> Option<&str> {
        self.failure.as_ref().and_then(|f| f.suggestion.as_deref())
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct LabSnapshot<'a> {
    pub session_id: Uuid,
    pub state: &'a LabState,
    pub series: Option<&'a SampledSeries>,
    pub history: &'a [String],
}

#[derive(Debug, Clone)]
pub struct Lab {
    session_id: Uuid,
    config: LabConfig,
    state: LabState,
    series: Option<SampledSeries>,
    history: Vec<String>,
}

impl Default for Lab {
    fn default() -> Self {
        Self::new(LabConfig::default())
    }
}

impl Lab {
    pub fn new(config: LabConfig) -> Self {
        Self::with_state(config, LabState::default())
    }

    /// Start from an explicit state; out-of-envelope values are clamped.
    pub fn with_state(config: LabConfig, state: LabState) -> Self {
        Self {
            session_id: Uuid::now_v7(),
            config,
            state: state.clamped(),
            series: None,
            history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    pub fn state(&self) -> &LabState {
        &self.state
    }

    pub fn active(&self) -> DomainId {
        self.state.active
    }

    /// Series from the most recent plot, cleared by switch and reset.
    pub fn series(&self) -> Option<&SampledSeries> {
        self.series.as_ref()
    }

    /// Distinct commands, most recent first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run an operator-typed command.
    ///
    /// # Errors
    ///
    /// `EmptyCommand` when `text` is blank.
    pub fn run_command(&mut self, text: &str) -> Result<CommandOutcome> {
        self.run_command_with(text, &RequestContext::default())
    }

    /// Run a command from any source, recording it in history.
    ///
    /// # Errors
    ///
    /// `EmptyCommand` when `text` is blank.
    pub fn run_command_with(&mut self, text: &str, ctx: &RequestContext) -> Result<CommandOutcome> {
        self.run_logged(text, ctx, true)
    }

    /// Run a repaired command offered by a failure explanation. The
    /// repair is not added to history.
    ///
    /// # Errors
    ///
    /// `EmptyCommand` when `suggestion` is blank.
    pub fn run_repair(&mut self, suggestion: &str) -> Result<CommandOutcome> {
        let ctx = RequestContext::default();
        let mut outcome = self.run_logged(suggestion, &ctx, false)?;
        outcome.feedback.insert(
            0,
            FeedbackLine::hint(format!("Fixing command to: {}", outcome.command)),
        );
        Ok(outcome)
    }

    fn run_logged(
        &mut self,
        text: &str,
        ctx: &RequestContext,
        record: bool,
    ) -> Result<CommandOutcome> {
        let started = Instant::now();
        log_op_start!(
            "run_command",
            request_id = ctx.request_id.as_str(),
            source = ctx.source.as_str()
        );

        let outcome = self.run_impl(text, ctx, record).map_err(|e| {
            log_op_error!(
                "run_command",
                e.clone(),
                since = started,
                request_id = ctx.request_id.as_str()
            );
            e
        })?;

        log_op_end!(
            "run_command",
            since = started,
            request_id = ctx.request_id.as_str(),
            domain = self.state.active.as_str(),
            actions_len = outcome.parse.actions.len(),
            applied_len = outcome.execution.applied,
            samples_len = self.series.as_ref().map_or(0, SampledSeries::len)
        );

        Ok(outcome)
    }

    fn run_impl(
        &mut self,
        text: &str,
        ctx: &RequestContext,
        record: bool,
    ) -> Result<CommandOutcome> {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return Err(VlabError::EmptyCommand);
        }

        let mut feedback = Vec::new();
        if record {
            feedback.push(FeedbackLine::ok(format!("Command → {}", cleaned)));
            self.remember(cleaned);
        }

        let parsed = parse(cleaned, self.state.active);
        let execution = execute_with(&parsed.actions, self.state, &self.config.sampling);
        self.absorb(&execution);

        let failure = if execution.applied == 0 {
            let report = explain_failure(&parsed);
            feedback.extend(render_failure(&report));
            Some(report)
        } else {
            feedback.extend(render_feedback(&execution.reports));
            None
        };

        Ok(CommandOutcome {
            request_id: ctx.request_id.clone(),
            command: cleaned.to_string(),
            parse: parsed,
            execution,
            feedback,
            failure,
        })
    }

    fn absorb(&mut self, execution: &Execution) {
        self.state = execution.state;
        if let Some(series) = &execution.series {
            self.series = Some(series.clone());
        } else if execution.clears_series {
            self.series = None;
        }
    }

    fn remember(&mut self, cleaned: &str) {
        self.history.retain(|entry| entry != cleaned);
        self.history.insert(0, cleaned.to_string());
        self.history.truncate(self.config.history_limit);
    }

    /// Make `domain` active, as if the operator had switched labs.
    pub fn switch_to(&mut self, domain: DomainId) -> Execution {
        self.apply_actions(&[ParsedAction::Switch { to: domain }])
    }

    /// Restore the active domain to its starter values.
    pub fn reset(&mut self) -> Execution {
        self.apply_actions(&[ParsedAction::Reset])
    }

    /// Run already-parsed actions against the live state.
    pub fn apply_actions(&mut self, actions: &[ParsedAction]) -> Execution {
        let execution = execute_with(actions, self.state, &self.config.sampling);
        self.absorb(&execution);
        execution
    }

    /// Load a named preset into its domain and make that domain active.
    ///
    /// # Errors
    ///
    /// `PresetNotFound` when the domain has no preset with that title.
    pub fn apply_preset(&mut self, domain: DomainId, title: &str) -> Result<&'static Preset> {
        let started = Instant::now();
        log_op_start!("apply_preset", domain = domain.as_str(), title = title);

        let preset = find_preset(domain, title).map_err(|e| {
            log_op_error!("apply_preset", e.clone(), since = started);
            e
        })?;

        if self.state.active != domain {
            self.switch_to(domain);
        }
        preset.values.apply_to(&mut self.state);
        self.series = None;

        log_op_end!("apply_preset", since = started, domain = domain.as_str());
        Ok(preset)
    }

    pub fn snapshot(&self) -> LabSnapshot<'_> {
        LabSnapshot {
            session_id: self.session_id,
            state: &self.state,
            series: self.series.as_ref(),
            history: &self.history,
        }
    }

    /// Pretty JSON of [`Lab::snapshot`].
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn snapshot_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
