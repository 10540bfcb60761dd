//! Command queue for text arriving from outside the operator's keyboard
//!
//! Voice transcripts and generator output are buffered here and drained
//! one command at a time, each running to completion against the same
//! [`Lab`] before the next starts.

use std::collections::VecDeque;

use vlab_core::errors::Result;
use vlab_core_types::{CommandSource, RequestContext};

use crate::lab::{CommandOutcome, Lab};

#[derive(Debug, Clone)]
pub struct QueuedCommand {
    pub text: String,
    pub context: RequestContext,
}

impl QueuedCommand {
    pub fn new(text: impl Into<String>, source: CommandSource) -> Self {
        Self {
            text: text.into(),
            context: RequestContext::new(source),
        }
    }
}

/// FIFO of pending commands.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    pending: VecDeque<QueuedCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, source: CommandSource) {
        self.pending.push_back(QueuedCommand::new(text, source));
    }

    pub fn push_command(&mut self, command: QueuedCommand) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Run the oldest pending command, if any.
    pub fn run_next(&mut self, lab: &mut Lab) -> Option<Result<CommandOutcome>> {
        let command = self.pending.pop_front()?;
        Some(lab.run_command_with(&command.text, &command.context))
    }

    /// Run every pending command in arrival order. A failing command does
    /// not stop the ones behind it.
    pub fn drain_into(&mut self, lab: &mut Lab) -> Vec<Result<CommandOutcome>> {
        let mut results = Vec::with_capacity(self.pending.len());
        while let Some(result) = self.run_next(lab) {
            results.push(result);
        }
        results
    }
}

impl Extend<QueuedCommand> for CommandQueue {
    fn extend<I: IntoIterator<Item = QueuedCommand>>(&mut self, iter: I) {
        self.pending.extend(iter);
    }
}
