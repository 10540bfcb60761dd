//! vlab Engine - Orchestration layer
//!
//! Wraps the command core in a [`Lab`] session: per-command boundary
//! logging, rendered feedback lines, bounded command history, presets and
//! a queue for commands arriving from outside the operator's keyboard.

pub mod commands;
pub mod config;
pub mod lab;
pub mod presets;
pub mod queue;
pub mod report;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use config::LabConfig;
pub use lab::{CommandOutcome, Lab, LabSnapshot};
pub use presets::{example_command, find_preset, presets_for, Preset, PresetValues};
pub use queue::{CommandQueue, QueuedCommand};
pub use report::render_feedback;
