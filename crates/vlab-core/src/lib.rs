//! vlab Core - natural-language command core for five lab simulators
//!
//! This crate turns free-text operator commands into validated state
//! changes and sampled results for:
//! - RC charging circuits
//! - Ohm's-law I–V sweeps
//! - Strong-acid/strong-base titration
//! - Black-hole accretion-disk profiles
//! - VSEPR molecular geometry
//!
//! The two entry points are [`parse`] (text → actions + diagnostics) and
//! [`execute`] (actions → new state + series). Neither returns an error;
//! every parameter written by `execute` passes through its domain's
//! [`SafeEnvelope`].
//!
//! ```
//! use vlab_core::{execute, parse, LabState};
//!
//! let state = LabState::default();
//! let parsed = parse("double the resistance and plot current for 5 s", state.active);
//! let exec = execute(&parsed.actions, state);
//! assert_eq!(exec.state.rc.r, 2000.0);
//! assert!(exec.series.is_some());
//! ```

#[macro_use]
mod pattern;

pub mod actions;
pub mod classifier;
pub mod diagnostics;
pub mod domain;
pub mod envelope;
pub mod errors;
pub mod execute;
pub mod logging_facility;
pub mod parser;
pub mod repair;
pub mod sim;
pub mod state;
pub mod units;

// Re-export commonly used types
pub use actions::ParsedAction;
pub use classifier::{classify, Classification};
pub use diagnostics::{explain_failure, DiagnosticKind, FailureKind, FailureReport};
pub use domain::DomainId;
pub use envelope::SafeEnvelope;
pub use errors::{ExError, ExErrorKind, Result, VlabError};
pub use execute::{execute, execute_with, ActionReport, Effect, Execution, SamplingConfig};
pub use parser::{parse, ParseResult};
pub use sim::SampledSeries;
pub use state::LabState;
