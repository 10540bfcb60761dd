//! Core types shared across vlab facilities
//!
//! This crate provides foundational types used by both the command core
//! and the engine's logging:
//!
//! - **Correlation types**: RequestId, CommandSource, RequestContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{CommandSource, RequestContext, RequestId};
