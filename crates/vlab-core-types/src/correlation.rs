//! Command correlation
//!
//! A lab session receives text from the operator's keyboard, from voice
//! transcripts, from command generators and from script files. Each run of
//! that text is tagged with a [`RequestId`] and the [`CommandSource`] it
//! came from so its boundary log events can be matched up afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one command run. Time-ordered when generated here,
/// opaque when supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Adopt an identifier minted elsewhere, e.g. by a voice front end.
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a command's text came from. Every source takes the same
/// parse and execute path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSource {
    /// Typed by the operator
    Operator,
    /// Transcript forwarded from voice capture
    Voice,
    /// Emitted by an automated command generator
    Generator,
    /// Read from a script file
    Script,
}

impl CommandSource {
    pub const ALL: [CommandSource; 4] = [
        CommandSource::Operator,
        CommandSource::Voice,
        CommandSource::Generator,
        CommandSource::Script,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandSource::Operator => "operator",
            CommandSource::Voice => "voice",
            CommandSource::Generator => "generator",
            CommandSource::Script => "script",
        }
    }
}

impl std::fmt::Display for CommandSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommandSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CommandSource::ALL
            .into_iter()
            .find(|source| source.as_str() == wanted)
            .ok_or_else(|| format!("unknown command source '{}'", s))
    }
}

/// Identity of one command run as it passes through the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub source: CommandSource,
}

impl RequestContext {
    /// Fresh id for text from `source`.
    pub fn new(source: CommandSource) -> Self {
        Self::with_request_id(RequestId::new(), source)
    }

    pub fn with_request_id(request_id: RequestId, source: CommandSource) -> Self {
        Self { request_id, source }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(CommandSource::Operator)
    }
}
