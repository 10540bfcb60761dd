use thiserror::Error;

/// Result type alias using VlabError
pub type Result<T> = std::result::Result<T, VlabError>;

/// Canonical error kind taxonomy
///
/// Parsing and executing commands never fail; these kinds cover the
/// surfaces around them (identifier lookups, configuration, I/O) and map to
/// stable codes for programmatic handling and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Lookup/Validation
    InvalidInput,
    UnknownDomain,
    UnknownShape,
    NotFound,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownDomain => "ERR_UNKNOWN_DOMAIN",
            ExErrorKind::UnknownShape => "ERR_UNKNOWN_SHAPE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Error as reported at the CLI and in `end_error` log events: a kind
/// with a stable code plus whatever context the failing surface knew.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    subject: Option<String>,
    message: String,
    candidates: Option<Vec<String>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            subject: None,
            message: String::new(),
            candidates: None,
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// What the operation was looking at: domain id, shape id, preset
    /// title or file path
    pub fn with_subject(mut self, id: impl Into<String>) -> Self {
        self.subject = Some(id.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the accepted values for a failed lookup
    pub fn with_candidates(mut self, ids: Vec<String>) -> Self {
        self.candidates = Some(ids);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Accepted values, populated on unknown-identifier lookups
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(subject) = &self.subject {
            write!(f, " ({})", subject)?;
        }
        if let Some(candidates) = &self.candidates {
            write!(f, " (expected one of: {})", candidates.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

/// Error taxonomy for vlab operations outside the parse/execute boundary
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VlabError {
    /// Domain identifier is not one of the five simulators
    #[error("Unknown domain: {value}")]
    UnknownDomain { value: String },

    /// Geometry identifier is not in the VSEPR table
    #[error("Unknown geometry shape: {value}")]
    UnknownShape { value: String },

    /// No preset with that title exists for the domain
    #[error("Preset not found: {title} (domain {domain})")]
    PresetNotFound { domain: String, title: String },

    /// Command text was empty after trimming
    #[error("Empty command")]
    EmptyCommand,

    /// Configuration could not be parsed or failed validation
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Reading or writing a file failed
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// JSON/TOML encoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<VlabError> for ExError {
    fn from(err: VlabError) -> Self {
        match err {
            VlabError::UnknownDomain { value } => ExError::new(ExErrorKind::UnknownDomain)
                .with_subject(value)
                .with_message("Unknown domain")
                .with_candidates(
                    crate::domain::DomainId::ALL
                        .iter()
                        .map(|d| d.as_str().to_string())
                        .collect(),
                ),

            VlabError::UnknownShape { value } => ExError::new(ExErrorKind::UnknownShape)
                .with_subject(value)
                .with_message("Unknown geometry shape")
                .with_candidates(
                    crate::sim::vsepr::ShapeId::ALL
                        .iter()
                        .map(|s| s.as_str().to_string())
                        .collect(),
                ),

            VlabError::PresetNotFound { domain, title } => ExError::new(ExErrorKind::NotFound)
                .with_subject(title)
                .with_message(format!("Preset not found for domain {}", domain)),

            VlabError::EmptyCommand => {
                ExError::new(ExErrorKind::InvalidInput).with_message("Empty command")
            }

            VlabError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            VlabError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_subject(path)
                .with_message(message),

            VlabError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to VlabError
impl From<serde_json::Error> for VlabError {
    fn from(err: serde_json::Error) -> Self {
        VlabError::Serialization {
            message: err.to_string(),
        }
    }
}
