use std::{
    cmp,
    fmt::{Display, Formatter, Result as FormatResult},
    io,
    path::PathBuf,
};
use pest::error::{Error as PestError, LineColLocation};
use rabe_bn::FieldError;
use thiserror::Error;
use crate::utils::policy::Rule as PolicyRule;

/// Simple, generic Error raised by the scheme provider, composed of a String
#[derive(Clone, PartialEq, Debug)]
pub struct SchemeError {
    details: String,
    unsatisfied: bool,
}

impl SchemeError {
    /// Creates a new Error
    pub fn new(msg: &str) -> SchemeError {
        SchemeError { details: msg.to_string(), unsatisfied: false }
    }

    /// The key's attributes do not satisfy the ciphertext policy. Decryption
    /// ran to completion and simply has no plaintext to return.
    pub fn policy_not_satisfied(msg: &str) -> SchemeError {
        SchemeError { details: msg.to_string(), unsatisfied: true }
    }

    pub fn is_policy_not_satisfied(&self) -> bool {
        self.unsatisfied
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

impl Display for SchemeError {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "{}", self.details)
    }
}

impl std::error::Error for SchemeError {}

impl From<PestError<PolicyRule>> for SchemeError {
    fn from(error: PestError<PolicyRule>) -> Self {
        let column = match error.line_col.to_owned() {
            LineColLocation::Pos((_, col)) => col,
            LineColLocation::Span((_, start_col), (_, end_col)) => cmp::max(start_col, end_col),
        };
        SchemeError::new(
            format!("policy syntax error at column {}", column).as_ref()
        )
    }
}

impl From<FieldError> for SchemeError {
    fn from(error: FieldError) -> Self {
        match error {
            FieldError::InvalidSliceLength => SchemeError::new("FieldError::InvalidSliceLength"),
            FieldError::InvalidU512Encoding => SchemeError::new("FieldError::InvalidU512Encoding"),
            FieldError::NotMember => SchemeError::new("FieldError::NotMember"),
        }
    }
}

impl From<String> for SchemeError {
    fn from(error: String) -> Self {
        SchemeError { details: error, unsatisfied: false }
    }
}

/// The measurement phase a failure occurred in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Construct,
    Setup,
    KeyGen,
    Encrypt,
    Decrypt,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        let name = match self {
            Phase::Construct => "construct",
            Phase::Setup => "setup",
            Phase::KeyGen => "keygen",
            Phase::Encrypt => "encrypt",
            Phase::Decrypt => "decrypt",
        };
        f.write_str(name)
    }
}

/// Where in a sweep something happened; enough to reproduce it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunContext {
    pub scheme: String,
    pub curve: String,
    pub attributes: Option<usize>,
    pub iteration: Option<usize>,
}

impl RunContext {
    pub fn new(scheme: &str, curve: &str) -> Self {
        RunContext {
            scheme: scheme.to_string(),
            curve: curve.to_string(),
            attributes: None,
            iteration: None,
        }
    }

    pub fn with_attributes(mut self, attributes: usize) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_iteration(mut self, iteration: usize) -> Self {
        self.iteration = Some(iteration);
        self
    }
}

impl Display for RunContext {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(f, "scheme={} curve={}", self.scheme, self.curve)?;
        if let Some(attributes) = self.attributes {
            write!(f, " attributes={}", attributes)?;
        }
        if let Some(iteration) = self.iteration {
            write!(f, " iteration={}", iteration)?;
        }
        Ok(())
    }
}

/// Errors surfaced by the benchmark harness.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("unsupported scheme variant: {0}")]
    UnsupportedVariant(String),
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),
    #[error("{phase} failed ({context}): {source}")]
    CryptoOperationFailed {
        phase: Phase,
        context: RunContext,
        source: SchemeError,
    },
    #[error("decrypted plaintext does not match the original ({context})")]
    CorrectnessMismatch { context: RunContext },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("artifact {} is missing or malformed: {reason}", .path.display())]
    ArtifactMissingOrMalformed { path: PathBuf, reason: String },
    #[error("i/o error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("rendering failed: {0}")]
    Render(String),
}
