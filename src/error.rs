//! Error kinds for the translation pipeline.
//!
//! Every kind is fatal to the current invocation: the pipeline stops at the
//! first error and no output is produced.
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// source file unreadable (or output not writable)
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed interface in {path}: {reason}")]
    MalformedInterface { path: String, reason: String },

    #[error("malformed field in {path}: `{field}`")]
    MalformedField { path: String, field: String },

    #[error("not found interface for `{name}` (required by `{required_by}`)")]
    MissingDependency { name: String, required_by: String },

    #[error("cyclic dependency: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    /// Asked for a scheme that is neither primitive nor already emitted.
    /// Unreachable after a successful sort unless models were built by hand.
    #[error("cannot find scheme for type `{name}`")]
    UnknownType { name: String },

    #[error("interface `{name}` declared twice ({first} and {second})")]
    DuplicateModel { name: String, first: String, second: String },

    #[error("cannot express `{target}` relative to `{base}`")]
    UnrelatedPaths { base: String, target: String },

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid glob pattern `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io",
            Self::MalformedInterface { .. } => "malformed-interface",
            Self::MalformedField { .. } => "malformed-field",
            Self::MissingDependency { .. } => "missing-dependency",
            Self::CyclicDependency { .. } => "cyclic-dependency",
            Self::UnknownType { .. } => "unknown-type",
            Self::DuplicateModel { .. } => "duplicate-model",
            Self::UnrelatedPaths { .. } => "unrelated-paths",
            Self::Config { .. } => "config",
            Self::Glob { .. } => "glob",
        }
    }
}
