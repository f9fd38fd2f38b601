use thiserror::Error;

/// Errors raised while building or rendering a compact host set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostlistError {
    #[error("empty hostname")]
    EmptyHostname,

    #[error("invalid hostname {0:?}: only letters, digits, '-', '.' and '_' are allowed")]
    InvalidHostname(String),

    #[error("invalid port in {0:?}")]
    InvalidPort(String),
}

/// Errors returned by the report renderers.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to condense results")]
    Hostlist(#[from] HostlistError),

    #[error("failed to write report")]
    Io(#[from] std::io::Error),
}

/// CLI-level failures.
#[derive(Debug, Error)]
pub enum FwctlError {
    #[error("failed to parse {source_name}: {message}")]
    InvalidInput {
        source_name: String,
        message: String,
    },

    #[error("config error: {0}")]
    ConfigError(String),
}
