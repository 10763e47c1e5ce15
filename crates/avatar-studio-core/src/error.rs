//! Error types for store queries and configuration.

use thiserror::Error;

/// Any failure reported by the hosted store. Callers treat every variant the
/// same way; the variants exist for logs.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("{table}: request failed: {source}")]
    Transport {
        table: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{table}: store returned HTTP {status}: {body}")]
    Status {
        table: String,
        status: u16,
        body: String,
    },

    #[error("{table}: response could not be decoded: {message}")]
    Decode { table: String, message: String },

    #[error("{table}: expected exactly one row")]
    NotSingleRow { table: String },

    #[error("{table}: invalid request url: {message}")]
    Url { table: String, message: String },
}

impl QueryError {
    /// Table the failed query targeted.
    pub fn table(&self) -> &str {
        match self {
            QueryError::Transport { table, .. }
            | QueryError::Status { table, .. }
            | QueryError::Decode { table, .. }
            | QueryError::NotSingleRow { table }
            | QueryError::Url { table, .. } => table,
        }
    }
}

/// Configuration failures. All of these happen at startup, never per request.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid public url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("configuration could not be loaded: {0}")]
    Load(#[from] config::ConfigError),

    #[error("STUDIO_SERVICE_ROLE_KEY is not set; the privileged store client cannot be built")]
    MissingServiceRoleKey,
}
