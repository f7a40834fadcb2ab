/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that terminate a sampling, collection, or mesh request.
///
/// Per-row mode-matching mismatches are not represented here; they are
/// logged and the offending row is dropped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required parameter is missing or parameters disagree with each other.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A query that must return rows returned none.
    #[error("empty result: {0}")]
    EmptyResult(String),
    /// Resolved rows disagree in number with the requested ids.
    #[error("inconsistent match in {context}: expected {expected}, found {found}")]
    InconsistentMatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
    /// The mesh could not be materialised.
    #[error("mesh build error: {0}")]
    MeshBuild(String),
    /// Store round trip failed; never retried here.
    #[cfg(feature = "database")]
    #[error("store error: {0}")]
    Store(#[from] tokio_postgres::Error),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn empty(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }
    pub fn mesh(msg: impl Into<String>) -> Self {
        Self::MeshBuild(msg.into())
    }
}
