use std::error::Error;

/// The error raised when building a [`ClosureIndex`](crate::closure::ClosureIndex) from a schema graph.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError<GE: Error + 'static, TE: Error + 'static> {
    /// The schema graph raised an error while being scanned
    #[error("Error from schema graph: {0}")]
    Graph(#[source] GE),
    /// A schema term could not be mapped into the term space
    #[error("Error from term space: {0}")]
    TermSpace(#[source] TE),
}

/// The error raised by an [`IndexedTermSpace`](crate::term_space::IndexedTermSpace)
/// when its index type can not represent any more terms.
#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("Term space overflow: {0} can not index more than {1} terms")]
pub struct IndexOverflow(pub &'static str, pub usize);

/// The error raised by [`RdfsConfig::from_env`](crate::config::RdfsConfig::from_env)
/// when an environment variable holds an invalid value.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{0} must be 'true' or 'false', got {1:?}")]
pub struct ConfigError(pub &'static str, pub String);
