//! Options controlling inference.
use std::env::{self, VarError};

use crate::ConfigError;

/// The environment variable read by [`RdfsConfig::from_env`]
/// to set the [`derived_schema`](RdfsConfig::derived_schema) flag.
pub const DERIVED_SCHEMA_VAR: &str = "SOPHIA_RDFS_DERIVED";

/// Options shared by [`ClosureIndex`](crate::closure::ClosureIndex),
/// [`RuleEngine`](crate::engine::RuleEngine),
/// [`InfStore`](crate::query::InfStore)
/// and [`StreamProcessor`](crate::stream::StreamProcessor).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RdfsConfig {
    derived_schema: bool,
}

impl RdfsConfig {
    /// Default configuration: schema triples are not derived.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration read from the environment.
    ///
    /// [`DERIVED_SCHEMA_VAR`] may be `true` or `false`; it defaults to `false` when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(DERIVED_SCHEMA_VAR) {
            Ok(value) => Self::from_env_value(Some(&value)),
            Err(VarError::NotPresent) => Self::from_env_value(None),
            Err(VarError::NotUnicode(value)) => Err(ConfigError(
                DERIVED_SCHEMA_VAR,
                value.to_string_lossy().into_owned(),
            )),
        }
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        let derived_schema = match value {
            None => false,
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError(DERIVED_SCHEMA_VAR, value.to_string()))?,
        };
        Ok(Self::new().with_derived_schema(derived_schema))
    }

    /// Whether schema-level triples are also inferred,
    /// i.e. the reflexive-transitive `rdfs:subClassOf` and `rdfs:subPropertyOf` triples,
    /// and the `rdfs:domain` and `rdfs:range` declarations used by a derivation.
    ///
    /// This is only relevant when the schema and the data live in the same store.
    pub fn derived_schema(&self) -> bool {
        self.derived_schema
    }

    /// Change the [`derived_schema`](Self::derived_schema) flag.
    pub fn with_derived_schema(mut self, derived_schema: bool) -> Self {
        self.derived_schema = derived_schema;
        self
    }
}
