//! Error types for the synthetic data engine

use thiserror::Error;

/// Errors surfaced by the engine and the dataset layer.
///
/// Every variant is fatal for the operation that produced it; the engine
/// never retries and never returns a partial population.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid engine parameters or reference statistics
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// A field is missing from a record, a dataset, or the reference table
    #[error("field access error: `{field}` not available ({context})")]
    FieldAccess { field: String, context: String },

    /// Malformed tabular data
    #[error("dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn field_access(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::FieldAccess {
            field: field.into(),
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::configuration("population_size must be at least 1");
        assert_eq!(
            err.to_string(),
            "configuration error: population_size must be at least 1"
        );

        let err = EngineError::field_access("cpu_utilization", "reference dataset header");
        assert!(err.to_string().contains("`cpu_utilization`"));
        assert!(err.to_string().contains("reference dataset header"));
    }
}
