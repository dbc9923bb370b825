//! Primary error enum for configuration composition flows.

use figment::Error as FigmentError;
use thiserror::Error;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while loading and composing configuration.
///
/// The merge engine itself never fails; every variant here originates from
/// the collaborators around it (document loading, profile selection and
/// command-line assignments).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BlendError {
    /// Error originating from a configuration document.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path of the document that failed to load.
        path: std::path::PathBuf,
        /// Underlying read or parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error while extracting values from a figment provider.
    #[error("Failed to gather configuration: {0}")]
    Gathering(#[from] Box<FigmentError>),

    /// A command-line assignment could not be parsed.
    #[error("Invalid configuration flag '{flag}': {message}")]
    InvalidFlag {
        /// Assignment exactly as supplied.
        flag: String,
        /// Explanation of what is wrong with it.
        message: String,
    },

    /// The requested profile is not defined under `profiles`.
    #[error("Unknown profile '{name}' (available: {available})")]
    UnknownProfile {
        /// Profile that was requested.
        name: String,
        /// Comma-separated list of the profiles that do exist.
        available: String,
    },

    /// Multiple errors occurred while composing configuration.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
