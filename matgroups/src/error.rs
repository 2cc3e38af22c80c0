//! Top-level error type for the matgroups library
//!

use std::path::PathBuf;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model file could not be read from disk.
    #[error("could not read model file {1}: {0}")]
    ReadModel(#[source] std::io::Error, PathBuf),

    /// The model file was read but is not a valid model description.
    #[error("could not parse model file {1}: {0}")]
    ParseModel(#[source] serde_json::Error, PathBuf),

    /// A section assignment referenced a section the model does not define.
    #[error("instance {instance} references unknown section {section}")]
    UnknownSection {
        /// The instance owning the section assignment
        instance: String,
        /// The section name that could not be resolved
        section: String,
    },

    /// The requested instance does not exist in the model.
    #[error("instance {0} was not found in the model")]
    UnknownInstance(String),

    /// The output file could not be created.
    #[error("could not create output file {1}: {0}")]
    CreateOutput(#[source] std::io::Error, PathBuf),

    /// Writing the bulk-data document to its sink failed.
    #[error("could not write bulk-data document: {0}")]
    WriteDocument(#[source] std::io::Error),

    /// A display token could not be parsed back into a range.
    #[error("invalid set entry token: {0:?}")]
    InvalidToken(String),

    /// Loading or validating the configuration failed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// One or more self-test cases failed.
    #[error("{0} self-test case(s) failed")]
    SelfTest(usize),
}
