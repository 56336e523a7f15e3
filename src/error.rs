//! Error handling for the sitebaker application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for sitebaker operations.
///
/// This enum represents all possible errors that can occur while collecting answers,
/// rendering the template tree and writing it into the destination directory.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while walking the template tree
    #[error("Failed to traverse template directory: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Represents errors in the template marker syntax
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Represents errors raised by the template engine while rendering
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    /// Represents errors that occur while parsing or merging the manifest
    #[error("Manifest error: {0}.")]
    ManifestError(String),

    #[error("Failed to parse JSON: {0}.")]
    JSONParseError(#[from] serde_json::Error),

    /// Represents invalid glob patterns in the template ignore file
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(#[from] globset::Error),

    /// Represents failures of the interactive terminal
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// Represents a failing dependency installation step
    #[error("Dependency installation failed: {0}.")]
    InstallError(String),

    /// The user chose to abort while resolving a conflict
    #[error("Aborted by user while resolving conflict in '{path}'.")]
    Aborted { path: String },
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::PromptError(err.to_string())
    }
}

/// Convenience type alias for Results with sitebaker's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
