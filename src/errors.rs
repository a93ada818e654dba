/*!
 * Error types for the svg-standalone application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the embedding of a single document
#[derive(Error, Debug)]
pub enum EmbedError {
    /// The script referenced by `xlink:href` could not be read
    #[error("Failed to read embedded script {path:?}: {source}")]
    ScriptRead {
        /// Full path of the script file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The `xlink:href` value is an absolute or rooted path
    #[error("Embedded script {name:?} must be relative to the artwork directory")]
    ScriptOutsideSource {
        /// Filename as written in the artwork
        name: String,
    },
}

/// Errors reported by configuration validation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No suffix would make the output overwrite a same-named input
    #[error("Output suffix must not be empty")]
    EmptySuffix,

    /// Suffix that would move the output into another directory
    #[error("Output suffix must not contain a path separator: {0}")]
    SuffixWithSeparator(String),

    /// Output directory resolving to the input directory
    #[error("Input and output directories must differ: {0:?}")]
    SameDirectories(PathBuf),
}
