//! sitebaker scaffolds static sites from a template tree.
//! It collects site metadata, derives a template context from it and writes
//! the rendered tree into the destination directory, resolving conflicts with
//! existing files and merging the `package.json` manifest.

/// Answer collection, interactive or preloaded from stdin
pub mod answers;

/// Command-line interface module for the sitebaker application
pub mod cli;

/// Conflict resolution for every file written to the destination
pub mod conflict;

/// Common constants used throughout the application
pub mod constants;

/// Template context derived from the answers
pub mod context;

/// Environment-derived default answers
pub mod defaults;

/// Error types and handling for the sitebaker application
pub mod error;

/// GitHub repository identifier parsing
pub mod github;

/// File selection over the template tree
/// Excludes default patterns and the ones listed in .sitebakerignore
pub mod ignore;

pub mod logger;

/// Manifest merge and dependency installation
pub mod manifest;

/// Core template processing orchestration
/// Runs the generation stages in order
pub mod pipeline;

/// User input and interaction handling
pub mod prompt;

/// Template rendering functionality
pub mod renderer;

/// Lexer for the `%{ }`, `%{= }` and `%{- }` markers
pub mod syntax;
