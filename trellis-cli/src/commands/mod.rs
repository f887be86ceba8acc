//! Command implementations for the `trellis` CLI.
//!
//! Each submodule corresponds to a top-level CLI command.

/// Blueprint scaffolding, `trellis generate <name>`.
///
/// Writes a blueprint skeleton into the configured blueprint directory,
/// creating nested directories for path-qualified names and keeping
/// `mod.rs` declarations up to date.
pub mod generate;

/// Blueprint listing, `trellis routes`.
///
/// Static source parsing of the blueprint directory to list declared
/// blueprints with their identifiers, verbs and actions.
pub mod routes;

/// Shared template helpers and code templates.
///
/// Provides string utilities (`to_snake_case`, `to_pascal_case`, `render`)
/// and the blueprint skeleton template.
pub mod templates;
