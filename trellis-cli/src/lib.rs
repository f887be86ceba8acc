//! # trellis-cli
//!
//! Command-line tool for working with Trellis blueprint trees.
//!
//! This crate provides the `trellis` binary with the following commands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `trellis generate <name>` | Generate a route blueprint skeleton in the blueprint directory |
//! | `trellis routes` | List blueprints declared in source, without running the application |
//!
//! Both commands read `trellis.yaml` (plus `TRELLIS_*` environment
//! variables) from the working directory to locate the blueprint
//! directory and pick up delimiter settings.
//!
//! ## Architecture
//!
//! The CLI is organized into command modules under [`commands`]:
//!
//! - [`commands::generate`]: blueprint scaffolding (`trellis generate`)
//! - [`commands::routes`]: blueprint listing (`trellis routes`)
//! - [`commands::templates`]: shared template helpers and code templates

pub mod commands;
