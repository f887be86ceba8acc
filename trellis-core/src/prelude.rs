//! Trellis prelude: import everything a blueprint module needs with a
//! single `use`.
//!
//! ```ignore
//! use trellis_core::prelude::*;
//!
//! #[derive(Default)]
//! struct Users;
//!
//! impl Blueprint for Users {
//!     fn ident(&self) -> &str {
//!         "Users"
//!     }
//!
//!     fn action(&self) -> Option<Action> {
//!         Some(Action::named("users.index"))
//!     }
//! }
//! ```

// ── Blueprint surface ───────────────────────────────────────────────────

pub use crate::blueprint::{key_of, Action, Blueprint, Variable, Verb};
pub use crate::scanner::{AutoScanner, Catalog, RegisterMode};

// ── Registration ────────────────────────────────────────────────────────

pub use crate::registrar::{ActionRef, Endpoint, Registrar, Router, Scope};
pub use crate::sequences::{SequenceEntry, Sequences};

// ── Backends ────────────────────────────────────────────────────────────

pub use crate::axum_backend::{AxumBackend, Handlers, Middlewares};
pub use crate::table::{RouteRecord, RouteTable};

// ── Configuration and errors ────────────────────────────────────────────

pub use crate::config::{ConfigError, GroupNameMode, TrellisConfig};
pub use crate::context::{Context, TraceFrame};
pub use crate::error::RegisterError;
