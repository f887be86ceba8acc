pub mod axum_backend;
pub mod blueprint;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod registrar;
pub mod scanner;
pub mod sequences;
pub mod table;

pub use axum_backend::{AxumBackend, Handlers, Middlewares};
pub use blueprint::{key_of, Action, Blueprint, Variable, Verb};
pub use config::{ConfigError, GroupNameMode, TrellisConfig};
pub use context::{normalize, Context, TraceFrame};
pub use error::RegisterError;
pub use logging::init_tracing;
pub use registrar::{effective_middleware, ActionRef, Endpoint, Registrar, Router, Scope};
pub use scanner::{AutoScanner, Catalog, RegisterMode, ScannedEntry};
pub use sequences::{SequenceEntry, Sequences};
pub use table::{RouteRecord, RouteTable};

pub use axum;
