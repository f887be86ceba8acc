//! Trellis - declarative route trees for Axum.
//!
//! This facade crate re-exports `trellis-core` through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```

pub extern crate trellis_core;

// Re-export everything from trellis-core at the top level for convenience.
pub use trellis_core::*;

/// Unified prelude - import everything with `use trellis::prelude::*`.
pub mod prelude {
    pub use trellis_core::prelude::*;
}
