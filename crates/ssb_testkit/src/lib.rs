//! # SSB Testkit
//!
//! Test utilities for the SSB template compiler.
//!
//! This crate provides:
//! - Template directory fixtures
//! - Property-based template generators using proptest
//! - Hex helpers for byte-level container checks
//! - Fault-injecting output sinks
//! - Container test vectors for both formats
//!
//! ## Usage
//!
//! ```rust
//! use ssb_testkit::prelude::*;
//!
//! let dir = TemplateDir::new();
//! dir.write("index.html", "Hi {{name}}!");
//! assert!(dir.path().join("index.html").exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod golden;
pub mod sinks;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::golden::*;
    pub use crate::sinks::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use golden::*;
pub use sinks::*;
pub use vectors::*;
