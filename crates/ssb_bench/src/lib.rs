//! Benchmark helpers for the SSB template compiler.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod utils;
