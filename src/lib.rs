//! data-diff library
//!
//! Structural comparison of JSON, YAML and text data. The binary in
//! `main.rs` is a thin CLI over these modules.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod logging;
pub mod report;
pub mod source;
pub mod value;
