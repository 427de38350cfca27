//! fluentc - FTL message compiler and runtime resolver
//!
//! fluentc parses FTL localization files, works out which parameters and
//! selector variants each message depends on (following references between
//! messages and terms), expands the `select_<var>` authoring shorthand, and
//! resolves messages at runtime through a locale fallback chain that follows
//! a reactive current-locale signal.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Parser, reference analysis, hoisting and runtime resolution
//! - `issues`: Issue type definitions and reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
