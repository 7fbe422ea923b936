//! MacroChef command-line host
//!
//! Loads catalogues from disk, resolves recipe configs through
//! `macrochef_common` and writes the resulting contexts as JSON.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
