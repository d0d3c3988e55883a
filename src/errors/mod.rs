//! Error types and error handling for semantic analysis.
//!
//! This module defines the diagnostics the passes report and the state
//! that collects them. It includes:
//!
//! - Positioned diagnostics, one per genuine violation in the input program
//! - The diagnostic sink with its monotonic "checking failed" flag
//! - Internal errors that signal a defect in the checker itself
//! - The failure value returned by the pass entry points

pub mod errors;

#[cfg(test)]
mod tests;
