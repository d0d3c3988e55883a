//! Name analysis module.
//!
//! Binds every identifier occurrence in the AST to the symbol of its
//! declaration. This is the prerequisite for type analysis:
//!
//! - Builds nested lexical scopes (globals, function bodies, `if`/`while` blocks)
//! - Records each declaration as a symbol with its declared type
//! - Reports undeclared and multiply declared identifiers
//! - Rejects variables declared with a non-storable type
//!
//! The resulting [`name_analysis::NameAnalysis`] owns the tree, the symbols
//! and the type interner, and is consumed by the type checker.

pub mod name_analysis;
pub mod symbols;

#[cfg(test)]
mod tests;
