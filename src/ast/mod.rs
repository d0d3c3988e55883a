//! AST (Abstract Syntax Tree) module
//! Contains the parsed tree that the semantic passes walk.
//!
//! Submodules:
//! - ast: Program root, declarations, identifiers and node identity
//! - expressions: Expression nodes and operator classification
//! - statements: Statement nodes and function declarations
//! - types: Syntactic type annotations
//! - builder: Node construction with fresh identities

pub mod ast;
pub mod builder;
pub mod expressions;
pub mod statements;
pub mod types;
