//! Type checking module.
//!
//! This module performs static type checking on a name-resolved AST. It
//! assigns a type to every node while:
//!
//! - Enforcing the typing rule of each statement and expression kind
//! - Reporting one diagnostic per genuine violation
//! - Suppressing cascades through the error (poison) type
//! - Checking `return` statements against the enclosing function's type
//!
//! The computed types are kept in a write-once node-type table that later
//! stages query through [`type_checker::TypeAnalysis`].

pub mod expr;
pub mod node_types;
pub mod type_checker;
