//! Type model for semantic analysis.
//!
//! This module defines the universe of Crona types and the interning
//! factory that keeps exactly one canonical handle per type shape:
//!
//! - Basic types (`int`, `bool`, `byte`, `void`)
//! - Array types with their declared size
//! - Function types (formal types and return type)
//! - The error type, used as a poison marker for already-reported problems
//!
//! Because every shape is interned, comparing two [`types::Type`] handles
//! with `==` is structural type equality.

pub mod types;
