#![allow(clippy::module_inception)]

//! Semantic analysis for the Crona language.
//!
//! Two passes run over a parsed [`ast::ast::Program`]: name analysis binds
//! identifiers to declarations, then type checking assigns a type to every
//! node and reports violations of the typing rules. A program that passes
//! both is safe to hand to later stages.

use std::fmt::{self, Display};

use crate::{
    ast::ast::Program,
    errors::errors::Failure,
    name_analysis::name_analysis::NameAnalysis,
    type_checker::type_checker::TypeAnalysis,
};

pub mod ast;
pub mod errors;
pub mod name_analysis;
pub mod type_checker;
pub mod types;

/// Source position: line then column, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(pub u32, pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0, 0)
    }

    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn col(&self) -> u32 {
        self.1
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

/// Options shared by both passes.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Maximum number of diagnostics kept per pass. Reports past the limit
    /// still fail the pass.
    pub error_limit: Option<usize>,
}

/// Runs name analysis and type checking over `program`.
pub fn check(program: Program) -> Result<TypeAnalysis, Failure> {
    check_with_config(program, &Config::default())
}

#[tracing::instrument(skip_all)]
pub fn check_with_config(program: Program, config: &Config) -> Result<TypeAnalysis, Failure> {
    let name_analysis = NameAnalysis::build_with_config(program, config)?;
    TypeAnalysis::build_with_config(name_analysis, config)
}

#[cfg(test)]
mod tests {
    use super::Position;

    #[test]
    fn test_position_display() {
        assert_eq!(Position(4, 17).to_string(), "4:17");
        assert_eq!(Position::null().line(), 0);
    }
}
