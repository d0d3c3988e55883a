//! Unit tests for name analysis.
//!
//! This module contains tests for symbol binding, scoping and the
//! declaration diagnostics.

use super::{
    name_analysis::NameAnalysis,
    symbols::{SymbolKind, SymbolTable},
};
use crate::{
    ast::{
        ast::NodeId, builder::AstBuilder, expressions::ExprKind, statements::StmtKind,
        types::TypeNode,
    },
    errors::errors::Failure,
    types::types::Type,
    Config, Position,
};

fn ident_id(expr: &crate::ast::expressions::Expr) -> NodeId {
    match &expr.kind {
        ExprKind::Id(ident) => ident.id,
        other => panic!("Expected identifier, got {:?}", other),
    }
}

fn error_names(failure: &Failure) -> Vec<&str> {
    failure
        .diagnostics()
        .iter()
        .map(|e| e.get_error_name())
        .collect()
}

#[test]
fn test_global_use_binds_to_declaration() {
    let mut b = AstBuilder::new();
    let x_decl = b.global_var(TypeNode::Int, "x");
    let use_x = b.id("x");
    let use_id = ident_id(&use_x);
    let one = b.int_lit(1);
    let assign = b.assign_stmt(use_x, one);
    let main = b.global_fn(TypeNode::Void, "main", vec![], vec![assign]);
    let program = b.program(vec![x_decl, main]);

    let analysis = NameAnalysis::build(program).unwrap();
    let symbol = analysis.symbol_of(use_id).unwrap();

    assert_eq!(symbol.name, "x");
    assert_eq!(symbol.kind, SymbolKind::Var);
    assert_eq!(symbol.get_data_type(), Type::INT);
}

#[test]
fn test_function_symbol_has_function_type() {
    let mut b = AstBuilder::new();
    let a = b.var_decl(TypeNode::Int, "a");
    let flag = b.var_decl(TypeNode::Bool, "flag");
    let func = b.global_fn(TypeNode::Byte, "f", vec![a, flag], vec![]);
    let name_id = func.name().id;
    let program = b.program(vec![func]);

    let analysis = NameAnalysis::build(program).unwrap();
    let fn_type = analysis.symbol_of(name_id).unwrap().get_data_type();

    assert_eq!(
        analysis.types().as_function(fn_type),
        Some((&[Type::INT, Type::BOOL][..], Type::BYTE))
    );
}

#[test]
fn test_recursive_call_resolves() {
    let mut b = AstBuilder::new();
    let call = b.call_stmt("f", vec![]);
    let func = b.global_fn(TypeNode::Void, "f", vec![], vec![call]);
    let program = b.program(vec![func]);

    assert!(NameAnalysis::build(program).is_ok());
}

#[test]
fn test_undeclared_identifier() {
    let mut b = AstBuilder::new();
    b.at(3, 5);
    let y = b.id("y");
    let write = b.write(y);
    let main = b.global_fn(TypeNode::Void, "main", vec![], vec![write]);
    let program = b.program(vec![main]);

    let failure = NameAnalysis::build(program).unwrap_err();

    assert_eq!(error_names(&failure), vec!["UndeclaredIdentifier"]);
    assert_eq!(failure.diagnostics()[0].get_position(), &Position(3, 5));
}

#[test]
fn test_multiple_declaration_in_one_scope() {
    let mut b = AstBuilder::new();
    let first = b.global_var(TypeNode::Int, "x");
    let second = b.global_var(TypeNode::Bool, "x");
    let program = b.program(vec![first, second]);

    let failure = NameAnalysis::build(program).unwrap_err();

    assert_eq!(error_names(&failure), vec!["MultipleDeclaration"]);
}

#[test]
fn test_formal_and_local_share_a_scope() {
    let mut b = AstBuilder::new();
    let formal = b.var_decl(TypeNode::Int, "a");
    let local = b.local_var(TypeNode::Int, "a");
    let func = b.global_fn(TypeNode::Void, "f", vec![formal], vec![local]);
    let program = b.program(vec![func]);

    let failure = NameAnalysis::build(program).unwrap_err();

    assert_eq!(error_names(&failure), vec!["MultipleDeclaration"]);
}

#[test]
fn test_inner_block_shadows_outer_declaration() {
    let mut b = AstBuilder::new();
    let global = b.global_var(TypeNode::Int, "x");
    let inner_decl = b.local_var(TypeNode::Bool, "x");
    let inner_use = b.id("x");
    let inner_use_id = ident_id(&inner_use);
    let write_inner = b.write(inner_use);
    let cond = b.true_lit();
    let if_stmt = b.if_stmt(cond, vec![inner_decl, write_inner]);
    let outer_use = b.id("x");
    let outer_use_id = ident_id(&outer_use);
    let write_outer = b.write(outer_use);
    let main = b.global_fn(TypeNode::Void, "main", vec![], vec![if_stmt, write_outer]);
    let program = b.program(vec![global, main]);

    let analysis = NameAnalysis::build(program).unwrap();

    assert_eq!(
        analysis.symbol_of(inner_use_id).unwrap().get_data_type(),
        Type::BOOL
    );
    assert_eq!(
        analysis.symbol_of(outer_use_id).unwrap().get_data_type(),
        Type::INT
    );
}

#[test]
fn test_block_scope_ends_with_block() {
    let mut b = AstBuilder::new();
    let inner_decl = b.local_var(TypeNode::Int, "tmp");
    let cond = b.havoc();
    let while_stmt = b.while_stmt(cond, vec![inner_decl]);
    let after = b.id("tmp");
    let read = b.read(after);
    let main = b.global_fn(TypeNode::Void, "main", vec![], vec![while_stmt, read]);
    let program = b.program(vec![main]);

    let failure = NameAnalysis::build(program).unwrap_err();

    assert_eq!(error_names(&failure), vec!["UndeclaredIdentifier"]);
}

#[test]
fn test_void_variable_is_rejected_but_still_bound() {
    let mut b = AstBuilder::new();
    let bad = b.global_var(TypeNode::Void, "v");
    let use_v = b.id("v");
    let write = b.write(use_v);
    let main = b.global_fn(TypeNode::Void, "main", vec![], vec![write]);
    let program = b.program(vec![bad, main]);

    let (analysis, sink) = NameAnalysis::run(program, &Config::default());
    let names: Vec<&str> = sink.diagnostics().iter().map(|e| e.get_error_name()).collect();

    assert_eq!(names, vec!["BadVariableType"]);
    let (_, v) = analysis
        .symbols()
        .iter()
        .find(|(_, symbol)| symbol.name == "v")
        .unwrap();
    assert_eq!(v.get_data_type(), Type::ERROR);
}

#[test]
fn test_bad_array_types_are_rejected() {
    let mut b = AstBuilder::new();
    let void_array = b.global_var(TypeNode::array(TypeNode::Void, 2), "a");
    let empty_array = b.global_var(TypeNode::array(TypeNode::Int, 0), "b");
    let program = b.program(vec![void_array, empty_array]);

    let failure = NameAnalysis::build(program).unwrap_err();

    assert_eq!(error_names(&failure), vec!["BadVariableType", "BadVariableType"]);
}

#[test]
fn test_error_limit_applies_to_name_analysis() {
    let mut b = AstBuilder::new();
    let stmts: Vec<_> = (0..3)
        .map(|_| {
            let missing = b.id("missing");
            b.write(missing)
        })
        .collect();
    let main = b.global_fn(TypeNode::Void, "main", vec![], stmts);
    let program = b.program(vec![main]);

    let config = Config {
        error_limit: Some(2),
    };
    let failure = NameAnalysis::build_with_config(program, &config).unwrap_err();

    assert_eq!(failure.diagnostics().len(), 2);
}

#[test]
fn test_local_statement_declarations_bind() {
    let mut b = AstBuilder::new();
    let local = b.local_var(TypeNode::Byte, "c");
    let decl_id = match &local.kind {
        StmtKind::VarDecl(var) => var.name.id,
        _ => unreachable!(),
    };
    let main = b.global_fn(TypeNode::Void, "main", vec![], vec![local]);
    let program = b.program(vec![main]);

    let analysis = NameAnalysis::build(program).unwrap();

    assert_eq!(analysis.symbol_of(decl_id).unwrap().get_data_type(), Type::BYTE);
}

#[test]
fn test_symbol_table_scoping() {
    let mut table = SymbolTable::new();
    let outer = table
        .declare("x", SymbolKind::Var, Type::INT, Position(1, 1))
        .unwrap();
    table.enter_scope();
    assert_eq!(table.depth(), 1);
    let inner = table
        .declare("x", SymbolKind::Var, Type::BOOL, Position(2, 1))
        .unwrap();
    assert_eq!(table.lookup("x"), Some(inner));
    assert!(table
        .declare("x", SymbolKind::Var, Type::BYTE, Position(3, 1))
        .is_none());
    table.exit_scope();
    assert_eq!(table.lookup("x"), Some(outer));
    assert_eq!(table.len(), 2);

    // The global scope cannot be closed.
    table.exit_scope();
    assert_eq!(table.lookup("x"), Some(outer));
}

#[test]
fn test_bad_return_types_are_rejected() {
    let mut b = AstBuilder::new();
    b.at(1, 1);
    let empty = b.global_fn(TypeNode::array(TypeNode::Int, 0), "f", vec![], vec![]);
    b.at(2, 1);
    let of_void = b.global_fn(TypeNode::array(TypeNode::Void, 3), "g", vec![], vec![]);
    let unit = b.global_fn(TypeNode::Void, "h", vec![], vec![]);
    let program = b.program(vec![empty, of_void, unit]);

    let failure = NameAnalysis::build(program).unwrap_err();
    let positions: Vec<Position> = failure
        .diagnostics()
        .iter()
        .map(|e| *e.get_position())
        .collect();

    assert_eq!(error_names(&failure), vec!["BadReturnType", "BadReturnType"]);
    assert_eq!(positions, vec![Position(1, 1), Position(2, 1)]);
}

#[test]
fn test_array_return_type_is_accepted() {
    let mut b = AstBuilder::new();
    let func = b.global_fn(TypeNode::array(TypeNode::Byte, 2), "f", vec![], vec![]);
    let name_id = func.name().id;
    let program = b.program(vec![func]);

    let analysis = NameAnalysis::build(program).unwrap();
    let fn_type = analysis.symbol_of(name_id).unwrap().get_data_type();
    let (_, ret) = analysis.types().as_function(fn_type).unwrap();

    assert_eq!(analysis.types().as_array(ret), Some((Type::BYTE, 2)));
}
