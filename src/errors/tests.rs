//! Unit tests for error handling.
//!
//! This module contains tests for diagnostic types and the diagnostic sink.

use crate::ast::ast::NodeId;
use crate::errors::errors::{DiagnosticSink, Error, ErrorImpl, Failure, InternalError};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(ErrorImpl::MathOperand, Position(3, 9));

    assert_eq!(error.get_error_name(), "MathOperand");
    assert_eq!(error.kind(), &ErrorImpl::MathOperand);
}

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::EmptyReturn, Position(42, 5));

    assert_eq!(error.get_position().line(), 42);
    assert_eq!(error.get_position().col(), 5);
}

#[test]
fn test_error_display() {
    let error = Error::new(ErrorImpl::IfCondition, Position(2, 4));

    assert_eq!(
        error.to_string(),
        "2:4 ***ERROR*** non-bool expression used as an if condition"
    );
}

#[test]
fn test_error_display_with_fields() {
    let error = Error::new(
        ErrorImpl::BadReturn {
            expected: "int".to_string(),
            received: "bool".to_string(),
        },
        Position(1, 1),
    );

    assert_eq!(error.get_error_name(), "BadReturn");
    assert_eq!(
        error.to_string(),
        "1:1 ***ERROR*** bad return value: expected `int`, received `bool`"
    );
}

#[test]
fn test_argument_count_error() {
    let error = Error::new(
        ErrorImpl::ArgumentCount {
            expected: 2,
            received: 3,
        },
        Position(0, 0),
    );

    assert_eq!(error.get_error_name(), "ArgumentCount");
    assert!(error.to_string().contains("expected 2, received 3"));
}

#[test]
fn test_sink_starts_clean() {
    let sink = DiagnosticSink::new();

    assert!(!sink.has_error());
    assert!(sink.diagnostics().is_empty());
    assert_eq!(sink.total(), 0);
}

#[test]
fn test_sink_records_in_order() {
    let mut sink = DiagnosticSink::new();
    sink.report(ErrorImpl::WriteVoid, Position(1, 2));
    sink.report(ErrorImpl::ReadFn, Position(3, 4));

    assert!(sink.has_error());
    let names: Vec<&str> = sink.diagnostics().iter().map(|e| e.get_error_name()).collect();
    assert_eq!(names, vec!["WriteVoid", "ReadFn"]);
}

#[test]
fn test_sink_limit_keeps_flag_and_counts() {
    let mut sink = DiagnosticSink::with_limit(Some(1));
    sink.report(ErrorImpl::WriteVoid, Position(1, 2));
    sink.report(ErrorImpl::WriteArray, Position(2, 2));
    sink.report(ErrorImpl::WriteFn, Position(3, 2));

    assert!(sink.has_error());
    assert_eq!(sink.diagnostics().len(), 1);
    assert_eq!(sink.suppressed(), 2);
    assert_eq!(sink.total(), 3);
}

#[test]
fn test_sink_zero_limit_still_fails() {
    let mut sink = DiagnosticSink::with_limit(Some(0));
    sink.report(ErrorImpl::EmptyReturn, Position(1, 1));

    assert!(sink.has_error());
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn test_internal_error_display() {
    let error = InternalError::UnsetNodeType(NodeId(17));

    assert_eq!(error.to_string(), "type of node #17 queried before it was checked");
}

#[test]
fn test_failure_diagnostics() {
    let rejected = Failure::Rejected(vec![Error::new(ErrorImpl::ArrayIndex, Position(1, 1))]);
    let internal: Failure = InternalError::NodeTypeAlreadySet(NodeId(2)).into();

    assert_eq!(rejected.diagnostics().len(), 1);
    assert!(internal.diagnostics().is_empty());
    assert_eq!(
        rejected.to_string(),
        "semantic analysis failed with 1 diagnostic(s)"
    );
}
