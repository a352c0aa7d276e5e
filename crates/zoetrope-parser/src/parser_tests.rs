//! Tests for the graph source parser.

use zoetrope_core::semantic::Direction;

use crate::{
    error::{ErrorCode, Severity},
    parse,
};

#[test]
fn test_minimal_graph() {
    let graph = parse("graph:\nA->B").unwrap();

    assert_eq!(graph.direction(), Direction::TopDown);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.edges()[0].from(), "A");
    assert_eq!(graph.edges()[0].to(), "B");
}

#[test]
fn test_edge_chain() {
    let graph = parse("graph:\nA->B->C").unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edges()[1].from(), "B");
    assert_eq!(graph.edges()[1].to(), "C");
}

#[test]
fn test_labels_and_spacing() {
    let graph = parse("graph: TD\nclient[Web Client] -> gateway[API Gateway]").unwrap();

    assert_eq!(graph.node("client").unwrap().label(), "Web Client");
    assert_eq!(graph.node("gateway").unwrap().label(), "API Gateway");
}

#[test]
fn test_label_added_by_later_mention() {
    let graph = parse("graph:\na -> b\na[Service A]").unwrap();

    assert_eq!(graph.node("a").unwrap().label(), "Service A");
    assert_eq!(graph.node_count(), 2);
}

#[test]
fn test_directions() {
    assert_eq!(
        parse("graph: LR\na->b").unwrap().direction(),
        Direction::LeftRight
    );
    assert_eq!(
        parse("graph TB\na->b").unwrap().direction(),
        Direction::TopDown
    );
    // Header without colon or direction.
    assert_eq!(
        parse("graph\na->b").unwrap().direction(),
        Direction::TopDown
    );
}

#[test]
fn test_comments_and_blank_lines() {
    let source = "graph:\n\n# the happy path\na -> b\n   # indented comment\nb -> c\n";
    let graph = parse(source).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_header_only_is_an_empty_graph() {
    let graph = parse("graph:\n").unwrap();
    assert!(graph.is_empty());
}

#[test]
fn test_standalone_node_declaration() {
    let graph = parse("graph:\norphan[All Alone]").unwrap();

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_unclosed_label_is_rejected() {
    let err = parse("graph:\napi[API Gateway -> db").unwrap_err();

    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E101));
    assert_eq!(diag.severity(), Severity::Error);
    assert!(diag.message().contains("never closed"));
    // The label points at the opening bracket.
    assert_eq!(diag.labels()[0].span().len(), 1);
}

#[test]
fn test_missing_edge_target() {
    let err = parse("graph:\na ->").unwrap_err();

    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E102));
}

#[test]
fn test_garbage_after_term() {
    let err = parse("graph:\na b").unwrap_err();

    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
}

#[test]
fn test_unexpected_character() {
    let err = parse("graph:\n-> b").unwrap_err();

    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E001));
}

#[test]
fn test_missing_header() {
    let err = parse("a -> b").unwrap_err();

    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
    // The offending line is still checked as a statement, so a valid
    // statement only reports the missing header.
    assert_eq!(err.diagnostics().len(), 1);
}

#[test]
fn test_unknown_direction() {
    let err = parse("graph: XY\na->b").unwrap_err();

    let diag = &err.diagnostics()[0];
    assert_eq!(diag.code(), Some(ErrorCode::E201));
    assert!(diag.message().contains("XY"));
    assert_eq!(diag.help(), Some("use `TD`, `TB`, or `LR`"));
}

#[test]
fn test_graphlike_identifier_is_not_a_header() {
    // `graphite` must not match the `graph` keyword.
    let err = parse("graphite -> coal").unwrap_err();
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
}

#[test]
fn test_multiple_errors_are_collected() {
    let err = parse("graph:\na ->\nb[oops\nc d").unwrap_err();

    let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(codes, [ErrorCode::E102, ErrorCode::E101, ErrorCode::E100]);
}

#[test]
fn test_error_spans_are_absolute() {
    let source = "graph:\napi[broken";
    let err = parse(source).unwrap_err();

    let span = err.diagnostics()[0].labels()[0].span();
    assert_eq!(&source[span.start()..span.end()], "[");
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn identifier_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,8}"
    }

    proptest! {
        #[test]
        fn chain_of_unique_ids_parses(ids in prop::collection::hash_set(identifier_strategy(), 2..8)) {
            let ids: Vec<_> = ids.into_iter().collect();
            let source = format!("graph:\n{}", ids.join(" -> "));

            let graph = parse(&source).unwrap();
            prop_assert_eq!(graph.node_count(), ids.len());
            prop_assert_eq!(graph.edge_count(), ids.len() - 1);
        }

        #[test]
        fn labels_round_trip(id in identifier_strategy(), label in "[a-zA-Z0-9 ]{1,20}") {
            prop_assume!(!label.trim().is_empty());
            let source = format!("graph:\n{id}[{label}]");

            let graph = parse(&source).unwrap();
            prop_assert_eq!(graph.node(&id).unwrap().label(), label.as_str());
        }
    }
}
