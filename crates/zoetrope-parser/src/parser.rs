//! Parser for Zoetrope graph source.
//!
//! The language is line-oriented: a `graph` header line followed by node
//! and edge statements, with `#` line comments. Parsing continues past a
//! bad line so one mistake does not hide the problems after it; all
//! diagnostics are collected into a single [`ParseError`].

use log::debug;
use winnow::{
    Parser,
    ascii::space0,
    combinator::{delimited, opt},
    error::{ContextError, ErrMode},
    token::{take_till, take_while},
};

use zoetrope_core::semantic::{Direction, Graph};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

/// Parse diagram source into a semantic graph.
pub(crate) fn parse_source(source: &str) -> Result<Graph, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut graph: Option<Graph> = None;

    let mut offset = 0usize;
    for raw_line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += raw_line.len();

        let line = raw_line.trim_end_matches(['\n', '\r']);
        let stmt = line.trim_start();
        if stmt.is_empty() || stmt.starts_with('#') {
            continue;
        }
        let stmt_start = line_start + (line.len() - stmt.len());

        match graph.as_mut() {
            None => {
                graph = Some(parse_header_line(stmt, stmt_start, &mut collector));
            }
            Some(graph) => parse_statement(stmt, stmt_start, graph, &mut collector),
        }
    }

    let graph = graph.unwrap_or_default();
    debug!(nodes = graph.node_count(), edges = graph.edge_count(); "Parsed graph source");
    collector.finish(graph)
}

/// Handle the first significant line, which must be the `graph` header.
///
/// On a missing or malformed header, records a diagnostic and recovers with
/// a default graph so the remaining statements still get checked.
fn parse_header_line(stmt: &str, base: usize, collector: &mut DiagnosticCollector) -> Graph {
    let mut rest = stmt;
    let at = |rest: &str| base + (stmt.len() - rest.len());

    match header.parse_next(&mut rest) {
        Ok(direction_word) => {
            // The header parser stops right after the direction keyword.
            let word_end = at(rest);
            let direction = match direction_word {
                None => Direction::default(),
                Some(word) => match Direction::from_keyword(word) {
                    Some(direction) => direction,
                    None => {
                        collector.push(
                            Diagnostic::error(format!("unknown flow direction `{word}`"))
                                .with_code(ErrorCode::E201)
                                .with_label(
                                    Span::new(word_end - word.len()..word_end),
                                    "not a direction",
                                )
                                .with_help("use `TD`, `TB`, or `LR`"),
                        );
                        Direction::default()
                    }
                },
            };

            let trailing = rest.trim_start();
            if !trailing.is_empty() {
                let pos = at(rest) + (rest.len() - trailing.len());
                collector.push(
                    Diagnostic::error("unexpected input after `graph` header")
                        .with_code(ErrorCode::E001)
                        .with_label(Span::new(pos..base + stmt.len()), "not part of the header"),
                );
            }

            Graph::new(direction)
        }
        Err(_) => {
            collector.push(
                Diagnostic::error("diagram source must start with a `graph` header")
                    .with_code(ErrorCode::E200)
                    .with_label(Span::new(base..base + stmt.len()), "expected `graph` here")
                    .with_help("open the diagram with a `graph:` line"),
            );

            // Recover: check this line as a statement against a default graph.
            let mut graph = Graph::default();
            parse_statement(stmt, base, &mut graph, collector);
            graph
        }
    }
}

/// Parse one statement line: a single node term or an edge chain
/// (`a -> b -> c`), declaring nodes and edges into the graph.
fn parse_statement(
    stmt: &str,
    base: usize,
    graph: &mut Graph,
    collector: &mut DiagnosticCollector,
) {
    let mut rest = stmt;
    let at = |rest: &str| base + (stmt.len() - rest.len());
    let line_end = base + stmt.len();

    let mut prev: Option<String> = None;
    loop {
        // Node term: identifier with an optional bracket label.
        let term_start = at(rest);
        let Ok(id) = identifier.parse_next(&mut rest) else {
            collector.push(
                Diagnostic::error("unexpected character in node term")
                    .with_code(ErrorCode::E001)
                    .with_label(
                        Span::new(term_start..char_end(stmt, term_start - base, base)),
                        "expected a node identifier",
                    ),
            );
            return;
        };

        let label = if rest.starts_with('[') {
            // Capture the bracket offset up front: a failed parse leaves
            // the cursor at the failure point, not the start.
            let bracket = at(rest);
            match node_label.parse_next(&mut rest) {
                Ok(label) => Some(label.to_string()),
                Err(_) => {
                    collector.push(
                        Diagnostic::error("node label is never closed")
                            .with_code(ErrorCode::E101)
                            .with_label(Span::new(bracket..bracket + 1), "label opened here")
                            .with_help("close the label with `]`"),
                    );
                    return;
                }
            }
        } else {
            None
        };

        graph.declare_node(id, label);
        if let Some(prev) = prev.take() {
            graph.add_edge(&prev, id);
        }
        prev = Some(id.to_string());

        let _ = spaces.parse_next(&mut rest);
        if rest.is_empty() {
            return;
        }

        // Anything after a term must be an arrow to the next term.
        let arrow_start = at(rest);
        if arrow.parse_next(&mut rest).is_err() {
            collector.push(
                Diagnostic::error("expected `->` after node term")
                    .with_code(ErrorCode::E100)
                    .with_label(
                        Span::new(arrow_start..char_end(stmt, arrow_start - base, base)),
                        "unexpected input",
                    )
                    .with_help("separate nodes with `->`"),
            );
            return;
        }
        let _ = spaces.parse_next(&mut rest);

        if rest.is_empty() {
            collector.push(
                Diagnostic::error("missing edge target after `->`")
                    .with_code(ErrorCode::E102)
                    .with_label(Span::new(arrow_start..line_end), "arrow has no target"),
            );
            return;
        }
    }
}

/// The `graph` header: keyword, optional `:`, optional direction keyword.
/// Stops right after the direction so the caller can span it precisely.
fn header<'src>(input: &mut &'src str) -> winnow::ModalResult<Option<&'src str>> {
    let _ = "graph".parse_next(input)?;
    // Keyword boundary: `graphite` is an identifier, not a header.
    if input.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    let _ = opt(':').parse_next(input)?;
    let _ = space0.parse_next(input)?;
    opt(identifier).parse_next(input)
}

/// A node identifier: letters, digits, and underscores.
fn identifier<'src>(input: &mut &'src str) -> winnow::ModalResult<&'src str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// A bracketed node label: `[` up to the matching `]` on the same line.
fn node_label<'src>(input: &mut &'src str) -> winnow::ModalResult<&'src str> {
    delimited('[', take_till(0.., |c| c == ']'), ']').parse_next(input)
}

/// The edge arrow.
fn arrow(input: &mut &str) -> winnow::ModalResult<()> {
    "->".void().parse_next(input)
}

/// Zero or more spaces or tabs.
fn spaces(input: &mut &str) -> winnow::ModalResult<()> {
    space0.void().parse_next(input)
}

/// End offset of the character starting at `pos` within `stmt`, as an
/// absolute offset. Falls back to a one-byte span at the end of input.
fn char_end(stmt: &str, pos: usize, base: usize) -> usize {
    let len = stmt[pos..].chars().next().map_or(1, char::len_utf8);
    base + pos + len
}
