//! # Zoetrope Parser
//!
//! Parser for the Zoetrope graph description language: a small line-oriented
//! DSL for directed graphs.
//!
//! ```text
//! graph: TD
//! # client-facing path
//! client[Web Client] -> gateway[API Gateway]
//! gateway -> users -> db[Postgres]
//! ```
//!
//! The first significant line is a `graph` header with an optional flow
//! direction (`TD`, `TB`, or `LR`); the remaining lines declare nodes and
//! edge chains. `#` starts a line comment.
//!
//! ## Usage
//!
//! ```
//! # use zoetrope_parser::{parse, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let source = "graph:\nclient -> server";
//!     let graph = parse(source)?;
//!     assert_eq!(graph.node_count(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;

mod parser;
#[cfg(test)]
mod parser_tests;
mod span;

pub use span::Span;

use zoetrope_core::semantic::Graph;

use crate::error::ParseError;

/// Parse diagram source text into a semantic graph.
///
/// # Arguments
///
/// * `source` - The diagram source code to parse
///
/// # Errors
///
/// Returns a [`ParseError`] carrying one diagnostic per problem found; the
/// parser keeps going after the first bad line so all problems surface in a
/// single pass.
///
/// # Example
///
/// ```
/// # use zoetrope_parser::{parse, error::ParseError};
/// fn main() -> Result<(), ParseError> {
///     let graph = parse("graph: LR\na[Input] -> b[Output]")?;
///     assert_eq!(graph.edge_count(), 1);
///     Ok(())
/// }
/// ```
pub fn parse(source: &str) -> Result<Graph, ParseError> {
    parser::parse_source(source)
}
