//! Semantic graph model for parsed diagram source.
//!
//! This is the pre-layout representation a parser produces: a flow
//! direction, a set of node declarations, and the edges between them.
//! Layout turns a [`Graph`] into a positioned [`Scene`](crate::scene::Scene).

use indexmap::IndexMap;
use serde::Deserialize;

/// Flow direction of a graph diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Layers flow from top to bottom (`TD`). The default.
    #[default]
    TopDown,
    /// Layers flow from left to right (`LR`).
    LeftRight,
}

impl Direction {
    /// Parses a direction keyword as written in diagram source.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "TD" | "TB" => Some(Self::TopDown),
            "LR" => Some(Self::LeftRight),
            _ => None,
        }
    }
}

/// A declared node: a stable identifier plus its display label.
///
/// A node declared bare (`api`) uses its identifier as the label; a bracket
/// form (`api[API Gateway]`) carries an explicit label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDecl {
    id: String,
    label: String,
}

impl NodeDecl {
    /// Creates a node declaration. An empty label falls back to the id.
    pub fn new(id: impl Into<String>, label: Option<String>) -> Self {
        let id = id.into();
        let label = match label {
            Some(label) if !label.trim().is_empty() => label,
            _ => id.clone(),
        };
        Self { id, label }
    }

    /// Returns the node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// A directed edge between two declared nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDecl {
    from: String,
    to: String,
}

impl EdgeDecl {
    /// Creates an edge from `from` to `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns the source node id.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Returns the target node id.
    pub fn to(&self) -> &str {
        &self.to
    }
}

/// The semantic model of a parsed diagram.
///
/// Nodes keep declaration order (first mention wins) so that layout and
/// rendering are deterministic for a given source text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    direction: Direction,
    nodes: IndexMap<String, NodeDecl>,
    edges: Vec<EdgeDecl>,
}

impl Graph {
    /// Creates an empty graph with the given direction.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the flow direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Declares a node, or updates the label of an already-declared node
    /// when the new mention carries an explicit label.
    pub fn declare_node(&mut self, id: &str, label: Option<String>) {
        match self.nodes.get_mut(id) {
            Some(existing) => {
                if let Some(label) = label {
                    *existing = NodeDecl::new(id, Some(label));
                }
            }
            None => {
                self.nodes
                    .insert(id.to_string(), NodeDecl::new(id, label));
            }
        }
    }

    /// Adds a directed edge. Both endpoints must already be declared.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push(EdgeDecl::new(from, to));
    }

    /// Returns the declared nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeDecl> {
        self.nodes.values()
    }

    /// Looks up a node declaration by id.
    pub fn node(&self, id: &str) -> Option<&NodeDecl> {
        self.nodes.get(id)
    }

    /// Returns the edges in declaration order.
    pub fn edges(&self) -> &[EdgeDecl] {
        &self.edges
    }

    /// Returns the number of declared nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_keywords() {
        assert_eq!(Direction::from_keyword("TD"), Some(Direction::TopDown));
        assert_eq!(Direction::from_keyword("TB"), Some(Direction::TopDown));
        assert_eq!(Direction::from_keyword("LR"), Some(Direction::LeftRight));
        assert_eq!(Direction::from_keyword("RL"), None);
    }

    #[test]
    fn test_bare_node_uses_id_as_label() {
        let decl = NodeDecl::new("api", None);
        assert_eq!(decl.label(), "api");
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let mut graph = Graph::default();
        graph.declare_node("b", None);
        graph.declare_node("a", None);
        graph.declare_node("c", None);

        let ids: Vec<_> = graph.nodes().map(NodeDecl::id).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_later_label_wins_over_bare_mention() {
        let mut graph = Graph::default();
        graph.declare_node("api", None);
        graph.declare_node("api", Some("API Gateway".to_string()));

        assert_eq!(graph.node("api").unwrap().label(), "API Gateway");
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_bare_remention_keeps_existing_label() {
        let mut graph = Graph::default();
        graph.declare_node("api", Some("API Gateway".to_string()));
        graph.declare_node("api", None);

        assert_eq!(graph.node("api").unwrap().label(), "API Gateway");
    }
}
