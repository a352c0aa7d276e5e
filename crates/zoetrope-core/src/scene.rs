//! The compiled scene model.
//!
//! A [`Scene`] is the output of a successful compile: a sized canvas with
//! positioned nodes and edges, plus a [`SceneStyle`] block holding the
//! declarative theme attributes. The scene is replaced wholesale on every
//! commit; only the theme transform rewrites it in place, and only through
//! its style block.

use crate::{
    color::Color,
    geometry::{Point, Size},
};

/// Authored colors for scene elements.
///
/// Zoetrope diagrams are authored against a single dark palette; the light
/// theme is derived mechanically from it by the theme transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    node_fill: Color,
    node_stroke: Color,
    edge_stroke: Color,
    text: Color,
}

impl Palette {
    /// Returns the node fill color.
    pub fn node_fill(&self) -> Color {
        self.node_fill
    }

    /// Returns the node border color.
    pub fn node_stroke(&self) -> Color {
        self.node_stroke
    }

    /// Returns the edge line color.
    pub fn edge_stroke(&self) -> Color {
        self.edge_stroke
    }

    /// Returns the label text color.
    pub fn text(&self) -> Color {
        self.text
    }
}

impl Default for Palette {
    fn default() -> Self {
        // The authored dark palette. Light rendering derives from it via
        // the theme transform rather than a second authored set.
        Self {
            node_fill: Color::new("#2d3748").expect("valid palette color"),
            node_stroke: Color::new("#64bee0").expect("valid palette color"),
            edge_stroke: Color::new("#64bee0").expect("valid palette color"),
            text: Color::new("#e5e7eb").expect("valid palette color"),
        }
    }
}

/// A positioned, styled node in a compiled scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    id: String,
    label: String,
    /// Center position of the node in scene coordinates.
    position: Point,
    size: Size,
    fill: Color,
    stroke: Color,
    text_color: Color,
}

impl SceneNode {
    /// Creates a node with the given geometry and palette colors.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        position: Point,
        size: Size,
        palette: &Palette,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            size,
            fill: palette.node_fill(),
            stroke: palette.node_stroke(),
            text_color: palette.text(),
        }
    }

    /// Returns the node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the center position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the node dimensions.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the fill color.
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Returns the border color.
    pub fn stroke(&self) -> Color {
        self.stroke
    }

    /// Returns the label text color.
    pub fn text_color(&self) -> Color {
        self.text_color
    }
}

/// A routed edge between two scene nodes.
///
/// Endpoints are resolved at layout time to the node border, not the node
/// center, so arrowheads land on the rectangle edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    from: String,
    to: String,
    start: Point,
    end: Point,
    stroke: Color,
}

impl SceneEdge {
    /// Creates an edge with resolved endpoints.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        start: Point,
        end: Point,
        stroke: Color,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            start,
            end,
            stroke,
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

    /// Returns the resolved start point.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Returns the resolved end point.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns the line color.
    pub fn stroke(&self) -> Color {
        self.stroke
    }
}

/// A whole-scene color filter, applied declaratively at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFilter {
    /// Invert all channels and rotate hues by 180 degrees, so dark renders
    /// light while hues keep their identity. Its own inverse.
    HueInvert,
}

/// Declarative display attributes on a scene.
///
/// The theme transform owns these two fields. Setting them is idempotent;
/// clearing them restores the authored rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneStyle {
    background: Option<Color>,
    filter: Option<ColorFilter>,
}

impl SceneStyle {
    /// Returns the background override, if any.
    pub fn background(&self) -> Option<&Color> {
        self.background.as_ref()
    }

    /// Returns the whole-scene color filter, if any.
    pub fn filter(&self) -> Option<ColorFilter> {
        self.filter
    }

    /// Sets or clears the background override.
    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
    }

    /// Sets or clears the whole-scene filter.
    pub fn set_filter(&mut self, filter: Option<ColorFilter>) {
        self.filter = filter;
    }
}

/// A compiled, displayable scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    size: Size,
    nodes: Vec<SceneNode>,
    edges: Vec<SceneEdge>,
    style: SceneStyle,
}

impl Scene {
    /// Creates a scene from layout output.
    pub fn new(size: Size, nodes: Vec<SceneNode>, edges: Vec<SceneEdge>) -> Self {
        Self {
            size,
            nodes,
            edges,
            style: SceneStyle::default(),
        }
    }

    /// Returns the canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the positioned nodes.
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Returns the routed edges.
    pub fn edges(&self) -> &[SceneEdge] {
        &self.edges
    }

    /// Returns the declarative style block.
    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    /// Returns the style block for mutation by the theme transform.
    pub fn style_mut(&mut self) -> &mut SceneStyle {
        &mut self.style
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
