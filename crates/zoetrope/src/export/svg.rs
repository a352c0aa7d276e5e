//! Scene to SVG document rendering.
//!
//! Produces standalone SVG markup for display and for the raster encoder.
//! The scene's declarative style block renders as a background rectangle
//! and a whole-scene filter inside one group, so the theme transform's
//! invert composition applies to everything the scene draws.

use svg::{
    Document,
    node::element::{
        Definitions, Filter, FilterEffectColorMatrix, Group, Line, Marker, Path, Rectangle, Text,
    },
};

use zoetrope_core::scene::{ColorFilter, Scene};

const FONT_FAMILY: &str = "ui-monospace, monospace";
const FONT_SIZE: f32 = 14.0;
const NODE_CORNER_RADIUS: f32 = 6.0;
const EDGE_WIDTH: f32 = 1.5;

const ARROWHEAD_ID: &str = "arrowhead";
const THEME_FILTER_ID: &str = "theme-invert";

/// Channel inversion composed with a 180° hue rotation, as a single color
/// matrix. Applying it twice is the identity, which is what makes the
/// light theme reversible.
const HUE_INVERT_MATRIX: &str = "0.574 -1.430 -0.144 0 1 \
     -0.426 -0.430 -0.144 0 1 \
     -0.426 -1.430 0.856 0 1 \
     0 0 0 1 0";

/// Renders a scene to SVG markup.
pub fn render_markup(scene: &Scene) -> String {
    render_document(scene).to_string()
}

/// Renders a scene to an SVG document tree.
pub fn render_document(scene: &Scene) -> Document {
    let size = scene.size();

    let mut defs = Definitions::new().add(arrowhead_marker(scene));
    let mut content = Group::new();

    if let Some(background) = scene.style().background() {
        content = content.add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", background),
        );
    }

    for edge in scene.edges() {
        content = content.add(
            Line::new()
                .set("x1", edge.start().x())
                .set("y1", edge.start().y())
                .set("x2", edge.end().x())
                .set("y2", edge.end().y())
                .set("stroke", &edge.stroke())
                .set("stroke-width", EDGE_WIDTH)
                .set("marker-end", format!("url(#{ARROWHEAD_ID})")),
        );
    }

    for node in scene.nodes() {
        let size = node.size();
        let position = node.position();
        content = content
            .add(
                Rectangle::new()
                    .set("x", position.x() - size.width() / 2.0)
                    .set("y", position.y() - size.height() / 2.0)
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("rx", NODE_CORNER_RADIUS)
                    .set("fill", &node.fill())
                    .set("stroke", &node.stroke()),
            )
            .add(
                Text::new(node.label())
                    .set("x", position.x())
                    .set("y", position.y())
                    .set("text-anchor", "middle")
                    .set("dominant-baseline", "central")
                    .set("font-size", FONT_SIZE)
                    .set("fill", &node.text_color()),
            );
    }

    if let Some(ColorFilter::HueInvert) = scene.style().filter() {
        defs = defs.add(
            Filter::new().set("id", THEME_FILTER_ID).add(
                FilterEffectColorMatrix::new()
                    .set("type", "matrix")
                    .set("values", HUE_INVERT_MATRIX),
            ),
        );
        content = content.set("filter", format!("url(#{THEME_FILTER_ID})"));
    }

    Document::new()
        .set("width", size.width())
        .set("height", size.height())
        .set("viewBox", (0.0f32, 0.0f32, size.width(), size.height()))
        .set("font-family", FONT_FAMILY)
        .add(defs)
        .add(content)
}

/// One arrowhead marker, filled with the scene's edge color.
fn arrowhead_marker(scene: &Scene) -> Marker {
    let fill = scene
        .edges()
        .first()
        .map(|edge| edge.stroke().to_string())
        .unwrap_or_else(|| "currentColor".to_string());

    Marker::new()
        .set("id", ARROWHEAD_ID)
        .set("viewBox", (0, 0, 10, 10))
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 7)
        .set("markerHeight", 7)
        .set("orient", "auto-start-reverse")
        .add(Path::new().set("d", "M 0 0 L 10 5 L 0 10 z").set("fill", fill))
}
