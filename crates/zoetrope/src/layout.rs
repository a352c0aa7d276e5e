//! Layered placement of semantic graphs.
//!
//! Nodes are ranked by their longest path from a root and placed layer by
//! layer: rows for top-down diagrams, columns for left-right ones. Edge
//! endpoints are clipped to the node rectangle border so arrowheads land on
//! the shape, not its center.

use log::trace;
use petgraph::{Direction as PetDirection, algo::toposort, graph::DiGraph};

use zoetrope_core::{
    geometry::{Point, Size},
    scene::{Palette, Scene, SceneEdge, SceneNode},
    semantic::{Direction, Graph},
};

const MARGIN: f32 = 40.0;
const NODE_HEIGHT: f32 = 40.0;
const NODE_MIN_WIDTH: f32 = 60.0;
const NODE_PADDING_X: f32 = 14.0;
const CHAR_WIDTH: f32 = 8.5;
const LAYER_GAP: f32 = 60.0;
const NODE_GAP: f32 = 30.0;

/// Lay out a semantic graph into a positioned scene.
pub(crate) fn layered(graph: &Graph, palette: &Palette) -> Scene {
    let ids: Vec<&str> = graph.nodes().map(|n| n.id()).collect();
    let ranks = rank_nodes(graph, &ids);
    let layer_count = ranks.iter().copied().max().map_or(0, |max| max + 1);

    // Nodes grouped per layer, keeping declaration order inside a layer.
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (index, rank) in ranks.iter().enumerate() {
        layers[*rank].push(index);
    }

    let sizes: Vec<Size> = graph
        .nodes()
        .map(|node| {
            let text_width = node.label().chars().count() as f32 * CHAR_WIDTH;
            let width = (text_width + 2.0 * NODE_PADDING_X).max(NODE_MIN_WIDTH);
            Size::new(width, NODE_HEIGHT)
        })
        .collect();

    let positions = place(graph.direction(), &layers, &sizes);

    let nodes: Vec<SceneNode> = graph
        .nodes()
        .enumerate()
        .map(|(index, node)| {
            SceneNode::new(
                node.id(),
                node.label(),
                positions[index],
                sizes[index],
                palette,
            )
        })
        .collect();

    let edges: Vec<SceneEdge> = graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let from = ids.iter().position(|id| *id == edge.from())?;
            let to = ids.iter().position(|id| *id == edge.to())?;
            let start = border_point(positions[from], sizes[from], positions[to]);
            let end = border_point(positions[to], sizes[to], positions[from]);
            Some(SceneEdge::new(
                edge.from(),
                edge.to(),
                start,
                end,
                palette.edge_stroke(),
            ))
        })
        .collect();

    let canvas = canvas_size(&nodes);
    trace!(
        layers = layer_count,
        width = canvas.width() as f64,
        height = canvas.height() as f64;
        "Layout finished"
    );
    Scene::new(canvas, nodes, edges)
}

/// Ranks every node by longest path from a root. Cyclic graphs fall back to
/// breadth-first ranking from the first declared node of each component.
fn rank_nodes(graph: &Graph, ids: &[&str]) -> Vec<usize> {
    let mut dag = DiGraph::<usize, ()>::new();
    let indices: Vec<_> = (0..ids.len()).map(|i| dag.add_node(i)).collect();
    for edge in graph.edges() {
        let from = ids.iter().position(|id| *id == edge.from());
        let to = ids.iter().position(|id| *id == edge.to());
        if let (Some(from), Some(to)) = (from, to) {
            dag.add_edge(indices[from], indices[to], ());
        }
    }

    let mut ranks = vec![0usize; ids.len()];
    match toposort(&dag, None) {
        Ok(order) => {
            for node in order {
                let rank = dag
                    .neighbors_directed(node, PetDirection::Incoming)
                    .map(|pred| ranks[pred.index()] + 1)
                    .max()
                    .unwrap_or(0);
                ranks[node.index()] = rank;
            }
        }
        Err(_) => {
            // Cycle: breadth-first layering, first declaration first.
            let mut visited = vec![false; ids.len()];
            let mut queue = std::collections::VecDeque::new();
            for start in 0..ids.len() {
                if visited[start] {
                    continue;
                }
                visited[start] = true;
                ranks[start] = 0;
                queue.push_back(indices[start]);
                while let Some(node) = queue.pop_front() {
                    for next in dag.neighbors_directed(node, PetDirection::Outgoing) {
                        if !visited[next.index()] {
                            visited[next.index()] = true;
                            ranks[next.index()] = ranks[node.index()] + 1;
                            queue.push_back(next);
                        }
                    }
                }
            }
        }
    }
    ranks
}

/// Places node centers layer by layer.
fn place(direction: Direction, layers: &[Vec<usize>], sizes: &[Size]) -> Vec<Point> {
    let mut positions = vec![Point::default(); sizes.len()];

    match direction {
        Direction::TopDown => {
            for (layer_index, layer) in layers.iter().enumerate() {
                let y = MARGIN + layer_index as f32 * (NODE_HEIGHT + LAYER_GAP) + NODE_HEIGHT / 2.0;
                let mut cursor = MARGIN;
                for &node in layer {
                    let width = sizes[node].width();
                    positions[node] = Point::new(cursor + width / 2.0, y);
                    cursor += width + NODE_GAP;
                }
            }
        }
        Direction::LeftRight => {
            let mut cursor_x = MARGIN;
            for layer in layers {
                let column_width = layer
                    .iter()
                    .map(|&node| sizes[node].width())
                    .fold(NODE_MIN_WIDTH, f32::max);
                let x = cursor_x + column_width / 2.0;
                let mut cursor_y = MARGIN;
                for &node in layer {
                    positions[node] = Point::new(x, cursor_y + NODE_HEIGHT / 2.0);
                    cursor_y += NODE_HEIGHT + NODE_GAP;
                }
                cursor_x += column_width + LAYER_GAP;
            }
        }
    }

    positions
}

/// Finds where the segment from `center` toward `toward` leaves the
/// rectangle of `size` centered at `center`. Degenerate segments fall back
/// to the center itself.
fn border_point(center: Point, size: Size, toward: Point) -> Point {
    let delta = toward.sub(center);
    if delta.hypot() < 0.001 {
        return center;
    }

    let half_w = size.width() / 2.0;
    let half_h = size.height() / 2.0;

    let tx = if delta.x() == 0.0 {
        f32::INFINITY
    } else {
        half_w / delta.x().abs()
    };
    let ty = if delta.y() == 0.0 {
        f32::INFINITY
    } else {
        half_h / delta.y().abs()
    };

    let t = tx.min(ty);
    if !t.is_finite() || t >= 1.0 {
        // `toward` lies inside the rectangle.
        return toward;
    }

    Point::new(center.x() + delta.x() * t, center.y() + delta.y() * t)
}

/// Bounding box of all nodes plus the outer margin.
fn canvas_size(nodes: &[SceneNode]) -> Size {
    let mut max_x: f32 = 0.0;
    let mut max_y: f32 = 0.0;
    for node in nodes {
        max_x = max_x.max(node.position().x() + node.size().width() / 2.0);
        max_y = max_y.max(node.position().y() + node.size().height() / 2.0);
    }
    Size::new(max_x + MARGIN, max_y + MARGIN).max(Size::new(2.0 * MARGIN, 2.0 * MARGIN))
}
