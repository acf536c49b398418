// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use crate::config::LayoutConfig;
use crate::model::{
    Branch, Diagram, Element, ElementKind, Lane, Node, NodeId, ParentRef, Rect, WireId,
};

/// Read-only geometry of a laid-out diagram, for renderers and hit-testing hosts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutSnapshot {
    pub surface_width: f64,
    pub total_height: f64,
    pub wires: Vec<WireGeometry>,
    /// Every node, depth-first in list order.
    pub nodes: Vec<NodeGeometry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WireGeometry {
    pub id: WireId,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeGeometry {
    pub id: NodeId,
    pub wire: WireId,
    pub parent: ParentRef,
    /// Number of branches enclosing this node.
    pub depth: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub shape: NodeShape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeShape {
    Element {
        kind: ElementKind,
        bindings: Vec<Option<SmolStr>>,
    },
    Branch {
        vertical_extent: f64,
    },
}

impl NodeGeometry {
    /// Hit box of an element, or the rail-to-rail box of a branch.
    pub fn bounds(&self, config: &LayoutConfig) -> Rect {
        match &self.shape {
            NodeShape::Element { .. } => element_box(self.x, self.y, self.width, config),
            NodeShape::Branch { vertical_extent } => {
                Rect::new(self.x, self.y, self.width, *vertical_extent)
            }
        }
    }
}

impl LayoutSnapshot {
    pub fn node(&self, id: NodeId) -> Option<&NodeGeometry> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn wire(&self, id: WireId) -> Option<&WireGeometry> {
        self.wires.iter().find(|wire| wire.id == id)
    }
}

pub(crate) fn element_box(x: f64, rail_y: f64, width: f64, config: &LayoutConfig) -> Rect {
    let half = config.element_half_height;
    Rect::new(x, rail_y - half, width, half * 2.0)
}

/// Width of one binding selector showing `name` (or an empty selector).
fn selector_width(name: Option<&str>, config: &LayoutConfig) -> f64 {
    let chars = name.map_or(0, |name| name.chars().count()) as f64;
    (chars * config.selector_char_width + config.selector_padding).max(config.selector_min_width)
}

/// `max(glyph width, widest binding selector) + margin`.
pub fn element_width(element: &Element, config: &LayoutConfig) -> f64 {
    let glyph = config.glyph.for_family(element.kind().family());
    let selectors = element
        .bindings()
        .iter()
        .map(|binding| selector_width(binding.as_deref(), config))
        .fold(0.0_f64, f64::max);
    glyph.max(selectors) + config.element_margin
}

fn lane_width(nodes: &[Node]) -> f64 {
    nodes.iter().map(Node::width).sum()
}

/// Branch width from its children's already-measured widths.
pub fn branch_width(branch: &Branch, config: &LayoutConfig) -> f64 {
    if branch.upper().is_empty() && branch.lower().is_empty() {
        return config.empty_branch_width;
    }
    lane_width(branch.upper()).max(lane_width(branch.lower())) + config.branch_padding
}

/// Vertical room a node list needs: the floor, or the tallest pair of lanes of any branch
/// placed directly in it. Sibling branches combine by `max`; a branch's own lanes by sum.
pub fn branch_height(nodes: &[Node], config: &LayoutConfig) -> f64 {
    nodes
        .iter()
        .filter_map(Node::as_branch)
        .map(|branch| branch_height(branch.upper(), config) + branch_height(branch.lower(), config))
        .fold(config.min_branch_extent, f64::max)
}

/// Distance from a branch's top rail to its lower rail.
pub fn vertical_extent(branch: &Branch, config: &LayoutConfig) -> f64 {
    branch
        .upper()
        .iter()
        .chain(branch.lower().iter())
        .filter_map(Node::as_branch)
        .map(|nested| branch_height(nested.upper(), config) + branch_height(nested.lower(), config))
        .fold(config.min_branch_extent, f64::max)
}

/// Computes widths and extents bottom-up.
fn measure(nodes: &mut [Node], config: &LayoutConfig) {
    for node in nodes {
        match node {
            Node::Element(element) => {
                element.width = element_width(element, config);
            }
            Node::Branch(branch) => {
                measure(&mut branch.upper, config);
                measure(&mut branch.lower, config);
                branch.width = branch_width(branch, config);
                branch.vertical_extent = vertical_extent(branch, config);
            }
        }
    }
}

/// Lays `nodes` out left to right from `left` on the rail at `rail_y`, then re-sorts by x.
///
/// `right_edge` is only set for a wire's own list: coils there snap to it.
fn place(
    nodes: &mut Vec<Node>,
    left: f64,
    rail_y: f64,
    right_edge: Option<f64>,
    config: &LayoutConfig,
) {
    let mut cursor = left;
    for node in nodes.iter_mut() {
        let width = node.width();
        let x = match right_edge {
            Some(right) if node.is_coil() => right - width,
            _ => {
                let x = cursor;
                cursor += width;
                x
            }
        };
        node.set_position(x, rail_y);

        if let Node::Branch(branch) = node {
            let inner_left = x + config.branch_padding / 2.0;
            let lower_rail = rail_y + branch.vertical_extent;
            place(&mut branch.upper, inner_left, rail_y, None, config);
            place(&mut branch.lower, inner_left, lower_rail, None, config);
        }
    }
    nodes.sort_by(|a, b| a.x().total_cmp(&b.x()));
}

/// Deepest lower rail reachable by following lower lanes.
fn deepest_lower_rail(nodes: &[Node], from: f64) -> f64 {
    nodes
        .iter()
        .filter_map(Node::as_branch)
        .map(|branch| deepest_lower_rail(branch.lower(), branch.lower_rail_y()))
        .fold(from, f64::max)
}

/// Recomputes every width, extent and coordinate of `diagram` and returns a snapshot.
///
/// Wires stack top to bottom from `first_rail_y`; each spans `surface_width`.
pub fn layout_diagram(
    diagram: &mut Diagram,
    config: &LayoutConfig,
    surface_width: f64,
) -> LayoutSnapshot {
    let mut rail_y = config.first_rail_y;
    for wire in diagram.wires_mut() {
        wire.width = surface_width;
        wire.y = rail_y;
        measure(&mut wire.nodes, config);
        place(&mut wire.nodes, 0.0, rail_y, Some(surface_width), config);
        wire.height = deepest_lower_rail(&wire.nodes, rail_y) - rail_y + config.wire_base_height;
        rail_y += wire.height;
    }

    let snapshot = snapshot(diagram, surface_width, rail_y);
    log::trace!(
        wires = snapshot.wires.len(),
        nodes = snapshot.nodes.len(),
        height = snapshot.total_height;
        "layout pass",
    );
    snapshot
}

fn snapshot(diagram: &Diagram, surface_width: f64, bottom: f64) -> LayoutSnapshot {
    let mut out = LayoutSnapshot {
        surface_width,
        total_height: bottom,
        wires: Vec::with_capacity(diagram.wires().len()),
        nodes: Vec::with_capacity(diagram.node_count()),
    };
    for wire in diagram.wires() {
        out.wires.push(WireGeometry {
            id: wire.id(),
            y: wire.y(),
            width: wire.width(),
            height: wire.height(),
        });
        collect_geometry(
            wire.nodes(),
            wire.id(),
            ParentRef::Wire(wire.id()),
            0,
            &mut out.nodes,
        );
    }
    out
}

fn collect_geometry(
    nodes: &[Node],
    wire: WireId,
    parent: ParentRef,
    depth: usize,
    out: &mut Vec<NodeGeometry>,
) {
    for node in nodes {
        let shape = match node {
            Node::Element(element) => NodeShape::Element {
                kind: element.kind(),
                bindings: element.bindings().to_vec(),
            },
            Node::Branch(branch) => NodeShape::Branch {
                vertical_extent: branch.vertical_extent(),
            },
        };
        out.push(NodeGeometry {
            id: node.id(),
            wire,
            parent,
            depth,
            x: node.x(),
            y: node.y(),
            width: node.width(),
            shape,
        });
        if let Node::Branch(branch) = node {
            for lane in [Lane::Upper, Lane::Lower] {
                let lane_ref = ParentRef::Branch {
                    branch: branch.id(),
                    lane,
                };
                collect_geometry(branch.lane(lane), wire, lane_ref, depth + 1, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{branch_height, element_width, layout_diagram, vertical_extent, NodeShape};
    use crate::config::LayoutConfig;
    use crate::model::fixtures::{
        add_branch, add_element, branch_over_empty_branch, contact_then_coil, lane_ref,
        two_rung_program, wire_ref,
    };
    use crate::model::{Diagram, ElementKind, Lane, Node};

    const SURFACE: f64 = 1000.0;

    fn config() -> LayoutConfig {
        LayoutConfig::default()
    }

    fn assert_sorted_by_x(nodes: &[Node]) {
        for pair in nodes.windows(2) {
            assert!(pair[0].x() <= pair[1].x(), "{:?} before {:?}", pair[0], pair[1]);
        }
        for node in nodes {
            if let Node::Branch(branch) = node {
                assert_sorted_by_x(branch.upper());
                assert_sorted_by_x(branch.lower());
            }
        }
    }

    #[test]
    fn element_width_takes_widest_selector() {
        let config = config();
        let mut diagram = Diagram::new();
        let wire = wire_ref(&diagram, 0);
        let short = add_element(&mut diagram, wire, ElementKind::NOContact, &["a"]);
        let long = add_element(
            &mut diagram,
            wire,
            ElementKind::NOContact,
            &["a_really_long_variable"],
        );
        layout_diagram(&mut diagram, &config, SURFACE);

        let short = diagram.find_node(short).unwrap().as_element().unwrap();
        let long = diagram.find_node(long).unwrap().as_element().unwrap();
        // glyph 60 vs selector max(60, 1*8+16) -> 60, plus margin
        assert_eq!(element_width(short, &config), 80.0);
        // 22 chars * 8 + 16 = 192, plus margin
        assert_eq!(element_width(long, &config), 212.0);
    }

    #[test]
    fn empty_branch_uses_floor_width() {
        let config = config();
        let mut diagram = Diagram::new();
        let wire = wire_ref(&diagram, 0);
        let branch = add_branch(&mut diagram, wire);
        layout_diagram(&mut diagram, &config, SURFACE);
        assert_eq!(diagram.find_node(branch).unwrap().width(), 130.0);
    }

    #[test]
    fn branch_width_is_wider_lane_plus_padding() {
        let config = config();
        let mut diagram = Diagram::new();
        let wire = wire_ref(&diagram, 0);
        let branch = add_branch(&mut diagram, wire);
        add_element(&mut diagram, lane_ref(branch, Lane::Upper), ElementKind::NOContact, &["a"]);
        add_element(&mut diagram, lane_ref(branch, Lane::Upper), ElementKind::NCContact, &["b"]);
        add_element(&mut diagram, lane_ref(branch, Lane::Lower), ElementKind::AddMath, &["x", "y", "z"]);
        layout_diagram(&mut diagram, &config, SURFACE);

        // upper 80 + 80 = 160, lower 110 + 20 = 130
        assert_eq!(diagram.find_node(branch).unwrap().width(), 160.0 + 40.0);
    }

    #[test]
    fn nested_branch_in_lower_lane_doubles_extent() {
        let config = config();
        let (mut diagram, outer, inner) = branch_over_empty_branch();
        let snapshot = layout_diagram(&mut diagram, &config, SURFACE);

        let outer_branch = diagram.find_node(outer).unwrap().as_branch().unwrap();
        assert_eq!(outer_branch.vertical_extent(), 250.0);
        assert_eq!(vertical_extent(outer_branch, &config), 250.0);
        assert_eq!(
            diagram.find_node(inner).unwrap().as_branch().unwrap().vertical_extent(),
            125.0
        );

        // The inner branch hangs off the outer lower rail; the wire clears its lower rail.
        let wire = &diagram.wires()[0];
        assert_eq!(diagram.find_node(inner).unwrap().y(), wire.y() + 250.0);
        assert_eq!(wire.height(), 250.0 + 125.0 + 125.0);
        assert_eq!(snapshot.total_height, wire.y() + wire.height());
    }

    #[test]
    fn sibling_branches_combine_by_max_not_sum() {
        let config = config();
        let mut diagram = Diagram::new();
        let wire = wire_ref(&diagram, 0);
        let outer = add_branch(&mut diagram, wire);
        add_branch(&mut diagram, lane_ref(outer, Lane::Upper));
        add_branch(&mut diagram, lane_ref(outer, Lane::Upper));
        layout_diagram(&mut diagram, &config, SURFACE);

        let outer_branch = diagram.find_node(outer).unwrap().as_branch().unwrap();
        assert_eq!(outer_branch.vertical_extent(), 250.0);
        assert_eq!(branch_height(outer_branch.upper(), &config), 250.0);
    }

    #[test]
    fn upper_lane_nesting_does_not_grow_the_wire_past_the_branch() {
        let config = config();
        let mut diagram = Diagram::new();
        let wire = wire_ref(&diagram, 0);
        let outer = add_branch(&mut diagram, wire);
        add_branch(&mut diagram, lane_ref(outer, Lane::Upper));
        layout_diagram(&mut diagram, &config, SURFACE);

        let wire = &diagram.wires()[0];
        // outer extent = 125 + 125; the upper-nested branch stays inside it.
        assert_eq!(wire.height(), 250.0 + 125.0);
    }

    #[test]
    fn coil_is_right_aligned_and_sorted_last() {
        let config = config();
        let mut diagram = contact_then_coil();
        let wire = wire_ref(&diagram, 0);
        // Insert a contact after the coil in list order; layout must still end with the coil.
        add_element(&mut diagram, wire, ElementKind::NCContact, &["stop"]);
        layout_diagram(&mut diagram, &config, SURFACE);

        let nodes = diagram.wires()[0].nodes();
        assert_eq!(nodes.len(), 3);
        let coil = nodes.last().unwrap();
        assert!(coil.is_coil());
        assert_eq!(coil.x() + coil.width(), SURFACE);
        assert_eq!(nodes[0].x(), 0.0);
        assert_eq!(nodes[1].x(), nodes[0].width());
        assert_sorted_by_x(nodes);
    }

    #[test]
    fn wires_stack_by_height() {
        let config = config();
        let mut diagram = two_rung_program();
        let snapshot = layout_diagram(&mut diagram, &config, SURFACE);

        let wires = diagram.wires();
        assert_eq!(wires[0].y(), config.first_rail_y);
        assert_eq!(wires[1].y(), wires[0].y() + wires[0].height());
        assert_eq!(wires[0].height(), 125.0 + 125.0);
        assert_eq!(wires[1].height(), 125.0);
        assert_eq!(snapshot.wires.len(), 2);
        assert_eq!(snapshot.nodes.len(), diagram.node_count());
        for wire in wires {
            assert_sorted_by_x(wire.nodes());
        }
    }

    #[test]
    fn snapshot_records_depth_and_lane_parents() {
        let config = config();
        let (mut diagram, outer, inner) = branch_over_empty_branch();
        let snapshot = layout_diagram(&mut diagram, &config, SURFACE);

        let outer_geom = snapshot.node(outer).unwrap();
        assert_eq!(outer_geom.depth, 0);
        assert_eq!(outer_geom.shape, NodeShape::Branch { vertical_extent: 250.0 });

        let inner_geom = snapshot.node(inner).unwrap();
        assert_eq!(inner_geom.depth, 1);
        assert_eq!(inner_geom.parent, lane_ref(outer, Lane::Lower));
    }
}
