// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::LayoutConfig;
use crate::layout::ladder::element_box;
use crate::model::{Diagram, Lane, Node, NodeId, Point, WireId};

/// A branch rail close to the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchEdge {
    pub branch: NodeId,
    /// `Upper` for the top rail, `Lower` for the lower rail.
    pub lane: Lane,
    pub depth: usize,
    pub distance: f64,
}

/// Wire whose rail is closest to `point.y`, if within `tolerance`.
pub fn nearest_wire(diagram: &Diagram, point: Point, tolerance: f64) -> Option<WireId> {
    let mut best: Option<(WireId, f64)> = None;
    for wire in diagram.wires() {
        let distance = (wire.y() - point.y).abs();
        if distance > tolerance {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((wire.id(), distance));
        }
    }
    best.map(|(id, _)| id)
}

/// Branch rail nearest to `point`.
///
/// The pointer must lie within the branch's horizontal span and within `tolerance` of either
/// rail. The smallest distance wins; equal distances go to the deeper branch. `exclude` and
/// everything beneath it are never candidates.
pub fn nearest_branch_edge(
    diagram: &Diagram,
    point: Point,
    tolerance: f64,
    exclude: Option<NodeId>,
) -> Option<BranchEdge> {
    let mut best = None;
    for wire in diagram.wires() {
        visit_branches(wire.nodes(), 0, exclude, &mut |node, depth| {
            let Node::Branch(branch) = node else {
                return;
            };
            if point.x < branch.x || point.x > branch.x + branch.width {
                return;
            }
            for (lane, rail_y) in [(Lane::Upper, branch.y), (Lane::Lower, branch.lower_rail_y())] {
                let distance = (point.y - rail_y).abs();
                if distance > tolerance {
                    continue;
                }
                let candidate = BranchEdge {
                    branch: branch.id(),
                    lane,
                    depth,
                    distance,
                };
                if is_better(&candidate, best.as_ref()) {
                    best = Some(candidate);
                }
            }
        });
    }
    best
}

fn is_better(candidate: &BranchEdge, current: Option<&BranchEdge>) -> bool {
    match current {
        None => true,
        Some(current) => {
            candidate.distance < current.distance
                || (candidate.distance == current.distance && candidate.depth > current.depth)
        }
    }
}

fn visit_branches(
    nodes: &[Node],
    depth: usize,
    exclude: Option<NodeId>,
    visit: &mut dyn FnMut(&Node, usize),
) {
    for node in nodes {
        if Some(node.id()) == exclude {
            continue;
        }
        if let Node::Branch(branch) = node {
            visit(node, depth);
            visit_branches(branch.upper(), depth + 1, exclude, visit);
            visit_branches(branch.lower(), depth + 1, exclude, visit);
        }
    }
}

/// First element (depth-first, list order) whose box contains `point`.
pub fn element_at(diagram: &Diagram, point: Point, config: &LayoutConfig) -> Option<NodeId> {
    diagram
        .wires()
        .iter()
        .find_map(|wire| element_in(wire.nodes(), point, config))
}

fn element_in(nodes: &[Node], point: Point, config: &LayoutConfig) -> Option<NodeId> {
    nodes.iter().find_map(|node| match node {
        Node::Element(element) => element_box(element.x, element.y, element.width, config)
            .contains(point)
            .then_some(element.id()),
        Node::Branch(branch) => element_in(branch.upper(), point, config)
            .or_else(|| element_in(branch.lower(), point, config)),
    })
}

/// True if `node` is `ancestor` or lies anywhere beneath it.
pub fn is_nested_within(diagram: &Diagram, node: NodeId, ancestor: NodeId) -> bool {
    diagram
        .find_node(ancestor)
        .is_some_and(|ancestor| ancestor.is_or_contains(node))
}
