// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::element::{Element, ElementKind};
use super::ids::{IdAllocator, NodeId, WireId};
use super::node::{find_in, find_in_mut, Branch, Lane, Node, Outline, ParentRef};
use super::wire::Wire;

/// The whole program: rungs in execution order, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    wires: Vec<Wire>,
    ids: IdAllocator,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram {
    /// A fresh diagram holds exactly one empty wire.
    pub fn new() -> Self {
        let mut diagram = Self::without_wires();
        diagram.push_wire();
        diagram
    }

    pub(crate) fn without_wires() -> Self {
        Self {
            wires: Vec::new(),
            ids: IdAllocator::default(),
        }
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub(crate) fn wires_mut(&mut self) -> &mut [Wire] {
        &mut self.wires
    }

    pub fn wire(&self, wire_id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|wire| wire.id == wire_id)
    }

    pub fn wire_index(&self, wire_id: WireId) -> Option<usize> {
        self.wires.iter().position(|wire| wire.id == wire_id)
    }

    /// Appends an empty wire and returns its id.
    pub fn push_wire(&mut self) -> WireId {
        let wire = Wire::new(self.ids.next());
        let id = wire.id;
        self.wires.push(wire);
        id
    }

    pub(crate) fn insert_wire(&mut self, index: usize, wire: Wire) {
        let index = index.min(self.wires.len());
        self.wires.insert(index, wire);
    }

    pub(crate) fn take_wire(&mut self, wire_id: WireId) -> Option<(Wire, usize)> {
        let index = self.wire_index(wire_id)?;
        Some((self.wires.remove(index), index))
    }

    pub(crate) fn new_element(&mut self, kind: ElementKind) -> Element {
        Element::new(self.ids.next(), kind)
    }

    pub(crate) fn new_branch(&mut self) -> Branch {
        Branch::new(self.ids.next())
    }

    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.wires.iter().find_map(|wire| find_in(&wire.nodes, id))
    }

    pub(crate) fn find_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.wires
            .iter_mut()
            .find_map(|wire| find_in_mut(&mut wire.nodes, id))
    }

    /// Resolves a parent reference to the list it names.
    pub fn list(&self, parent: ParentRef) -> Option<&[Node]> {
        match parent {
            ParentRef::Wire(wire_id) => self.wire(wire_id).map(|wire| wire.nodes.as_slice()),
            ParentRef::Branch { branch, lane } => match self.find_node(branch)? {
                Node::Branch(branch) => Some(branch.lane(lane)),
                Node::Element(_) => None,
            },
        }
    }

    pub(crate) fn list_mut(&mut self, parent: ParentRef) -> Option<&mut Vec<Node>> {
        match parent {
            ParentRef::Wire(wire_id) => self
                .wires
                .iter_mut()
                .find(|wire| wire.id == wire_id)
                .map(|wire| &mut wire.nodes),
            ParentRef::Branch { branch, lane } => match self.find_node_mut(branch)? {
                Node::Branch(branch) => Some(branch.lane_mut(lane)),
                Node::Element(_) => None,
            },
        }
    }

    /// The list currently holding `id` and its index there, found by walking the tree.
    pub fn locate(&self, id: NodeId) -> Option<(ParentRef, usize)> {
        self.wires
            .iter()
            .find_map(|wire| locate_in(&wire.nodes, ParentRef::Wire(wire.id), id))
    }

    /// The wire whose subtree holds `id`.
    pub fn wire_of(&self, id: NodeId) -> Option<WireId> {
        self.wires
            .iter()
            .find(|wire| find_in(&wire.nodes, id).is_some())
            .map(|wire| wire.id)
    }

    /// Detaches a node (with its subtree) from its list.
    pub(crate) fn take_node(&mut self, id: NodeId) -> Option<(Node, ParentRef, usize)> {
        let (parent, index) = self.locate(id)?;
        let list = self.list_mut(parent)?;
        let mut node = list.remove(index);
        node.set_parent(None);
        Some((node, parent, index))
    }

    /// Inserts `node` into the list named by `parent`, clamping `index`, and points the node's
    /// back-reference at that list. Hands the node back if the list does not exist.
    pub(crate) fn insert_node(
        &mut self,
        parent: ParentRef,
        index: usize,
        mut node: Node,
    ) -> Result<(), Node> {
        let Some(list) = self.list_mut(parent) else {
            return Err(node);
        };
        node.set_parent(Some(parent));
        let index = index.min(list.len());
        list.insert(index, node);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.wires
            .iter()
            .flat_map(|wire| wire.nodes.iter())
            .map(Node::subtree_len)
            .sum()
    }

    /// Outline of every wire, in order.
    pub fn outline(&self) -> Vec<Vec<Outline>> {
        self.wires
            .iter()
            .map(|wire| wire.nodes.iter().map(Outline::of).collect())
            .collect()
    }

    /// Nodes whose stored parent reference does not name the list holding them.
    pub fn parent_link_violations(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for wire in &self.wires {
            collect_parent_violations(&wire.nodes, ParentRef::Wire(wire.id), &mut out);
        }
        out
    }
}

fn locate_in(nodes: &[Node], parent: ParentRef, id: NodeId) -> Option<(ParentRef, usize)> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return Some((parent, index));
        }
        if let Node::Branch(branch) = node {
            for lane in [Lane::Upper, Lane::Lower] {
                let lane_ref = ParentRef::Branch {
                    branch: branch.id,
                    lane,
                };
                if let Some(found) = locate_in(branch.lane(lane), lane_ref, id) {
                    return Some(found);
                }
            }
        }
    }
    None
}

fn collect_parent_violations(nodes: &[Node], expected: ParentRef, out: &mut Vec<NodeId>) {
    for node in nodes {
        if node.parent() != Some(expected) {
            out.push(node.id());
        }
        if let Node::Branch(branch) = node {
            for lane in [Lane::Upper, Lane::Lower] {
                let lane_ref = ParentRef::Branch {
                    branch: branch.id,
                    lane,
                };
                collect_parent_violations(branch.lane(lane), lane_ref, out);
            }
        }
    }
}
