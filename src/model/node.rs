// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::element::{Element, ElementKind};
use super::ids::{NodeId, WireId};

/// Which of a branch's two parallel paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Lane {
    /// `Nodes1` in the document.
    Upper,
    /// `Nodes2` in the document.
    Lower,
}

/// Address of one node list in the tree.
///
/// Stored on every node as its parent back-reference. It is bookkeeping only: ownership is the
/// list that holds the node, and the reference is resolved through [`super::Diagram`] by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    Wire(WireId),
    Branch { branch: NodeId, lane: Lane },
}

/// A pair of parallel paths between a shared left and right junction.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub(crate) id: NodeId,
    pub(crate) upper: Vec<Node>,
    pub(crate) lower: Vec<Node>,
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) vertical_extent: f64,
    pub(crate) parent: Option<ParentRef>,
}

impl Branch {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            upper: Vec::new(),
            lower: Vec::new(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            vertical_extent: 0.0,
            parent: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn upper(&self) -> &[Node] {
        &self.upper
    }

    pub fn lower(&self) -> &[Node] {
        &self.lower
    }

    pub fn lane(&self, lane: Lane) -> &[Node] {
        match lane {
            Lane::Upper => &self.upper,
            Lane::Lower => &self.lower,
        }
    }

    pub(crate) fn lane_mut(&mut self, lane: Lane) -> &mut Vec<Node> {
        match lane {
            Lane::Upper => &mut self.upper,
            Lane::Lower => &mut self.lower,
        }
    }

    /// Distance from the top rail to the lower rail.
    pub fn vertical_extent(&self) -> f64 {
        self.vertical_extent
    }

    pub fn lower_rail_y(&self) -> f64 {
        self.y + self.vertical_extent
    }
}

/// Anything placed on a rung.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Branch(Branch),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Self::Element(element) => element.id,
            Self::Branch(branch) => branch.id,
        }
    }

    pub fn x(&self) -> f64 {
        match self {
            Self::Element(element) => element.x,
            Self::Branch(branch) => branch.x,
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            Self::Element(element) => element.y,
            Self::Branch(branch) => branch.y,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Self::Element(element) => element.width,
            Self::Branch(branch) => branch.width,
        }
    }

    pub fn parent(&self) -> Option<ParentRef> {
        match self {
            Self::Element(element) => element.parent,
            Self::Branch(branch) => branch.parent,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ParentRef>) {
        match self {
            Self::Element(element) => element.parent = parent,
            Self::Branch(branch) => branch.parent = parent,
        }
    }

    pub(crate) fn set_position(&mut self, x: f64, y: f64) {
        match self {
            Self::Element(element) => {
                element.x = x;
                element.y = y;
            }
            Self::Branch(branch) => {
                branch.x = x;
                branch.y = y;
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Self::Element(_) => None,
            Self::Branch(branch) => Some(branch),
        }
    }

    pub fn element_kind(&self) -> Option<ElementKind> {
        self.as_element().map(Element::kind)
    }

    /// True for a Coil-family element (not for a branch holding one).
    pub fn is_coil(&self) -> bool {
        self.element_kind().is_some_and(ElementKind::is_coil)
    }

    /// True if this node is, or has beneath it, a Coil-family element.
    pub fn contains_coil(&self) -> bool {
        match self {
            Self::Element(element) => element.kind().is_coil(),
            Self::Branch(branch) => branch
                .upper
                .iter()
                .chain(branch.lower.iter())
                .any(Node::contains_coil),
        }
    }

    /// True if `id` is this node or any node beneath it.
    pub fn is_or_contains(&self, id: NodeId) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id() == id {
            return Some(self);
        }
        let Self::Branch(branch) = self else {
            return None;
        };
        find_in(&branch.upper, id).or_else(|| find_in(&branch.lower, id))
    }

    pub(crate) fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id() == id {
            return Some(self);
        }
        let Self::Branch(branch) = self else {
            return None;
        };
        if let Some(found) = find_in_mut(&mut branch.upper, id) {
            return Some(found);
        }
        find_in_mut(&mut branch.lower, id)
    }

    /// Number of nodes in this subtree, including itself.
    pub fn subtree_len(&self) -> usize {
        match self {
            Self::Element(_) => 1,
            Self::Branch(branch) => {
                1 + branch
                    .upper
                    .iter()
                    .chain(branch.lower.iter())
                    .map(Node::subtree_len)
                    .sum::<usize>()
            }
        }
    }
}

pub(crate) fn find_in(nodes: &[Node], id: NodeId) -> Option<&Node> {
    nodes.iter().find_map(|node| node.find(id))
}

pub(crate) fn find_in_mut(nodes: &mut [Node], id: NodeId) -> Option<&mut Node> {
    nodes.iter_mut().find_map(|node| node.find_mut(id))
}

/// Structural projection of a node: what the document can express.
///
/// Two trees with equal outlines are observably identical (kinds, bindings, nesting, order),
/// regardless of ids or coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outline {
    Element {
        kind: ElementKind,
        bindings: Vec<Option<String>>,
    },
    Branch {
        upper: Vec<Outline>,
        lower: Vec<Outline>,
    },
}

impl Outline {
    pub fn of(node: &Node) -> Self {
        match node {
            Node::Element(element) => Self::Element {
                kind: element.kind(),
                bindings: element
                    .bindings()
                    .iter()
                    .map(|b| b.as_ref().map(ToString::to_string))
                    .collect(),
            },
            Node::Branch(branch) => Self::Branch {
                upper: branch.upper.iter().map(Self::of).collect(),
                lower: branch.lower.iter().map(Self::of).collect(),
            },
        }
    }
}
