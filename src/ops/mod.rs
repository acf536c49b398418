// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for the ladder tree.
//!
//! Ops are applied to a copy of the diagram and committed only if every op succeeds, so a
//! rejected edit leaves the diagram exactly as it was. The returned delta names what changed.
//! Ops never run layout; callers relayout after a successful apply.

use std::collections::BTreeSet;

use smol_str::SmolStr;

use crate::model::{Diagram, ElementKind, Node, NodeId, ParentRef, WireId};

/// Something the palette can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteItem {
    Element(ElementKind),
    Branch,
}

impl PaletteItem {
    /// Every item in palette order: each element kind, then the branch.
    pub fn all() -> Vec<Self> {
        ElementKind::ALL
            .iter()
            .copied()
            .map(Self::Element)
            .chain(std::iter::once(Self::Branch))
            .collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Element(kind) => kind.name(),
            Self::Branch => "Branch",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Creates a node and drops it into `target` at the position matching `x`.
    InsertNew {
        item: PaletteItem,
        target: ParentRef,
        x: f64,
    },
    /// Detaches a node and drops it into `target` at the position matching `x`.
    MoveNode {
        node: NodeId,
        target: ParentRef,
        x: f64,
    },
    RemoveNode {
        node: NodeId,
    },
    AddWire,
    RemoveWire {
        wire: WireId,
    },
    /// Reinserts a wire at the position matching `y`.
    MoveWire {
        wire: WireId,
        y: f64,
    },
    SetBinding {
        node: NodeId,
        slot: usize,
        name: Option<SmolStr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectRef {
    Wire(WireId),
    Node(NodeId),
}

/// Which objects an apply added, removed or updated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ObjectRef>,
    pub removed: Vec<ObjectRef>,
    pub updated: Vec<ObjectRef>,
}

impl Delta {
    /// The first node this apply created, if any.
    pub fn added_node(&self) -> Option<NodeId> {
        self.added.iter().find_map(|object| match object {
            ObjectRef::Node(id) => Some(*id),
            ObjectRef::Wire(_) => None,
        })
    }

    pub fn added_wire(&self) -> Option<WireId> {
        self.added.iter().find_map(|object| match object {
            ObjectRef::Wire(id) => Some(*id),
            ObjectRef::Node(_) => None,
        })
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<ObjectRef>,
    removed: BTreeSet<ObjectRef>,
    updated: BTreeSet<ObjectRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, object: ObjectRef) {
        self.removed.remove(&object);
        self.updated.remove(&object);
        self.added.insert(object);
    }

    fn record_removed(&mut self, object: ObjectRef) {
        if self.added.remove(&object) {
            return;
        }
        self.updated.remove(&object);
        self.removed.insert(object);
    }

    fn record_updated(&mut self, object: ObjectRef) {
        if self.added.contains(&object) || self.removed.contains(&object) {
            return;
        }
        self.updated.insert(object);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub applied: usize,
    pub delta: Delta,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("wire {0} not found")]
    WireNotFound(WireId),
    #[error("drop target {0:?} does not exist")]
    TargetNotFound(ParentRef),
    #[error("coils cannot be placed inside a branch")]
    CoilInBranch,
    #[error("wire {wire} already has a coil")]
    DuplicateCoil { wire: WireId },
    #[error("branch {branch} cannot be placed inside itself")]
    SelfNesting { branch: NodeId },
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),
    #[error("{kind} has {slots} binding slot(s), slot {slot} does not exist")]
    SlotOutOfRange {
        kind: ElementKind,
        slot: usize,
        slots: usize,
    },
}

/// Answers "replace the coil already on this wire?" at most once per conflicting drop.
pub type ConfirmCoilReplacement<'a> = dyn FnMut(WireId) -> bool + 'a;

/// Applies `ops` in order, all or nothing.
pub fn apply_ops(
    diagram: &mut Diagram,
    ops: &[Op],
    confirm: &mut ConfirmCoilReplacement<'_>,
) -> Result<ApplyResult, EditError> {
    if ops.is_empty() {
        return Ok(ApplyResult {
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut next = diagram.clone();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_op(&mut next, op, confirm, &mut delta)?;
    }
    *diagram = next;

    Ok(ApplyResult {
        applied: ops.len(),
        delta: delta.finish(),
    })
}

/// Position at which a node at `x` joins a list sorted by x.
///
/// Before the first entry if left of it, between two neighbours if strictly between them,
/// otherwise at the end.
pub fn insertion_index(positions: &[f64], x: f64) -> usize {
    let Some(first) = positions.first() else {
        return 0;
    };
    if x < *first {
        return 0;
    }
    positions
        .windows(2)
        .position(|pair| pair[0] < x && x < pair[1])
        .map_or(positions.len(), |i| i + 1)
}

// Op implementations used by `apply_ops`.
include!("ops_impl.rs");
