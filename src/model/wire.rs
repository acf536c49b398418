// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::WireId;
use super::node::Node;

/// One rung: a horizontal chain of nodes between the power rails.
#[derive(Debug, Clone, PartialEq)]
pub struct Wire {
    pub(crate) id: WireId,
    pub(crate) nodes: Vec<Node>,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl Wire {
    pub(crate) fn new(id: WireId) -> Self {
        Self {
            id,
            nodes: Vec::new(),
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn id(&self) -> WireId {
        self.id
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rail y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The Coil-family element placed directly on this wire, if any.
    pub fn coil(&self) -> Option<&Node> {
        self.nodes.iter().find(|node| node.is_coil())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
