// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Ladder layout.
//!
//! Computes element widths, branch widths and extents, node coordinates and wire heights, and
//! keeps every node list sorted by x so list order matches on-screen order.

pub mod ladder;

pub use ladder::{
    branch_height, branch_width, element_width, layout_diagram, vertical_extent, LayoutSnapshot,
    NodeGeometry, NodeShape, WireGeometry,
};
