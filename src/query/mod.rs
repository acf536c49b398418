// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a laid-out diagram.
//!
//! Hit-testing for the interaction controller: which wire, branch rail or element lies under
//! the pointer.

pub mod finder;

pub use finder::{element_at, is_nested_within, nearest_branch_edge, nearest_wire, BranchEdge};
