// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering of laid-out diagrams.

mod canvas;
pub mod ladder;
pub mod text;

pub use canvas::{Canvas, CanvasError};
pub use ladder::{render_ladder_unicode, LadderRender};

/// `(row, first column, last column)`, both columns inclusive.
pub type LineSpan = (usize, usize, usize);
