// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::text::{text_len, truncate_with_ellipsis};
use super::{Canvas, CanvasError, LineSpan};
use crate::editor::{Overlay, Selection};
use crate::layout::{LayoutSnapshot, NodeGeometry, NodeShape};
use crate::model::{ElementKind, Lane, ParentRef, Point};

/// Layout units per character column.
pub const UNITS_PER_COLUMN: f64 = 10.0;
/// Layout units per text row.
pub const UNITS_PER_ROW: f64 = 25.0;

/// A rendered diagram plus the cells the host should emphasise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LadderRender {
    /// Rows of equal width, joined by `\n`.
    pub text: String,
    pub selection: Vec<LineSpan>,
    pub drop_target: Vec<LineSpan>,
    pub guide: Option<LineSpan>,
    /// `(row, column)` of the dragged node's ghost.
    pub ghost: Option<(usize, usize)>,
}

/// Column 0 is the left power rail, so layout x = 0 lands on column 1.
pub fn column_of(x: f64) -> usize {
    1 + (x.max(0.0) / UNITS_PER_COLUMN).floor() as usize
}

pub fn row_of(y: f64) -> usize {
    (y.max(0.0) / UNITS_PER_ROW).floor() as usize
}

/// Layout point at the centre of a character cell; inverse of [`column_of`]/[`row_of`].
pub fn point_at_cell(column: usize, row: usize) -> Point {
    Point::new(
        column.saturating_sub(1) as f64 * UNITS_PER_COLUMN + UNITS_PER_COLUMN / 2.0,
        row as f64 * UNITS_PER_ROW + UNITS_PER_ROW / 2.0,
    )
}

pub fn mnemonic(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::NOContact => "┤ ├",
        ElementKind::NCContact => "┤/├",
        ElementKind::Coil => "( )",
        ElementKind::OneShotCoil => "(P)",
        ElementKind::SetCoil => "(S)",
        ElementKind::ResetCoil => "(R)",
        ElementKind::AddMath => "[ADD]",
        ElementKind::SubtractMath => "[SUB]",
        ElementKind::MultiplyMath => "[MUL]",
        ElementKind::DivideMath => "[DIV]",
        ElementKind::MoveMath => "[MOV]",
        ElementKind::GreaterCompare => "[>]",
        ElementKind::LessCompare => "[<]",
        ElementKind::GreaterOrEqualCompare => "[>=]",
        ElementKind::LessOrEqualCompare => "[<=]",
        ElementKind::EqualCompare => "[==]",
        ElementKind::NotEqualCompare => "[!=]",
        ElementKind::OnDelayTimer => "[TON]",
        ElementKind::OffDelayTimer => "[TOF]",
        ElementKind::CountUp => "[CTU]",
        ElementKind::CountDown => "[CTD]",
        ElementKind::Reset => "[RST]",
    }
}

/// Inclusive column span of a node, clipped at the right power rail.
///
/// Layout does not wrap a rung wider than the surface, so its tail piles up at `right`.
fn columns(node: &NodeGeometry, right: usize) -> (usize, usize) {
    let c0 = column_of(node.x).min(right);
    let c1 = column_of(node.x + node.width)
        .saturating_sub(1)
        .max(c0)
        .min(right);
    (c0, c1)
}

/// Writes `text` centred in `c0..=c1`, truncated to fit.
fn write_centred(
    canvas: &mut Canvas,
    row: usize,
    (c0, c1): (usize, usize),
    text: &str,
) -> Result<(), CanvasError> {
    let span = c1 - c0 + 1;
    let text = truncate_with_ellipsis(text, span);
    let start = c0 + (span - text_len(&text)) / 2;
    canvas.write_str(start, row, &text)
}

fn binding_label(bindings: &[Option<smol_str::SmolStr>]) -> String {
    bindings
        .iter()
        .map(|binding| binding.as_deref().unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Draws `layout` as box-drawing text, with rows of `UNITS_PER_ROW` and columns of
/// `UNITS_PER_COLUMN` layout units.
pub fn render_ladder_unicode(
    layout: &LayoutSnapshot,
    overlay: &Overlay,
) -> Result<LadderRender, CanvasError> {
    let right = column_of(layout.surface_width);
    let height = row_of(layout.total_height) + 1;
    let mut canvas = Canvas::new(right + 1, height)?;
    let last_row = height - 1;

    for wire in &layout.wires {
        canvas.hline(0, right, row_of(wire.y))?;
    }
    if let (Some(first), Some(last)) = (layout.wires.first(), layout.wires.last()) {
        let top = row_of(first.y).saturating_sub(1);
        let bottom = (row_of(last.y) + 1).min(last_row);
        canvas.vline(0, top, bottom)?;
        canvas.vline(right, top, bottom)?;
    }

    for node in &layout.nodes {
        if let NodeShape::Branch { vertical_extent } = node.shape {
            let (c0, c1) = columns(node, right);
            let top = row_of(node.y);
            let bottom = row_of(node.y + vertical_extent).min(last_row);
            canvas.vline(c0, top, bottom)?;
            canvas.vline(c1, top, bottom)?;
            canvas.hline(c0, c1, bottom)?;
        }
    }

    // Text goes on after every line so it is never merged into a junction.
    for node in &layout.nodes {
        if let NodeShape::Element { kind, bindings } = &node.shape {
            let span = columns(node, right);
            let row = row_of(node.y);
            write_centred(&mut canvas, row, span, mnemonic(*kind))?;
            if row < last_row && !bindings.is_empty() {
                write_centred(&mut canvas, row + 1, span, &binding_label(bindings))?;
            }
        }
    }

    let clamp_row = |y: f64| row_of(y).min(last_row);
    let mut out = LadderRender {
        text: canvas.to_string(),
        ..LadderRender::default()
    };

    out.selection = match overlay.selection {
        Some(Selection::Node(id)) => layout.node(id).map_or_else(Vec::new, |node| {
            let (c0, c1) = columns(node, right);
            match node.shape {
                NodeShape::Element { .. } => vec![(clamp_row(node.y), c0, c1)],
                NodeShape::Branch { vertical_extent } => vec![
                    (clamp_row(node.y), c0, c1),
                    (clamp_row(node.y + vertical_extent), c0, c1),
                ],
            }
        }),
        Some(Selection::Wire(id)) => layout
            .wire(id)
            .map(|wire| vec![(clamp_row(wire.y), 0, right)])
            .unwrap_or_default(),
        None => Vec::new(),
    };

    out.drop_target = match overlay.drop_target {
        Some(ParentRef::Wire(id)) => layout
            .wire(id)
            .map(|wire| vec![(clamp_row(wire.y), 0, right)])
            .unwrap_or_default(),
        Some(ParentRef::Branch { branch, lane }) => layout
            .node(branch)
            .and_then(|node| match node.shape {
                NodeShape::Branch { vertical_extent } => {
                    let y = match lane {
                        Lane::Upper => node.y,
                        Lane::Lower => node.y + vertical_extent,
                    };
                    let (c0, c1) = columns(node, right);
                    Some(vec![(clamp_row(y), c0, c1)])
                }
                NodeShape::Element { .. } => None,
            })
            .unwrap_or_default(),
        None => Vec::new(),
    };

    out.guide = overlay.guide_y.map(|y| (clamp_row(y), 0, right));
    out.ghost = overlay
        .ghost
        .map(|(_, point)| (clamp_row(point.y), column_of(point.x).min(right)));

    Ok(out)
}
