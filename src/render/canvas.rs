// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Which neighbours a line cell connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Edges(u8);

impl Edges {
    const LEFT: u8 = 1;
    const RIGHT: u8 = 2;
    const UP: u8 = 4;
    const DOWN: u8 = 8;

    fn with(self, bits: u8) -> Self {
        Self(self.0 | bits)
    }

    fn glyph(self) -> char {
        const H: u8 = Edges::LEFT | Edges::RIGHT;
        const V: u8 = Edges::UP | Edges::DOWN;
        match self.0 {
            0 => ' ',
            b if b & V == 0 => '─',
            b if b & H == 0 => '│',
            b if b == H | V => '┼',
            b if b == H | Self::DOWN => '┬',
            b if b == H | Self::UP => '┴',
            b if b == V | Self::RIGHT => '├',
            b if b == V | Self::LEFT => '┤',
            b if b == Self::RIGHT | Self::DOWN => '┌',
            b if b == Self::LEFT | Self::DOWN => '┐',
            b if b == Self::RIGHT | Self::UP => '└',
            _ => '┘',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Line(Edges),
    Glyph(char),
}

/// A bounded character grid for ladder drawings.
///
/// Lines accumulate connections, so a rung crossing a branch post renders as a junction.
/// Text written on top of a line replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Line(Edges::default()); len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let index = self.index(x, y)?;
        Ok(match self.cells[index] {
            Cell::Line(edges) => edges.glyph(),
            Cell::Glyph(ch) => ch,
        })
    }

    fn connect(&mut self, x: usize, y: usize, bits: u8) -> Result<(), CanvasError> {
        let index = self.index(x, y)?;
        if let Cell::Line(edges) = self.cells[index] {
            self.cells[index] = Cell::Line(edges.with(bits));
        }
        Ok(())
    }

    /// Writes `text` from `(x, y)`, clipping at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        self.index(x.min(self.width.saturating_sub(1)), y)?;
        for (offset, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(offset).filter(|cx| *cx < self.width) else {
                break;
            };
            let index = y * self.width + cx;
            self.cells[index] = Cell::Glyph(ch);
        }
        Ok(())
    }

    /// Horizontal line over `x0..=x1` at row `y`.
    pub fn hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        let (lo, hi) = (x0.min(x1), x0.max(x1));
        self.index(hi, y)?;
        for x in lo..=hi {
            let mut bits = 0;
            if x > lo {
                bits |= Edges::LEFT;
            }
            if x < hi {
                bits |= Edges::RIGHT;
            }
            if lo == hi {
                bits = Edges::LEFT | Edges::RIGHT;
            }
            self.connect(x, y, bits)?;
        }
        Ok(())
    }

    /// Vertical line over `y0..=y1` at column `x`.
    pub fn vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        let (lo, hi) = (y0.min(y1), y0.max(y1));
        self.index(x, hi)?;
        for y in lo..=hi {
            let mut bits = 0;
            if y > lo {
                bits |= Edges::UP;
            }
            if y < hi {
                bits |= Edges::DOWN;
            }
            if lo == hi {
                bits = Edges::UP | Edges::DOWN;
            }
            self.connect(x, y, bits)?;
        }
        Ok(())
    }

    /// Row `y` as a string, or `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(
            self.cells[start..start + self.width]
                .iter()
                .map(|cell| match cell {
                    Cell::Line(edges) => edges.glyph(),
                    Cell::Glyph(ch) => *ch,
                })
                .collect(),
        )
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&self.row(y).unwrap_or_default())?;
        }
        Ok(())
    }
}
