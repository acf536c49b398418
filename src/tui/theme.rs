// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};

const PALETTE_ENV: &str = "RUNGLINE_TUI_PALETTE";

/// Terminal colours, optionally overridden from `RUNGLINE_TUI_PALETTE`.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

#[derive(Debug, Clone, Copy)]
enum Role {
    Red,
    Green,
    Yellow,
    Cyan,
    Magenta,
    Black,
    Muted,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let value = match env::var(PALETTE_ENV) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => return Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: PALETTE_ENV,
                    value: "<non-unicode>".to_owned(),
                })
            }
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let palette = TuiPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
            name: PALETTE_ENV,
            value: format!("{trimmed} ({error})"),
        })?;
        Ok(Self {
            palette: Some(palette),
        })
    }

    fn color(&self, role: Role) -> Color {
        match (&self.palette, role) {
            (Some(palette), Role::Black) => palette.ansi[0],
            (Some(palette), Role::Red) => palette.ansi[1],
            (Some(palette), Role::Green) => palette.ansi[2],
            (Some(palette), Role::Yellow) => palette.ansi[3],
            (Some(palette), Role::Magenta) => palette.ansi[5],
            (Some(palette), Role::Cyan) => palette.ansi[6],
            (Some(palette), Role::Muted) => palette.ansi[8],
            (None, Role::Black) => Color::Black,
            (None, Role::Red) => Color::Red,
            (None, Role::Green) => Color::LightGreen,
            (None, Role::Yellow) => Color::Yellow,
            (None, Role::Magenta) => Color::Magenta,
            (None, Role::Cyan) => Color::Cyan,
            (None, Role::Muted) => Color::Gray,
        }
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    pub(crate) fn border_style(&self, armed: bool) -> Style {
        if armed {
            self.base_style().fg(self.color(Role::Yellow))
        } else {
            self.base_style()
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    fn marker(&self, role: Role) -> Style {
        self.base_style()
            .fg(self.color(Role::Black))
            .bg(self.color(role))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn drop_target_style(&self) -> Style {
        self.marker(Role::Cyan)
    }

    pub(crate) fn guide_style(&self) -> Style {
        self.marker(Role::Yellow)
    }

    pub(crate) fn ghost_style(&self) -> Style {
        self.marker(Role::Magenta)
    }

    pub(crate) fn prompt_style(&self) -> Style {
        self.base_style()
            .fg(self.color(Role::Red))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn label_style(&self) -> Style {
        self.base_style().fg(self.color(Role::Muted))
    }

    pub(crate) fn key_style(&self) -> Style {
        self.base_style()
            .fg(self.color(Role::Cyan))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn armed_style(&self) -> Style {
        self.base_style()
            .fg(self.color(Role::Green))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }
}

#[derive(Debug, Clone)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    /// `fg,bg` followed by the sixteen ANSI colours, black through bright white.
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then 16 ANSI colors), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let mut ansi = [Color::Reset; 16];
        for (slot, part) in ansi.iter_mut().zip(&parts[2..]) {
            *slot = parse_hex_color(part)?;
        }
        Ok(Self {
            fg: parse_hex_color(parts[0])?,
            bg: parse_hex_color(parts[1])?,
            ansi,
        })
    }
}

fn parse_hex_color(value: &str) -> Result<Color, String> {
    let hex = value
        .strip_prefix('#')
        .or_else(|| value.strip_prefix("0x"))
        .unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {value} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {value}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

#[derive(Debug, Clone, thiserror::Error)]
pub(crate) enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: &'static str, value: String },
}
