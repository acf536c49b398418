// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, PALETTE_PAGE};
use super::theme::TuiTheme;
use crate::render::{render_ladder_unicode, LadderRender, LineSpan};

pub(super) fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(diagram_title(app))
        .border_style(app.theme.border_style(app.armed.is_some()));
    app.set_diagram_area(block.inner(rows[0]));

    let overlay = app.editor.overlay();
    let body = match render_ladder_unicode(app.editor.current_layout(), &overlay) {
        Ok(render) => Text::from(diagram_lines(&render, &app.theme)),
        Err(err) => {
            log::error!("render failed: {err}");
            Text::styled(format!("render failed: {err}"), app.theme.prompt_style())
        }
    };
    frame.render_widget(
        Paragraph::new(body)
            .block(block)
            .style(app.theme.base_style())
            .scroll(app.scroll),
        rows[0],
    );
    frame.render_widget(Paragraph::new(palette_line(app)), rows[1]);
    frame.render_widget(Paragraph::new(footer_line(app)), rows[2]);
}

fn diagram_title(app: &App) -> String {
    let diagram = app.editor.project().diagram();
    let wires = diagram.wires().len();
    match app.armed {
        Some(item) => format!(" {wires} wire(s) | dropping {} ", item.name()),
        None => format!(" {wires} wire(s), {} node(s) ", diagram.node_count()),
    }
}

/// Splits each rendered row into styled runs: guide, then drop target, then selection, with the
/// ghost marker on top.
pub(super) fn diagram_lines(render: &LadderRender, theme: &TuiTheme) -> Vec<Line<'static>> {
    render
        .text
        .split('\n')
        .enumerate()
        .map(|(row, text)| {
            let mut chars: Vec<char> = text.chars().collect();
            let mut styles = vec![theme.base_style(); chars.len()];
            paint(&mut styles, row, render.guide.iter(), theme.guide_style());
            paint(&mut styles, row, render.drop_target.iter(), theme.drop_target_style());
            paint(&mut styles, row, render.selection.iter(), theme.selection_style());
            if let Some((ghost_row, column)) = render.ghost {
                if ghost_row == row && column < chars.len() {
                    chars[column] = '◆';
                    styles[column] = theme.ghost_style();
                }
            }
            runs(&chars, &styles)
        })
        .collect()
}

fn paint<'a>(
    styles: &mut [Style],
    row: usize,
    spans: impl Iterator<Item = &'a LineSpan>,
    style: Style,
) {
    for &(span_row, c0, c1) in spans {
        if span_row != row {
            continue;
        }
        for slot in styles.iter_mut().take(c1 + 1).skip(c0) {
            *slot = style;
        }
    }
}

fn runs(chars: &[char], styles: &[Style]) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let mut current = String::new();
    let mut current_style = styles.first().copied().unwrap_or_default();
    for (&ch, &style) in chars.iter().zip(styles) {
        if style != current_style && !current.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut current), current_style));
        }
        current_style = style;
        current.push(ch);
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, current_style));
    }
    Line::from(spans)
}

fn palette_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        format!("{}/{} ", app.palette_page + 1, app.page_count()),
        theme.label_style(),
    )];
    for (index, item) in app.page_items().iter().enumerate() {
        spans.push(Span::styled(format!("{}:", index + 1), theme.key_style()));
        let style = if app.armed == Some(*item) {
            theme.armed_style()
        } else {
            theme.base_style()
        };
        spans.push(Span::styled(item.name().to_owned(), style));
        spans.push(Span::raw(" "));
    }
    if app.page_count() > 1 {
        spans.push(Span::styled("[ ]", theme.key_style()));
        spans.push(Span::styled(
            format!(" more ({PALETTE_PAGE} per page)"),
            theme.label_style(),
        ));
    }
    Line::from(spans)
}

pub(super) fn footer_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    if app.awaiting_coil_answer() {
        return Line::from(vec![
            Span::styled(
                "This wire already has a coil. Replace it? ".to_owned(),
                theme.prompt_style(),
            ),
            Span::styled("y/n".to_owned(), theme.key_style()),
        ]);
    }

    let mut spans = Vec::<Span<'static>>::new();
    for (label, key) in [
        ("PALETTE", "1-9"),
        ("WIRE", "w"),
        ("DELETE", "d"),
        ("BIND", "b"),
        ("SAVE", "s"),
        ("QUIT", "q"),
    ] {
        push_footer_entry(&mut spans, theme, label, key);
    }
    if let Some(toast) = app.toast() {
        spans.push(Span::styled(" | ", theme.label_style()));
        spans.push(Span::raw(toast.to_owned()));
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, theme: &TuiTheme, label: &str, key: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", theme.label_style()));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        theme.label_style(),
    ));
    spans.push(Span::styled(key.to_owned(), theme.key_style()));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
