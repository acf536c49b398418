// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use smol_str::SmolStr;

use super::theme::TuiTheme;
use crate::device::DeviceInbox;
use crate::editor::{Editor, EditorHost, Mode, Notice, PointerId, Selection};
use crate::model::{Node, Point, WireId};
use crate::ops::{EditError, PaletteItem};
use crate::render::ladder::{point_at_cell, UNITS_PER_COLUMN};
use crate::store::ProjectFile;

/// The terminal has one pointer.
const MOUSE: PointerId = PointerId(0);
pub(crate) const PALETTE_PAGE: usize = 9;
const MIN_SURFACE_WIDTH: f64 = 400.0;

/// Editor host for the terminal: notices become a footer toast, and the coil question is asked
/// after the fact, since the drop that raised it has already been refused by then.
#[derive(Debug, Default)]
pub struct TuiHost {
    pub(crate) toast: Option<String>,
    /// Answer for the next coil question, set while replaying a confirmed gesture.
    coil_answer: Option<bool>,
    /// Wire of the last unanswered coil question.
    coil_question: Option<WireId>,
}

impl EditorHost for TuiHost {
    fn notify(&mut self, notice: Notice) {
        if self.coil_question.is_some()
            && matches!(notice, Notice::Rejected(EditError::DuplicateCoil { .. }))
        {
            return;
        }
        self.toast = Some(describe(&notice));
    }

    fn confirm_coil_replacement(&mut self, wire: WireId) -> bool {
        match self.coil_answer.take() {
            Some(answer) => answer,
            None => {
                self.coil_question = Some(wire);
                false
            }
        }
    }
}

pub(crate) fn describe(notice: &Notice) -> String {
    match notice {
        Notice::Rejected(err) => err.to_string(),
        Notice::NoDropTarget => "drop onto a wire or a branch rail".to_owned(),
        Notice::NothingSelected => "nothing selected".to_owned(),
        Notice::Variable(err) => err.to_string(),
        Notice::ExportFailed(err) => format!("export failed: {err}"),
        Notice::ImportFailed(err) => format!("import failed: {err}"),
        Notice::ImportWarnings(report) => format!(
            "imported with {} warning(s)",
            report.skipped.len() + report.adjusted.len()
        ),
        Notice::DeviceStatus(status) => format!("device: {status}"),
    }
}

/// A gesture that may need replaying once the coil question is answered.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Drop { item: PaletteItem, point: Point },
    Drag { from: Point, to: Point },
}

pub struct App {
    pub(crate) editor: Editor<TuiHost>,
    pub(crate) theme: TuiTheme,
    file: Option<ProjectFile>,
    inbox: Option<DeviceInbox>,
    pub(crate) palette: Vec<PaletteItem>,
    pub(crate) palette_page: usize,
    /// Palette item the next click drops.
    pub(crate) armed: Option<PaletteItem>,
    /// `(rows, columns)` scrolled off the top left.
    pub(crate) scroll: (u16, u16),
    diagram_area: Rect,
    press: Option<Point>,
    pending: Option<Gesture>,
    pub(crate) should_quit: bool,
}

impl App {
    pub fn new(editor: Editor<TuiHost>, file: Option<ProjectFile>) -> Self {
        Self {
            editor,
            theme: TuiTheme::default(),
            file,
            inbox: None,
            palette: PaletteItem::all(),
            palette_page: 0,
            armed: None,
            scroll: (0, 0),
            diagram_area: Rect::default(),
            press: None,
            pending: None,
            should_quit: false,
        }
    }

    pub(crate) fn with_theme(mut self, theme: TuiTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_inbox(mut self, inbox: DeviceInbox) -> Self {
        self.inbox = Some(inbox);
        self
    }

    pub fn editor(&self) -> &Editor<TuiHost> {
        &self.editor
    }

    pub(crate) fn toast(&self) -> Option<&str> {
        self.editor.host().toast.as_deref()
    }

    pub(crate) fn awaiting_coil_answer(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn page_count(&self) -> usize {
        self.palette.len().div_ceil(PALETTE_PAGE).max(1)
    }

    pub(crate) fn page_items(&self) -> &[PaletteItem] {
        let start = (self.palette_page * PALETTE_PAGE).min(self.palette.len());
        let end = (start + PALETTE_PAGE).min(self.palette.len());
        &self.palette[start..end]
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.editor.host_mut().toast = Some(message.into());
    }

    /// Records where the diagram is drawn and fits the surface to its width.
    pub(crate) fn set_diagram_area(&mut self, area: Rect) {
        self.diagram_area = area;
        let columns = f64::from(area.width.saturating_sub(2));
        self.editor
            .set_surface_width((columns * UNITS_PER_COLUMN).max(MIN_SURFACE_WIDTH));
    }

    /// Applies queued device traffic.
    pub(crate) fn tick(&mut self) {
        if let Some(inbox) = &mut self.inbox {
            inbox.drain_into(&mut self.editor);
        }
    }

    fn point_at(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.diagram_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let cell_column = usize::from(column - area.x) + usize::from(self.scroll.1);
        let cell_row = usize::from(row - area.y) + usize::from(self.scroll.0);
        Some(point_at_cell(cell_column, cell_row))
    }

    pub(crate) fn handle_mouse(&mut self, event: MouseEvent) {
        if self.pending.is_some() {
            return;
        }
        match event.kind {
            MouseEventKind::ScrollDown => self.scroll.0 = self.scroll.0.saturating_add(1),
            MouseEventKind::ScrollUp => self.scroll.0 = self.scroll.0.saturating_sub(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(point) = self.point_at(event.column, event.row) else {
                    return;
                };
                match self.armed.take() {
                    Some(item) => self.drop_item(item, point),
                    None => {
                        self.press = Some(point);
                        self.editor.handle_pointer_down(MOUSE, point);
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(point) = self.point_at(event.column, event.row) {
                    self.editor.handle_pointer_move(MOUSE, point);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(point) = self.point_at(event.column, event.row) else {
                    return;
                };
                let dragging_node = matches!(self.editor.mode(), Mode::DraggingNode(_));
                self.editor.handle_pointer_up(MOUSE, point);
                if let (true, Some(from)) = (dragging_node, self.press.take()) {
                    self.ask_if_refused(Gesture::Drag { from, to: point });
                }
            }
            _ => {}
        }
    }

    fn drop_item(&mut self, item: PaletteItem, point: Point) {
        self.editor.handle_drop(item, point);
        self.ask_if_refused(Gesture::Drop { item, point });
    }

    fn ask_if_refused(&mut self, gesture: Gesture) {
        if self.editor.host_mut().coil_question.take().is_some() {
            self.pending = Some(gesture);
        }
    }

    fn answer_coil_question(&mut self, replace: bool) {
        let Some(gesture) = self.pending.take() else {
            return;
        };
        if !replace {
            self.set_toast("kept the existing coil");
            return;
        }
        self.editor.host_mut().coil_answer = Some(true);
        match gesture {
            Gesture::Drop { item, point } => {
                self.editor.handle_drop(item, point);
            }
            Gesture::Drag { from, to } => {
                self.editor.handle_pointer_down(MOUSE, from);
                self.editor.handle_pointer_move(MOUSE, to);
                self.editor.handle_pointer_up(MOUSE, to);
            }
        }
        self.editor.host_mut().coil_answer = None;
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if self.pending.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.answer_coil_question(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.answer_coil_question(false)
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(digit @ '1'..='9') => {
                let index = self.palette_page * PALETTE_PAGE + (digit as usize - '1' as usize);
                if let Some(item) = self.palette.get(index).copied() {
                    self.armed = Some(item);
                    self.set_toast(format!("click to drop {}", item.name()));
                }
            }
            KeyCode::Char(']') => {
                self.palette_page = (self.palette_page + 1) % self.page_count();
            }
            KeyCode::Char('[') => {
                let pages = self.page_count();
                self.palette_page = (self.palette_page + pages - 1) % pages;
            }
            KeyCode::Esc => self.armed = None,
            KeyCode::Char('w') => {
                self.editor.add_wire();
            }
            KeyCode::Char('d') | KeyCode::Delete => self.editor.delete_selected(),
            KeyCode::Char('b') => self.cycle_binding(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Down => self.scroll.0 = self.scroll.0.saturating_add(1),
            KeyCode::Up => self.scroll.0 = self.scroll.0.saturating_sub(1),
            KeyCode::Right => self.scroll.1 = self.scroll.1.saturating_add(4),
            KeyCode::Left => self.scroll.1 = self.scroll.1.saturating_sub(4),
            _ => {}
        }
    }

    /// Steps the first unset slot of the selected element (slot 0 once all are set) to the next
    /// legal variable, wrapping through "unset".
    fn cycle_binding(&mut self) {
        let Some(Selection::Node(node)) = self.editor.selection() else {
            self.set_toast("select an element first");
            return;
        };
        let Some(element) = self
            .editor
            .project()
            .diagram()
            .find_node(node)
            .and_then(Node::as_element)
        else {
            self.set_toast("branches have no bindings");
            return;
        };
        let slot = element.first_unset_slot().unwrap_or(0);
        let current = element.binding(slot).map(SmolStr::new);

        let options = self.editor.binding_options(node);
        if options.is_empty() {
            self.set_toast("no variables of a matching type");
            return;
        }
        let next = match current.and_then(|name| options.iter().position(|o| *o == name)) {
            Some(index) => options.get(index + 1).cloned(),
            None => options.first().cloned(),
        };
        if self.editor.set_binding(node, slot, next.as_deref()).is_ok() {
            self.set_toast(format!(
                "slot {} = {}",
                slot + 1,
                next.as_deref().unwrap_or("(unset)")
            ));
        }
    }

    fn save(&mut self) {
        let Some(file) = self.file.as_ref() else {
            self.set_toast("no project file; start rungline with a path");
            return;
        };
        if self.editor.build_document().is_err() {
            return;
        }
        let message = match file.save(self.editor.project()) {
            Ok(()) => format!("saved {}", file.path().display()),
            Err(err) => {
                log::warn!(path:? = file.path(); "save failed: {err}");
                format!("save failed: {err}")
            }
        };
        self.set_toast(message);
    }
}
