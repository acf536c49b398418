// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction controller.
//!
//! Turns pointer input into tree edits: select on press, drag once the pointer travels past the
//! threshold, resolve the drop target on every move, and apply the edit on release. Every
//! successful edit is followed by one layout pass and a `layout_changed` callback.

use smol_str::SmolStr;

use crate::config::EditorConfig;
use crate::layout::{layout_diagram, LayoutSnapshot};
use crate::model::{
    NodeId, ParentRef, Point, Project, Variable, VariableCatalog, VariableError, WireId,
};
use crate::ops::{apply_ops, ApplyResult, EditError, Op, PaletteItem};
use crate::query::{element_at, nearest_branch_edge, nearest_wire};
use crate::store::{
    export_project, import_project, ExportError, ImportError, ImportReport, ProjectDocument,
};

/// Something the user should be told about.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// An edit was refused; the tree is unchanged.
    Rejected(EditError),
    /// A drop landed on neither a wire nor a branch rail.
    NoDropTarget,
    NothingSelected,
    Variable(VariableError),
    ExportFailed(ExportError),
    ImportFailed(ImportError),
    /// Import succeeded but skipped or adjusted records.
    ImportWarnings(ImportReport),
    DeviceStatus(String),
}

/// Dialogs, notifications and repaint, provided by whoever hosts the editor.
pub trait EditorHost {
    fn notify(&mut self, notice: Notice);

    /// Asked once per drop that would put a second coil on `wire`.
    fn confirm_coil_replacement(&mut self, wire: WireId) -> bool;

    fn layout_changed(&mut self, _layout: &LayoutSnapshot) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Node(NodeId),
    Wire(WireId),
}

/// Controller state, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Selected(Selection),
    DraggingNode(NodeId),
    DraggingWire(WireId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Idle,
    Selected {
        selection: Selection,
        /// Pointer holding the selection down, until release.
        held: Option<(PointerId, Point)>,
    },
    DraggingNode {
        pointer: PointerId,
        node: NodeId,
        position: Point,
        target: Option<ParentRef>,
    },
    DraggingWire {
        pointer: PointerId,
        wire: WireId,
        guide_y: f64,
    },
}

/// What the host should draw on top of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Overlay {
    pub selection: Option<Selection>,
    /// The single prospective drop target while dragging a node.
    pub drop_target: Option<ParentRef>,
    /// Node being dragged and where the pointer is.
    pub ghost: Option<(NodeId, Point)>,
    /// Rail y the dragged wire would be reinserted at.
    pub guide_y: Option<f64>,
}

pub struct Editor<H> {
    project: Project,
    config: EditorConfig,
    layout: LayoutSnapshot,
    state: State,
    host: H,
}

impl<H: EditorHost> Editor<H> {
    pub fn new(project: Project, config: EditorConfig, host: H) -> Self {
        let mut editor = Self {
            project,
            config,
            layout: LayoutSnapshot::default(),
            state: State::Idle,
            host,
        };
        editor.relayout();
        editor
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn current_layout(&self) -> &LayoutSnapshot {
        &self.layout
    }

    /// Changes the drawing surface width and relays out.
    pub fn set_surface_width(&mut self, width: f64) {
        if width > 0.0 && width != self.config.surface_width {
            self.config.surface_width = width;
            self.relayout();
        }
    }

    pub fn mode(&self) -> Mode {
        match self.state {
            State::Idle => Mode::Idle,
            State::Selected { selection, .. } => Mode::Selected(selection),
            State::DraggingNode { node, .. } => Mode::DraggingNode(node),
            State::DraggingWire { wire, .. } => Mode::DraggingWire(wire),
        }
    }

    pub fn selection(&self) -> Option<Selection> {
        match self.state {
            State::Selected { selection, .. } => Some(selection),
            State::DraggingNode { node, .. } => Some(Selection::Node(node)),
            State::DraggingWire { wire, .. } => Some(Selection::Wire(wire)),
            State::Idle => None,
        }
    }

    pub fn overlay(&self) -> Overlay {
        let mut overlay = Overlay {
            selection: self.selection(),
            ..Overlay::default()
        };
        match self.state {
            State::DraggingNode {
                node,
                position,
                target,
                ..
            } => {
                overlay.drop_target = target;
                overlay.ghost = Some((node, position));
            }
            State::DraggingWire { guide_y, .. } => overlay.guide_y = Some(guide_y),
            State::Idle | State::Selected { .. } => {}
        }
        overlay
    }

    fn captured_by(&self) -> Option<PointerId> {
        match self.state {
            State::Selected {
                held: Some((pointer, _)),
                ..
            }
            | State::DraggingNode { pointer, .. }
            | State::DraggingWire { pointer, .. } => Some(pointer),
            State::Idle | State::Selected { held: None, .. } => None,
        }
    }

    /// Hit-test priority: element, then branch rail, then wire rail.
    fn hit(&self, point: Point) -> Option<Selection> {
        let diagram = self.project.diagram();
        let tolerance = self.config.interaction.hit_tolerance;
        if let Some(node) = element_at(diagram, point, &self.config.layout) {
            return Some(Selection::Node(node));
        }
        if let Some(edge) = nearest_branch_edge(diagram, point, tolerance, None) {
            return Some(Selection::Node(edge.branch));
        }
        nearest_wire(diagram, point, tolerance).map(Selection::Wire)
    }

    /// Drop target priority: branch rail, then wire rail.
    fn drop_target(&self, point: Point, dragged: Option<NodeId>) -> Option<ParentRef> {
        let diagram = self.project.diagram();
        let tolerance = self.config.interaction.hit_tolerance;
        if let Some(edge) = nearest_branch_edge(diagram, point, tolerance, dragged) {
            return Some(ParentRef::Branch {
                branch: edge.branch,
                lane: edge.lane,
            });
        }
        nearest_wire(diagram, point, tolerance).map(ParentRef::Wire)
    }

    pub fn handle_pointer_down(&mut self, pointer: PointerId, point: Point) {
        if self.captured_by().is_some() {
            return;
        }
        self.state = match self.hit(point) {
            Some(selection) => State::Selected {
                selection,
                held: Some((pointer, point)),
            },
            None => State::Idle,
        };
    }

    pub fn handle_pointer_move(&mut self, pointer: PointerId, point: Point) {
        if self.captured_by() != Some(pointer) {
            return;
        }
        match self.state {
            State::Selected {
                selection,
                held: Some((_, origin)),
            } => {
                if point.distance(origin) <= self.config.interaction.drag_threshold {
                    return;
                }
                self.state = match selection {
                    Selection::Node(node) => State::DraggingNode {
                        pointer,
                        node,
                        position: point,
                        target: self.drop_target(point, Some(node)),
                    },
                    Selection::Wire(wire) => State::DraggingWire {
                        pointer,
                        wire,
                        guide_y: point.y,
                    },
                };
            }
            State::DraggingNode { node, .. } => {
                let target = self.drop_target(point, Some(node));
                if let State::DraggingNode {
                    position,
                    target: current,
                    ..
                } = &mut self.state
                {
                    *position = point;
                    *current = target;
                }
            }
            State::DraggingWire { wire, .. } => {
                self.state = State::DraggingWire {
                    pointer,
                    wire,
                    guide_y: point.y,
                };
            }
            State::Idle | State::Selected { held: None, .. } => {}
        }
    }

    pub fn handle_pointer_up(&mut self, pointer: PointerId, point: Point) {
        if self.captured_by() != Some(pointer) {
            return;
        }
        match self.state {
            State::Selected { selection, .. } => {
                self.state = State::Selected {
                    selection,
                    held: None,
                };
            }
            State::DraggingNode { node, .. } => {
                self.state = State::Idle;
                match self.drop_target(point, Some(node)) {
                    Some(target) => {
                        let _ = self.apply(&[Op::MoveNode {
                            node,
                            target,
                            x: point.x,
                        }]);
                    }
                    None => {
                        log::debug!(node:% = node; "drag released away from any target");
                        self.host.notify(Notice::NoDropTarget);
                    }
                }
            }
            State::DraggingWire { wire, .. } => {
                self.state = State::Idle;
                let _ = self.apply(&[Op::MoveWire { wire, y: point.y }]);
            }
            State::Idle => {}
        }
    }

    /// Drops a new palette item at `point`. Returns the created node.
    ///
    /// Ignored while a pointer holds a drag.
    pub fn handle_drop(&mut self, item: PaletteItem, point: Point) -> Option<NodeId> {
        if let Some(pointer) = self.captured_by() {
            log::debug!(pointer = pointer.0; "palette drop ignored during a drag");
            return None;
        }
        let Some(target) = self.drop_target(point, None) else {
            self.host.notify(Notice::NoDropTarget);
            return None;
        };
        let result = self
            .apply(&[Op::InsertNew {
                item,
                target,
                x: point.x,
            }])
            .ok()?;
        result.delta.added_node()
    }

    /// Removes the selected node or wire.
    pub fn delete_selected(&mut self) {
        let op = match self.selection() {
            Some(Selection::Node(node)) => Op::RemoveNode { node },
            Some(Selection::Wire(wire)) => Op::RemoveWire { wire },
            None => {
                self.host.notify(Notice::NothingSelected);
                return;
            }
        };
        self.state = State::Idle;
        let _ = self.apply(&[op]);
    }

    pub fn add_wire(&mut self) -> Option<WireId> {
        let result = self.apply(&[Op::AddWire]).ok()?;
        result.delta.added_wire()
    }

    pub fn remove_wire(&mut self, wire: WireId) -> Result<(), EditError> {
        if self.selection() == Some(Selection::Wire(wire)) {
            self.state = State::Idle;
        }
        self.apply(&[Op::RemoveWire { wire }]).map(|_| ())
    }

    /// Sets (or with `None`, clears) one binding slot.
    pub fn set_binding(
        &mut self,
        node: NodeId,
        slot: usize,
        name: Option<&str>,
    ) -> Result<(), EditError> {
        self.apply(&[Op::SetBinding {
            node,
            slot,
            name: name.map(SmolStr::new),
        }])
        .map(|_| ())
    }

    /// Variable names that may be bound to `node`.
    pub fn binding_options(&self, node: NodeId) -> Vec<SmolStr> {
        self.project
            .diagram()
            .find_node(node)
            .and_then(|node| node.element_kind())
            .map(|kind| self.project.variables().binding_options(kind.family()))
            .unwrap_or_default()
    }

    pub fn add_variable(&mut self, variable: Variable) -> Result<(), VariableError> {
        let result = self.project.variables_mut().add(variable);
        if let Err(err) = &result {
            self.host.notify(Notice::Variable(err.clone()));
        }
        result
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Variable> {
        self.project.variables_mut().remove(name)
    }

    pub fn build_document(&mut self) -> Result<ProjectDocument, ExportError> {
        let result = export_project(&self.project);
        if let Err(err) = &result {
            log::warn!("export failed: {err}");
            self.host.notify(Notice::ExportFailed(err.clone()));
        }
        result
    }

    /// Replaces the project with the one in `document`.
    ///
    /// On failure the current project stays in place.
    pub fn apply_document(
        &mut self,
        document: &serde_json::Value,
    ) -> Result<ImportReport, ImportError> {
        let (project, report) = match import_project(document) {
            Ok(imported) => imported,
            Err(err) => {
                log::warn!("import failed: {err}");
                self.host.notify(Notice::ImportFailed(err.clone()));
                return Err(err);
            }
        };
        self.project = project;
        self.state = State::Idle;
        self.relayout();
        if !report.is_clean() {
            self.host.notify(Notice::ImportWarnings(report.clone()));
        }
        Ok(report)
    }

    fn apply(&mut self, ops: &[Op]) -> Result<ApplyResult, EditError> {
        let host = &mut self.host;
        let result = apply_ops(self.project.diagram_mut(), ops, &mut |wire| {
            host.confirm_coil_replacement(wire)
        });
        match result {
            Ok(result) => {
                self.relayout();
                Ok(result)
            }
            Err(err) => {
                log::info!(error:% = err; "edit rejected");
                self.host.notify(Notice::Rejected(err.clone()));
                Err(err)
            }
        }
    }

    fn relayout(&mut self) {
        self.layout = layout_diagram(
            self.project.diagram_mut(),
            &self.config.layout,
            self.config.surface_width,
        );
        self.host.layout_changed(&self.layout);
    }
}

#[cfg(test)]
mod tests;
