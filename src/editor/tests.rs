// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};
use serde_json::json;

use super::{Editor, EditorHost, Mode, Notice, PointerId, Selection};
use crate::config::EditorConfig;
use crate::layout::LayoutSnapshot;
use crate::model::{
    ElementKind, Lane, Node, NodeId, ParentRef, Point, Project, Variable, WireId,
};
use crate::ops::{EditError, PaletteItem};

const RAIL: f64 = 60.0;
const MOUSE: PointerId = PointerId(1);
const TOUCH: PointerId = PointerId(2);

#[derive(Debug, Default)]
struct RecordingHost {
    notices: Vec<Notice>,
    answer: bool,
    confirmations: Vec<WireId>,
    layouts: usize,
}

impl EditorHost for RecordingHost {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm_coil_replacement(&mut self, wire: WireId) -> bool {
        self.confirmations.push(wire);
        self.answer
    }

    fn layout_changed(&mut self, _layout: &LayoutSnapshot) {
        self.layouts += 1;
    }
}

#[fixture]
fn editor() -> Editor<RecordingHost> {
    Editor::new(
        Project::default(),
        EditorConfig::default(),
        RecordingHost::default(),
    )
}

fn drop_item(editor: &mut Editor<RecordingHost>, item: PaletteItem, x: f64, y: f64) -> NodeId {
    editor
        .handle_drop(item, Point::new(x, y))
        .expect("drop accepted")
}

fn drag(editor: &mut Editor<RecordingHost>, from: Point, to: Point) {
    editor.handle_pointer_down(MOUSE, from);
    editor.handle_pointer_move(MOUSE, to);
    editor.handle_pointer_up(MOUSE, to);
}

#[rstest]
fn empty_project_exports_one_empty_wire(mut editor: Editor<RecordingHost>) {
    let document = editor.build_document().unwrap();
    assert_eq!(
        serde_json::to_value(document).unwrap(),
        json!({ "Device": {}, "Variables": [], "Wires": [ { "Nodes": [] } ] })
    );
    assert!(editor.host().layouts >= 1);
}

#[rstest]
fn contact_then_coil_ends_at_the_far_edge(mut editor: Editor<RecordingHost>) {
    let contact = drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 10.0, RAIL);
    let coil = drop_item(&mut editor, PaletteItem::Element(ElementKind::Coil), 10.0, RAIL);
    editor.set_binding(contact, 0, Some("start")).unwrap();
    editor.set_binding(coil, 0, Some("motor")).unwrap();

    let layout = editor.current_layout();
    let coil_geom = layout.node(coil).unwrap();
    assert_eq!(coil_geom.x + coil_geom.width, layout.surface_width);
    assert_eq!(layout.node(contact).unwrap().x, 0.0);

    let value = serde_json::to_value(editor.build_document().unwrap()).unwrap();
    assert_eq!(
        value["Wires"][0]["Nodes"],
        json!([
            { "Type": "LadderElement", "ElementType": "NOContact", "ComboBoxValues": ["start"] },
            { "Type": "LadderElement", "ElementType": "Coil", "ComboBoxValues": ["motor"] }
        ])
    );
}

#[rstest]
fn declined_coil_replacement_changes_nothing(mut editor: Editor<RecordingHost>) {
    drop_item(&mut editor, PaletteItem::Element(ElementKind::Coil), 10.0, RAIL);
    let before = editor.project().diagram().outline();
    let wire = editor.project().diagram().wires()[0].id();

    let created = editor.handle_drop(
        PaletteItem::Element(ElementKind::SetCoil),
        Point::new(10.0, RAIL),
    );

    assert_eq!(created, None);
    assert_eq!(editor.host().confirmations, vec![wire]);
    assert_eq!(
        editor.host().notices,
        vec![Notice::Rejected(EditError::DuplicateCoil { wire })]
    );
    assert_eq!(editor.project().diagram().outline(), before);
}

#[rstest]
fn accepted_coil_replacement_keeps_one_coil(mut editor: Editor<RecordingHost>) {
    editor.host_mut().answer = true;
    drop_item(&mut editor, PaletteItem::Element(ElementKind::Coil), 10.0, RAIL);
    let set = drop_item(&mut editor, PaletteItem::Element(ElementKind::SetCoil), 10.0, RAIL);

    let wire = &editor.project().diagram().wires()[0];
    assert_eq!(wire.nodes().len(), 1);
    assert_eq!(wire.coil().map(Node::id), Some(set));
}

#[rstest]
fn nested_branch_in_lower_lane_gives_extent_250(mut editor: Editor<RecordingHost>) {
    let outer = drop_item(&mut editor, PaletteItem::Branch, 10.0, RAIL);
    drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 30.0, RAIL);
    let lower_rail = RAIL + 125.0;
    let inner = drop_item(&mut editor, PaletteItem::Branch, 30.0, lower_rail);

    let diagram = editor.project().diagram();
    let outer_branch = diagram.find_node(outer).and_then(Node::as_branch).unwrap();
    assert_eq!(outer_branch.upper().len(), 1);
    assert_eq!(outer_branch.lower()[0].id(), inner);
    assert_eq!(outer_branch.vertical_extent(), 250.0);
    assert!(diagram.parent_link_violations().is_empty());
}

#[rstest]
fn coil_dropped_on_a_branch_rail_is_rejected(mut editor: Editor<RecordingHost>) {
    drop_item(&mut editor, PaletteItem::Branch, 10.0, RAIL);
    let before = editor.project().diagram().outline();

    let created = editor.handle_drop(
        PaletteItem::Element(ElementKind::OneShotCoil),
        Point::new(20.0, RAIL + 125.0),
    );

    assert_eq!(created, None);
    assert_eq!(
        editor.host().notices,
        vec![Notice::Rejected(EditError::CoilInBranch)]
    );
    assert_eq!(editor.project().diagram().outline(), before);
}

#[rstest]
fn drop_away_from_rails_is_reported(mut editor: Editor<RecordingHost>) {
    let created = editor.handle_drop(PaletteItem::Branch, Point::new(10.0, 900.0));
    assert_eq!(created, None);
    assert_eq!(editor.host().notices, vec![Notice::NoDropTarget]);
}

#[rstest]
fn drag_released_away_from_rails_is_reported(mut editor: Editor<RecordingHost>) {
    let contact = drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 10.0, RAIL);
    let before = editor.project().diagram().outline();

    drag(&mut editor, Point::new(10.0, RAIL), Point::new(300.0, 900.0));

    assert_eq!(editor.mode(), Mode::Idle);
    assert_eq!(editor.host().notices, vec![Notice::NoDropTarget]);
    assert_eq!(editor.project().diagram().outline(), before);
    assert!(editor.project().diagram().find_node(contact).is_some());
}

#[rstest]
fn palette_drop_is_ignored_while_a_pointer_is_captured(mut editor: Editor<RecordingHost>) {
    let contact = drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 10.0, RAIL);
    editor.handle_pointer_down(MOUSE, Point::new(10.0, RAIL));
    editor.handle_pointer_move(MOUSE, Point::new(300.0, RAIL));
    assert_eq!(editor.mode(), Mode::DraggingNode(contact));

    let created = editor.handle_drop(PaletteItem::Branch, Point::new(600.0, RAIL));
    assert_eq!(created, None);
    assert_eq!(editor.project().diagram().node_count(), 1);
    assert!(editor.host().notices.is_empty());

    editor.handle_pointer_up(MOUSE, Point::new(300.0, RAIL));
    assert!(editor.handle_drop(PaletteItem::Branch, Point::new(600.0, RAIL)).is_some());
}

#[rstest]
fn small_moves_keep_the_selection_and_large_ones_drag(mut editor: Editor<RecordingHost>) {
    let contact = drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 10.0, RAIL);
    let branch = drop_item(&mut editor, PaletteItem::Branch, 500.0, RAIL);
    let lower_rail = RAIL + 125.0;

    editor.handle_pointer_down(MOUSE, Point::new(10.0, RAIL));
    assert_eq!(editor.mode(), Mode::Selected(Selection::Node(contact)));

    editor.handle_pointer_move(MOUSE, Point::new(12.0, RAIL + 2.0));
    assert_eq!(editor.mode(), Mode::Selected(Selection::Node(contact)));

    let over_lower = Point::new(100.0, lower_rail);
    editor.handle_pointer_move(MOUSE, over_lower);
    assert_eq!(editor.mode(), Mode::DraggingNode(contact));
    let overlay = editor.overlay();
    assert_eq!(
        overlay.drop_target,
        Some(ParentRef::Branch {
            branch,
            lane: Lane::Lower
        })
    );
    assert_eq!(overlay.ghost, Some((contact, over_lower)));

    editor.handle_pointer_up(MOUSE, over_lower);
    assert_eq!(editor.mode(), Mode::Idle);
    let diagram = editor.project().diagram();
    assert_eq!(
        diagram.find_node(contact).and_then(Node::parent),
        Some(ParentRef::Branch {
            branch,
            lane: Lane::Lower
        })
    );
    assert_eq!(diagram.wires()[0].nodes().len(), 1);
}

#[rstest]
fn other_pointers_are_ignored_while_captured(mut editor: Editor<RecordingHost>) {
    let contact = drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 10.0, RAIL);
    editor.add_wire().unwrap();

    editor.handle_pointer_down(MOUSE, Point::new(10.0, RAIL));
    editor.handle_pointer_down(TOUCH, Point::new(600.0, RAIL + 125.0));
    editor.handle_pointer_move(TOUCH, Point::new(600.0, 0.0));
    editor.handle_pointer_up(TOUCH, Point::new(600.0, 0.0));
    assert_eq!(editor.mode(), Mode::Selected(Selection::Node(contact)));

    editor.handle_pointer_up(MOUSE, Point::new(10.0, RAIL));
    assert_eq!(editor.mode(), Mode::Selected(Selection::Node(contact)));
    editor.handle_pointer_down(TOUCH, Point::new(600.0, RAIL + 125.0));
    assert!(matches!(editor.mode(), Mode::Selected(Selection::Wire(_))));
}

#[rstest]
fn dragging_a_wire_reorders_rungs(mut editor: Editor<RecordingHost>) {
    let first = editor.project().diagram().wires()[0].id();
    let second = editor.add_wire().unwrap();
    let third = editor.add_wire().unwrap();
    let third_rail = editor.current_layout().wire(third).unwrap().y;

    editor.handle_pointer_down(MOUSE, Point::new(600.0, third_rail));
    editor.handle_pointer_move(MOUSE, Point::new(600.0, 0.0));
    assert_eq!(editor.mode(), Mode::DraggingWire(third));
    assert_eq!(editor.overlay().guide_y, Some(0.0));
    editor.handle_pointer_up(MOUSE, Point::new(600.0, 0.0));

    let order: Vec<_> = editor
        .project()
        .diagram()
        .wires()
        .iter()
        .map(|w| w.id())
        .collect();
    assert_eq!(order, vec![third, first, second]);
    assert_eq!(editor.mode(), Mode::Idle);
}

#[rstest]
fn dragging_a_branch_along_its_own_rail_leaves_it_in_place(
    mut editor: Editor<RecordingHost>,
) {
    let branch = drop_item(&mut editor, PaletteItem::Branch, 10.0, RAIL);
    // Press on the lower rail (selects the branch), drag along the same rail.
    let lower_rail = RAIL + 125.0;
    drag(
        &mut editor,
        Point::new(20.0, lower_rail),
        Point::new(60.0, lower_rail),
    );
    // Its own rails are not targets, so the release lands nowhere.
    assert_eq!(editor.host().notices, vec![Notice::NoDropTarget]);
    let diagram = editor.project().diagram();
    assert_eq!(diagram.wires()[0].nodes()[0].id(), branch);
}

#[rstest]
fn delete_without_selection_notifies(mut editor: Editor<RecordingHost>) {
    editor.delete_selected();
    assert_eq!(editor.host().notices, vec![Notice::NothingSelected]);
}

#[rstest]
fn delete_removes_selected_node_and_wire(mut editor: Editor<RecordingHost>) {
    drop_item(&mut editor, PaletteItem::Element(ElementKind::NCContact), 10.0, RAIL);
    editor.handle_pointer_down(MOUSE, Point::new(10.0, RAIL));
    editor.handle_pointer_up(MOUSE, Point::new(10.0, RAIL));
    editor.delete_selected();
    assert_eq!(editor.project().diagram().node_count(), 0);
    assert_eq!(editor.mode(), Mode::Idle);

    editor.add_wire().unwrap();
    editor.handle_pointer_down(MOUSE, Point::new(400.0, RAIL));
    editor.handle_pointer_up(MOUSE, Point::new(400.0, RAIL));
    editor.delete_selected();
    assert_eq!(editor.project().diagram().wires().len(), 1);
}

#[rstest]
fn binding_options_follow_the_element_family(mut editor: Editor<RecordingHost>) {
    editor.add_variable(Variable::new("Input", "start")).unwrap();
    editor.add_variable(Variable::new("Output", "lamp")).unwrap();
    editor.add_variable(Variable::new("Number", "count")).unwrap();
    let err = editor.add_variable(Variable::new("Input", "")).unwrap_err();
    assert_eq!(editor.host().notices, vec![Notice::Variable(err)]);

    let coil = drop_item(&mut editor, PaletteItem::Element(ElementKind::Coil), 10.0, RAIL);
    let math = drop_item(&mut editor, PaletteItem::Element(ElementKind::AddMath), 10.0, RAIL);
    assert_eq!(editor.binding_options(coil), vec!["lamp"]);
    assert_eq!(editor.binding_options(math), vec!["count"]);
}

#[rstest]
fn long_binding_widens_the_element(mut editor: Editor<RecordingHost>) {
    let contact = drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 10.0, RAIL);
    let before = editor.current_layout().node(contact).unwrap().width;
    editor
        .set_binding(contact, 0, Some("conveyor_start_button"))
        .unwrap();
    let after = editor.current_layout().node(contact).unwrap().width;
    assert!(after > before);
}

#[rstest]
fn export_failure_is_notified_once(mut editor: Editor<RecordingHost>) {
    drop_item(&mut editor, PaletteItem::Element(ElementKind::NOContact), 10.0, RAIL);
    let err = editor.build_document().unwrap_err();
    assert_eq!(editor.host().notices, vec![Notice::ExportFailed(err)]);
}

#[rstest]
fn failed_import_keeps_the_current_project(mut editor: Editor<RecordingHost>) {
    drop_item(&mut editor, PaletteItem::Branch, 10.0, RAIL);
    let before = editor.project().diagram().outline();

    let err = editor
        .apply_document(&json!({ "Device": null, "Wires": [] }))
        .unwrap_err();
    assert_eq!(editor.host().notices, vec![Notice::ImportFailed(err)]);
    assert_eq!(editor.project().diagram().outline(), before);

    let report = editor
        .apply_document(&json!({
            "Device": {},
            "Wires": [ { "Nodes": [ { "Type": "LadderElement", "ElementType": "Coil", "ComboBoxValues": ["m"] } ] } ]
        }))
        .unwrap();
    assert!(report.is_clean());
    assert_eq!(editor.project().diagram().node_count(), 1);
    assert_eq!(editor.current_layout().nodes.len(), 1);
}
