// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smol_str::SmolStr;

use super::diagram::Diagram;
use super::element::ElementKind;
use super::ids::NodeId;
use super::node::{Lane, Node, ParentRef};

pub(crate) fn wire_ref(diagram: &Diagram, index: usize) -> ParentRef {
    ParentRef::Wire(diagram.wires()[index].id())
}

pub(crate) fn lane_ref(branch: NodeId, lane: Lane) -> ParentRef {
    ParentRef::Branch { branch, lane }
}

/// Appends an element to `parent`, binding the given names to its slots in order.
pub(crate) fn add_element(
    diagram: &mut Diagram,
    parent: ParentRef,
    kind: ElementKind,
    bindings: &[&str],
) -> NodeId {
    let mut element = diagram.new_element(kind);
    for (slot, name) in bindings.iter().enumerate() {
        element.set_binding(slot, Some(SmolStr::new(name)));
    }
    let id = element.id();
    let len = diagram.list(parent).map_or(0, <[Node]>::len);
    diagram
        .insert_node(parent, len, Node::Element(element))
        .expect("fixture parent exists");
    id
}

pub(crate) fn add_branch(diagram: &mut Diagram, parent: ParentRef) -> NodeId {
    let branch = diagram.new_branch();
    let id = branch.id();
    let len = diagram.list(parent).map_or(0, <[Node]>::len);
    diagram
        .insert_node(parent, len, Node::Branch(branch))
        .expect("fixture parent exists");
    id
}

/// One wire: `NOContact(start)` then `Coil(motor)`.
pub(crate) fn contact_then_coil() -> Diagram {
    let mut diagram = Diagram::new();
    let wire = wire_ref(&diagram, 0);
    add_element(&mut diagram, wire, ElementKind::NOContact, &["start"]);
    add_element(&mut diagram, wire, ElementKind::Coil, &["motor"]);
    diagram
}

/// One wire holding `Branch { upper: [NOContact(a)], lower: [Branch {}] }`.
///
/// Returns the diagram plus (outer branch, inner branch).
pub(crate) fn branch_over_empty_branch() -> (Diagram, NodeId, NodeId) {
    let mut diagram = Diagram::new();
    let wire = wire_ref(&diagram, 0);
    let outer = add_branch(&mut diagram, wire);
    add_element(
        &mut diagram,
        lane_ref(outer, Lane::Upper),
        ElementKind::NOContact,
        &["a"],
    );
    let inner = add_branch(&mut diagram, lane_ref(outer, Lane::Lower));
    (diagram, outer, inner)
}

/// Two wires: a seal-in rung with a parallel branch and a timer rung.
pub(crate) fn two_rung_program() -> Diagram {
    let mut diagram = Diagram::new();
    let first = wire_ref(&diagram, 0);
    add_element(&mut diagram, first, ElementKind::NOContact, &["start"]);
    let branch = add_branch(&mut diagram, first);
    add_element(
        &mut diagram,
        lane_ref(branch, Lane::Upper),
        ElementKind::NCContact,
        &["stop"],
    );
    add_element(
        &mut diagram,
        lane_ref(branch, Lane::Lower),
        ElementKind::NOContact,
        &["motor"],
    );
    add_element(&mut diagram, first, ElementKind::Coil, &["motor"]);

    let second = ParentRef::Wire(diagram.push_wire());
    add_element(&mut diagram, second, ElementKind::NOContact, &["motor"]);
    add_element(&mut diagram, second, ElementKind::OnDelayTimer, &["t1"]);
    add_element(
        &mut diagram,
        second,
        ElementKind::AddMath,
        &["speed", "step", "speed"],
    );
    diagram
}
