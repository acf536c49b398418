// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn apply_op(
    diagram: &mut Diagram,
    op: &Op,
    confirm: &mut ConfirmCoilReplacement<'_>,
    delta: &mut DeltaBuilder,
) -> Result<(), EditError> {
    match op {
        Op::InsertNew { item, target, x } => {
            let node = match item {
                PaletteItem::Element(kind) => Node::Element(diagram.new_element(*kind)),
                PaletteItem::Branch => Node::Branch(diagram.new_branch()),
            };
            let id = node.id();
            place_node(diagram, node, *target, *x, confirm, delta)?;
            delta.record_added(ObjectRef::Node(id));
            Ok(())
        }
        Op::MoveNode { node, target, x } => {
            if let ParentRef::Branch { branch, .. } = target {
                let moving = diagram
                    .find_node(*node)
                    .ok_or(EditError::NodeNotFound(*node))?;
                if moving.is_or_contains(*branch) {
                    return Err(EditError::SelfNesting { branch: *node });
                }
            }
            let (detached, _, _) = diagram
                .take_node(*node)
                .ok_or(EditError::NodeNotFound(*node))?;
            place_node(diagram, detached, *target, *x, confirm, delta)?;
            delta.record_updated(ObjectRef::Node(*node));
            Ok(())
        }
        Op::RemoveNode { node } => {
            diagram
                .take_node(*node)
                .ok_or(EditError::NodeNotFound(*node))?;
            delta.record_removed(ObjectRef::Node(*node));
            Ok(())
        }
        Op::AddWire => {
            let wire = diagram.push_wire();
            delta.record_added(ObjectRef::Wire(wire));
            Ok(())
        }
        Op::RemoveWire { wire } => {
            diagram
                .take_wire(*wire)
                .ok_or(EditError::WireNotFound(*wire))?;
            delta.record_removed(ObjectRef::Wire(*wire));
            Ok(())
        }
        Op::MoveWire { wire, y } => {
            let (taken, _) = diagram
                .take_wire(*wire)
                .ok_or(EditError::WireNotFound(*wire))?;
            let rails: Vec<f64> = diagram.wires().iter().map(|w| w.y()).collect();
            let index = insertion_index(&rails, *y);
            diagram.insert_wire(index, taken);
            delta.record_updated(ObjectRef::Wire(*wire));
            Ok(())
        }
        Op::SetBinding { node, slot, name } => {
            let Some(found) = diagram.find_node_mut(*node) else {
                return Err(EditError::NodeNotFound(*node));
            };
            let Node::Element(element) = found else {
                return Err(EditError::NotAnElement(*node));
            };
            let kind = element.kind();
            if !element.set_binding(*slot, name.clone()) {
                return Err(EditError::SlotOutOfRange {
                    kind,
                    slot: *slot,
                    slots: kind.binding_count(),
                });
            }
            delta.record_updated(ObjectRef::Node(*node));
            Ok(())
        }
    }
}

/// Drops a detached node into `target`, enforcing the coil rules.
fn place_node(
    diagram: &mut Diagram,
    node: Node,
    target: ParentRef,
    x: f64,
    confirm: &mut ConfirmCoilReplacement<'_>,
    delta: &mut DeltaBuilder,
) -> Result<(), EditError> {
    let list = diagram
        .list(target)
        .ok_or(EditError::TargetNotFound(target))?;

    match target {
        ParentRef::Branch { .. } => {
            if node.contains_coil() {
                return Err(EditError::CoilInBranch);
            }
        }
        ParentRef::Wire(wire) => {
            if node.is_coil() {
                if let Some(existing) = list.iter().find(|n| n.is_coil()).map(Node::id) {
                    if !confirm(wire) {
                        return Err(EditError::DuplicateCoil { wire });
                    }
                    diagram
                        .take_node(existing)
                        .ok_or(EditError::NodeNotFound(existing))?;
                    delta.record_removed(ObjectRef::Node(existing));
                }
            }
        }
    }

    let positions: Vec<f64> = diagram
        .list(target)
        .map(|list| list.iter().map(Node::x).collect())
        .unwrap_or_default();
    let index = insertion_index(&positions, x);
    diagram
        .insert_node(target, index, node)
        .map_err(|_| EditError::TargetNotFound(target))
}

