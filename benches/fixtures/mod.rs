// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Shared deterministic benchmark fixtures (no RNG).

use rungline::model::Project;
use rungline::store::import_project;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    ManyRungs,
    DeepNesting,
    WideBranches,
}

impl Case {
    pub const ALL: [Case; 4] = [
        Case::Small,
        Case::ManyRungs,
        Case::DeepNesting,
        Case::WideBranches,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::ManyRungs => "many_rungs",
            Case::DeepNesting => "deep_nesting",
            Case::WideBranches => "wide_branches",
        }
    }
}

fn contact(name: &str) -> Value {
    json!({ "Type": "LadderElement", "ElementType": "NOContact", "ComboBoxValues": [name] })
}

fn coil(name: &str) -> Value {
    json!({ "Type": "LadderElement", "ElementType": "Coil", "ComboBoxValues": [name] })
}

fn branch(upper: Vec<Value>, lower: Vec<Value>) -> Value {
    json!({ "Type": "Branch", "Nodes1": upper, "Nodes2": lower })
}

/// A branch nested `depth` levels deep, alternating lanes.
fn nested(depth: usize) -> Value {
    if depth == 0 {
        return contact("leaf");
    }
    if depth % 2 == 0 {
        branch(vec![nested(depth - 1)], vec![contact("alt")])
    } else {
        branch(vec![contact("alt")], vec![nested(depth - 1)])
    }
}

fn rung(index: usize, mut nodes: Vec<Value>) -> Value {
    nodes.push(coil(&format!("out_{index}")));
    json!({ "Nodes": nodes })
}

pub fn document(case: Case) -> Value {
    let wires: Vec<Value> = match case {
        Case::Small => vec![rung(
            0,
            vec![contact("start"), branch(vec![contact("stop")], vec![])],
        )],
        Case::ManyRungs => (0..200)
            .map(|i| rung(i, vec![contact(&format!("in_{i}")), contact("enable")]))
            .collect(),
        Case::DeepNesting => (0..4).map(|i| rung(i, vec![nested(12)])).collect(),
        Case::WideBranches => (0..20)
            .map(|i| {
                let lane = |prefix: &str| -> Vec<Value> {
                    (0..8).map(|j| contact(&format!("{prefix}_{i}_{j}"))).collect()
                };
                rung(
                    i,
                    vec![branch(lane("a"), lane("b")), branch(lane("c"), vec![])],
                )
            })
            .collect(),
    };
    json!({ "Device": {}, "Variables": [], "Wires": wires })
}

pub fn project(case: Case) -> Project {
    let (project, report) = import_project(&document(case)).expect("fixture imports");
    assert!(report.is_clean(), "{report}");
    project
}
