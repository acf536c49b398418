// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Project document: export, import and schema.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::model::{
    Diagram, ElementKind, Lane, Node, ParentRef, Project, Variable, VariableError, VariableTable,
};

/// The persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectDocument {
    /// Device configuration; opaque to the editor.
    #[serde(rename = "Device")]
    pub device: Value,
    #[serde(rename = "Variables")]
    pub variables: Vec<VariableRecord>,
    #[serde(rename = "Wires")]
    pub wires: Vec<WireRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VariableRecord {
    #[serde(rename = "Type")]
    pub var_type: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Any other fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WireRecord {
    #[serde(rename = "Nodes")]
    pub nodes: Vec<NodeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "Type")]
pub enum NodeRecord {
    LadderElement {
        #[serde(rename = "ElementType")]
        element_type: String,
        /// One entry per binding slot.
        #[serde(rename = "ComboBoxValues")]
        combo_box_values: Vec<String>,
    },
    Branch {
        #[serde(rename = "Nodes1")]
        nodes1: Vec<NodeRecord>,
        #[serde(rename = "Nodes2")]
        nodes2: Vec<NodeRecord>,
    },
}

/// JSON Schema of [`ProjectDocument`].
pub fn document_schema() -> Value {
    serde_json::to_value(schemars::schema_for!(ProjectDocument)).unwrap_or(Value::Null)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("{kind} at {path} has no variable bound to slot {slot}")]
    UnsetBinding {
        path: String,
        kind: ElementKind,
        slot: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("document root is not an object")]
    NotAnObject,
    #[error("document has no Device block")]
    MissingDevice,
    #[error("{section} must be an array")]
    NotAnArray { section: &'static str },
}

/// Builds the document for `project`.
///
/// Fails without producing anything if any element has an unbound slot.
pub fn export_project(project: &Project) -> Result<ProjectDocument, ExportError> {
    let mut wires = Vec::with_capacity(project.diagram().wires().len());
    for (index, wire) in project.diagram().wires().iter().enumerate() {
        let path = format!("$.Wires[{index}].Nodes");
        wires.push(WireRecord {
            nodes: export_nodes(wire.nodes(), &path)?,
        });
    }

    Ok(ProjectDocument {
        device: project.device().clone(),
        variables: project
            .variables()
            .iter()
            .map(|variable| VariableRecord {
                var_type: variable.var_type().to_owned(),
                name: variable.name().to_owned(),
                extra: variable.extra().clone(),
            })
            .collect(),
        wires,
    })
}

fn export_nodes(nodes: &[Node], path: &str) -> Result<Vec<NodeRecord>, ExportError> {
    let mut out = Vec::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        let path = format!("{path}[{index}]");
        let record = match node {
            Node::Element(element) => {
                let mut combo_box_values = Vec::with_capacity(element.bindings().len());
                for (slot, binding) in element.bindings().iter().enumerate() {
                    let Some(name) = binding else {
                        return Err(ExportError::UnsetBinding {
                            path,
                            kind: element.kind(),
                            slot,
                        });
                    };
                    combo_box_values.push(name.to_string());
                }
                NodeRecord::LadderElement {
                    element_type: element.kind().name().to_owned(),
                    combo_box_values,
                }
            }
            Node::Branch(branch) => NodeRecord::Branch {
                nodes1: export_nodes(branch.upper(), &format!("{path}.Nodes1"))?,
                nodes2: export_nodes(branch.lower(), &format!("{path}.Nodes2"))?,
            },
        };
        out.push(record);
    }
    Ok(out)
}

/// Why a record was left out of the imported project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotAnObject,
    MissingField(&'static str),
    UnknownNodeType(String),
    UnknownElementKind {
        name: String,
        suggestion: Option<ElementKind>,
    },
    CoilInBranch,
    DuplicateCoil,
    InvalidVariable(VariableError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("record is not an object"),
            Self::MissingField(field) => write!(f, "missing {field}"),
            Self::UnknownNodeType(name) => write!(f, "unknown node type {name:?}"),
            Self::UnknownElementKind {
                name,
                suggestion: Some(kind),
            } => write!(f, "unknown element type {name:?} (did you mean {kind}?)"),
            Self::UnknownElementKind {
                name,
                suggestion: None,
            } => write!(f, "unknown element type {name:?}"),
            Self::CoilInBranch => f.write_str("coil inside a branch"),
            Self::DuplicateCoil => f.write_str("second coil on the same wire"),
            Self::InvalidVariable(err) => write!(f, "{err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// JSON path of the record, e.g. `$.Wires[0].Nodes[2]`.
    pub path: String,
    pub reason: SkipReason,
}

/// A binding list whose length did not match the element kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAdjustment {
    pub path: String,
    pub expected: usize,
    pub found: usize,
}

/// Everything import had to skip or fix up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub skipped: Vec<SkippedRecord>,
    pub adjusted: Vec<SlotAdjustment>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.adjusted.is_empty()
    }

    fn skip(&mut self, path: String, reason: SkipReason) {
        log::warn!(record = path.as_str(); "skipping record: {reason}");
        self.skipped.push(SkippedRecord { path, reason });
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for skipped in &self.skipped {
            writeln!(f, "skipped {}: {}", skipped.path, skipped.reason)?;
        }
        for adjusted in &self.adjusted {
            let verb = if adjusted.found > adjusted.expected {
                "truncated"
            } else {
                "padded"
            };
            writeln!(
                f,
                "{verb} {}: {} binding(s) for {} slot(s)",
                adjusted.path, adjusted.found, adjusted.expected
            )?;
        }
        Ok(())
    }
}

/// Rebuilds a project from a document value.
///
/// A missing or null `Device` aborts; malformed node and variable records are skipped and
/// listed in the report.
pub fn import_project(document: &Value) -> Result<(Project, ImportReport), ImportError> {
    let root = document.as_object().ok_or(ImportError::NotAnObject)?;
    let device = match root.get("Device") {
        None | Some(Value::Null) => return Err(ImportError::MissingDevice),
        Some(device) => device.clone(),
    };
    let variables = section(root, "Variables")?;
    let wires = section(root, "Wires")?;

    let mut report = ImportReport::default();
    let table = import_variables(variables, &mut report);

    let mut diagram = Diagram::without_wires();
    for (index, wire) in wires.iter().enumerate() {
        let path = format!("$.Wires[{index}]");
        let Some(wire) = wire.as_object() else {
            report.skip(path, SkipReason::NotAnObject);
            continue;
        };
        let nodes = wire.get("Nodes").and_then(Value::as_array);
        let Some(nodes) = nodes else {
            report.skip(path, SkipReason::MissingField("Nodes"));
            continue;
        };
        let wire_id = diagram.push_wire();
        import_nodes(
            &mut diagram,
            ParentRef::Wire(wire_id),
            nodes,
            &format!("{path}.Nodes"),
            &mut report,
        );
    }

    log::debug!(
        wires = diagram.wires().len(),
        nodes = diagram.node_count(),
        skipped = report.skipped.len();
        "imported document",
    );
    Ok((Project::new(device, table, diagram), report))
}

fn section<'a>(
    root: &'a Map<String, Value>,
    section: &'static str,
) -> Result<&'a [Value], ImportError> {
    match root.get(section) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ImportError::NotAnArray { section }),
    }
}

fn import_variables(records: &[Value], report: &mut ImportReport) -> VariableTable {
    let mut table = VariableTable::default();
    for (index, record) in records.iter().enumerate() {
        let path = format!("$.Variables[{index}]");
        let Some(record) = record.as_object() else {
            report.skip(path, SkipReason::NotAnObject);
            continue;
        };
        let Some(var_type) = record.get("Type").and_then(Value::as_str) else {
            report.skip(path, SkipReason::MissingField("Type"));
            continue;
        };
        let Some(name) = record.get("Name").and_then(Value::as_str) else {
            report.skip(path, SkipReason::MissingField("Name"));
            continue;
        };
        let extra: Map<String, Value> = record
            .iter()
            .filter(|(key, _)| key.as_str() != "Type" && key.as_str() != "Name")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if let Err(err) = table.add(Variable::new(var_type, name).with_extra(extra)) {
            report.skip(path, SkipReason::InvalidVariable(err));
        }
    }
    table
}

fn import_nodes(
    diagram: &mut Diagram,
    parent: ParentRef,
    records: &[Value],
    path: &str,
    report: &mut ImportReport,
) {
    for (index, record) in records.iter().enumerate() {
        let path = format!("{path}[{index}]");
        let Some(record) = record.as_object() else {
            report.skip(path, SkipReason::NotAnObject);
            continue;
        };
        let Some(node_type) = record.get("Type").and_then(Value::as_str) else {
            report.skip(path, SkipReason::MissingField("Type"));
            continue;
        };

        match node_type {
            "LadderElement" => import_element(diagram, parent, record, path, report),
            "Branch" => {
                let branch = diagram.new_branch();
                let branch_id = branch.id();
                let end = diagram.list(parent).map_or(0, <[Node]>::len);
                if diagram.insert_node(parent, end, Node::Branch(branch)).is_err() {
                    continue;
                }
                for (lane, key) in [(Lane::Upper, "Nodes1"), (Lane::Lower, "Nodes2")] {
                    let children = record.get(key).and_then(Value::as_array);
                    import_nodes(
                        diagram,
                        ParentRef::Branch {
                            branch: branch_id,
                            lane,
                        },
                        children.map_or(&[][..], Vec::as_slice),
                        &format!("{path}.{key}"),
                        report,
                    );
                }
            }
            other => report.skip(path, SkipReason::UnknownNodeType(other.to_owned())),
        }
    }
}

fn import_element(
    diagram: &mut Diagram,
    parent: ParentRef,
    record: &Map<String, Value>,
    path: String,
    report: &mut ImportReport,
) {
    let Some(name) = record.get("ElementType").and_then(Value::as_str) else {
        report.skip(path, SkipReason::MissingField("ElementType"));
        return;
    };
    let Ok(kind) = name.parse::<ElementKind>() else {
        let suggestion = closest_kind(name);
        report.skip(
            path,
            SkipReason::UnknownElementKind {
                name: name.to_owned(),
                suggestion,
            },
        );
        return;
    };

    if kind.is_coil() {
        match parent {
            ParentRef::Branch { .. } => {
                report.skip(path, SkipReason::CoilInBranch);
                return;
            }
            ParentRef::Wire(_) => {
                let has_coil = diagram
                    .list(parent)
                    .is_some_and(|nodes| nodes.iter().any(Node::is_coil));
                if has_coil {
                    report.skip(path, SkipReason::DuplicateCoil);
                    return;
                }
            }
        }
    }

    let values = record
        .get("ComboBoxValues")
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice);
    let expected = kind.binding_count();
    if values.len() != expected {
        log::warn!(record = path.as_str(); "{kind} expects {expected} binding(s), found {}", values.len());
        report.adjusted.push(SlotAdjustment {
            path: path.clone(),
            expected,
            found: values.len(),
        });
    }

    let mut element = diagram.new_element(kind);
    for (slot, value) in values.iter().take(expected).enumerate() {
        let name = value.as_str().map(SmolStr::new);
        element.set_binding(slot, name);
    }
    let end = diagram.list(parent).map_or(0, <[Node]>::len);
    let _ = diagram.insert_node(parent, end, Node::Element(element));
}

/// Closest known element type name, if any is reasonably similar.
fn closest_kind(name: &str) -> Option<ElementKind> {
    ElementKind::ALL
        .iter()
        .copied()
        .map(|kind| {
            let ratio = rapidfuzz::fuzz::ratio(name.chars(), kind.name().chars());
            (kind, ratio)
        })
        .filter(|(_, ratio)| *ratio >= 0.6)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(kind, _)| kind)
}
