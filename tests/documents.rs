// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use rungline::config::EditorConfig;
use rungline::editor::{Editor, EditorHost, Notice, Overlay};
use rungline::model::{ElementKind, Node, WireId};
use rungline::render::{render_ladder_unicode, text::trim_rendered};
use rungline::store::{
    document_schema, export_project, import_project, ExportError, ProjectFile, SkipReason,
    WriteDurability,
};
use serde_json::Value;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> Value {
    let path = fixtures_dir().join(name);
    let text =
        fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"));
    serde_json::from_str(&text).unwrap_or_else(|err| panic!("invalid json in {path:?}: {err}"))
}

#[derive(Default)]
struct Host {
    notices: Vec<Notice>,
}

impl EditorHost for Host {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn confirm_coil_replacement(&mut self, _wire: WireId) -> bool {
        false
    }
}

#[test]
fn seal_in_fixture_survives_load_layout_and_export_unchanged() {
    let original = read_fixture("seal_in.json");
    let (project, report) = import_project(&original).expect("import");
    assert!(report.is_clean(), "{report}");

    let mut editor = Editor::new(project, EditorConfig::default(), Host::default());
    let document = editor.build_document().expect("export");
    assert_eq!(serde_json::to_value(&document).unwrap(), original);
    assert!(editor.host().notices.is_empty());
}

#[test]
fn seal_in_fixture_renders_as_text() {
    let (project, _) = import_project(&read_fixture("seal_in.json")).expect("import");
    let editor = Editor::new(project, EditorConfig::default(), Host::default());
    let render = render_ladder_unicode(editor.current_layout(), &Overlay::default()).unwrap();
    let text = trim_rendered(&render.text);
    let lines: Vec<&str> = text.lines().collect();

    // The first rung sits on row 2 with the upper lane of its branch inline.
    assert!(lines[2].starts_with("├──┤ ├──"), "{text}");
    assert!(lines[2].contains("┤/├"), "{text}");
    assert!(lines[2].ends_with("( )───┤"), "{text}");
    assert!(lines[3].contains("start"), "{text}");

    let lower_lane = lines
        .iter()
        .position(|line| line.contains('└'))
        .expect("branch lower rail");
    let timer = lines
        .iter()
        .position(|line| line.contains("[TON]"))
        .expect("timer rung");
    assert!(lines[lower_lane].contains("┤ ├"), "{text}");
    assert!(lines[lower_lane + 1].contains("motor"), "{text}");
    assert!(timer > lower_lane, "{text}");
    assert!(lines.iter().any(|line| line.contains("speed,step,speed")), "{text}");
}

#[test]
fn messy_fixture_imports_what_it_can_and_reports_the_rest() {
    let (project, report) = import_project(&read_fixture("messy.json")).expect("import");

    let skipped: Vec<(&str, String)> = report
        .skipped
        .iter()
        .map(|record| (record.path.as_str(), record.reason.to_string()))
        .collect();
    let paths: Vec<&str> = skipped.iter().map(|(path, _)| *path).collect();
    assert_eq!(
        paths,
        vec![
            "$.Variables[1]",
            "$.Variables[2]",
            "$.Variables[3]",
            "$.Wires[0].Nodes[0]",
            "$.Wires[0].Nodes[1].Nodes1[0]",
            "$.Wires[0].Nodes[3]",
            "$.Wires[0].Nodes[6]",
            "$.Wires[1].Nodes[0]",
        ]
    );
    assert!(skipped[3].1.contains("did you mean NOContact?"), "{}", skipped[3].1);
    assert_eq!(report.skipped[4].reason, SkipReason::CoilInBranch);
    assert_eq!(report.skipped[5].reason, SkipReason::DuplicateCoil);
    assert_eq!(report.skipped[7].reason, SkipReason::MissingField("Type"));

    let adjusted: Vec<(&str, usize, usize)> = report
        .adjusted
        .iter()
        .map(|a| (a.path.as_str(), a.expected, a.found))
        .collect();
    assert_eq!(
        adjusted,
        vec![("$.Wires[0].Nodes[4]", 3, 1), ("$.Wires[0].Nodes[5]", 1, 2)]
    );

    assert_eq!(project.variables().len(), 1);
    let wires = project.diagram().wires();
    assert_eq!(wires.len(), 2);
    let kinds: Vec<Option<ElementKind>> = wires[0].nodes().iter().map(Node::element_kind).collect();
    assert_eq!(
        kinds,
        vec![
            None,
            Some(ElementKind::Coil),
            Some(ElementKind::AddMath),
            Some(ElementKind::NCContact)
        ]
    );
    assert!(wires[1].is_empty());
}

#[test]
fn messy_fixture_cannot_be_exported_until_bindings_are_set() {
    let (project, _) = import_project(&read_fixture("messy.json")).expect("import");
    let mut editor = Editor::new(project, EditorConfig::default(), Host::default());

    let err = editor.build_document().unwrap_err();
    let ExportError::UnsetBinding { kind, slot, .. } = &err;
    assert_eq!((*kind, *slot), (ElementKind::AddMath, 1));
    assert_eq!(editor.host().notices, vec![Notice::ExportFailed(err.clone())]);
}

#[test]
fn project_file_save_and_load_round_trip() {
    let path = std::env::temp_dir().join(format!(
        "rungline-documents-{}-seal-in.json",
        std::process::id()
    ));
    let (project, _) = import_project(&read_fixture("seal_in.json")).expect("import");

    let file = ProjectFile::new(&path).with_durability(WriteDurability::Durable);
    file.save(&project).expect("save");
    let (loaded, report) = file.load().expect("load");
    let _ = fs::remove_file(&path);

    assert!(report.is_clean(), "{report}");
    assert_eq!(loaded.diagram().outline(), project.diagram().outline());
    assert_eq!(
        serde_json::to_value(export_project(&loaded).unwrap()).unwrap(),
        read_fixture("seal_in.json")
    );
}

#[test]
fn schema_describes_the_three_sections() {
    let schema = document_schema();
    let properties = schema["properties"].as_object().expect("properties");
    for section in ["Device", "Variables", "Wires"] {
        assert!(properties.contains_key(section), "missing {section}");
    }
}
