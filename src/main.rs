// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rungline CLI entrypoint.
//!
//! By default this opens the project in the interactive TUI. `--render`, `--check`, `--schema`
//! and `--push` run once and exit.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;

use rungline::config::EditorConfig;
use rungline::device::{DeviceLink, FileLink};
use rungline::editor::{Editor, Overlay};
use rungline::layout::layout_diagram;
use rungline::model::Project;
use rungline::render::{render_ladder_unicode, text::trim_rendered};
use rungline::store::{
    document_schema, export_project, import_project, ProjectFile, WriteDurability,
};
use rungline::tui::{App, TuiHost};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<project.json>] [--config <file>] [--log <file>] [--durable-writes]\n  {program} --render <project.json> [--config <file>]\n  {program} --check <project.json>\n  {program} --schema\n  {program} --push <project.json> <dest>\n\nWithout a command the project opens in the TUI; a missing file starts an empty project that\n`s` saves to that path.\n\nLogging follows RUST_LOG (default warn). In the TUI, logs only go to the --log file.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync where supported)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum Command {
    #[default]
    Tui,
    Render,
    Check,
    Schema,
    Push {
        dest: String,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    project: Option<String>,
    config: Option<String>,
    log: Option<String>,
    durable_writes: bool,
}

fn set_once(slot: &mut Option<String>, value: Option<String>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

fn set_command(options: &mut CliOptions, command: Command) -> Result<(), ()> {
    if options.command != Command::Tui {
        return Err(());
    }
    options.command = command;
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--render" => {
                set_command(&mut options, Command::Render)?;
                set_once(&mut options.project, args.next())?;
            }
            "--check" => {
                set_command(&mut options, Command::Check)?;
                set_once(&mut options.project, args.next())?;
            }
            "--schema" => set_command(&mut options, Command::Schema)?,
            "--push" => {
                set_once(&mut options.project, args.next())?;
                let dest = args.next().ok_or(())?;
                set_command(&mut options, Command::Push { dest })?;
            }
            "--config" => set_once(&mut options.config, args.next())?,
            "--log" => set_once(&mut options.log, args.next())?,
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.project, Some(arg))?,
        }
    }

    match options.command {
        Command::Schema if options.project.is_some() => Err(()),
        Command::Render | Command::Check | Command::Push { .. } if options.project.is_none() => {
            Err(())
        }
        _ => Ok(options),
    }
}

fn init_logging(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    match &options.log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // Anything written to stderr would land on the alternate screen.
        None if options.command == Command::Tui => return Ok(()),
        None => {}
    }
    builder.try_init()?;
    Ok(())
}

fn project_file(path: &str, options: &CliOptions) -> ProjectFile {
    let file = ProjectFile::new(path);
    if options.durable_writes {
        file.with_durability(WriteDurability::Durable)
    } else {
        file
    }
}

fn load(path: &str, options: &CliOptions) -> Result<Project, Box<dyn Error>> {
    let (project, report) = project_file(path, options).load()?;
    if !report.is_clean() {
        log::warn!(path = path; "import adjusted the document");
        eprint!("{report}");
    }
    Ok(project)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "rungline".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        init_logging(&options)?;
        let config = EditorConfig::load_or_default(options.config.as_deref().map(Path::new))?;

        match (&options.command, options.project.as_deref()) {
            (Command::Schema, _) => {
                println!("{}", serde_json::to_string_pretty(&document_schema())?);
            }
            (Command::Render, Some(path)) => {
                let mut project = load(path, &options)?;
                let layout = layout_diagram(
                    project.diagram_mut(),
                    &config.layout,
                    config.surface_width,
                );
                let render = render_ladder_unicode(&layout, &Overlay::default())?;
                println!("{}", trim_rendered(&render.text));
            }
            (Command::Check, Some(path)) => {
                let value = project_file(path, &options).read_value()?;
                let (project, report) = import_project(&value)?;
                if report.is_clean() {
                    println!("import: clean");
                } else {
                    print!("{report}");
                }
                export_project(&project)?;
                println!(
                    "export: ok ({} wire(s), {} node(s))",
                    project.diagram().wires().len(),
                    project.diagram().node_count()
                );
            }
            (Command::Push { dest }, Some(path)) => {
                let project = load(path, &options)?;
                let document = export_project(&project)?;
                FileLink::new(dest).push(&document)?;
                println!("pushed {path} to {dest}");
            }
            (Command::Tui, path) => {
                let (project, file) = match path {
                    Some(path) => {
                        let file = project_file(path, &options);
                        let project = if file.exists() {
                            load(path, &options)?
                        } else {
                            log::info!(path = path; "starting a new project");
                            Project::default()
                        };
                        (project, Some(file))
                    }
                    None => (Project::default(), None),
                };
                let editor = Editor::new(project, config, TuiHost::default());
                rungline::tui::run(App::new(editor, file))?;
            }
            (Command::Render | Command::Check | Command::Push { .. }, None) => {
                print_usage(&program);
                std::process::exit(2);
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("rungline: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions, Command};

    fn parse(args: &[&str]) -> Result<CliOptions, ()> {
        parse_options(args.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn parses_empty_args() {
        assert_eq!(parse(&[]).expect("parse options"), CliOptions::default());
    }

    #[test]
    fn parses_project_and_flags_in_any_order() {
        let options = parse(&["--durable-writes", "plant.json", "--log", "rungline.log"])
            .expect("parse options");
        assert_eq!(options.command, Command::Tui);
        assert_eq!(options.project.as_deref(), Some("plant.json"));
        assert_eq!(options.log.as_deref(), Some("rungline.log"));
        assert!(options.durable_writes);
    }

    #[test]
    fn parses_render_with_config() {
        let options =
            parse(&["--render", "plant.json", "--config", "cfg.json"]).expect("parse options");
        assert_eq!(options.command, Command::Render);
        assert_eq!(options.project.as_deref(), Some("plant.json"));
        assert_eq!(options.config.as_deref(), Some("cfg.json"));
    }

    #[test]
    fn parses_push() {
        let options = parse(&["--push", "plant.json", "/dev/plc0"]).expect("parse options");
        assert_eq!(
            options.command,
            Command::Push {
                dest: "/dev/plc0".to_owned()
            }
        );
        assert_eq!(options.project.as_deref(), Some("plant.json"));
    }

    #[test]
    fn rejects_two_commands() {
        parse(&["--schema", "--check", "plant.json"]).unwrap_err();
        parse(&["--render", "a.json", "--render", "b.json"]).unwrap_err();
    }

    #[test]
    fn rejects_missing_values() {
        parse(&["--check"]).unwrap_err();
        parse(&["--push", "plant.json"]).unwrap_err();
        parse(&["--config"]).unwrap_err();
        parse(&["--schema", "plant.json"]).unwrap_err();
    }

    #[test]
    fn rejects_unknown_flags_and_second_project() {
        parse(&["--mcp"]).unwrap_err();
        parse(&["a.json", "b.json"]).unwrap_err();
        parse(&["--durable-writes", "--durable-writes"]).unwrap_err();
    }
}
