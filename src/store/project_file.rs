// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::Project;

use super::document::{export_project, import_project, ExportError, ImportError, ImportReport};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus atomic rename; no fsync.
    #[default]
    BestEffort,

    /// Also syncs the file and its directory where the platform allows.
    Durable,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectFileError {
    #[error("i/o error at {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot load {path:?}")]
    Import {
        path: PathBuf,
        #[source]
        source: ImportError,
    },
    #[error("cannot save {path:?}")]
    Export {
        path: PathBuf,
        #[source]
        source: ExportError,
    },
}

/// A project document on disk.
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    durability: WriteDurability,
}

impl ProjectFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads the raw document value.
    pub fn read_value(&self) -> Result<serde_json::Value, ProjectFileError> {
        let bytes = fs::read(&self.path).map_err(|source| ProjectFileError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ProjectFileError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn load(&self) -> Result<(Project, ImportReport), ProjectFileError> {
        let value = self.read_value()?;
        import_project(&value).map_err(|source| ProjectFileError::Import {
            path: self.path.clone(),
            source,
        })
    }

    /// Exports and writes `project`. Nothing is written if export fails.
    pub fn save(&self, project: &Project) -> Result<(), ProjectFileError> {
        let document = export_project(project).map_err(|source| ProjectFileError::Export {
            path: self.path.clone(),
            source,
        })?;
        let mut bytes =
            serde_json::to_vec_pretty(&document).map_err(|source| ProjectFileError::Json {
                path: self.path.clone(),
                source,
            })?;
        bytes.push(b'\n');
        write_atomic(&self.path, &bytes, self.durability)?;
        log::info!(path:? = self.path, bytes = bytes.len(); "saved project");
        Ok(())
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ProjectFileError {
    let path = path.to_path_buf();
    move |source| ProjectFileError::Io { path, source }
}

pub(crate) fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), ProjectFileError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(ProjectFileError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".rungline.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_error(&tmp_path))?;
    file.write_all(contents).map_err(io_error(&tmp_path))?;
    if durability == WriteDurability::Durable {
        file.sync_all().map_err(io_error(&tmp_path))?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(ProjectFileError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(io_error(parent))?;
            dir.sync_all().map_err(io_error(parent))?;
        }
    }

    Ok(())
}
