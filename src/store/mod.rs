// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for projects.
//!
//! The store module converts between the in-memory [`crate::model::Project`] and the JSON
//! project document, and reads/writes that document on disk.

pub mod document;
pub mod project_file;

pub use document::{
    document_schema, export_project, import_project, ExportError, ImportError, ImportReport,
    NodeRecord, ProjectDocument, SkipReason, SkippedRecord, SlotAdjustment, VariableRecord,
    WireRecord,
};
pub use project_file::{ProjectFile, ProjectFileError, WriteDurability};
