// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`Project`] holds a [`Diagram`] of rungs ([`Wire`]s). Each wire owns an ordered list of
//! [`Node`]s; a node is either an [`Element`] or a [`Branch`] holding two more lists. Parent
//! back-references are [`ParentRef`] values resolved through the diagram, never owning pointers.

pub mod diagram;
pub mod element;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod node;
pub mod project;
pub mod variables;
pub mod wire;

pub use diagram::Diagram;
pub use element::{Bindings, Element, ElementFamily, ElementKind, UnknownElementKind};
pub use geometry::{Point, Rect};
pub use ids::{Id, NodeId, WireId};
pub use node::{Branch, Lane, Node, Outline, ParentRef};
pub use project::Project;
pub use variables::{validate_variable_name, Variable, VariableCatalog, VariableError, VariableTable};
pub use wire::Wire;
