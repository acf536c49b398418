// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rungline: a ladder-logic diagram editor.
//!
//! The diagram is a tree of rungs, elements and two-lane branches ([`model`]). Every edit goes
//! through [`ops`], is followed by a [`layout`] pass, and is driven from pointer input by the
//! [`editor`] controller. [`store`] reads and writes the JSON project document.

pub mod config;
pub mod device;
pub mod editor;
pub mod layout;
pub mod model;
pub mod ops;
pub mod query;
pub mod render;
pub mod store;
pub mod tui;
