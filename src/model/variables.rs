// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Program variables and the binding catalog derived from them.

use std::sync::OnceLock;

use regex::Regex;
use smol_str::SmolStr;

use super::element::ElementFamily;

/// Source of legal binding names for each element family.
pub trait VariableCatalog {
    fn binding_options(&self, family: ElementFamily) -> Vec<SmolStr>;
}

/// One declared variable. Type-specific fields the editor does not interpret ride along in
/// `extra` so they survive a load/save cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    var_type: SmolStr,
    name: SmolStr,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl Variable {
    pub fn new(var_type: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        Self {
            var_type: var_type.into(),
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_extra(mut self, extra: serde_json::Map<String, serde_json::Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn var_type(&self) -> &str {
        &self.var_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariableError {
    #[error("variable name must not be empty")]
    EmptyName,
    #[error("variable name '{name}' is not an identifier")]
    InvalidName { name: String },
    #[error("variable '{name}' already exists")]
    DuplicateName { name: String },
}

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"))
}

pub fn validate_variable_name(name: &str) -> Result<(), VariableError> {
    if name.trim().is_empty() {
        return Err(VariableError::EmptyName);
    }
    if !identifier_re().is_match(name) {
        return Err(VariableError::InvalidName {
            name: name.to_owned(),
        });
    }
    Ok(())
}

/// Declared variables, in declaration order, with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableTable {
    variables: Vec<Variable>,
}

impl VariableTable {
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn add(&mut self, variable: Variable) -> Result<(), VariableError> {
        validate_variable_name(variable.name())?;
        if self.get(variable.name()).is_some() {
            return Err(VariableError::DuplicateName {
                name: variable.name().to_owned(),
            });
        }
        self.variables.push(variable);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        let index = self.variables.iter().position(|v| v.name() == name)?;
        Some(self.variables.remove(index))
    }
}

/// Variable types usable by each element family.
fn accepted_types(family: ElementFamily) -> &'static [&'static str] {
    match family {
        ElementFamily::Contact => &["Input", "Output", "Memory", "Timer", "Counter"],
        ElementFamily::Coil => &["Output", "Memory"],
        ElementFamily::Math | ElementFamily::Move | ElementFamily::Compare => &["Number"],
        ElementFamily::Timer => &["Timer"],
        ElementFamily::Counter => &["Counter"],
        ElementFamily::Reset => &["Timer", "Counter"],
    }
}

impl VariableCatalog for VariableTable {
    fn binding_options(&self, family: ElementFamily) -> Vec<SmolStr> {
        let accepted = accepted_types(family);
        self.variables
            .iter()
            .filter(|v| accepted.contains(&v.var_type()))
            .map(|v| v.name.clone())
            .collect()
    }
}
