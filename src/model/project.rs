// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagram::Diagram;
use super::variables::VariableTable;

/// Everything one document holds: the opaque device block, the variables and the program.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    device: serde_json::Value,
    variables: VariableTable,
    diagram: Diagram,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            device: serde_json::Value::Object(serde_json::Map::new()),
            variables: VariableTable::default(),
            diagram: Diagram::new(),
        }
    }
}

impl Project {
    pub fn new(device: serde_json::Value, variables: VariableTable, diagram: Diagram) -> Self {
        Self {
            device,
            variables,
            diagram,
        }
    }

    /// Device configuration, passed through unchanged.
    pub fn device(&self) -> &serde_json::Value {
        &self.device
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableTable {
        &mut self.variables
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    pub fn into_parts(self) -> (serde_json::Value, VariableTable, Diagram) {
        (self.device, self.variables, self.diagram)
    }
}
