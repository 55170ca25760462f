use serde::{Deserialize, Serialize};

use crate::types::MaterialId;

/// A single material definition loaded from RON data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Stable material ID. 0 = air.
    pub id: u16,
    /// Name used in config files and command options (matched case-insensitively).
    pub name: String,
}

/// Collection of material definitions indexed by ID.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    pub materials: Vec<MaterialDef>,
}

impl MaterialTable {
    /// Look up a material by ID. Returns None if not found.
    pub fn get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.id == id.0)
    }

    /// Look up a material by name, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<MaterialId> {
        let name = name.trim();
        self.materials
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .map(|m| MaterialId(m.id))
    }

    /// Display name for a material, falling back to `#id` for unknown IDs.
    pub fn name_of(&self, id: MaterialId) -> String {
        self.get(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| format!("#{}", id.0))
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
