//! Material densities.

use std::collections::HashMap;

use crate::error::{CalcError, Result};

/// Material name → density in g/cm³.
///
/// Lookup ignores case and treats spaces and hyphens as underscores, so
/// `"Stainless Steel"` and `"stainless-steel"` both resolve.
#[derive(Clone, Debug, Default)]
pub struct MaterialTable {
    densities: HashMap<String, f64>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Common workshop materials.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (name, density) in [
            ("steel", 7.85),
            ("stainless_steel", 7.93),
            ("stainless", 7.93),
            ("aluminium", 2.70),
            ("aluminum", 2.70),
            ("brass", 8.50),
            ("copper", 8.96),
            ("bronze", 8.80),
            ("titanium", 4.51),
            ("cast_iron", 7.20),
            ("plastic", 1.41),
            ("pom", 1.41),
        ] {
            table.insert(name, density);
        }
        table
    }

    /// Add or replace a material.
    pub fn insert(&mut self, name: &str, density: f64) {
        self.densities.insert(normalize(name), density);
    }

    pub fn density(&self, name: &str) -> Result<f64> {
        self.densities
            .get(&normalize(name))
            .copied()
            .ok_or_else(|| CalcError::UnknownMaterial(name.to_string()))
    }

    /// Known names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.densities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
