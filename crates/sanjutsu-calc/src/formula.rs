//! Formula trait and the table that dispatches on calculation kind.
//!
//! Kinds are dotted `family.name` strings (`turning.cutting_speed`,
//! `mass.round_bar`). The family becomes the `calc_type` of a workspace
//! block; the formula's `name()` becomes its label.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::material::MaterialTable;
use crate::params::Params;
use crate::{mass, milling, turning};

/// One computable quantity.
pub trait Formula: Send + Sync {
    /// Human label, e.g. `Cutting speed`.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Unit of the result, e.g. `m/min`.
    fn unit(&self) -> &str;

    /// Declared parameter names. Optional inputs are listed too.
    fn params(&self) -> &[&'static str];

    fn compute(&self, params: &Params, materials: &MaterialTable) -> Result<f64>;
}

/// A formula backed by a plain function.
#[derive(Clone, Copy)]
pub struct FnFormula {
    name: &'static str,
    description: &'static str,
    unit: &'static str,
    params: &'static [&'static str],
    compute: fn(&Params, &MaterialTable) -> Result<f64>,
}

impl FnFormula {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        unit: &'static str,
        params: &'static [&'static str],
        compute: fn(&Params, &MaterialTable) -> Result<f64>,
    ) -> Self {
        Self { name, description, unit, params, compute }
    }
}

impl std::fmt::Debug for FnFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFormula")
            .field("name", &self.name)
            .field("unit", &self.unit)
            .field("params", &self.params)
            .finish()
    }
}

impl Formula for FnFormula {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn unit(&self) -> &str {
        self.unit
    }

    fn params(&self) -> &[&'static str] {
        self.params
    }

    fn compute(&self, params: &Params, materials: &MaterialTable) -> Result<f64> {
        (self.compute)(params, materials)
    }
}

/// A computed value with its unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub value: f64,
    pub unit: String,
}

/// Registry of formulas by kind, plus the material table they read.
#[derive(Default)]
pub struct FormulaTable {
    formulas: HashMap<String, Arc<dyn Formula>>,
    materials: MaterialTable,
}

impl std::fmt::Debug for FormulaTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormulaTable")
            .field("formulas", &self.names())
            .field("materials", &self.materials)
            .finish()
    }
}

impl FormulaTable {
    /// Empty table reading from the given materials.
    pub fn new(materials: MaterialTable) -> Self {
        Self { formulas: HashMap::new(), materials }
    }

    /// All built-in turning, milling and mass formulas with built-in materials.
    pub fn builtin() -> Self {
        let mut table = Self::new(MaterialTable::builtin());
        for (kind, formula) in turning::FORMULAS
            .iter()
            .chain(milling::FORMULAS)
            .chain(mass::FORMULAS)
        {
            table.register(*kind, Arc::new(*formula));
        }
        table
    }

    /// Register a formula, replacing any existing one of the same kind.
    pub fn register(&mut self, kind: impl Into<String>, formula: Arc<dyn Formula>) {
        self.formulas.insert(kind.into(), formula);
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn Formula>> {
        self.formulas.get(kind).cloned()
    }

    /// Registered kinds, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formulas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn compute(&self, kind: &str, params: &Params) -> Result<Outcome> {
        let formula = self
            .formulas
            .get(kind)
            .ok_or_else(|| CalcError::UnknownKind(kind.to_string()))?;
        let value = formula.compute(params, &self.materials)?;
        tracing::debug!(kind, value, unit = formula.unit(), "computed");
        Ok(Outcome { value, unit: formula.unit().to_string() })
    }
}

/// The family part of a kind: `turning.cutting_speed` → `turning`.
pub fn family(kind: &str) -> &str {
    kind.split_once('.').map_or(kind, |(family, _)| family)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(params: &Params, _: &MaterialTable) -> Result<f64> {
        Ok(params.number("x")? * 2.0)
    }

    #[test]
    fn test_register_and_compute() {
        let mut table = FormulaTable::new(MaterialTable::new());
        table.register("test.double", Arc::new(FnFormula::new("Double", "2x", "u", &["x"], double)));

        let outcome = table.compute("test.double", &Params::new().with("x", 21.0)).unwrap();
        assert_eq!(outcome, Outcome { value: 42.0, unit: "u".into() });
        assert_eq!(table.get("test.double").unwrap().params(), &["x"]);
    }

    #[test]
    fn test_unknown_kind() {
        let table = FormulaTable::builtin();
        assert_eq!(
            table.compute("turning.warp_speed", &Params::new()),
            Err(CalcError::UnknownKind("turning.warp_speed".into()))
        );
    }

    #[test]
    fn test_builtin_names_sorted_and_complete() {
        let table = FormulaTable::builtin();
        let names = table.names();
        assert_eq!(names.len(), 17);
        assert!(names.windows(2).all(|w| w[0] < w[1]));
        assert!(names.contains(&"milling.feed_per_tooth"));
        assert!(names.contains(&"mass.hex_bar"));
    }

    #[test]
    fn test_family() {
        assert_eq!(family("turning.cutting_speed"), "turning");
        assert_eq!(family("custom"), "custom");
    }
}
