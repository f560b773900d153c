//! Stock mass from dimensions and material.
//!
//! All dimensions are in mm and results in kg. Density comes from an explicit
//! `density` parameter (g/cm³) when given, otherwise from the `material` name
//! looked up in the [`MaterialTable`].

use std::f64::consts::PI;

use crate::error::{CalcError, Result};
use crate::formula::FnFormula;
use crate::material::MaterialTable;
use crate::params::Params;

pub(crate) const FORMULAS: &[(&str, FnFormula)] = &[
    (
        "mass.round_bar",
        FnFormula::new(
            "Round bar mass",
            "Solid cylinder: π/4·d²·length",
            "kg",
            &["d", "length", "material", "density"],
            round_bar,
        ),
    ),
    (
        "mass.square_bar",
        FnFormula::new(
            "Square bar mass",
            "Square section: a²·length",
            "kg",
            &["a", "length", "material", "density"],
            square_bar,
        ),
    ),
    (
        "mass.rectangular_bar",
        FnFormula::new(
            "Rectangular bar mass",
            "Rectangular section: a·b·length",
            "kg",
            &["a", "b", "length", "material", "density"],
            rectangular_bar,
        ),
    ),
    (
        "mass.hex_bar",
        FnFormula::new(
            "Hex bar mass",
            "Hexagon across flats s: (√3/2)·s²·length",
            "kg",
            &["s", "length", "material", "density"],
            hex_bar,
        ),
    ),
    (
        "mass.tube",
        FnFormula::new(
            "Tube mass",
            "Hollow cylinder: π/4·(outer_d² − inner_d²)·length",
            "kg",
            &["outer_d", "inner_d", "length", "material", "density"],
            tube,
        ),
    ),
    (
        "mass.plate",
        FnFormula::new(
            "Plate mass",
            "Flat plate: a·b·t",
            "kg",
            &["a", "b", "t", "material", "density"],
            plate,
        ),
    ),
    (
        "mass.sphere",
        FnFormula::new(
            "Sphere mass",
            "Solid sphere: π/6·d³",
            "kg",
            &["d", "material", "density"],
            sphere,
        ),
    ),
];

/// g/cm³ from `density`, else from `material`.
fn density(p: &Params, materials: &MaterialTable) -> Result<f64> {
    if p.contains("density") {
        return p.positive("density");
    }
    match p.get("material") {
        Some(value) => materials.density(&value.to_string()),
        None => Err(CalcError::MissingParam("material".into())),
    }
}

/// mm³ × g/cm³ → kg.
fn kg(volume_mm3: f64, p: &Params, materials: &MaterialTable) -> Result<f64> {
    Ok(volume_mm3 * density(p, materials)? / 1_000_000.0)
}

fn round_bar(p: &Params, m: &MaterialTable) -> Result<f64> {
    let d = p.positive("d")?;
    kg(PI / 4.0 * d * d * p.positive("length")?, p, m)
}

fn square_bar(p: &Params, m: &MaterialTable) -> Result<f64> {
    let a = p.positive("a")?;
    kg(a * a * p.positive("length")?, p, m)
}

fn rectangular_bar(p: &Params, m: &MaterialTable) -> Result<f64> {
    kg(p.positive("a")? * p.positive("b")? * p.positive("length")?, p, m)
}

fn hex_bar(p: &Params, m: &MaterialTable) -> Result<f64> {
    let s = p.positive("s")?;
    kg(3f64.sqrt() / 2.0 * s * s * p.positive("length")?, p, m)
}

fn tube(p: &Params, m: &MaterialTable) -> Result<f64> {
    let outer = p.positive("outer_d")?;
    let inner = p.non_negative("inner_d")?;
    if inner >= outer {
        return Err(CalcError::Geometry(format!(
            "inner diameter {inner} must be smaller than outer diameter {outer}"
        )));
    }
    kg(PI / 4.0 * (outer * outer - inner * inner) * p.positive("length")?, p, m)
}

fn plate(p: &Params, m: &MaterialTable) -> Result<f64> {
    kg(p.positive("a")? * p.positive("b")? * p.positive("t")?, p, m)
}

fn sphere(p: &Params, m: &MaterialTable) -> Result<f64> {
    let d = p.positive("d")?;
    kg(PI / 6.0 * d * d * d, p, m)
}
