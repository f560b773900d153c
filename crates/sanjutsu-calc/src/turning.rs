//! Turning (lathe) formulas.
//!
//! Symbols follow shop-floor convention: `d` workpiece diameter (mm), `n`
//! spindle speed (rpm), `vc` cutting speed (m/min), `f` feed per revolution
//! (mm/rev), `ap` depth of cut (mm).

use std::f64::consts::PI;

use crate::error::Result;
use crate::formula::FnFormula;
use crate::material::MaterialTable;
use crate::params::Params;

pub(crate) const FORMULAS: &[(&str, FnFormula)] = &[
    (
        "turning.cutting_speed",
        FnFormula::new(
            "Cutting speed",
            "Surface speed from diameter and spindle speed: π·d·n/1000",
            "m/min",
            &["d", "n"],
            cutting_speed,
        ),
    ),
    (
        "turning.spindle_speed",
        FnFormula::new(
            "Spindle speed",
            "Spindle speed for a target cutting speed: 1000·vc/(π·d)",
            "rpm",
            &["vc", "d"],
            spindle_speed,
        ),
    ),
    (
        "turning.feed_rate",
        FnFormula::new(
            "Feed rate",
            "Table feed from feed per revolution: f·n",
            "mm/min",
            &["f", "n"],
            feed_rate,
        ),
    ),
    (
        "turning.machining_time",
        FnFormula::new(
            "Machining time",
            "Time for one pass over a length: length/(f·n)",
            "min",
            &["length", "f", "n"],
            machining_time,
        ),
    ),
    (
        "turning.removal_rate",
        FnFormula::new(
            "Material removal rate",
            "Chip volume per minute: vc·ap·f",
            "cm³/min",
            &["vc", "ap", "f"],
            removal_rate,
        ),
    ),
];

pub(crate) fn cutting_speed(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(PI * p.positive("d")? * p.positive("n")? / 1000.0)
}

pub(crate) fn spindle_speed(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(1000.0 * p.positive("vc")? / (PI * p.positive("d")?))
}

fn feed_rate(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(p.positive("f")? * p.positive("n")?)
}

fn machining_time(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(p.positive("length")? / (p.positive("f")? * p.positive("n")?))
}

fn removal_rate(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(p.positive("vc")? * p.positive("ap")? * p.positive("f")?)
}
