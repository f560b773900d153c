//! Milling formulas.
//!
//! `d` cutter diameter (mm), `n` spindle speed (rpm), `z` number of teeth,
//! `fz` feed per tooth (mm), `vf` table feed (mm/min), `ae`/`ap` radial and
//! axial depth of cut (mm).

use crate::error::{CalcError, Result};
use crate::formula::FnFormula;
use crate::material::MaterialTable;
use crate::params::Params;
use crate::turning;

pub(crate) const FORMULAS: &[(&str, FnFormula)] = &[
    (
        "milling.spindle_speed",
        FnFormula::new(
            "Spindle speed",
            "Spindle speed for a target cutting speed: 1000·vc/(π·d)",
            "rpm",
            &["vc", "d"],
            turning::spindle_speed,
        ),
    ),
    (
        "milling.cutting_speed",
        FnFormula::new(
            "Cutting speed",
            "Cutter surface speed: π·d·n/1000",
            "m/min",
            &["d", "n"],
            turning::cutting_speed,
        ),
    ),
    (
        "milling.feed_rate",
        FnFormula::new(
            "Feed rate",
            "Table feed: fz·z·n",
            "mm/min",
            &["fz", "z", "n"],
            feed_rate,
        ),
    ),
    (
        "milling.feed_per_tooth",
        FnFormula::new(
            "Feed per tooth",
            "Chip load from table feed: vf/(z·n)",
            "mm",
            &["vf", "z", "n"],
            feed_per_tooth,
        ),
    ),
    (
        "milling.removal_rate",
        FnFormula::new(
            "Material removal rate",
            "Chip volume per minute: ae·ap·vf/1000",
            "cm³/min",
            &["ae", "ap", "vf"],
            removal_rate,
        ),
    ),
];

/// Tooth count: positive and whole.
fn teeth(p: &Params) -> Result<f64> {
    let z = p.positive("z")?;
    if z.fract() != 0.0 {
        return Err(CalcError::InvalidParam {
            name: "z".into(),
            value: z,
            reason: "must be a whole number of teeth",
        });
    }
    Ok(z)
}

fn feed_rate(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(p.positive("fz")? * teeth(p)? * p.positive("n")?)
}

fn feed_per_tooth(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(p.positive("vf")? / (teeth(p)? * p.positive("n")?))
}

fn removal_rate(p: &Params, _: &MaterialTable) -> Result<f64> {
    Ok(p.positive("ae")? * p.positive("ap")? * p.positive("vf")? / 1000.0)
}
