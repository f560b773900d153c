//! Machining and stock-mass formulas.
//!
//! A [`FormulaTable`] maps dotted kinds (`turning.cutting_speed`,
//! `milling.feed_rate`, `mass.round_bar`) to [`Formula`] implementations and
//! owns the read-only [`MaterialTable`] that mass formulas consult. Both are
//! plain values; construct them with `builtin()` or fill them yourself.
//!
//! ```text
//! Params ──► FormulaTable::compute(kind) ──► Outcome { value, unit }
//!                     │
//!                     └── MaterialTable (densities, g/cm³)
//! ```

mod error;
mod formula;
mod mass;
mod material;
mod milling;
mod params;
mod turning;

pub use error::{CalcError, Result};
pub use formula::{FnFormula, Formula, FormulaTable, Outcome, family};
pub use material::MaterialTable;
pub use params::Params;
