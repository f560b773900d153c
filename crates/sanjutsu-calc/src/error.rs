//! Calculation errors.

use thiserror::Error;

/// Why a formula could not produce a value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("unknown calculation: {0}")]
    UnknownKind(String),

    #[error("missing parameter '{0}'")]
    MissingParam(String),

    #[error("parameter '{name}' is not a number: {value}")]
    NotANumber { name: String, value: String },

    #[error("parameter '{name}' = {value}: {reason}")]
    InvalidParam {
        name: String,
        value: f64,
        reason: &'static str,
    },

    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    /// Parameters are individually valid but describe an impossible shape.
    #[error("impossible geometry: {0}")]
    Geometry(String),

    /// A `key=value` assignment could not be split.
    #[error("expected key=value, got '{0}'")]
    BadAssignment(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;
