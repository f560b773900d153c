//! Named formula inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sanjutsu_types::ParamValue;

use crate::error::{CalcError, Result};

/// Formula inputs by name, kept in key order so rendered blocks are stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, ParamValue> {
        self.0
    }

    /// Parse `key=value` pairs as given on a command line.
    pub fn from_assignments<'a>(items: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut params = Self::new();
        for item in items {
            let (key, value) = item
                .split_once('=')
                .map(|(k, v)| (k.trim(), v))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| CalcError::BadAssignment(item.to_string()))?;
            params.insert(key, ParamValue::parse(value));
        }
        Ok(params)
    }

    /// A required numeric parameter.
    pub fn number(&self, name: &str) -> Result<f64> {
        let value = self
            .get(name)
            .ok_or_else(|| CalcError::MissingParam(name.to_string()))?;
        value
            .as_f64()
            .filter(|n| n.is_finite())
            .ok_or_else(|| CalcError::NotANumber {
                name: name.to_string(),
                value: value.to_string(),
            })
    }

    /// A required numeric parameter that must be greater than zero.
    pub fn positive(&self, name: &str) -> Result<f64> {
        let n = self.number(name)?;
        if n > 0.0 {
            Ok(n)
        } else {
            Err(CalcError::InvalidParam {
                name: name.to_string(),
                value: n,
                reason: "must be greater than zero",
            })
        }
    }

    /// A required numeric parameter that must not be negative.
    pub fn non_negative(&self, name: &str) -> Result<f64> {
        let n = self.number(name)?;
        if n >= 0.0 {
            Ok(n)
        } else {
            Err(CalcError::InvalidParam {
                name: name.to_string(),
                value: n,
                reason: "must not be negative",
            })
        }
    }

    /// Text view of a parameter, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_text)
    }
}

impl From<Params> for BTreeMap<String, ParamValue> {
    fn from(params: Params) -> Self {
        params.0
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
