//! Calculation results as workspace text.
//!
//! The formula layer hands over finished results; the buffer only formats
//! them into a readable block and appends that block as a user edit. Results
//! are neither validated nor recomputed here.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use sanjutsu_types::{Author, Edit, ParamValue, format_number};

use crate::WorkspaceBuffer;

/// One finished calculation, as produced by a calculation source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalcRecord {
    /// Family, e.g. `turning`, `milling`, `mass`.
    pub calc_type: String,
    /// Human label, e.g. `Cutting speed`.
    pub calc_name: String,
    pub parameters: BTreeMap<String, ParamValue>,
    pub result: f64,
    pub unit: String,
}

impl CalcRecord {
    /// Render as a text block:
    ///
    /// ```text
    /// [turning] Cutting speed
    ///   d: 50
    ///   n: 1200
    ///   = 188.4956 m/min
    /// ```
    pub fn to_block(&self) -> String {
        let mut out = format!("[{}] {}\n", self.calc_type, self.calc_name);
        for (name, value) in &self.parameters {
            let _ = writeln!(out, "  {name}: {value}");
        }
        let _ = write!(out, "  = {} {}", format_number(self.result), self.unit);
        out.trim_end().to_string()
    }
}

impl WorkspaceBuffer {
    /// Append a calculation block to the content as a user edit.
    ///
    /// Existing content is kept verbatim; only the newlines needed to leave a
    /// blank line before the block are added.
    pub fn add_calculation(&mut self, record: &CalcRecord) -> Edit {
        let block = record.to_block();
        let separator = if self.content.is_empty() || self.content.ends_with("\n\n") {
            ""
        } else if self.content.ends_with('\n') {
            "\n"
        } else {
            "\n\n"
        };
        let content = format!("{}{separator}{block}", self.content);
        tracing::debug!(calc = %record.calc_name, kind = %record.calc_type, "adding calculation");
        self.set_content(content, Author::User, format!("Added calculation: {}", record.calc_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanjutsu_types::EditType;

    fn cutting_speed() -> CalcRecord {
        CalcRecord {
            calc_type: "turning".into(),
            calc_name: "Cutting speed".into(),
            parameters: BTreeMap::from([
                ("n".to_string(), ParamValue::Number(1200.0)),
                ("d".to_string(), ParamValue::Number(50.0)),
            ]),
            result: 188.495_559_2,
            unit: "m/min".into(),
        }
    }

    #[test]
    fn test_block_format() {
        assert_eq!(
            cutting_speed().to_block(),
            "[turning] Cutting speed\n  d: 50\n  n: 1200\n  = 188.4956 m/min"
        );
    }

    #[test]
    fn test_block_without_parameters() {
        let record = CalcRecord {
            calc_type: "mass".into(),
            calc_name: "Sphere".into(),
            parameters: BTreeMap::new(),
            result: 2.0,
            unit: "kg".into(),
        };
        assert_eq!(record.to_block(), "[mass] Sphere\n  = 2 kg");
    }

    #[test]
    fn test_add_to_empty_workspace() {
        let mut buf = WorkspaceBuffer::new();
        let edit = buf.add_calculation(&cutting_speed());
        assert!(buf.content().starts_with("[turning] Cutting speed"));
        assert_eq!(edit.edit_type, EditType::UserReplace);
        assert_eq!(
            buf.version_history().last().unwrap().description,
            "Added calculation: Cutting speed"
        );
    }

    #[test]
    fn test_add_appends_with_blank_line() {
        let mut buf = WorkspaceBuffer::new();
        buf.set_content("notes\n", Author::User, "seed");
        buf.add_calculation(&cutting_speed());
        assert!(buf.content().starts_with("notes\n\n[turning]"));
        assert_eq!(buf.edit_history(0).last().unwrap().old_text, "notes\n");
    }

    #[test]
    fn test_add_keeps_existing_whitespace() {
        let mut buf = WorkspaceBuffer::new();
        buf.set_content("notes\n\n\n", Author::User, "seed");
        buf.add_calculation(&cutting_speed());
        assert!(buf.content().starts_with("notes\n\n\n[turning]"));

        let mut buf = WorkspaceBuffer::new();
        buf.set_content("  indented  ", Author::User, "seed");
        buf.add_calculation(&cutting_speed());
        assert!(buf.content().starts_with("  indented  \n\n[turning]"));
    }
}
