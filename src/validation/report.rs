//! Per-column schema report.
//!
//! The report is informational: it never decides the validation status,
//! which stays with the status file written by
//! [`DataValidation::validate_all_columns`](super::DataValidation::validate_all_columns).

use std::fmt;

use serde::Serialize;

use crate::config::Schema;

/// How each CSV column relates to the schema.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ColumnReport {
    /// One entry per CSV column, in file order.
    pub columns: Vec<ColumnCheck>,

    /// Schema columns that do not appear in the file.
    pub missing: Vec<String>,
}

/// A single CSV column and whether the schema declares it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnCheck {
    pub name: String,
    pub declared: bool,

    /// The declared descriptor, e.g. `float64`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtype: Option<String>,
}

impl ColumnReport {
    pub fn build(columns: &[String], schema: &Schema) -> Self {
        let checks = columns
            .iter()
            .map(|name| ColumnCheck {
                name: name.clone(),
                declared: schema.contains(name),
                dtype: schema.descriptor(name).map(|value| match value.as_str() {
                    Some(text) => text.to_string(),
                    None => value.to_string(),
                }),
            })
            .collect();

        let missing = schema
            .names()
            .filter(|declared| !columns.iter().any(|column| column == declared))
            .map(str::to_string)
            .collect();

        Self {
            columns: checks,
            missing,
        }
    }

    /// Number of CSV columns the schema does not declare.
    pub fn unknown_count(&self) -> usize {
        self.columns.iter().filter(|c| !c.declared).count()
    }

    /// The status the validator persists: the last column's result.
    pub fn last_status(&self) -> Option<bool> {
        self.columns.last().map(|c| c.declared)
    }

    /// True if every column is declared and none are missing.
    pub fn is_exact_match(&self) -> bool {
        self.unknown_count() == 0 && self.missing.is_empty()
    }
}

impl fmt::Display for ColumnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return writeln!(f, "No columns found: nothing to validate");
        }

        writeln!(
            f,
            "Checked {} column(s): {} declared, {} not in schema",
            self.columns.len(),
            self.columns.len() - self.unknown_count(),
            self.unknown_count()
        )?;
        writeln!(f)?;

        for column in &self.columns {
            let mark = if column.declared { "ok     " } else { "UNKNOWN" };
            match &column.dtype {
                Some(dtype) => writeln!(f, "  [{}] {} ({})", mark, column.name, dtype)?,
                None => writeln!(f, "  [{}] {}", mark, column.name)?,
            }
        }

        if !self.missing.is_empty() {
            writeln!(f)?;
            writeln!(f, "Declared but not present: {}", self.missing.join(", "))?;
        }

        Ok(())
    }
}
