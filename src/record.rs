//! Header-driven field access for raw section rows.
//!
//! Columns are located by the names declared on the section's `$` line, so
//! files with reordered, added or omitted trailing columns all parse the
//! same way. Optional fields default when empty; required fields error with
//! the section, line and column that failed.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::reader::{RawSection, Row};

/// Column index for one section, built once and shared by all row views.
pub(crate) struct Columns {
    section: String,
    headers: Vec<String>,
    index: FxHashMap<String, usize>,
}

impl Columns {
    pub fn new(raw: &RawSection) -> Result<Self> {
        if raw.headers.is_empty() {
            return Err(Error::MissingHeaders {
                section: raw.name.clone(),
            });
        }
        let mut index = FxHashMap::default();
        for (i, header) in raw.headers.iter().enumerate() {
            index.entry(header.clone()).or_insert(i);
        }
        Ok(Columns {
            section: raw.name.clone(),
            headers: raw.headers.clone(),
            index,
        })
    }

    /// Fails unless every named column is declared in the header line.
    pub fn require(&self, columns: &[&'static str]) -> Result<()> {
        for &column in columns {
            if !self.index.contains_key(column) {
                return Err(Error::MissingColumn {
                    section: self.section.clone(),
                    column,
                });
            }
        }
        Ok(())
    }

    pub fn row<'a>(&'a self, row: &'a Row) -> Fields<'a> {
        Fields { columns: self, row }
    }
}

/// View over one data row with typed, column-name-addressed getters.
pub(crate) struct Fields<'a> {
    columns: &'a Columns,
    row: &'a Row,
}

impl<'a> Fields<'a> {
    /// Raw field value; empty when the column is undeclared or the row is
    /// shorter than the header list.
    pub fn raw(&self, name: &str) -> &'a str {
        self.columns
            .index
            .get(name)
            .and_then(|&i| self.row.values.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn text(&self, name: &str) -> String {
        self.raw(name).to_string()
    }

    /// Integer field, 0 when empty. Commas are not accepted.
    pub fn int(&self, name: &'static str) -> Result<i64> {
        let value = self.raw(name);
        if value.is_empty() {
            return Ok(0);
        }
        value.parse().map_err(|_| self.bad_value(name, value, "integer"))
    }

    /// Float field, 0.0 when empty. Accepts a comma decimal separator.
    pub fn float(&self, name: &'static str) -> Result<f64> {
        let value = self.raw(name);
        if value.is_empty() {
            return Ok(0.0);
        }
        value
            .replace(',', ".")
            .parse()
            .map_err(|_| self.bad_value(name, value, "number"))
    }

    /// 0/1 flag field, false when empty.
    pub fn flag(&self, name: &'static str) -> Result<bool> {
        Ok(self.int(name)? != 0)
    }

    pub fn require_int(&self, name: &'static str) -> Result<i64> {
        if self.raw(name).is_empty() {
            return Err(self.missing(name));
        }
        self.int(name)
    }

    pub fn require_float(&self, name: &'static str) -> Result<f64> {
        if self.raw(name).is_empty() {
            return Err(self.missing(name));
        }
        self.float(name)
    }

    pub fn require_text(&self, name: &'static str) -> Result<String> {
        let value = self.raw(name);
        if value.is_empty() {
            return Err(self.missing(name));
        }
        Ok(value.to_string())
    }

    /// Values of parameterized columns like `T_PUTSYS(B)`: every non-empty
    /// field whose header starts with `prefix` (up to and including the
    /// opening parenthesis), keyed by the system code between the
    /// parentheses.
    pub fn system_values(&self, prefix: &str) -> Vec<(String, &'a str)> {
        let mut result = Vec::new();
        for (i, header) in self.columns.headers.iter().enumerate() {
            let Some(rest) = header.strip_prefix(prefix) else {
                continue;
            };
            let Some(system) = rest.strip_suffix(')') else {
                continue;
            };
            if system.is_empty() {
                continue;
            }
            if let Some(value) = self.row.values.get(i) {
                if !value.is_empty() {
                    result.push((system.to_string(), value.as_str()));
                }
            }
        }
        result
    }

    /// Builds a field-level error carrying this row's section and line.
    pub fn error(&self, message: impl Into<String>) -> Error {
        Error::field(&self.columns.section, self.row.line, message)
    }

    fn missing(&self, name: &'static str) -> Error {
        Error::field(
            &self.columns.section,
            self.row.line,
            format!("missing required field {}", name),
        )
    }

    fn bad_value(&self, name: &'static str, value: &str, expected: &str) -> Error {
        Error::field(
            &self.columns.section,
            self.row.line,
            format!("{}: invalid {} '{}'", name, expected, value),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(headers: &[&str], values: &[&str]) -> RawSection {
        RawSection {
            name: "TEST".to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![Row {
                line: 4,
                values: values.iter().map(|v| v.to_string()).collect(),
            }],
        }
    }

    #[test]
    fn test_lookup_is_independent_of_column_order() {
        let a = section(&["NO", "XCOORD", "YCOORD"], &["1", "2.5", "3.5"]);
        let b = section(&["YCOORD", "NO", "XCOORD"], &["3.5", "1", "2.5"]);
        for raw in [a, b] {
            let cols = Columns::new(&raw).unwrap();
            let fields = cols.row(&raw.rows[0]);
            assert_eq!(fields.require_int("NO").unwrap(), 1);
            assert_eq!(fields.require_float("XCOORD").unwrap(), 2.5);
            assert_eq!(fields.require_float("YCOORD").unwrap(), 3.5);
        }
    }

    #[test]
    fn test_short_row_reads_empty() {
        let raw = section(&["NO", "CODE", "NAME"], &["1"]);
        let cols = Columns::new(&raw).unwrap();
        let fields = cols.row(&raw.rows[0]);
        assert_eq!(fields.raw("NAME"), "");
        assert_eq!(fields.int("CODE").unwrap(), 0);
    }

    #[test]
    fn test_defaults_and_separators() {
        let raw = section(&["A", "B", "C", "D"], &["", "1000", "2,5", "1"]);
        let cols = Columns::new(&raw).unwrap();
        let fields = cols.row(&raw.rows[0]);
        assert_eq!(fields.int("A").unwrap(), 0);
        assert_eq!(fields.int("B").unwrap(), 1000);
        assert_eq!(fields.float("C").unwrap(), 2.5);
        assert!(fields.flag("D").unwrap());
    }

    #[test]
    fn test_int_rejects_comma_values() {
        let raw = section(&["A", "B"], &["1,5", "1,000"]);
        let cols = Columns::new(&raw).unwrap();
        let fields = cols.row(&raw.rows[0]);
        let err = fields.int("A").unwrap_err();
        assert_eq!(err.to_string(), "$TEST line 4: A: invalid integer '1,5'");
        assert!(fields.int("B").is_err());
    }

    #[test]
    fn test_required_field_errors_name_the_column_and_line() {
        let raw = section(&["NO", "XCOORD"], &["1", ""]);
        let cols = Columns::new(&raw).unwrap();
        let fields = cols.row(&raw.rows[0]);
        let err = fields.require_float("XCOORD").unwrap_err();
        assert_eq!(
            err.to_string(),
            "$TEST line 4: missing required field XCOORD"
        );
    }

    #[test]
    fn test_missing_column_detected_up_front() {
        let raw = section(&["NO"], &["1"]);
        let cols = Columns::new(&raw).unwrap();
        let err = cols.require(&["NO", "XCOORD"]).unwrap_err();
        assert!(matches!(err, Error::MissingColumn { column: "XCOORD", .. }));
    }

    #[test]
    fn test_no_headers_is_an_error() {
        let raw = RawSection {
            name: "NODE".to_string(),
            headers: Vec::new(),
            rows: Vec::new(),
        };
        assert!(matches!(
            Columns::new(&raw),
            Err(Error::MissingHeaders { .. })
        ));
    }

    #[test]
    fn test_system_values() {
        let raw = section(
            &["NO", "T_PUTSYS(B)", "T_PUTSYS(U)", "TOLL_PRTSYS(C)"],
            &["1", "30s", "", "1.5"],
        );
        let cols = Columns::new(&raw).unwrap();
        let fields = cols.row(&raw.rows[0]);
        let t = fields.system_values("T_PUTSYS(");
        assert_eq!(t, vec![("B".to_string(), "30s")]);
        let toll = fields.system_values("TOLL_PRTSYS(");
        assert_eq!(toll, vec![("C".to_string(), "1.5")]);
    }
}
