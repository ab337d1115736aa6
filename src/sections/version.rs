//! `$VERSION` and `$INFO` sections.

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

/// File-level metadata from the `$VERSION` section.
#[derive(Debug, Clone, Default)]
pub struct Version {
    pub vers_nr: String,
    pub file_type: String,
    pub language: String,
    pub unit: String,
}

impl Version {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["VERSNR"])?;
        let Some(row) = raw.rows.first() else {
            return Ok(Version::default());
        };
        let f = columns.row(row);
        Ok(Version {
            vers_nr: f.text("VERSNR"),
            file_type: f.text("FILETYPE"),
            language: f.text("LANGUAGE"),
            unit: f.text("UNIT"),
        })
    }
}

/// One `$INFO` line.
#[derive(Debug, Clone)]
pub struct Info {
    pub index: i64,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct InfoTable {
    lines: Vec<Info>,
}

impl InfoTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["INDEX", "TEXT"])?;
        let mut lines = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            lines.push(Info {
                index: f.require_int("INDEX")?,
                text: f.text("TEXT"),
            });
        }
        Ok(InfoTable { lines })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Info> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
