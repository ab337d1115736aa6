//! Line-oriented reader for the `.net` section format.
//!
//! A network file is a sequence of sections. Each section starts with a
//! `$NAME:HEADER;HEADER;...` line and runs until the next `$` line or end of
//! file. Data rows are `;`-separated. Blank lines and `*` comment lines are
//! skipped anywhere.

use std::io::BufRead;

use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// One section as it appeared in the file: name, declared column headers and
/// raw data rows. Names and headers are uppercased; everything else is kept
/// verbatim.
#[derive(Debug, Clone)]
pub struct RawSection {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

/// A data row with the 1-based line number it came from.
#[derive(Debug, Clone)]
pub struct Row {
    pub line: usize,
    pub values: Vec<String>,
}

/// Reads all sections from `reader` in file order.
///
/// A section name appearing twice merges into one section: rows append, the
/// first header line wins.
pub fn read_sections<R: BufRead>(reader: R) -> Result<Vec<RawSection>> {
    let mut sections: Vec<RawSection> = Vec::new();
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();
    let mut current: Option<usize> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let mut line = line.trim();
        if line_no == 1 {
            line = line.trim_start_matches('\u{feff}');
        }

        if line.is_empty() || line.starts_with('*') {
            continue;
        }

        if let Some(decl) = line.strip_prefix('$') {
            let (name, headers) = match decl.split_once(':') {
                Some((name, rest)) => {
                    let headers = rest
                        .split(';')
                        .map(|h| h.trim().to_ascii_uppercase())
                        .collect();
                    (name, headers)
                }
                None => (decl, Vec::new()),
            };
            let name = name.trim().to_ascii_uppercase();

            let section_idx = match by_name.get(&name) {
                Some(&i) => {
                    if sections[i].headers.is_empty() && !headers.is_empty() {
                        sections[i].headers = headers;
                    }
                    i
                }
                None => {
                    sections.push(RawSection {
                        name: name.clone(),
                        headers,
                        rows: Vec::new(),
                    });
                    by_name.insert(name, sections.len() - 1);
                    sections.len() - 1
                }
            };
            current = Some(section_idx);
            continue;
        }

        let Some(section_idx) = current else {
            return Err(Error::RowOutsideSection { line: line_no });
        };
        let values: Vec<String> = line.split(';').map(|v| v.to_string()).collect();
        sections[section_idx].rows.push(Row {
            line: line_no,
            values,
        });
    }

    for section in &sections {
        debug!("section ${}: {} rows", section.name, section.rows.len());
    }
    Ok(sections)
}
