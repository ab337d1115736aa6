//! Error types for the visum-net library.

use thiserror::Error;

/// Errors produced while reading a network file or extracting its graph.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying I/O failure while reading the input
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A data row appeared before any `$SECTION` header
    #[error("line {line}: data row outside of any section")]
    RowOutsideSection { line: usize },

    /// A recognized section was declared without a header line, so its
    /// columns cannot be resolved by name
    #[error("section ${section} has no column headers")]
    MissingHeaders { section: String },

    /// A required column is absent from a section's header line
    #[error("section ${section} is missing column {column}")]
    MissingColumn {
        section: String,
        column: &'static str,
    },

    /// A field inside a data row failed to parse
    #[error("${section} line {line}: {message}")]
    Field {
        section: String,
        line: usize,
        message: String,
    },

    /// Graph extraction needs a table that is absent or empty
    #[error("no {table} records in network")]
    EmptyTable { table: &'static str },

    /// A link references a node id that is not in the node table
    #[error("{end} node {node} not found for link {link}")]
    UnknownNode {
        end: &'static str,
        node: i64,
        link: i64,
    },

    /// No polyline could be resolved for a link; the straight-line fallback
    /// makes this unreachable unless an invariant was broken upstream
    #[error("no geometry found for link {0}")]
    MissingGeometry(i64),

    /// A quantity string ("0.081km", "50km/h") did not match the
    /// number-plus-optional-suffix grammar
    #[error("cannot parse {kind} value '{value}'")]
    BadQuantity { kind: &'static str, value: String },

    /// Wraps a quantity error with the link it came from
    #[error("link {link}: {source}")]
    LinkQuantity {
        link: i64,
        #[source]
        source: Box<Error>,
    },
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn field(section: &str, line: usize, message: impl Into<String>) -> Self {
        Error::Field {
            section: section.to_string(),
            line,
            message: message.into(),
        }
    }

    pub(crate) fn for_link(self, link: i64) -> Self {
        Error::LinkQuantity {
            link,
            source: Box::new(self),
        }
    }
}
