//! Error types for ClinVar conversion

use std::io;
use thiserror::Error;

/// Conversion errors
///
/// Everything except `Io` and `Xml` is a structural-integrity failure: the
/// event stream disagrees with itself and the run cannot continue.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Closing tag does not match the innermost open element
    #[error("unbalanced close: expected </{expected}>, found </{found}>")]
    UnbalancedClose { expected: String, found: String },

    /// Input ended while elements were still open
    #[error("input ended with {open} unclosed element(s)")]
    UnclosedElements { open: usize },

    /// A record boundary opened inside another record
    #[error("record boundary opened at depth {depth} while a record is in progress")]
    NestedRecord { depth: usize },

    /// A record boundary closed with no record in progress
    #[error("record boundary closed with no record in progress")]
    EndWithoutRecord,

    /// Attribute delivered with no element open
    #[error("attribute '{name}' outside of any element")]
    AttributeOutsideElement { name: String },

    /// Malformed XML
    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// Output write failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ConvertError {
    /// Whether this error means the event stream itself was inconsistent
    pub fn is_structural(&self) -> bool {
        !matches!(self, ConvertError::Xml { .. } | ConvertError::Io(_))
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
