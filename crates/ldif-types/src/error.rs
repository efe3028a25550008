//! Error types for LDIF conversion.

use thiserror::Error;

/// Errors that can occur while encoding or decoding LDIF.
#[derive(Error, Debug)]
pub enum LdifError {
    /// An entry has an empty DN.
    #[error("Entry {index} has an empty DN")]
    EmptyDn { index: usize },

    /// An attribute name cannot be written as an LDIF attribute description.
    #[error("Invalid attribute name '{name}' in entry '{dn}'")]
    InvalidAttributeName { dn: String, name: String },

    /// An attribute has no values.
    #[error("Attribute '{name}' in entry '{dn}' has no values")]
    NoValues { dn: String, name: String },

    /// Malformed LDIF input.
    #[error("LDIF parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A `::` value is not valid base64.
    #[error("Invalid base64 value at line {line}")]
    Base64 {
        line: usize,
        #[source]
        source: base64::DecodeError,
    },

    /// A decoded `::` value is not valid UTF-8.
    #[error("Base64 value at line {line} is not valid UTF-8")]
    Utf8 { line: usize },

    /// A construct this reader does not handle (URL values, change records).
    #[error("Unsupported LDIF construct at line {line}: {what}")]
    Unsupported { line: usize, what: String },
}
