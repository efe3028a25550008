//! Error types for the LDIF sink.

use thiserror::Error;

/// Errors that can occur while writing an LDIF file.
#[derive(Error, Debug)]
pub enum LdifPopulatorError {
    /// IO error.
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// LDIF serialization error.
    #[error("LDIF serialization error")]
    Ldif(#[from] ldif_types::LdifError),
}
