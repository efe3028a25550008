//! Run-level error taxonomy.

use entry_core::TemplateError;
use populate_ldap::{DirectoryError, LdapPopulatorError};
use populate_ldif::LdifPopulatorError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Broad failure category of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing configuration, detected before any side effect
    Config,
    /// Unreadable or malformed template file
    Input,
    /// LDIF encoding or file write failure
    Io,
    /// LDAP server unreachable
    Connection,
    /// Bind rejected
    Auth,
    /// An entry was rejected by the server
    Submit,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Config => "ConfigError",
            ErrorKind::Input => "InputError",
            ErrorKind::Io => "IOError",
            ErrorKind::Connection => "ConnectionError",
            ErrorKind::Auth => "AuthError",
            ErrorKind::Submit => "SubmitError",
        };
        f.write_str(name)
    }
}

/// Errors returned by [`crate::run`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input error")]
    Input(#[from] TemplateError),

    #[error("Failed to write LDIF file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: LdifPopulatorError,
    },

    #[error("Failed to connect to LDAP server '{url}'")]
    Connection {
        url: String,
        #[source]
        source: DirectoryError,
    },

    #[error("Failed to bind to LDAP server as '{bind_dn}'")]
    Auth {
        bind_dn: String,
        #[source]
        source: DirectoryError,
    },

    #[error("Failed to add entry '{dn}'")]
    Submit {
        dn: String,
        /// Entries added before the failure; they are not rolled back.
        added: u64,
        #[source]
        source: DirectoryError,
    },
}

impl RunError {
    pub fn config(message: impl Into<String>) -> Self {
        RunError::Config(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RunError::Config(_) => ErrorKind::Config,
            RunError::Input(_) => ErrorKind::Input,
            RunError::Io { .. } => ErrorKind::Io,
            RunError::Connection { .. } => ErrorKind::Connection,
            RunError::Auth { .. } => ErrorKind::Auth,
            RunError::Submit { .. } => ErrorKind::Submit,
        }
    }
}

impl From<LdapPopulatorError> for RunError {
    fn from(err: LdapPopulatorError) -> Self {
        match err {
            LdapPopulatorError::Connect { url, source } => RunError::Connection { url, source },
            LdapPopulatorError::Bind { bind_dn, source } => RunError::Auth { bind_dn, source },
            LdapPopulatorError::Add { dn, added, source } => {
                RunError::Submit { dn, added, source }
            }
        }
    }
}
