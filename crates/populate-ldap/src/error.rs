//! Error types for the LDAP sink.

use thiserror::Error;

/// Errors reported by a directory client.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Protocol or transport error from the LDAP client.
    #[error("LDAP error")]
    Ldap(#[from] ldap3::LdapError),

    /// The server answered with a non-success result code.
    #[error("server returned result code {rc}: {text}")]
    Rejected { rc: u32, text: String },
}

/// Errors that can occur while adding entries to an LDAP server.
#[derive(Error, Debug)]
pub enum LdapPopulatorError {
    /// The server could not be reached.
    #[error("Failed to connect to LDAP server '{url}'")]
    Connect {
        url: String,
        #[source]
        source: DirectoryError,
    },

    /// The bind was rejected.
    #[error("Failed to bind to LDAP server as '{bind_dn}'")]
    Bind {
        bind_dn: String,
        #[source]
        source: DirectoryError,
    },

    /// An add operation failed; entries before it remain on the server.
    #[error("Failed to add entry '{dn}'")]
    Add {
        dn: String,
        /// Entries added before the failure.
        added: u64,
        #[source]
        source: DirectoryError,
    },
}
