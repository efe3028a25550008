//! LDAP server sink for fakeldap.
//!
//! This crate adds a batch of generated entries to an LDAP server over a
//! single bound connection, one add operation per entry.
//!
//! The protocol client sits behind [`DirectoryConnector`] / [`DirectoryClient`]
//! so the add loop can be exercised without a server; [`Ldap3Connector`] is
//! the real implementation.
//!
//! # Example
//!
//! ```ignore
//! use populate_ldap::{LdapConnectionConfig, LdapPopulator};
//!
//! let config = LdapConnectionConfig::new("ldaps://localhost:636", "cn=admin,o=rtx", "secret");
//! let populator = LdapPopulator::new(config);
//! let metrics = populator.populate(&entries).await?;
//! println!("Added {} entries in {:?}", metrics.entries_added, metrics.total_duration);
//! ```

pub mod args;
pub mod client;
pub mod error;
pub mod populator;
pub mod testing;

pub use args::{LdapPopulateArgs, DEFAULT_CONNECT_TIMEOUT_SECS};
pub use client::{
    DirectoryClient, DirectoryConnector, Ldap3Client, Ldap3Connector, LdapConnectionConfig,
};
pub use error::{DirectoryError, LdapPopulatorError};
pub use populator::{LdapPopulator, PopulateMetrics};
