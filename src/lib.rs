//! fakeldap Library
//!
//! Generates fake `inetOrgPerson` user entries and writes them either to an
//! LDIF file or straight to an LDAP server.
//!
//! # Crates
//!
//! - `entry_core` - person records, directory entries, JSON templates
//! - `entry_generator` - seeded fake data and the record generator
//! - `ldif_types` - LDIF encoder and reader
//! - `populate_ldif` - LDIF file sink
//! - `populate_ldap` - LDAP server sink
//!
//! # CLI Usage
//!
//! ```bash
//! # 100 entries to fake_users.ldif, reproducible
//! fakeldap --suffix-dn ou=employee,ou=users,o=rtx --count 100 --seed 7
//!
//! # 10 entries straight to a server
//! LDAP_BIND_PASSWORD=secret fakeldap --mode ldap \
//!   --suffix-dn ou=employee,ou=users,o=rtx --count 10 \
//!   --ldap-url ldaps://localhost:636 --bind-dn cn=admin,o=rtx
//! ```
//!
//! # Library Usage
//!
//! ```no_run
//! use fakeldap::{run, RunConfig};
//!
//! # async fn example() -> Result<(), fakeldap::RunError> {
//! let config = RunConfig::new("ou=employee,ou=users,o=rtx")
//!     .with_count(25)
//!     .with_ldif_file("users.ldif");
//! let report = run(config).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod run;

pub use config::{OutputMode, RunConfig, Sink, ValidatedRun};
pub use error::{ErrorKind, RunError};
pub use run::{run, run_with, RunPhase, RunReport};
