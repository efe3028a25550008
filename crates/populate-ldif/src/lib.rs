//! LDIF file sink for fakeldap.
//!
//! This crate writes a batch of generated entries to a single LDIF file.
//!
//! # Example
//!
//! ```ignore
//! use populate_ldif::LdifPopulator;
//!
//! let populator = LdifPopulator::new("fake_users.ldif");
//! let metrics = populator.populate(&entries)?;
//! println!("Wrote {} entries in {:?}", metrics.entries_written, metrics.total_duration);
//! ```

pub mod args;
pub mod error;
pub mod populator;

pub use args::{LdifPopulateArgs, DEFAULT_LDIF_FILE};
pub use error::LdifPopulatorError;
pub use populator::{write_ldif_file, LdifPopulator, PopulateMetrics};
