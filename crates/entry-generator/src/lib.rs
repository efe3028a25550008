//! Fake person generator for fakeldap.
//!
//! This crate provides the [`EntryGenerator`] which produces [`PersonRecord`]
//! values from a [`FakeDataSource`]. The default source, [`FakerSource`], uses a
//! seeded RNG so that the same seed yields the same people on every run.
//!
//! # Architecture
//!
//! ```text
//! SeedMode ──► FakerSource (StdRng)
//!                   │
//!                   ▼
//!          ┌─────────────────┐
//!          │ EntryGenerator  │◄── RecordTemplate (optional)
//!          │                 │
//!          │  - suffix_dn    │
//!          │  - index        │
//!          └────────┬────────┘
//!                   │
//!                   ▼
//!     PersonRecord { dn, uid, cn, sn, mail }
//! ```
//!
//! # Example
//!
//! ```rust
//! use entry_generator::{EntryGenerator, FakerSource};
//!
//! let mut generator = EntryGenerator::new(FakerSource::new(0), "ou=people,dc=example,dc=com", None);
//! let record = generator.next_record();
//! assert!(record.dn().starts_with("uid="));
//! assert!(record.dn().ends_with(",ou=people,dc=example,dc=com"));
//! ```
//!
//! [`PersonRecord`]: entry_core::PersonRecord

pub mod generator;
pub mod source;

// Re-exports for convenience
pub use generator::{EntryGenerator, RecordIterator};
pub use source::{FakeDataSource, FakerSource, SeedMode};
