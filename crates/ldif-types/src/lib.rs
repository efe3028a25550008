//! LDIF conversions for entry-core types.
//!
//! This crate converts [`DirectoryEntry`] batches to and from LDIF (RFC 2849)
//! content records.
//!
//! # Modules
//!
//! - [`forward`] - DirectoryEntry batch → LDIF text
//! - [`reverse`] - LDIF text → DirectoryEntry batch
//!
//! # Example
//!
//! ```rust
//! use entry_core::PersonRecord;
//! use ldif_types::{parse_ldif, Encoder, LdifEncoder};
//!
//! let entry = PersonRecord::new("o=rtx", "jdoe", "John Doe", "Doe", "jdoe@example.com").to_entry();
//! let text = LdifEncoder::default().encode(std::slice::from_ref(&entry)).unwrap();
//! assert!(text.starts_with("version: 1\n"));
//!
//! let parsed = parse_ldif(&text).unwrap();
//! assert_eq!(parsed, vec![entry]);
//! ```
//!
//! [`DirectoryEntry`]: entry_core::DirectoryEntry

pub mod error;
pub mod forward;
pub mod reverse;

pub use error::LdifError;
pub use forward::{Encoder, LdifEncoder, DEFAULT_FOLD_WIDTH};
pub use reverse::parse_ldif;
