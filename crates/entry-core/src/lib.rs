//! Core types for the fakeldap entry pipeline.
//!
//! This crate provides the foundational types shared by the generator and
//! both sinks:
//!
//! - [`RecordTemplate`] - Optional per-attribute overrides, usually loaded from JSON
//! - [`PersonRecord`] - One generated person, with its derived DN
//! - [`AttributeSet`] / [`DirectoryEntry`] - The canonical `inetOrgPerson` attribute layout
//!
//! # Architecture
//!
//! ```text
//! entry-core (this crate)
//!    │
//!    ├─── entry-generator  (produces PersonRecord values)
//!    │
//!    ├─── ldif-types       (encodes/decodes DirectoryEntry as LDIF)
//!    ├─── populate-ldif    (writes DirectoryEntry batches to a file)
//!    └─── populate-ldap    (adds DirectoryEntry batches to a server)
//! ```
//!
//! # Example
//!
//! ```rust
//! use entry_core::{DirectoryEntry, PersonRecord};
//!
//! let record = PersonRecord::new("ou=people,dc=example,dc=com", "jdoe", "John Doe", "Doe", "jdoe@example.com");
//! let entry = DirectoryEntry::from(&record);
//!
//! assert_eq!(entry.dn(), "uid=jdoe,ou=people,dc=example,dc=com");
//! assert_eq!(entry.attributes().first_value("objectClass"), Some("inetOrgPerson"));
//! ```

pub mod entry;
pub mod record;
pub mod template;

// Re-exports for convenience
pub use entry::{
    Attribute, AttributeSet, DirectoryEntry, EntryShapeError, ATTR_CN, ATTR_MAIL,
    ATTR_OBJECT_CLASS, ATTR_SN, ATTR_UID, OBJECT_CLASS_INET_ORG_PERSON,
};
pub use record::{build_dn, PersonRecord};
pub use template::{RecordTemplate, TemplateError};
