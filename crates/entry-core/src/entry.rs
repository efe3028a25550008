//! Canonical attribute layout for generated person entries.
//!
//! Every entry carries exactly five attributes, always in this order:
//!
//! | Attribute     | Source                         |
//! |---------------|--------------------------------|
//! | `objectClass` | constant `inetOrgPerson`       |
//! | `uid`         | [`PersonRecord::uid`]          |
//! | `cn`          | [`PersonRecord::cn`]           |
//! | `sn`          | [`PersonRecord::sn`]           |
//! | `mail`        | [`PersonRecord::mail`]         |

use crate::record::PersonRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ATTR_OBJECT_CLASS: &str = "objectClass";
pub const ATTR_UID: &str = "uid";
pub const ATTR_CN: &str = "cn";
pub const ATTR_SN: &str = "sn";
pub const ATTR_MAIL: &str = "mail";

/// Structural object class of every generated entry.
pub const OBJECT_CLASS_INET_ORG_PERSON: &str = "inetOrgPerson";

/// A named attribute with one or more values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Single-valued attribute.
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, vec![value.into()])
    }
}

/// Ordered collection of attributes.
///
/// Insertion order is preserved so that serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to `name`, creating the attribute if needed.
    ///
    /// Attribute names are matched case-insensitively, as LDAP does.
    pub fn push_value(&mut self, name: &str, value: impl Into<String>) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.values.push(value.into()),
            None => self.attributes.push(Attribute::single(name, value)),
        }
    }

    /// Look up an attribute by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// First value of an attribute, if present.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|a| a.values.first())
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute names in order.
    pub fn names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

/// A DN together with its attribute set, ready for either sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    dn: String,
    attributes: AttributeSet,
}

impl DirectoryEntry {
    pub fn new(dn: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            dn: dn.into(),
            attributes,
        }
    }

    pub fn dn(&self) -> &str {
        &self.dn
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }
}

impl From<&PersonRecord> for DirectoryEntry {
    fn from(record: &PersonRecord) -> Self {
        let attributes = [
            Attribute::single(ATTR_OBJECT_CLASS, OBJECT_CLASS_INET_ORG_PERSON),
            Attribute::single(ATTR_UID, record.uid()),
            Attribute::single(ATTR_CN, record.cn()),
            Attribute::single(ATTR_SN, record.sn()),
            Attribute::single(ATTR_MAIL, record.mail()),
        ]
        .into_iter()
        .collect();

        DirectoryEntry::new(record.dn(), attributes)
    }
}

impl From<PersonRecord> for DirectoryEntry {
    fn from(record: PersonRecord) -> Self {
        DirectoryEntry::from(&record)
    }
}

impl PersonRecord {
    /// Convert into the canonical attribute layout.
    pub fn to_entry(&self) -> DirectoryEntry {
        DirectoryEntry::from(self)
    }
}

/// Error returned when an entry does not have the canonical person layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryShapeError {
    #[error("entry '{dn}' is missing attribute '{attribute}'")]
    MissingAttribute { dn: String, attribute: &'static str },

    #[error("entry '{dn}' has {count} values for single-valued attribute '{attribute}'")]
    MultiValued {
        dn: String,
        attribute: &'static str,
        count: usize,
    },

    #[error("entry '{dn}' has objectClass '{found}', expected 'inetOrgPerson'")]
    WrongObjectClass { dn: String, found: String },

    #[error("entry '{dn}' has unexpected attribute '{attribute}'")]
    UnexpectedAttribute { dn: String, attribute: String },
}

impl TryFrom<&DirectoryEntry> for PersonRecord {
    type Error = EntryShapeError;

    fn try_from(entry: &DirectoryEntry) -> Result<Self, Self::Error> {
        const KNOWN: [&str; 5] = [ATTR_OBJECT_CLASS, ATTR_UID, ATTR_CN, ATTR_SN, ATTR_MAIL];

        if let Some(extra) = entry
            .attributes
            .iter()
            .find(|a| !KNOWN.iter().any(|k| a.name.eq_ignore_ascii_case(k)))
        {
            return Err(EntryShapeError::UnexpectedAttribute {
                dn: entry.dn.clone(),
                attribute: extra.name.clone(),
            });
        }

        let single = |attribute: &'static str| -> Result<String, EntryShapeError> {
            let attr = entry
                .attributes
                .get(attribute)
                .ok_or_else(|| EntryShapeError::MissingAttribute {
                    dn: entry.dn.clone(),
                    attribute,
                })?;
            match attr.values.as_slice() {
                [value] => Ok(value.clone()),
                values => Err(EntryShapeError::MultiValued {
                    dn: entry.dn.clone(),
                    attribute,
                    count: values.len(),
                }),
            }
        };

        let object_class = single(ATTR_OBJECT_CLASS)?;
        if object_class != OBJECT_CLASS_INET_ORG_PERSON {
            return Err(EntryShapeError::WrongObjectClass {
                dn: entry.dn.clone(),
                found: object_class,
            });
        }

        Ok(PersonRecord::from_parts(
            entry.dn.clone(),
            single(ATTR_UID)?,
            single(ATTR_CN)?,
            single(ATTR_SN)?,
            single(ATTR_MAIL)?,
        ))
    }
}
