//! DirectoryEntry batch → LDIF text.
//!
//! Output layout:
//!
//! ```text
//! version: 1
//!
//! dn: uid=jdoe,ou=employee,ou=users,o=rtx
//! objectClass: inetOrgPerson
//! uid: jdoe
//! cn: John Doe
//! sn: Doe
//! mail: jdoe@example.com
//!
//! ```
//!
//! Values that are not RFC 2849 `SAFE-STRING`s (non-ASCII, leading space,
//! colon or `<`, trailing space, control line breaks) are written base64
//! encoded after `::`. Every emitted line is ASCII, so folding can split on
//! byte offsets.

use crate::error::LdifError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use entry_core::DirectoryEntry;

/// Maximum line length before folding.
pub const DEFAULT_FOLD_WIDTH: usize = 76;

/// Serializes a batch of entries into a single document.
pub trait Encoder {
    fn encode(&self, entries: &[DirectoryEntry]) -> Result<String, LdifError>;
}

/// LDIF content-record encoder.
#[derive(Debug, Clone)]
pub struct LdifEncoder {
    include_version: bool,
    fold_width: usize,
}

impl Default for LdifEncoder {
    fn default() -> Self {
        Self {
            include_version: true,
            fold_width: DEFAULT_FOLD_WIDTH,
        }
    }
}

impl LdifEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit (or omit) the leading `version: 1` line.
    pub fn with_version(mut self, include_version: bool) -> Self {
        self.include_version = include_version;
        self
    }

    /// Set the folding width. `0` disables folding.
    pub fn with_fold_width(mut self, width: usize) -> Self {
        self.fold_width = if width == 0 { 0 } else { width.max(2) };
        self
    }

    fn push_line(&self, out: &mut String, line: &str) {
        let width = self.fold_width;
        if width == 0 || line.len() <= width {
            out.push_str(line);
            out.push('\n');
            return;
        }

        let (head, mut rest) = line.split_at(width);
        out.push_str(head);
        out.push('\n');
        while !rest.is_empty() {
            let (chunk, tail) = rest.split_at(rest.len().min(width - 1));
            out.push(' ');
            out.push_str(chunk);
            out.push('\n');
            rest = tail;
        }
    }

    fn encode_entry(
        &self,
        out: &mut String,
        index: usize,
        entry: &DirectoryEntry,
    ) -> Result<(), LdifError> {
        if entry.dn().is_empty() {
            return Err(LdifError::EmptyDn { index });
        }
        self.push_line(out, &value_line("dn", entry.dn()));

        for attribute in entry.attributes() {
            if !is_valid_attribute_name(&attribute.name) {
                return Err(LdifError::InvalidAttributeName {
                    dn: entry.dn().to_string(),
                    name: attribute.name.clone(),
                });
            }
            if attribute.values.is_empty() {
                return Err(LdifError::NoValues {
                    dn: entry.dn().to_string(),
                    name: attribute.name.clone(),
                });
            }
            for value in &attribute.values {
                self.push_line(out, &value_line(&attribute.name, value));
            }
        }

        out.push('\n');
        Ok(())
    }
}

impl Encoder for LdifEncoder {
    fn encode(&self, entries: &[DirectoryEntry]) -> Result<String, LdifError> {
        let mut out = String::new();
        if self.include_version {
            out.push_str("version: 1\n\n");
        }
        for (index, entry) in entries.iter().enumerate() {
            self.encode_entry(&mut out, index, entry)?;
        }
        Ok(out)
    }
}

/// Format `name: value` or `name:: base64` as appropriate.
fn value_line(name: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{name}:")
    } else if is_safe_string(value) {
        format!("{name}: {value}")
    } else {
        format!("{name}:: {}", STANDARD.encode(value.as_bytes()))
    }
}

/// RFC 2849 SAFE-STRING, plus the recommendation to encode trailing spaces.
pub(crate) fn is_safe_string(value: &str) -> bool {
    let bytes = value.as_bytes();
    let Some(&first) = bytes.first() else {
        return true;
    };
    if matches!(first, b' ' | b':' | b'<') || bytes.last() == Some(&b' ') {
        return false;
    }
    bytes
        .iter()
        .all(|&b| b.is_ascii() && !matches!(b, b'\0' | b'\n' | b'\r'))
}

fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | ';' | '.'))
}
