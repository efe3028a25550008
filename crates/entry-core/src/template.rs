//! Optional attribute overrides supplied by the user.
//!
//! A template is normally read from a JSON file such as:
//!
//! ```json
//! {
//!   "uid": "jdoe",
//!   "cn": "John Doe",
//!   "sn": "Doe",
//!   "mail": "jdoe@example.com"
//! }
//! ```
//!
//! Any field may be omitted, `null`, or empty; those are filled by the generator.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a template file.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The file could not be read.
    #[error("Failed to open input file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid JSON template.
    #[error("Failed to parse JSON in '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-attribute overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTemplate {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub cn: Option<String>,
    #[serde(default)]
    pub sn: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
}

impl RecordTemplate {
    /// Load a template from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a template from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn uid(&self) -> Option<&str> {
        non_empty(&self.uid)
    }

    pub fn cn(&self) -> Option<&str> {
        non_empty(&self.cn)
    }

    pub fn sn(&self) -> Option<&str> {
        non_empty(&self.sn)
    }

    pub fn mail(&self) -> Option<&str> {
        non_empty(&self.mail)
    }

    /// True when no field would override anything.
    pub fn is_empty(&self) -> bool {
        self.uid().is_none() && self.cn().is_none() && self.sn().is_none() && self.mail().is_none()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_template() {
        let template = RecordTemplate::from_json(
            r#"{"uid":"jdoe","cn":"John Doe","sn":"Doe","mail":"jdoe@example.com"}"#,
        )
        .unwrap();

        assert_eq!(template.uid(), Some("jdoe"));
        assert_eq!(template.cn(), Some("John Doe"));
        assert_eq!(template.sn(), Some("Doe"));
        assert_eq!(template.mail(), Some("jdoe@example.com"));
        assert!(!template.is_empty());
    }

    #[test]
    fn test_missing_null_and_empty_fields_are_absent() {
        let template =
            RecordTemplate::from_json(r#"{"uid":"","cn":null,"sn":"Doe","extra":1}"#).unwrap();

        assert_eq!(template.uid(), None);
        assert_eq!(template.cn(), None);
        assert_eq!(template.sn(), Some("Doe"));
        assert_eq!(template.mail(), None);
    }

    #[test]
    fn test_empty_object_is_empty_template() {
        let template = RecordTemplate::from_json("{}").unwrap();
        assert!(template.is_empty());
        assert_eq!(template, RecordTemplate::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"mail":"fixed@example.com"}}"#).unwrap();

        let template = RecordTemplate::from_file(file.path()).unwrap();
        assert_eq!(template.mail(), Some("fixed@example.com"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = RecordTemplate::from_file("/nonexistent/template.json");
        assert!(matches!(result, Err(TemplateError::Read { .. })));
    }

    #[test]
    fn test_from_file_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = RecordTemplate::from_file(file.path()).unwrap_err();
        assert!(matches!(err, TemplateError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
