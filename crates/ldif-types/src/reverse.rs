//! LDIF text → DirectoryEntry batch.
//!
//! Supports LDIF content records: an optional `version: 1` line, `#`
//! comments, folded lines, and plain or base64 (`::`) values. URL values
//! (`:<`) and change records (`changetype:`) are rejected.

use crate::error::LdifError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use entry_core::{AttributeSet, DirectoryEntry};

/// A logical (unfolded) line with the physical line number it started on.
struct LogicalLine {
    number: usize,
    text: String,
}

/// Parse LDIF content into entries, in document order.
pub fn parse_ldif(input: &str) -> Result<Vec<DirectoryEntry>, LdifError> {
    let mut entries = Vec::new();
    let mut seen_record = false;

    for record in split_records(unfold(input)) {
        let mut lines = record.into_iter().peekable();

        if !seen_record {
            if let Some(version) = lines.peek().and_then(version_line) {
                if version.1 != "1" {
                    return Err(LdifError::Parse {
                        line: version.0,
                        message: format!("unsupported LDIF version '{}'", version.1),
                    });
                }
                lines.next();
            }
        }

        let record: Vec<LogicalLine> = lines.collect();
        if record.is_empty() {
            continue;
        }
        seen_record = true;
        entries.push(parse_record(record)?);
    }

    Ok(entries)
}

/// Line number and value of a `version:` line.
fn version_line(line: &LogicalLine) -> Option<(usize, String)> {
    let (name, value) = line.text.split_once(':')?;
    name.eq_ignore_ascii_case("version")
        .then(|| (line.number, value.trim().to_string()))
}

/// Join continuation lines and drop comments.
fn unfold(input: &str) -> Vec<Option<LogicalLine>> {
    let mut lines: Vec<Option<LogicalLine>> = Vec::new();
    let mut in_comment = false;

    for (idx, raw) in input.lines().enumerate() {
        let number = idx + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some(continuation) = raw.strip_prefix(' ') {
            if in_comment {
                continue;
            }
            if let Some(Some(previous)) = lines.last_mut() {
                previous.text.push_str(continuation);
                continue;
            }
        }

        if raw.starts_with('#') {
            in_comment = true;
            continue;
        }
        in_comment = false;

        if raw.is_empty() {
            lines.push(None);
        } else {
            lines.push(Some(LogicalLine {
                number,
                text: raw.to_string(),
            }));
        }
    }

    lines
}

/// Group logical lines into records separated by blank lines.
fn split_records(lines: Vec<Option<LogicalLine>>) -> Vec<Vec<LogicalLine>> {
    let mut records = Vec::new();
    let mut current = Vec::new();

    for line in lines {
        match line {
            Some(line) => current.push(line),
            None => {
                if !current.is_empty() {
                    records.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        records.push(current);
    }

    records
}

fn parse_record(lines: Vec<LogicalLine>) -> Result<DirectoryEntry, LdifError> {
    let mut lines = lines.into_iter();

    let first = lines.next().ok_or(LdifError::Parse {
        line: 0,
        message: "empty record".to_string(),
    })?;
    let (name, dn) = parse_line(&first)?;
    if !name.eq_ignore_ascii_case("dn") {
        return Err(LdifError::Parse {
            line: first.number,
            message: format!("expected 'dn:', found '{name}:'"),
        });
    }

    let mut attributes = AttributeSet::new();
    for line in lines {
        let (name, value) = parse_line(&line)?;
        if name.eq_ignore_ascii_case("changetype") {
            return Err(LdifError::Unsupported {
                line: line.number,
                what: "change records".to_string(),
            });
        }
        attributes.push_value(&name, value);
    }

    Ok(DirectoryEntry::new(dn, attributes))
}

/// Split `name: value`, `name:: base64` or `name:< url`.
fn parse_line(line: &LogicalLine) -> Result<(String, String), LdifError> {
    let (name, rest) = line.text.split_once(':').ok_or_else(|| LdifError::Parse {
        line: line.number,
        message: format!("missing ':' in '{}'", line.text),
    })?;
    if name.is_empty() {
        return Err(LdifError::Parse {
            line: line.number,
            message: "empty attribute name".to_string(),
        });
    }

    let value = if let Some(encoded) = rest.strip_prefix(':') {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|source| LdifError::Base64 {
                line: line.number,
                source,
            })?;
        String::from_utf8(bytes).map_err(|_| LdifError::Utf8 { line: line.number })?
    } else if rest.starts_with('<') {
        return Err(LdifError::Unsupported {
            line: line.number,
            what: "URL values".to_string(),
        });
    } else {
        rest.trim_start_matches(' ').to_string()
    };

    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::{Encoder, LdifEncoder};
    use entry_core::PersonRecord;

    #[test]
    fn test_parse_simple_record() {
        let input = "version: 1\n\
                     \n\
                     dn: uid=jdoe,o=rtx\n\
                     objectClass: inetOrgPerson\n\
                     uid: jdoe\n\
                     cn: John Doe\n\
                     sn: Doe\n\
                     mail: jdoe@example.com\n";

        let entries = parse_ldif(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dn(), "uid=jdoe,o=rtx");
        assert_eq!(entries[0].attributes().first_value("cn"), Some("John Doe"));
        assert_eq!(
            entries[0].attributes().names(),
            vec!["objectClass", "uid", "cn", "sn", "mail"]
        );
    }

    #[test]
    fn test_version_directly_followed_by_dn() {
        let input = "version: 1\ndn: uid=a,o=rtx\nuid: a\n";
        let entries = parse_ldif(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dn(), "uid=a,o=rtx");
    }

    #[test]
    fn test_unsupported_version() {
        let result = parse_ldif("version: 2\n\ndn: uid=a,o=rtx\n");
        assert!(matches!(result, Err(LdifError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_folded_lines_and_comments() {
        let input = "# generated\n continued comment\ndn: uid=a,\n o=rtx\ncn: Ann\n  Smith\n";

        let entries = parse_ldif(input).unwrap();
        assert_eq!(entries[0].dn(), "uid=a,o=rtx");
        assert_eq!(entries[0].attributes().first_value("cn"), Some("Ann Smith"));
    }

    #[test]
    fn test_base64_values() {
        let input = format!(
            "dn: uid=jose,o=rtx\ncn:: {}\n",
            STANDARD.encode("José Müller")
        );
        let entries = parse_ldif(&input).unwrap();
        assert_eq!(
            entries[0].attributes().first_value("cn"),
            Some("José Müller")
        );
    }

    #[test]
    fn test_multi_valued_attribute() {
        let input = "dn: uid=a,o=rtx\nmail: a@example.com\nmail: b@example.com\n";
        let entries = parse_ldif(input).unwrap();
        assert_eq!(entries[0].attributes().get("mail").unwrap().values.len(), 2);
    }

    #[test]
    fn test_record_must_start_with_dn() {
        let result = parse_ldif("cn: orphan\n");
        assert!(matches!(result, Err(LdifError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_change_records_are_unsupported() {
        let result = parse_ldif("dn: uid=a,o=rtx\nchangetype: delete\n");
        assert!(matches!(result, Err(LdifError::Unsupported { line: 2, .. })));
    }

    #[test]
    fn test_url_values_are_unsupported() {
        let result = parse_ldif("dn: uid=a,o=rtx\njpegPhoto:< file:///tmp/a.jpg\n");
        assert!(matches!(result, Err(LdifError::Unsupported { .. })));
    }

    #[test]
    fn test_invalid_base64() {
        let result = parse_ldif("dn: uid=a,o=rtx\ncn:: !!!\n");
        assert!(matches!(result, Err(LdifError::Base64 { line: 2, .. })));

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Invalid base64 value at line 2");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "dn: uid=a,o=rtx\r\ncn: Ann\r\n\r\ndn: uid=b,o=rtx\r\ncn: Bob\r\n";
        let entries = parse_ldif(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].attributes().first_value("cn"), Some("Bob"));
    }

    #[test]
    fn test_encoder_output_reads_back() {
        let entries = vec![
            PersonRecord::new("ou=employee,ou=users,o=rtx", "jdoe", "John Doe", "Doe", "jdoe@example.com")
                .to_entry(),
            PersonRecord::new("ou=employee,ou=users,o=rtx", "zoe", "Zoë  Ünal ", "Ünal", "z@example.com")
                .to_entry(),
            PersonRecord::new("o=rtx", "long", "y".repeat(300), "Long", "long@example.com").to_entry(),
        ];

        let text = LdifEncoder::default().encode(&entries).unwrap();
        assert_eq!(parse_ldif(&text).unwrap(), entries);
    }
}
