//! Person record generator.

use crate::source::FakeDataSource;
use entry_core::{PersonRecord, RecordTemplate};
use tracing::trace;

/// Generator that produces person records under a fixed DN suffix.
///
/// Every record draws the same four values from the source, in the same
/// order, whether or not the template overrides them. Overrides therefore
/// never change which values later records receive.
pub struct EntryGenerator<S> {
    /// Source of first/last names, emails and usernames
    source: S,
    /// Everything after `uid=<id>,` in the DN
    suffix_dn: String,
    /// Optional overrides applied to every record
    template: Option<RecordTemplate>,
    /// Number of records generated so far
    index: u64,
}

impl<S: FakeDataSource> EntryGenerator<S> {
    /// Create a new generator.
    pub fn new(source: S, suffix_dn: impl Into<String>, template: Option<RecordTemplate>) -> Self {
        Self {
            source,
            suffix_dn: suffix_dn.into(),
            template,
            index: 0,
        }
    }

    /// Get the current record index.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate the next record.
    pub fn next_record(&mut self) -> PersonRecord {
        let first = self.source.first_name();
        let mut last = self.source.last_name();
        let mut email = self.source.email();
        let mut uid = self.source.username();

        let template = self.template.as_ref();
        if let Some(value) = template.and_then(RecordTemplate::uid) {
            uid = value.to_string();
        }
        if let Some(value) = template.and_then(RecordTemplate::sn) {
            last = value.to_string();
        }
        if let Some(value) = template.and_then(RecordTemplate::mail) {
            email = value.to_string();
        }

        let cn = match template.and_then(RecordTemplate::cn) {
            Some(value) => value.to_string(),
            None => format!("{first} {last}"),
        };

        let record = PersonRecord::new(&self.suffix_dn, uid, cn, last, email);
        trace!(index = self.index, dn = record.dn(), "generated record");
        self.index += 1;
        record
    }

    /// Generate `count` records lazily.
    pub fn records(&mut self, count: u64) -> RecordIterator<'_, S> {
        RecordIterator {
            generator: self,
            remaining: count,
        }
    }

    /// Consume the generator and return its source.
    pub fn into_source(self) -> S {
        self.source
    }
}

/// Iterator that lazily generates person records.
pub struct RecordIterator<'a, S> {
    generator: &'a mut EntryGenerator<S>,
    remaining: u64,
}

impl<S: FakeDataSource> Iterator for RecordIterator<'_, S> {
    type Item = PersonRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<S: FakeDataSource> ExactSizeIterator for RecordIterator<'_, S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FakerSource;
    use entry_core::DirectoryEntry;
    use std::collections::HashSet;

    const SUFFIX: &str = "ou=employee,ou=users,o=rtx";

    /// Source returning numbered values so every field is predictable.
    struct SequenceSource {
        calls: u64,
    }

    impl SequenceSource {
        fn new() -> Self {
            Self { calls: 0 }
        }

        fn next(&mut self, prefix: &str) -> String {
            self.calls += 1;
            format!("{prefix}{}", self.calls)
        }
    }

    impl FakeDataSource for SequenceSource {
        fn first_name(&mut self) -> String {
            self.next("First")
        }

        fn last_name(&mut self) -> String {
            self.next("Last")
        }

        fn email(&mut self) -> String {
            self.next("mail@example.com#")
        }

        fn username(&mut self) -> String {
            self.next("user")
        }
    }

    /// Source that always returns the same values.
    struct FixedSource;

    impl FakeDataSource for FixedSource {
        fn first_name(&mut self) -> String {
            "John".to_string()
        }

        fn last_name(&mut self) -> String {
            "Smith".to_string()
        }

        fn email(&mut self) -> String {
            "john.smith@example.com".to_string()
        }

        fn username(&mut self) -> String {
            "jsmith".to_string()
        }
    }

    #[test]
    fn test_generate_without_template() {
        let mut generator = EntryGenerator::new(FixedSource, SUFFIX, None);
        let record = generator.next_record();

        assert_eq!(record.uid(), "jsmith");
        assert_eq!(record.cn(), "John Smith");
        assert_eq!(record.sn(), "Smith");
        assert_eq!(record.mail(), "john.smith@example.com");
        assert_eq!(record.dn(), "uid=jsmith,ou=employee,ou=users,o=rtx");
    }

    #[test]
    fn test_dn_uses_overridden_uid() {
        let template = RecordTemplate {
            uid: Some("jdoe".to_string()),
            ..Default::default()
        };
        let mut generator = EntryGenerator::new(FixedSource, SUFFIX, Some(template));

        let record = generator.next_record();
        assert_eq!(record.dn(), "uid=jdoe,ou=employee,ou=users,o=rtx");
    }

    #[test]
    fn test_full_template_overrides_everything() {
        let template = RecordTemplate {
            uid: Some("jdoe".to_string()),
            cn: Some("Custom Name".to_string()),
            sn: Some("Doe".to_string()),
            mail: Some("jdoe@example.com".to_string()),
        };
        let mut generator = EntryGenerator::new(FakerSource::new(0), SUFFIX, Some(template));

        for record in generator.records(3) {
            assert_eq!(record.uid(), "jdoe");
            assert_eq!(record.cn(), "Custom Name");
            assert_eq!(record.sn(), "Doe");
            assert_eq!(record.mail(), "jdoe@example.com");
        }
    }

    #[test]
    fn test_empty_template_fields_are_generated() {
        let template = RecordTemplate {
            uid: Some(String::new()),
            cn: Some(String::new()),
            sn: None,
            mail: Some("fixed@example.com".to_string()),
        };
        let mut generator = EntryGenerator::new(FixedSource, SUFFIX, Some(template));
        let record = generator.next_record();

        assert_eq!(record.uid(), "jsmith");
        assert_eq!(record.cn(), "John Smith");
        assert_eq!(record.sn(), "Smith");
        assert_eq!(record.mail(), "fixed@example.com");
    }

    #[test]
    fn test_display_name_is_computed_from_overridden_surname() {
        let template = RecordTemplate {
            cn: Some(String::new()),
            sn: Some("Doe".to_string()),
            ..Default::default()
        };
        let mut generator = EntryGenerator::new(FixedSource, SUFFIX, Some(template));

        let record = generator.next_record();
        assert_eq!(record.cn(), "John Doe");
        assert_eq!(record.sn(), "Doe");
    }

    #[test]
    fn test_display_name_override_ignores_parts() {
        let template = RecordTemplate {
            cn: Some("Custom Name".to_string()),
            sn: Some("Doe".to_string()),
            ..Default::default()
        };
        let mut generator = EntryGenerator::new(FixedSource, SUFFIX, Some(template));

        assert_eq!(generator.next_record().cn(), "Custom Name");
    }

    #[test]
    fn test_overrides_do_not_shift_the_random_stream() {
        let template = RecordTemplate {
            uid: Some("fixed".to_string()),
            sn: Some("Fixed".to_string()),
            ..Default::default()
        };

        let mut plain = EntryGenerator::new(SequenceSource::new(), SUFFIX, None);
        let mut templated = EntryGenerator::new(SequenceSource::new(), SUFFIX, Some(template));

        let plain_records: Vec<_> = plain.records(3).collect();
        let templated_records: Vec<_> = templated.records(3).collect();

        for (a, b) in plain_records.iter().zip(&templated_records) {
            assert_eq!(a.mail(), b.mail());
        }
        assert_eq!(plain.into_source().calls, 12);
        assert_eq!(templated.into_source().calls, 12);
    }

    #[test]
    fn test_records_yields_count_in_order() {
        let mut generator = EntryGenerator::new(SequenceSource::new(), SUFFIX, None);
        let records: Vec<_> = generator.records(5).collect();

        assert_eq!(records.len(), 5);
        assert_eq!(generator.current_index(), 5);

        let uids: Vec<&str> = records.iter().map(|r| r.uid()).collect();
        assert_eq!(uids, vec!["user4", "user8", "user12", "user16", "user20"]);
    }

    #[test]
    fn test_records_size_hint() {
        let mut generator = EntryGenerator::new(FixedSource, SUFFIX, None);
        let iter = generator.records(7);
        assert_eq!(iter.len(), 7);
    }

    #[test]
    fn test_deterministic_generation() {
        let mut gen1 = EntryGenerator::new(FakerSource::new(0), SUFFIX, None);
        let mut gen2 = EntryGenerator::new(FakerSource::new(0), SUFFIX, None);

        let batch1: Vec<_> = gen1.records(10).collect();
        let batch2: Vec<_> = gen2.records(10).collect();

        assert_eq!(batch1, batch2);
    }

    #[test]
    fn test_uids_are_unique_across_a_large_batch() {
        let mut generator = EntryGenerator::new(FakerSource::new(0), "o=rtx", None);
        let uids: HashSet<String> = generator
            .records(1000)
            .map(|record| record.uid().to_string())
            .collect();

        assert_eq!(uids.len(), 1000);
    }

    #[test]
    fn test_different_seeds_differ() {
        let mut gen1 = EntryGenerator::new(FakerSource::new(1), SUFFIX, None);
        let mut gen2 = EntryGenerator::new(FakerSource::new(2), SUFFIX, None);

        let batch1: Vec<_> = gen1.records(10).collect();
        let batch2: Vec<_> = gen2.records(10).collect();

        assert_ne!(batch1, batch2);
    }

    #[test]
    fn test_object_class_is_never_overridden() {
        let template = RecordTemplate {
            uid: Some("objectClass".to_string()),
            cn: Some("objectClass".to_string()),
            sn: Some("person".to_string()),
            mail: Some("x@example.com".to_string()),
        };
        let mut generator = EntryGenerator::new(FakerSource::new(0), SUFFIX, Some(template));

        let entry = DirectoryEntry::from(&generator.next_record());
        let object_class = entry.attributes().get("objectClass").unwrap();
        assert_eq!(object_class.values, vec!["inetOrgPerson".to_string()]);
    }
}
