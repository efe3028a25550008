//! LDIF file populator.

use crate::error::LdifPopulatorError;
use entry_core::DirectoryEntry;
use ldif_types::{Encoder, LdifEncoder};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default buffer size for LDIF writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Output file permissions: owner read/write, others read.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of entries written.
    pub entries_written: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent encoding LDIF.
    pub encode_duration: Duration,
    /// Time spent writing the file.
    pub write_duration: Duration,
    /// Output file size in bytes.
    pub file_size_bytes: u64,
}

impl PopulateMetrics {
    /// Calculate entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.entries_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Writes entry batches to an LDIF file.
pub struct LdifPopulator<E = LdifEncoder> {
    output_path: PathBuf,
    encoder: E,
}

impl LdifPopulator<LdifEncoder> {
    /// Create a populator writing to `output_path` with the default encoder.
    pub fn new<P: AsRef<Path>>(output_path: P) -> Self {
        Self {
            output_path: output_path.as_ref().to_path_buf(),
            encoder: LdifEncoder::default(),
        }
    }
}

impl<E: Encoder> LdifPopulator<E> {
    /// Replace the encoder.
    pub fn with_encoder<F: Encoder>(self, encoder: F) -> LdifPopulator<F> {
        LdifPopulator {
            output_path: self.output_path,
            encoder,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Encode the whole batch and write it to the output path.
    ///
    /// An existing file is truncated. Nothing is cleaned up if the write
    /// fails part way.
    pub fn populate(
        &self,
        entries: &[DirectoryEntry],
    ) -> Result<PopulateMetrics, LdifPopulatorError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Writing {} entries to LDIF file '{}'",
            entries.len(),
            self.output_path.display()
        );

        let encode_start = Instant::now();
        let text = self.encoder.encode(entries)?;
        metrics.encode_duration = encode_start.elapsed();
        debug!("Encoded {} bytes of LDIF", text.len());

        let write_start = Instant::now();
        let file = create_output_file(&self.output_path)?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        drop(writer);
        metrics.write_duration = write_start.elapsed();

        metrics.entries_written = entries.len() as u64;
        metrics.file_size_bytes = std::fs::metadata(&self.output_path)?.len();
        metrics.total_duration = start_time.elapsed();

        info!(
            "LDIF write complete: {} entries, {} bytes in {:?}",
            metrics.entries_written, metrics.file_size_bytes, metrics.total_duration
        );

        Ok(metrics)
    }
}

/// Write `entries` to `path` with the default encoder.
pub fn write_ldif_file<P: AsRef<Path>>(
    path: P,
    entries: &[DirectoryEntry],
) -> Result<PopulateMetrics, LdifPopulatorError> {
    LdifPopulator::new(path).populate(entries)
}

fn create_output_file(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let file = options.open(path)?;
    // mode() only applies on create and is masked by umask
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(FILE_MODE))?;
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entry_core::{AttributeSet, PersonRecord};
    use ldif_types::{parse_ldif, LdifError};
    use tempfile::TempDir;

    fn sample_entries() -> Vec<DirectoryEntry> {
        vec![
            PersonRecord::new(
                "ou=employee,ou=users,o=rtx",
                "jdoe",
                "John Doe",
                "Doe",
                "jdoe@example.com",
            )
            .to_entry(),
            PersonRecord::new(
                "ou=employee,ou=users,o=rtx",
                "asmith",
                "Ann Smith",
                "Smith",
                "asmith@example.com",
            )
            .to_entry(),
        ]
    }

    /// Encoder that always fails.
    struct FailingEncoder;

    impl Encoder for FailingEncoder {
        fn encode(&self, _entries: &[DirectoryEntry]) -> Result<String, LdifError> {
            Err(LdifError::EmptyDn { index: 0 })
        }
    }

    #[test]
    fn test_metrics() {
        let metrics = PopulateMetrics {
            entries_written: 1000,
            total_duration: Duration::from_secs(10),
            ..Default::default()
        };

        assert_eq!(metrics.entries_per_second(), 100.0);
        assert_eq!(PopulateMetrics::default().entries_per_second(), 0.0);
    }

    #[test]
    fn test_populate_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("users.ldif");
        let entries = sample_entries();

        let metrics = write_ldif_file(&output_path, &entries).unwrap();
        assert_eq!(metrics.entries_written, 2);
        assert!(metrics.file_size_bytes > 0);

        let content = std::fs::read_to_string(&output_path).unwrap();
        let parsed = parse_ldif(&content).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("users.ldif");
        std::fs::write(&output_path, "x".repeat(10_000)).unwrap();

        let entries = sample_entries();
        write_ldif_file(&output_path, &entries[..1]).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(!content.contains("xxxx"));
        assert_eq!(parse_ldif(&content).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("users.ldif");
        std::fs::write(&output_path, "old").unwrap();
        std::fs::set_permissions(&output_path, std::fs::Permissions::from_mode(0o600)).unwrap();

        write_ldif_file(&output_path, &sample_entries()).unwrap();

        let mode = std::fs::metadata(&output_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_encode_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("users.ldif");

        let populator = LdifPopulator::new(&output_path).with_encoder(FailingEncoder);
        let result = populator.populate(&sample_entries());

        assert!(matches!(result, Err(LdifPopulatorError::Ldif(_))));
        assert!(!output_path.exists());
    }

    #[test]
    fn test_invalid_entry_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("users.ldif");

        let entries = vec![DirectoryEntry::new("", AttributeSet::new())];
        let result = write_ldif_file(&output_path, &entries);
        assert!(matches!(result, Err(LdifPopulatorError::Ldif(_))));
    }

    #[test]
    fn test_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("missing-dir").join("users.ldif");

        let result = write_ldif_file(&output_path, &sample_entries());
        assert!(matches!(result, Err(LdifPopulatorError::Io(_))));
    }

    #[test]
    fn test_deterministic_output() {
        let temp_dir = TempDir::new().unwrap();
        let path1 = temp_dir.path().join("a.ldif");
        let path2 = temp_dir.path().join("b.ldif");

        write_ldif_file(&path1, &sample_entries()).unwrap();
        write_ldif_file(&path2, &sample_entries()).unwrap();

        assert_eq!(
            std::fs::read(&path1).unwrap(),
            std::fs::read(&path2).unwrap()
        );
    }
}
