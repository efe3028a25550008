//! Run orchestration: validate, generate, dispatch.

use crate::config::{RunConfig, Sink};
use crate::error::RunError;
use entry_core::DirectoryEntry;
use entry_generator::{EntryGenerator, FakeDataSource, FakerSource};
use populate_ldap::{DirectoryConnector, Ldap3Connector, LdapPopulator};
use populate_ldif::LdifPopulator;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Phase of a run, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Validating,
    Generating,
    Dispatching,
    Succeeded,
    Failed,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Validating => "validating",
            RunPhase::Generating => "generating",
            RunPhase::Dispatching => "dispatching",
            RunPhase::Succeeded => "succeeded",
            RunPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Entries written to the file or added to the server
    pub entries: u64,
    /// Where they went
    pub sink: Sink,
    /// Seed the fake data source was created with
    pub seed: u64,
    /// Wall time from validation to the end of dispatch
    pub duration: Duration,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.entries == 1 { "entry" } else { "entries" };
        match &self.sink {
            Sink::Ldif { .. } => write!(f, "Wrote {} {} to {}", self.entries, noun, self.sink)?,
            Sink::Ldap(_) => write!(f, "Added {} {} to {}", self.entries, noun, self.sink)?,
        }
        write!(f, " (seed {}, {:.2?})", self.seed, self.duration)
    }
}

/// Run with the `fake` data source and the `ldap3` client.
pub async fn run(config: RunConfig) -> Result<RunReport, RunError> {
    run_with(config, FakerSource::new, Ldap3Connector).await
}

/// Run with an explicit data source factory and directory connector.
///
/// `make_source` receives the resolved seed. It is not called when
/// validation fails.
pub async fn run_with<S, F, C>(
    config: RunConfig,
    make_source: F,
    connector: C,
) -> Result<RunReport, RunError>
where
    S: FakeDataSource,
    F: FnOnce(u64) -> S,
    C: DirectoryConnector,
{
    let start_time = Instant::now();

    let result = execute(config, make_source, connector, start_time).await;
    match &result {
        Ok(report) => transition(RunPhase::Succeeded, &report.to_string()),
        Err(e) => transition(RunPhase::Failed, &format!("{} ({})", e, e.kind())),
    }
    result
}

async fn execute<S, F, C>(
    config: RunConfig,
    make_source: F,
    connector: C,
    start_time: Instant,
) -> Result<RunReport, RunError>
where
    S: FakeDataSource,
    F: FnOnce(u64) -> S,
    C: DirectoryConnector,
{
    transition(RunPhase::Validating, &format!("mode '{}'", config.mode));
    let run = config.validate()?;

    let seed = run.seed.resolve();
    transition(
        RunPhase::Generating,
        &format!("{} entries under '{}' (seed {})", run.count, run.suffix_dn, seed),
    );
    let mut generator = EntryGenerator::new(make_source(seed), run.suffix_dn, run.template);
    let entries: Vec<DirectoryEntry> = generator
        .records(run.count)
        .map(|record| {
            debug!("Generated entry '{}'", record.dn());
            record.to_entry()
        })
        .collect();

    transition(RunPhase::Dispatching, &run.sink.to_string());
    let entries_written = match &run.sink {
        Sink::Ldif { path } => {
            let metrics = LdifPopulator::new(path)
                .populate(&entries)
                .map_err(|source| RunError::Io {
                    path: path.clone(),
                    source,
                })?;
            metrics.entries_written
        }
        Sink::Ldap(ldap) => {
            let metrics = LdapPopulator::with_connector(connector, ldap.clone())
                .populate(&entries)
                .await?;
            metrics.entries_added
        }
    };

    Ok(RunReport {
        entries: entries_written,
        sink: run.sink,
        seed,
        duration: start_time.elapsed(),
    })
}

fn transition(phase: RunPhase, detail: &str) {
    match phase {
        RunPhase::Validating => debug!("Run {}: {}", phase, detail),
        _ => info!("Run {}: {}", phase, detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputMode;
    use std::path::PathBuf;

    #[test]
    fn test_report_display() {
        let report = RunReport {
            entries: 3,
            sink: Sink::Ldif {
                path: PathBuf::from("fake_users.ldif"),
            },
            seed: 42,
            duration: Duration::from_millis(5),
        };

        let line = report.to_string();
        assert!(line.starts_with("Wrote 3 entries to LDIF file 'fake_users.ldif'"));
        assert!(line.contains("seed 42"));
        assert_eq!(report.sink.mode(), OutputMode::Ldif);
    }

    #[test]
    fn test_report_display_single_entry() {
        let report = RunReport {
            entries: 1,
            sink: Sink::Ldap(populate_ldap::LdapConnectionConfig::new(
                "ldap://localhost:389",
                "cn=admin",
                "secret",
            )),
            seed: 0,
            duration: Duration::ZERO,
        };

        let line = report.to_string();
        assert!(line.starts_with("Added 1 entry to LDAP server 'ldap://localhost:389'"));
        assert!(!line.contains("secret"));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RunPhase::Dispatching.to_string(), "dispatching");
        assert_eq!(RunPhase::Failed.to_string(), "failed");
    }
}
