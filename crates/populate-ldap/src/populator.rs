//! LDAP populator.

use crate::client::{DirectoryClient, DirectoryConnector, Ldap3Connector, LdapConnectionConfig};
use crate::error::LdapPopulatorError;
use entry_core::DirectoryEntry;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of entries added.
    pub entries_added: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent connecting and binding.
    pub connect_duration: Duration,
    /// Time spent in add operations.
    pub add_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.entries_added as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Adds entry batches to an LDAP server.
pub struct LdapPopulator<C = Ldap3Connector> {
    connector: C,
    config: LdapConnectionConfig,
}

impl LdapPopulator<Ldap3Connector> {
    /// Create a populator using the `ldap3` client.
    pub fn new(config: LdapConnectionConfig) -> Self {
        Self::with_connector(Ldap3Connector, config)
    }
}

impl<C: DirectoryConnector> LdapPopulator<C> {
    /// Create a populator with an explicit connector.
    pub fn with_connector(connector: C, config: LdapConnectionConfig) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &LdapConnectionConfig {
        &self.config
    }

    /// Connect, bind once, then add every entry in order.
    ///
    /// Stops at the first failed add. Entries added before the failure stay
    /// on the server. Once connected, the connection is closed on every
    /// return path.
    pub async fn populate(
        &self,
        entries: &[DirectoryEntry],
    ) -> Result<PopulateMetrics, LdapPopulatorError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        info!(
            "Adding {} entries to LDAP server '{}' as '{}'",
            entries.len(),
            self.config.url,
            self.config.bind_dn
        );

        let mut client = self.connector.connect(&self.config).await.map_err(|source| {
            LdapPopulatorError::Connect {
                url: self.config.url.clone(),
                source,
            }
        })?;

        let result = self.bind_and_add(&mut client, entries, &mut metrics).await;

        if let Err(e) = client.close().await {
            warn!("Failed to close LDAP connection to '{}': {}", self.config.url, e);
        }

        if let Err(LdapPopulatorError::Add { dn, added, .. }) = &result {
            if *added > 0 {
                warn!(
                    "{} entries were added before '{}' failed and remain on the server",
                    added, dn
                );
            }
        }
        result?;

        metrics.total_duration = start_time.elapsed();
        info!(
            "LDAP add complete: {} entries in {:?} ({:.2} entries/sec)",
            metrics.entries_added,
            metrics.total_duration,
            metrics.entries_per_second()
        );

        Ok(metrics)
    }

    async fn bind_and_add(
        &self,
        client: &mut C::Client,
        entries: &[DirectoryEntry],
        metrics: &mut PopulateMetrics,
    ) -> Result<(), LdapPopulatorError> {
        let bind_start = Instant::now();
        client
            .bind(&self.config.bind_dn, &self.config.bind_password)
            .await
            .map_err(|source| LdapPopulatorError::Bind {
                bind_dn: self.config.bind_dn.clone(),
                source,
            })?;
        metrics.connect_duration = bind_start.elapsed();

        let add_start = Instant::now();
        for entry in entries {
            client
                .add(entry)
                .await
                .map_err(|source| LdapPopulatorError::Add {
                    dn: entry.dn().to_string(),
                    added: metrics.entries_added,
                    source,
                })?;
            metrics.entries_added += 1;
            debug!("Added entry '{}'", entry.dn());
        }
        metrics.add_duration = add_start.elapsed();

        Ok(())
    }
}
