//! Directory client seam and its `ldap3` implementation.

use crate::error::DirectoryError;
use async_trait::async_trait;
use entry_core::DirectoryEntry;
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, LdapResult};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Where and as whom to connect.
#[derive(Clone)]
pub struct LdapConnectionConfig {
    /// Server URL, e.g. `ldaps://localhost:636`
    pub url: String,
    /// DN used for the simple bind
    pub bind_dn: String,
    /// Password used for the simple bind
    pub bind_password: String,
    /// Connect timeout
    pub timeout: Duration,
    /// Accept any TLS certificate
    pub no_tls_verify: bool,
}

impl LdapConnectionConfig {
    pub fn new(
        url: impl Into<String>,
        bind_dn: impl Into<String>,
        bind_password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            bind_dn: bind_dn.into(),
            bind_password: bind_password.into(),
            timeout: Duration::from_secs(crate::args::DEFAULT_CONNECT_TIMEOUT_SECS),
            no_tls_verify: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_no_tls_verify(mut self, no_tls_verify: bool) -> Self {
        self.no_tls_verify = no_tls_verify;
        self
    }
}

impl fmt::Debug for LdapConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LdapConnectionConfig")
            .field("url", &self.url)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("no_tls_verify", &self.no_tls_verify)
            .finish()
    }
}

/// Opens connections to a directory server.
#[async_trait]
pub trait DirectoryConnector: Send + Sync {
    type Client: DirectoryClient;

    async fn connect(&self, config: &LdapConnectionConfig) -> Result<Self::Client, DirectoryError>;
}

/// One open connection to a directory server.
#[async_trait]
pub trait DirectoryClient: Send {
    /// Simple bind.
    async fn bind(&mut self, bind_dn: &str, password: &str) -> Result<(), DirectoryError>;

    /// Add a single entry.
    async fn add(&mut self, entry: &DirectoryEntry) -> Result<(), DirectoryError>;

    /// Release the connection.
    async fn close(&mut self) -> Result<(), DirectoryError>;
}

/// Connector backed by `ldap3`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ldap3Connector;

#[async_trait]
impl DirectoryConnector for Ldap3Connector {
    type Client = Ldap3Client;

    async fn connect(&self, config: &LdapConnectionConfig) -> Result<Self::Client, DirectoryError> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(config.timeout)
            .set_no_tls_verify(config.no_tls_verify);
        if config.no_tls_verify {
            warn!("TLS certificate verification is disabled for {}", config.url);
        }

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &config.url).await?;

        // Spawn the connection driver
        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!("LDAP connection driver error: {}", e);
            }
        });

        debug!("Connected to {}", config.url);
        Ok(Ldap3Client { ldap })
    }
}

/// [`DirectoryClient`] over an `ldap3` handle.
pub struct Ldap3Client {
    ldap: Ldap,
}

#[async_trait]
impl DirectoryClient for Ldap3Client {
    async fn bind(&mut self, bind_dn: &str, password: &str) -> Result<(), DirectoryError> {
        let result = self.ldap.simple_bind(bind_dn, password).await?;
        check_result(result)
    }

    async fn add(&mut self, entry: &DirectoryEntry) -> Result<(), DirectoryError> {
        let attributes: Vec<(&str, HashSet<&str>)> = entry
            .attributes()
            .iter()
            .map(|attr| {
                (
                    attr.name.as_str(),
                    attr.values.iter().map(String::as_str).collect(),
                )
            })
            .collect();

        let result = self.ldap.add(entry.dn(), attributes).await?;
        check_result(result)
    }

    async fn close(&mut self) -> Result<(), DirectoryError> {
        self.ldap.unbind().await?;
        Ok(())
    }
}

fn check_result(result: LdapResult) -> Result<(), DirectoryError> {
    if result.rc == 0 {
        Ok(())
    } else {
        Err(DirectoryError::Rejected {
            rc: result.rc,
            text: result.text,
        })
    }
}
