//! In-memory directory client for exercising the sink without a server.
//!
//! [`RecordingConnector`] logs every call it receives and can be scripted
//! to fail at connect, bind, or a given add.

use crate::client::{DirectoryClient, DirectoryConnector, LdapConnectionConfig};
use crate::error::DirectoryError;
use async_trait::async_trait;
use entry_core::DirectoryEntry;
use std::sync::{Arc, Mutex, MutexGuard};

/// LDAP result code `entryAlreadyExists`.
pub const RC_ENTRY_ALREADY_EXISTS: u32 = 68;

/// LDAP result code `invalidCredentials`.
pub const RC_INVALID_CREDENTIALS: u32 = 49;

/// A call observed by the recording client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect { url: String },
    Bind { bind_dn: String },
    Add { dn: String },
    Close,
}

#[derive(Debug, Default)]
struct Script {
    fail_connect: bool,
    fail_bind: bool,
    fail_add_at: Option<usize>,
}

#[derive(Debug, Default)]
struct Shared {
    script: Script,
    calls: Vec<Call>,
    added: Vec<DirectoryEntry>,
}

/// Scripted connector that records calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    shared: Arc<Mutex<Shared>>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the connection.
    pub fn fail_connect(self) -> Self {
        self.lock().script.fail_connect = true;
        self
    }

    /// Reject the bind with `invalidCredentials`.
    pub fn fail_bind(self) -> Self {
        self.lock().script.fail_bind = true;
        self
    }

    /// Reject the add at zero-based position `index` with `entryAlreadyExists`.
    pub fn fail_add_at(self, index: usize) -> Self {
        self.lock().script.fail_add_at = Some(index);
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Entries that were accepted.
    pub fn added(&self) -> Vec<DirectoryEntry> {
        self.lock().added.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DirectoryConnector for RecordingConnector {
    type Client = RecordingClient;

    async fn connect(&self, config: &LdapConnectionConfig) -> Result<Self::Client, DirectoryError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Connect {
            url: config.url.clone(),
        });
        if shared.script.fail_connect {
            return Err(DirectoryError::Rejected {
                rc: 91,
                text: "connect error".to_string(),
            });
        }
        Ok(RecordingClient {
            shared: Arc::clone(&self.shared),
            attempts: 0,
        })
    }
}

/// Client handed out by [`RecordingConnector`].
#[derive(Debug)]
pub struct RecordingClient {
    shared: Arc<Mutex<Shared>>,
    attempts: usize,
}

impl RecordingClient {
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DirectoryClient for RecordingClient {
    async fn bind(&mut self, bind_dn: &str, _password: &str) -> Result<(), DirectoryError> {
        let mut shared = self.lock();
        shared.calls.push(Call::Bind {
            bind_dn: bind_dn.to_string(),
        });
        if shared.script.fail_bind {
            return Err(DirectoryError::Rejected {
                rc: RC_INVALID_CREDENTIALS,
                text: "Invalid Credentials".to_string(),
            });
        }
        Ok(())
    }

    async fn add(&mut self, entry: &DirectoryEntry) -> Result<(), DirectoryError> {
        let position = self.attempts;
        self.attempts += 1;

        let mut shared = self.lock();
        shared.calls.push(Call::Add {
            dn: entry.dn().to_string(),
        });
        if shared.script.fail_add_at == Some(position) {
            return Err(DirectoryError::Rejected {
                rc: RC_ENTRY_ALREADY_EXISTS,
                text: "Entry Already Exists".to_string(),
            });
        }
        shared.added.push(entry.clone());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DirectoryError> {
        self.lock().calls.push(Call::Close);
        Ok(())
    }
}
