//! Run configuration and validation.

pub mod duration;

use crate::error::RunError;
use entry_core::RecordTemplate;
use entry_generator::SeedMode;
use populate_common::CommonPopulateArgs;
use populate_ldap::{LdapConnectionConfig, LdapPopulateArgs, DEFAULT_CONNECT_TIMEOUT_SECS};
use populate_ldif::{LdifPopulateArgs, DEFAULT_LDIF_FILE};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Where generated entries go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Write an LDIF file
    Ldif,
    /// Add entries to an LDAP server
    Ldap,
}

impl FromStr for OutputMode {
    type Err = RunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ldif" | "file" => Ok(OutputMode::Ldif),
            "ldap" | "network" => Ok(OutputMode::Ldap),
            _ => Err(RunError::config(format!(
                "invalid mode '{s}': expected 'ldif' or 'ldap'"
            ))),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Ldif => f.write_str("ldif"),
            OutputMode::Ldap => f.write_str("ldap"),
        }
    }
}

/// Everything needed for one run, as supplied by the caller.
///
/// Nothing here is checked until [`RunConfig::validate`].
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Everything after `uid=<id>,` in each DN, e.g. `ou=employee,ou=users,o=rtx`
    pub suffix_dn: String,
    /// How many entries to generate
    pub count: u64,
    /// `ldif`/`file` or `ldap`/`network`
    pub mode: String,
    /// Output path in LDIF mode
    pub ldif_file: PathBuf,
    /// Server URL in LDAP mode, e.g. `ldaps://localhost:636`
    pub ldap_url: String,
    /// Bind DN in LDAP mode
    pub bind_dn: String,
    /// Bind password in LDAP mode
    pub bind_password: String,
    /// Connect timeout in LDAP mode
    pub ldap_timeout: Duration,
    /// Accept any TLS certificate in LDAP mode
    pub ldap_no_tls_verify: bool,
    /// How to seed the fake data source
    pub seed: SeedMode,
    /// Optional overrides loaded from a JSON file
    pub template: Option<RecordTemplate>,
}

impl RunConfig {
    /// Create a config with defaults: one entry, LDIF mode, `fake_users.ldif`, seed 0.
    pub fn new(suffix_dn: impl Into<String>) -> Self {
        Self {
            suffix_dn: suffix_dn.into(),
            count: 1,
            mode: OutputMode::Ldif.to_string(),
            ldif_file: PathBuf::from(DEFAULT_LDIF_FILE),
            ldap_url: String::new(),
            bind_dn: String::new(),
            bind_password: String::new(),
            ldap_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            ldap_no_tls_verify: false,
            seed: SeedMode::default(),
            template: None,
        }
    }

    /// Build a config from parsed command-line arguments.
    ///
    /// Loads the template file if one was given.
    pub fn from_args(
        mode: &str,
        common: &CommonPopulateArgs,
        ldif: &LdifPopulateArgs,
        ldap: &LdapPopulateArgs,
    ) -> Result<Self, RunError> {
        let template = match &common.input_file {
            Some(path) => Some(RecordTemplate::from_file(path)?),
            None => None,
        };

        let ldap_timeout = duration::parse_duration(&ldap.ldap_timeout)
            .map_err(|e| RunError::config(format!("invalid --ldap-timeout: {e:#}")))?;

        let seed = if common.random_seed {
            SeedMode::Time
        } else {
            SeedMode::Fixed(common.seed)
        };

        Ok(Self {
            suffix_dn: common.suffix_dn.clone(),
            count: common.count,
            mode: mode.to_string(),
            ldif_file: ldif.ldif_file.clone(),
            ldap_url: ldap.ldap_url.clone().unwrap_or_default(),
            bind_dn: ldap.bind_dn.clone().unwrap_or_default(),
            bind_password: ldap.bind_password.clone().unwrap_or_default(),
            ldap_timeout,
            ldap_no_tls_verify: ldap.ldap_no_tls_verify,
            seed,
            template,
        })
    }

    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    pub fn with_ldif_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ldif_file = path.into();
        self
    }

    pub fn with_ldap(
        mut self,
        url: impl Into<String>,
        bind_dn: impl Into<String>,
        bind_password: impl Into<String>,
    ) -> Self {
        self.ldap_url = url.into();
        self.bind_dn = bind_dn.into();
        self.bind_password = bind_password.into();
        self
    }

    pub fn with_seed(mut self, seed: SeedMode) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_template(mut self, template: RecordTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Check the configuration and resolve the sink.
    pub fn validate(self) -> Result<ValidatedRun, RunError> {
        if self.suffix_dn.trim().is_empty() {
            return Err(RunError::config(
                "suffix required: --suffix-dn must not be empty",
            ));
        }
        if self.count < 1 {
            return Err(RunError::config(format!(
                "count must be >= 1 (got {})",
                self.count
            )));
        }

        let sink = match self.mode.parse::<OutputMode>()? {
            OutputMode::Ldif => {
                if self.ldif_file.as_os_str().is_empty() {
                    return Err(RunError::config(
                        "mode 'ldif' requires a non-empty --ldif-file",
                    ));
                }
                Sink::Ldif {
                    path: self.ldif_file,
                }
            }
            OutputMode::Ldap => {
                let missing: Vec<&str> = [
                    ("--ldap-url", &self.ldap_url),
                    ("--bind-dn", &self.bind_dn),
                    ("--bind-password", &self.bind_password),
                ]
                .into_iter()
                .filter(|(_, value)| value.is_empty())
                .map(|(flag, _)| flag)
                .collect();

                if !missing.is_empty() {
                    return Err(RunError::config(format!(
                        "missing network credentials: mode 'ldap' requires {}",
                        missing.join(", ")
                    )));
                }

                Sink::Ldap(
                    LdapConnectionConfig::new(self.ldap_url, self.bind_dn, self.bind_password)
                        .with_timeout(self.ldap_timeout)
                        .with_no_tls_verify(self.ldap_no_tls_verify),
                )
            }
        };

        Ok(ValidatedRun {
            suffix_dn: self.suffix_dn,
            count: self.count,
            seed: self.seed,
            template: self.template,
            sink,
        })
    }
}

/// Resolved output sink.
#[derive(Debug, Clone)]
pub enum Sink {
    Ldif { path: PathBuf },
    Ldap(LdapConnectionConfig),
}

impl Sink {
    pub fn mode(&self) -> OutputMode {
        match self {
            Sink::Ldif { .. } => OutputMode::Ldif,
            Sink::Ldap(_) => OutputMode::Ldap,
        }
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Ldif { path } => write!(f, "LDIF file '{}'", path.display()),
            Sink::Ldap(config) => write!(f, "LDAP server '{}'", config.url),
        }
    }
}

/// A configuration that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedRun {
    pub suffix_dn: String,
    pub count: u64,
    pub seed: SeedMode,
    pub template: Option<RecordTemplate>,
    pub sink: Sink,
}
