//! CLI argument definitions for the LDAP sink.

use clap::Args;

/// Connect timeout used when none is given.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// LDAP-specific arguments.
///
/// The URL and credentials are optional at parse time; they are only
/// required once 'ldap' mode is selected.
#[derive(Args, Clone, Debug)]
pub struct LdapPopulateArgs {
    /// LDAP URL when mode is 'ldap', e.g. 'ldaps://localhost:636'
    #[arg(long, env = "LDAP_URL")]
    pub ldap_url: Option<String>,

    /// Bind DN for LDAP when mode is 'ldap'
    #[arg(long, env = "LDAP_BIND_DN")]
    pub bind_dn: Option<String>,

    /// Bind password for LDAP when mode is 'ldap'
    #[arg(long, env = "LDAP_BIND_PASSWORD", hide_env_values = true)]
    pub bind_password: Option<String>,

    /// Connect timeout, in seconds or with a unit suffix like "30s" or "2m"
    #[arg(long, default_value = "10s")]
    pub ldap_timeout: String,

    /// Skip TLS certificate verification (test servers with self-signed certificates only)
    #[arg(long)]
    pub ldap_no_tls_verify: bool,
}
