//! Command-line interface for fakeldap
//!
//! # Usage Examples
//!
//! ## LDIF file
//! ```bash
//! fakeldap --suffix-dn ou=employee,ou=users,o=rtx --count 100 \
//!   --ldif-file users.ldif --seed 7
//! ```
//!
//! ## LDAP server
//! ```bash
//! fakeldap --mode ldap --suffix-dn ou=employee,ou=users,o=rtx --count 10 \
//!   --ldap-url ldaps://localhost:636 \
//!   --bind-dn cn=admin,o=rtx --bind-password secret
//! ```
//!
//! ## Template
//! ```bash
//! # Every entry gets sn=Doe and the same mail address
//! echo '{"sn":"Doe","mail":"team@example.com"}' > template.json
//! fakeldap --suffix-dn o=rtx --count 5 --input-file template.json
//! ```

use anyhow::Context;
use clap::Parser;
use fakeldap::RunConfig;
use populate_common::CommonPopulateArgs;
use populate_ldap::LdapPopulateArgs;
use populate_ldif::LdifPopulateArgs;

#[derive(Parser)]
#[command(name = "fakeldap")]
#[command(about = "Generate fake LDAP users as LDIF or add them to a server")]
#[command(version)]
struct Cli {
    /// Output mode: 'ldif' (or 'file') writes an LDIF file, 'ldap' (or 'network') adds to a server
    #[arg(long, default_value = "ldif")]
    mode: String,

    #[command(flatten)]
    common: CommonPopulateArgs,

    #[command(flatten)]
    ldif: LdifPopulateArgs,

    #[command(flatten)]
    ldap: LdapPopulateArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries only the confirmation line
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = RunConfig::from_args(&cli.mode, &cli.common, &cli.ldif, &cli.ldap)
        .context("Failed to load configuration")?;
    let report = fakeldap::run(config).await?;

    println!("{report}");
    Ok(())
}
