//! CLI argument definitions for the LDIF sink.

use clap::Args;
use std::path::PathBuf;

/// Output file used when none is given.
pub const DEFAULT_LDIF_FILE: &str = "fake_users.ldif";

/// LDIF-specific arguments.
#[derive(Args, Clone, Debug)]
pub struct LdifPopulateArgs {
    /// Path to the LDIF file written in 'ldif' mode (overwritten if it exists)
    #[arg(long, default_value = DEFAULT_LDIF_FILE)]
    pub ldif_file: PathBuf,
}
