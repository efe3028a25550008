//! Common CLI argument definitions shared by both sinks.

use clap::Args;
use std::path::PathBuf;

/// Default number of entries to generate.
pub const DEFAULT_COUNT: u64 = 1;

/// Arguments that control what gets generated, independent of where it goes.
#[derive(Args, Clone, Debug)]
pub struct CommonPopulateArgs {
    /// DN suffix that comes after uid=<fakeuid>, e.g. 'ou=employee,ou=users,o=rtx'
    #[arg(long)]
    pub suffix_dn: String,

    /// Number of fake entries to generate
    #[arg(long, default_value_t = DEFAULT_COUNT)]
    pub count: u64,

    /// Random seed for deterministic generation (same seed = same entries)
    #[arg(long, default_value = "0", conflicts_with = "random_seed")]
    pub seed: u64,

    /// Seed from the current time instead, so every run differs
    #[arg(long)]
    pub random_seed: bool,

    /// Optional JSON file with attribute values (uid, cn, sn, mail); missing or empty fields are generated
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,
}
