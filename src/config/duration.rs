//! Timeout parsing for `--ldap-timeout`.

use anyhow::Context;
use std::time::Duration;

/// Unit suffixes, longest first so `ms` wins over `s`.
const UNITS: [(&str, u64); 4] = [("ms", 1), ("s", 1_000), ("m", 60_000), ("h", 3_600_000)];

/// Parse a timeout like "500ms", "30s", "2m", "1h" or a plain number of seconds.
///
/// Zero is rejected.
pub fn parse_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let (digits, millis_per_unit) = UNITS
        .iter()
        .find_map(|(suffix, factor)| s.strip_suffix(suffix).map(|n| (n, *factor)))
        .unwrap_or((s, 1_000));

    let value: u64 = digits
        .parse()
        .with_context(|| format!("Invalid duration value: {s}"))?;
    let millis = value
        .checked_mul(millis_per_unit)
        .with_context(|| format!("Duration out of range: {s}"))?;
    if millis == 0 {
        anyhow::bail!("Duration must be greater than zero: {s}");
    }

    Ok(Duration::from_millis(millis))
}
