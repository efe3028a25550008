//! Sources of fake person data.

use fake::faker::internet::en::{FreeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Supplies the raw values a person record is built from.
///
/// Each call advances the source; callers must not assume two calls return
/// the same value.
pub trait FakeDataSource {
    fn first_name(&mut self) -> String;
    fn last_name(&mut self) -> String;
    fn email(&mut self) -> String;
    fn username(&mut self) -> String;
}

impl<S: FakeDataSource + ?Sized> FakeDataSource for Box<S> {
    fn first_name(&mut self) -> String {
        (**self).first_name()
    }

    fn last_name(&mut self) -> String {
        (**self).last_name()
    }

    fn email(&mut self) -> String {
        (**self).email()
    }

    fn username(&mut self) -> String {
        (**self).username()
    }
}

/// How the random source is seeded for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Same seed, same people.
    Fixed(u64),
    /// Seed from the current wall-clock time.
    Time,
}

impl SeedMode {
    /// Resolve to the concrete seed used for this run.
    pub fn resolve(&self) -> u64 {
        match self {
            SeedMode::Fixed(seed) => *seed,
            SeedMode::Time => chrono::Utc::now()
                .timestamp_nanos_opt()
                .unwrap_or_default() as u64,
        }
    }
}

impl Default for SeedMode {
    fn default() -> Self {
        SeedMode::Fixed(0)
    }
}

impl fmt::Display for SeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedMode::Fixed(seed) => write!(f, "fixed({seed})"),
            SeedMode::Time => write!(f, "time"),
        }
    }
}

/// Exclusive upper bound of the numeric suffix appended to usernames.
const USERNAME_SUFFIX_RANGE: u32 = 10_000;

/// [`FakeDataSource`] backed by the `fake` crate and a seeded [`StdRng`].
pub struct FakerSource {
    seed: u64,
    rng: StdRng,
}

impl FakerSource {
    /// Create a source seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl FakeDataSource for FakerSource {
    fn first_name(&mut self) -> String {
        FirstName().fake_with_rng::<String, _>(&mut self.rng)
    }

    fn last_name(&mut self) -> String {
        LastName().fake_with_rng::<String, _>(&mut self.rng)
    }

    fn email(&mut self) -> String {
        FreeEmail().fake_with_rng::<String, _>(&mut self.rng)
    }

    /// A `fake` username followed by a four-digit suffix from the same RNG.
    fn username(&mut self) -> String {
        let base = Username().fake_with_rng::<String, _>(&mut self.rng);
        let suffix: u32 = self.rng.gen_range(0..USERNAME_SUFFIX_RANGE);
        format!("{base}{suffix:04}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(source: &mut FakerSource) -> [String; 4] {
        [
            source.first_name(),
            source.last_name(),
            source.email(),
            source.username(),
        ]
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = FakerSource::new(42);
        let mut b = FakerSource::new(42);

        for _ in 0..5 {
            assert_eq!(draw(&mut a), draw(&mut b));
        }
    }

    #[test]
    fn test_values_are_non_empty() {
        let mut source = FakerSource::new(0);
        for _ in 0..20 {
            for value in draw(&mut source) {
                assert!(!value.is_empty());
            }
        }
    }

    #[test]
    fn test_username_has_numeric_suffix() {
        let mut source = FakerSource::new(3);
        let username = source.username();
        let digits = &username[username.len() - 4..];
        assert!(digits.chars().all(|c| c.is_ascii_digit()), "{username}");
    }

    #[test]
    fn test_email_is_email_shaped() {
        let mut source = FakerSource::new(7);
        let email = source.email();
        assert!(email.contains('@'), "not an email: {email}");
    }

    #[test]
    fn test_seed_mode_resolve() {
        assert_eq!(SeedMode::Fixed(0).resolve(), 0);
        assert_eq!(SeedMode::Fixed(1234).resolve(), 1234);
        assert_eq!(SeedMode::default(), SeedMode::Fixed(0));
        assert!(SeedMode::Time.resolve() > 0);
    }

    #[test]
    fn test_seed_mode_display() {
        assert_eq!(SeedMode::Fixed(3).to_string(), "fixed(3)");
        assert_eq!(SeedMode::Time.to_string(), "time");
    }
}
