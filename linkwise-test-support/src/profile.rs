//! Environment-driven tuning for the property suites.
//!
//! Every proptest runner in the workspace reads its case count, fork mode and
//! mutation-sequence length from the same variables so CI can dial the suites
//! up or down without touching code.

use std::env;

use thiserror::Error;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling forked execution of property cases.
pub const FORK_ENV_KEY: &str = "LINKWISE_PBT_FORK";
/// Environment variable overriding the longest generated mutation sequence.
pub const MAX_STEPS_ENV_KEY: &str = "LINKWISE_PBT_MAX_STEPS";

/// Reasons an override was discarded in favour of the default.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OverrideError {
    /// The raw value was not an unsigned integer.
    #[error("expected an unsigned integer: {reason}")]
    NotANumber {
        /// Parser diagnostic.
        reason: String,
    },
    /// The value parsed but must be strictly positive.
    #[error("value must be greater than zero")]
    Zero,
    /// The value was not a recognised boolean spelling.
    #[error("expected one of true/false/1/0/yes/no/on/off")]
    NotABool,
}

/// Resolved settings for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyProfile {
    cases: u32,
    fork: bool,
    max_steps: usize,
}

impl PropertyProfile {
    /// Resolve a profile from the environment, falling back to `defaults` for
    /// anything unset or malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkwise_test_support::profile::PropertyProfile;
    ///
    /// let profile = PropertyProfile::load(PropertyProfile::new(64, false, 32));
    /// assert!(profile.cases() > 0);
    /// assert!(profile.max_steps() > 0);
    /// ```
    #[must_use]
    pub fn load(defaults: Self) -> Self {
        Self {
            cases: read_override(CASES_ENV_KEY, defaults.cases, parse_positive_u32),
            fork: read_override(FORK_ENV_KEY, defaults.fork, parse_bool),
            max_steps: read_override(MAX_STEPS_ENV_KEY, defaults.max_steps, parse_positive_usize),
        }
    }

    /// Build a profile from explicit values.
    #[must_use]
    pub const fn new(cases: u32, fork: bool, max_steps: usize) -> Self {
        Self {
            cases,
            fork,
            max_steps,
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }

    /// Upper bound on the number of mutations a generated sequence holds.
    #[must_use]
    pub const fn max_steps(&self) -> usize {
        self.max_steps
    }
}

fn read_override<T, F>(key: &'static str, default: T, parser: F) -> T
where
    F: Fn(&str) -> Result<T, OverrideError>,
{
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match parser(&raw) {
        Ok(value) => value,
        Err(reason) => {
            tracing::warn!(
                env = key,
                raw = %raw,
                reason = %reason,
                "ignoring malformed property profile override",
            );
            default
        }
    }
}

fn parse_positive_usize(raw: &str) -> Result<usize, OverrideError> {
    let parsed = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| OverrideError::NotANumber {
            reason: error.to_string(),
        })?;
    if parsed == 0 {
        return Err(OverrideError::Zero);
    }
    Ok(parsed)
}

fn parse_positive_u32(raw: &str) -> Result<u32, OverrideError> {
    let parsed = parse_positive_usize(raw)?;
    u32::try_from(parsed).map_err(|error| OverrideError::NotANumber {
        reason: error.to_string(),
    })
}

fn parse_bool(raw: &str) -> Result<bool, OverrideError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OverrideError::NotABool),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const DEFAULTS: PropertyProfile = PropertyProfile::new(64, false, 32);

    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let original = env::var(key).ok();
            // SAFETY: tests serialize access with ENV_LOCK.
            unsafe { env::set_var(key, value) };
            Self { key, original }
        }

        fn unset(key: &'static str) -> Self {
            let original = env::var(key).ok();
            // SAFETY: tests serialize access with ENV_LOCK.
            unsafe { env::remove_var(key) };
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.original {
                // SAFETY: tests serialize access with ENV_LOCK.
                Some(value) => unsafe { env::set_var(self.key, value) },
                // SAFETY: tests serialize access with ENV_LOCK.
                None => unsafe { env::remove_var(self.key) },
            }
        }
    }

    fn clear_all() -> [EnvGuard; 3] {
        [
            EnvGuard::unset(CASES_ENV_KEY),
            EnvGuard::unset(FORK_ENV_KEY),
            EnvGuard::unset(MAX_STEPS_ENV_KEY),
        ]
    }

    #[test]
    fn load_returns_defaults_without_overrides() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guards = clear_all();

        assert_eq!(PropertyProfile::load(DEFAULTS), DEFAULTS);
    }

    #[rstest]
    #[case("1", 1)]
    #[case(" 250 ", 250)]
    #[case("25000", 25_000)]
    fn load_accepts_case_overrides(#[case] raw: &str, #[case] expected: u32) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guards = clear_all();
        let _cases = EnvGuard::set(CASES_ENV_KEY, raw);

        assert_eq!(PropertyProfile::load(DEFAULTS).cases(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("abc")]
    #[case("99999999999")]
    fn load_ignores_invalid_case_overrides(#[case] raw: &str) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guards = clear_all();
        let _cases = EnvGuard::set(CASES_ENV_KEY, raw);

        assert_eq!(PropertyProfile::load(DEFAULTS).cases(), 64);
    }

    #[rstest]
    #[case("true", true)]
    #[case("YES", true)]
    #[case("on", true)]
    #[case("0", false)]
    #[case("off", false)]
    fn load_accepts_fork_overrides(#[case] raw: &str, #[case] expected: bool) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guards = clear_all();
        let _fork = EnvGuard::set(FORK_ENV_KEY, raw);

        assert_eq!(PropertyProfile::load(DEFAULTS).fork(), expected);
    }

    #[test]
    fn load_ignores_invalid_fork_override() {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guards = clear_all();
        let _fork = EnvGuard::set(FORK_ENV_KEY, "maybe");

        let profile = PropertyProfile::load(PropertyProfile::new(8, true, 4));
        assert!(profile.fork());
    }

    #[rstest]
    #[case("12", 12)]
    #[case("0", 32)]
    #[case("lots", 32)]
    fn load_resolves_max_steps(#[case] raw: &str, #[case] expected: usize) {
        let _lock = ENV_LOCK.lock().expect("env lock");
        let _guards = clear_all();
        let _steps = EnvGuard::set(MAX_STEPS_ENV_KEY, raw);

        assert_eq!(PropertyProfile::load(DEFAULTS).max_steps(), expected);
    }

    #[rstest]
    #[case("", OverrideError::NotABool)]
    #[case("2", OverrideError::NotABool)]
    fn parse_bool_rejects_unknown_spellings(#[case] raw: &str, #[case] expected: OverrideError) {
        assert_eq!(parse_bool(raw), Err(expected));
    }
}
