use serde::{Deserialize, Serialize};

/// Spellings that coerce to `true` (compared case-insensitively).
pub const TRUTHY: [&str; 5] = ["true", "1", "t", "y", "yes"];

/// Spellings that coerce to `false` without being suspicious.
///
/// Anything outside [`TRUTHY`] and this set still coerces to `false`, but
/// [`Flag::is_recognized`] reports it so callers can warn.
pub const FALSY: [&str; 6] = ["false", "0", "f", "n", "no", ""];

/// Boolean switch read from a free-form environment string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flag(bool);

impl Flag {
    /// Create an enabled flag.
    pub const fn enabled() -> Self {
        Self(true)
    }

    /// Create a disabled flag.
    pub const fn disabled() -> Self {
        Self(false)
    }

    /// Coerce a raw string into a flag.
    ///
    /// Membership in [`TRUTHY`] (ignoring case) yields an enabled flag, every
    /// other input, including the empty string, yields a disabled one.
    pub fn coerce(raw: &str) -> Self {
        let norm = raw.to_ascii_lowercase();
        Self(TRUTHY.contains(&norm.as_str()))
    }

    /// Returns `true` if `raw` is a known spelling of either value.
    pub fn is_recognized(raw: &str) -> bool {
        let norm = raw.to_ascii_lowercase();
        TRUTHY.contains(&norm.as_str()) || FALSY.contains(&norm.as_str())
    }

    /// Check if the flag is enabled.
    pub const fn is_enabled(&self) -> bool {
        self.0
    }

    /// Check if the flag is disabled.
    pub const fn is_disabled(&self) -> bool {
        !self.0
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl From<Flag> for bool {
    fn from(f: Flag) -> Self {
        f.0
    }
}

#[cfg(test)]
mod tests {
    use super::Flag;

    #[test]
    fn truthy_spellings_enable() {
        for raw in ["true", "True", "TRUE", "1", "t", "T", "y", "yes", "YES"] {
            assert!(Flag::coerce(raw).is_enabled(), "{raw:?} should be true");
        }
    }

    #[test]
    fn everything_else_disables() {
        for raw in ["", "false", "False", "no", "maybe", "0", "on", " true"] {
            assert!(Flag::coerce(raw).is_disabled(), "{raw:?} should be false");
        }
    }

    #[test]
    fn recognized_covers_both_sets() {
        assert!(Flag::is_recognized("Yes"));
        assert!(Flag::is_recognized("FALSE"));
        assert!(Flag::is_recognized(""));
        assert!(!Flag::is_recognized("maybe"));
        assert!(!Flag::is_recognized("enabled"));
    }

    #[test]
    fn from_bool_and_into_bool() {
        let f: Flag = true.into();
        assert!(f.is_enabled());
        assert!(!bool::from(Flag::disabled()));
    }

    #[test]
    fn serializes_as_plain_bool() {
        let json = serde_json::to_string(&Flag::disabled()).unwrap();
        assert_eq!(json, "false");
    }
}
