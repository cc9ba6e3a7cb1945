use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Retention periods (days) accepted by CloudWatch Logs.
pub const ALLOWED_RETENTION_DAYS: [u32; 22] = [
    1, 3, 5, 7, 14, 30, 60, 90, 120, 150, 180, 365, 400, 545, 731, 1096, 1827, 2192, 2557, 2922,
    3288, 3653,
];

/// Log group retention in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LogRetention(u32);

impl LogRetention {
    pub const ONE_WEEK: LogRetention = LogRetention(7);

    pub fn new(days: u32) -> ModelResult<Self> {
        if ALLOWED_RETENTION_DAYS.contains(&days) {
            Ok(Self(days))
        } else {
            Err(ModelError::InvalidRetention(days))
        }
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for LogRetention {
    type Error = ModelError;
    fn try_from(days: u32) -> ModelResult<Self> {
        Self::new(days)
    }
}

impl From<LogRetention> for u32 {
    fn from(r: LogRetention) -> Self {
        r.0
    }
}

impl fmt::Display for LogRetention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::LogRetention;

    #[test]
    fn one_week_displays_in_days() {
        assert_eq!(LogRetention::ONE_WEEK.days(), 7);
        assert_eq!(LogRetention::ONE_WEEK.to_string(), "7d");
    }

    #[test]
    fn rejects_days_cloudwatch_does_not_offer() {
        for days in [0, 2, 8, 366, 10_000] {
            assert!(LogRetention::new(days).is_err(), "{days} should be rejected");
        }
    }

    #[test]
    fn deserializes_only_allowed_days() {
        let r: LogRetention = serde_json::from_str("30").unwrap();
        assert_eq!(r.days(), 30);
        assert!(serde_json::from_str::<LogRetention>("31").is_err());
    }
}
