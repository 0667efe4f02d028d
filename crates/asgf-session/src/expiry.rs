//! Inactivity verdicts.

/// Outcome of comparing the last recorded activity with "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryVerdict {
    /// Within the inactivity window.
    Active {
        /// Milliseconds since the last activity.
        idle_ms: i64,
    },
    /// Past the inactivity window.
    Expired {
        /// Milliseconds since the last activity.
        idle_ms: i64,
    },
    /// No usable last-activity timestamp is stored.
    Unknown,
}

impl ExpiryVerdict {
    /// Evaluate `last_activity_at` against `now` and `timeout_ms`.
    ///
    /// An idle time equal to the timeout is still active.
    pub fn evaluate(last_activity_at: Option<i64>, now: i64, timeout_ms: i64) -> Self {
        match last_activity_at {
            None => Self::Unknown,
            Some(last) => {
                let idle_ms = now.saturating_sub(last);
                if idle_ms > timeout_ms {
                    Self::Expired { idle_ms }
                } else {
                    Self::Active { idle_ms }
                }
            }
        }
    }

    /// Whether the verdict is [`ExpiryVerdict::Expired`].
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: i64 = 900_000;

    #[test]
    fn test_boundary_is_inclusive() {
        let now = 10_000_000;
        assert_eq!(
            ExpiryVerdict::evaluate(Some(now - TIMEOUT), now, TIMEOUT),
            ExpiryVerdict::Active { idle_ms: TIMEOUT }
        );
        assert_eq!(
            ExpiryVerdict::evaluate(Some(now - TIMEOUT - 1), now, TIMEOUT),
            ExpiryVerdict::Expired {
                idle_ms: TIMEOUT + 1
            }
        );
    }

    #[test]
    fn test_missing_timestamp_is_unknown() {
        let verdict = ExpiryVerdict::evaluate(None, 5, TIMEOUT);
        assert_eq!(verdict, ExpiryVerdict::Unknown);
        assert!(!verdict.is_expired());
    }

    #[test]
    fn test_future_timestamp_is_active() {
        let verdict = ExpiryVerdict::evaluate(Some(2_000), 1_000, TIMEOUT);
        assert_eq!(verdict, ExpiryVerdict::Active { idle_ms: -1_000 });
    }
}
