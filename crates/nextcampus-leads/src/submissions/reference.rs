use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

static REFERENCE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Acknowledgment id returned to the browser, e.g. `APP-1741617000000-7`.
///
/// Unique within the process; nothing stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionReference {
    prefix: &'static str,
    issued_millis: i64,
    sequence: u64,
}

impl SubmissionReference {
    pub fn issue(prefix: &'static str, issued_at: DateTime<Utc>) -> Self {
        Self {
            prefix,
            issued_millis: issued_at.timestamp_millis(),
            sequence: REFERENCE_SEQUENCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Uniqueness suffix shared with the attachment filename.
    pub fn suffix(&self) -> String {
        format!("{}-{}", self.issued_millis, self.sequence)
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }
}

impl fmt::Display for SubmissionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.prefix, self.issued_millis, self.sequence)
    }
}
