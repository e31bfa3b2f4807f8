//! The attempt ledger: enforces the per-student attempt cap.
//!
//! The cap is attempt-count based and checked strictly before a session may
//! start; a student who is mid-session when their count reaches the limit
//! is unaffected.

use chrono::{DateTime, Utc};

use crate::model::Student;

/// Gatekeeper for new attempts.
#[derive(Debug, Clone, Copy)]
pub struct AttemptLedger {
    limit: u32,
}

impl AttemptLedger {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// `true` iff the student has attempts left.
    pub fn can_attempt(&self, student: &Student) -> bool {
        student.attempt_count < self.limit
    }

    /// Book one completed attempt: bump the count by exactly one and stamp
    /// the time. The caller persists the student through its store.
    pub fn record_attempt(&self, student: &mut Student, now: DateTime<Utc>) {
        student.attempt_count += 1;
        student.last_attempt = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(attempt_count: u32) -> Student {
        Student {
            id: 1,
            name: "Ada".into(),
            surname: "Aydin".into(),
            class_label: "7-A".into(),
            attempt_count,
            last_attempt: None,
        }
    }

    #[test]
    fn allows_below_limit() {
        let ledger = AttemptLedger::new(3);
        assert!(ledger.can_attempt(&student(0)));
        assert!(ledger.can_attempt(&student(2)));
    }

    #[test]
    fn refuses_at_and_above_limit() {
        let ledger = AttemptLedger::new(2);
        assert!(!ledger.can_attempt(&student(2)));
        assert!(!ledger.can_attempt(&student(5)));
    }

    #[test]
    fn record_increments_by_exactly_one_and_stamps_time() {
        let ledger = AttemptLedger::new(3);
        let mut s = student(1);
        let now = Utc::now();
        ledger.record_attempt(&mut s, now);
        assert_eq!(s.attempt_count, 2);
        assert_eq!(s.last_attempt, Some(now));
    }
}
