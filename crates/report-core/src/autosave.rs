use chrono::{DateTime, Duration, Utc};

/// Seconds of inactivity after an edit before the draft is written.
pub const DEFAULT_AUTOSAVE_DELAY_SECS: i64 = 30;

/// Debounced autosave deadline.
///
/// At most one deadline is live. Rescheduling replaces it, so a burst of
/// edits produces a single write once the burst has been quiet for `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveTimer {
    delay: Duration,
    deadline: Option<DateTime<Utc>>,
}

impl Default for AutosaveTimer {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_AUTOSAVE_DELAY_SECS))
    }
}

impl AutosaveTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms the timer at `now + delay`. A deadline past the end of the
    /// calendar leaves the timer disarmed.
    pub fn reschedule(&mut self, now: DateTime<Utc>) {
        self.deadline = now.checked_add_signed(self.delay);
        if self.deadline.is_none() {
            tracing::warn!(
                delay_secs = self.delay.num_seconds(),
                "autosave delay out of range; autosave disabled"
            );
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Disarms and returns `true` once `now` has reached the deadline.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rescheduling_debounces_the_deadline() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut timer = AutosaveTimer::default();
        timer.reschedule(start);
        timer.reschedule(start + Duration::seconds(20));

        assert!(!timer.take_due(start + Duration::seconds(30)));
        assert!(timer.take_due(start + Duration::seconds(50)));
        assert!(!timer.take_due(start + Duration::seconds(90)), "fires once");
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut timer = AutosaveTimer::new(Duration::seconds(5));
        timer.reschedule(start);
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.take_due(start + Duration::hours(1)));
    }

    #[test]
    fn out_of_range_delay_leaves_timer_disarmed() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut timer = AutosaveTimer::new(Duration::seconds(i64::MAX / 1_000_000));
        timer.reschedule(start);
        assert!(!timer.is_armed());
        assert!(!timer.take_due(start + Duration::days(365)));
    }
}
