//! # Transaction Deadline
//!
//! Minutes a submitted transaction may stay pending. Entered as whole
//! minutes, committed and handed downstream as seconds.

use chrono::{DateTime, Utc};
use lib_utils::time::{deadline_from, minutes_to_seconds, SECONDS_PER_MINUTE};
use lib_utils::{InputGrammar, NumericInput};

use crate::core::error::Result;

/// Default deadline when nothing is configured.
pub const DEFAULT_DEADLINE_MINUTES: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineWarning {
    InvalidInput,
}

impl DeadlineWarning {
    pub fn message(&self) -> &'static str {
        match self {
            DeadlineWarning::InvalidInput => "Enter a valid deadline",
        }
    }
}

/// Outcome of a keystroke in the deadline box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineUpdate {
    pub accepted: bool,
    /// Newly committed deadline, `None` when nothing was committed.
    pub deadline_seconds: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct DeadlineController {
    deadline_seconds: u64,
    input_text: String,
    input: NumericInput,
}

impl DeadlineController {
    pub fn new(default_minutes: u64) -> Self {
        Self {
            deadline_seconds: minutes_to_seconds(default_minutes)
                .unwrap_or(DEFAULT_DEADLINE_MINUTES * SECONDS_PER_MINUTE),
            input_text: String::new(),
            input: NumericInput::new(InputGrammar::Integer),
        }
    }

    pub fn deadline_seconds(&self) -> u64 {
        self.deadline_seconds
    }

    pub fn deadline_minutes(&self) -> u64 {
        self.deadline_seconds / SECONDS_PER_MINUTE
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Keystroke in the deadline box. `raw` is the whole field value.
    ///
    /// Empty text is accepted but carries no value. Zero is shown but not
    /// committed since it would expire on submission.
    pub fn set_deadline_minutes(&mut self, raw: &str) -> DeadlineUpdate {
        let Some(text) = self.input.sanitize(raw) else {
            return DeadlineUpdate {
                accepted: false,
                deadline_seconds: None,
            };
        };

        let committed = text
            .parse::<u64>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .and_then(minutes_to_seconds);
        self.input_text = text;

        if let Some(seconds) = committed {
            self.deadline_seconds = seconds;
            tracing::debug!(seconds, "Deadline committed");
        }

        DeadlineUpdate {
            accepted: true,
            deadline_seconds: committed,
        }
    }

    /// Deadline changed from outside the box (load, reset).
    pub fn set_deadline_seconds(&mut self, seconds: u64) {
        self.deadline_seconds = seconds;
        self.input_text.clear();
    }

    /// Box lost focus: show the committed minutes.
    pub fn blur(&mut self) {
        self.input_text = self.deadline_minutes().to_string();
    }

    pub fn warning(&self) -> Option<DeadlineWarning> {
        if self.input_text.is_empty() {
            return None;
        }
        match self.input_text.parse::<u64>() {
            Ok(minutes) if minutes == self.deadline_minutes() => None,
            _ => Some(DeadlineWarning::InvalidInput),
        }
    }

    /// Absolute expiry for a transaction submitted at `now`.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        Ok(deadline_from(now, self.deadline_seconds)?)
    }
}

impl Default for DeadlineController {
    fn default() -> Self {
        Self::new(DEFAULT_DEADLINE_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_deadline() {
        assert_eq!(DeadlineController::default().deadline_seconds(), 1200);
        assert_eq!(DeadlineController::new(15).deadline_minutes(), 15);
    }

    #[test]
    fn test_set_deadline_minutes() {
        let mut deadline = DeadlineController::default();

        let update = deadline.set_deadline_minutes("15");
        assert!(update.accepted);
        assert_eq!(update.deadline_seconds, Some(900));
        assert_eq!(deadline.deadline_seconds(), 900);
    }

    #[test]
    fn test_empty_is_accepted_without_value() {
        let mut deadline = DeadlineController::new(15);

        let update = deadline.set_deadline_minutes("");
        assert!(update.accepted);
        assert_eq!(update.deadline_seconds, None);
        assert_eq!(deadline.deadline_seconds(), 900);
        assert_eq!(deadline.warning(), None);
    }

    #[test]
    fn test_rejected_input() {
        let mut deadline = DeadlineController::new(15);
        deadline.set_deadline_minutes("30");

        for raw in ["3.5", "-1", "1e3", "ten"] {
            let update = deadline.set_deadline_minutes(raw);
            assert!(!update.accepted, "expected {raw:?} rejected");
            assert_eq!(deadline.input_text(), "30");
            assert_eq!(deadline.deadline_seconds(), 1800);
        }
    }

    #[test]
    fn test_zero_and_overflow_not_committed() {
        let mut deadline = DeadlineController::new(15);

        let zero = deadline.set_deadline_minutes("0");
        assert!(zero.accepted);
        assert_eq!(zero.deadline_seconds, None);
        assert_eq!(deadline.warning(), Some(DeadlineWarning::InvalidInput));

        let huge = deadline.set_deadline_minutes("99999999999999999999999");
        assert!(huge.accepted);
        assert_eq!(huge.deadline_seconds, None);
        assert_eq!(deadline.deadline_seconds(), 900);
    }

    #[test]
    fn test_blur_resyncs_text() {
        let mut deadline = DeadlineController::new(15);
        deadline.set_deadline_minutes("0");
        deadline.blur();
        assert_eq!(deadline.input_text(), "15");
        assert_eq!(deadline.warning(), None);
    }

    #[test]
    fn test_expires_at() {
        let deadline = DeadlineController::new(20);
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let expiry = deadline.expires_at(now).unwrap();
        assert_eq!(expiry.timestamp() - now.timestamp(), 1200);
    }
}
