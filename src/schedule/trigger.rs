//! Time-based triggers and the registry they are installed into.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// What a trigger does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// A new pay period begins: pick the period and plan its triggers.
    PeriodStart,
    /// Remind the employee to finish the timesheet.
    Reminder,
    /// Export the timesheet and email it to the recipients.
    Submission,
}

impl TriggerKind {
    /// Returns the snake_case name used in trigger keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::PeriodStart => "period_start",
            TriggerKind::Reminder => "reminder",
            TriggerKind::Submission => "submission",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A one-shot trigger at a local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trigger {
    /// Stable identifier, `<kind>:<YYYY-MM-DD>` of the firing day.
    pub key: String,
    /// What happens when the trigger fires.
    pub kind: TriggerKind,
    /// Label of the pay period the trigger belongs to.
    pub period_label: String,
    /// Local wall-clock time of the trigger.
    pub fire_at: NaiveDateTime,
}

impl Trigger {
    /// Creates a trigger, deriving its key from `kind` and `fire_at`.
    pub fn new(kind: TriggerKind, period_label: impl Into<String>, fire_at: NaiveDateTime) -> Self {
        Self {
            key: format!("{}:{}", kind, fire_at.date()),
            kind,
            period_label: period_label.into(),
            fire_at,
        }
    }

    /// Localizes the fire time to `tz`, taking the earlier instant when the
    /// local time is ambiguous.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchedulingError`] when the local time falls in a
    /// DST gap.
    pub fn fire_instant(&self, tz: Tz) -> EngineResult<DateTime<Tz>> {
        tz.from_local_datetime(&self.fire_at)
            .earliest()
            .ok_or_else(|| EngineError::SchedulingError {
                message: format!("trigger '{}' at {} does not exist in {}", self.key, self.fire_at, tz),
            })
    }
}

/// A registry of pending triggers, implemented by the host platform.
pub trait TriggerSink {
    /// Removes every registered trigger.
    fn clear(&mut self) -> EngineResult<()>;

    /// Registers one trigger.
    fn register(&mut self, trigger: Trigger) -> EngineResult<()>;
}

/// A [`TriggerSink`] that keeps triggers in memory, ordered by fire time.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTriggerSink {
    triggers: Vec<Trigger>,
}

impl InMemoryTriggerSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered triggers in firing order.
    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// Returns the triggers due at or before `now` (local wall-clock time).
    pub fn due(&self, now: NaiveDateTime) -> impl Iterator<Item = &Trigger> {
        self.triggers.iter().filter(move |t| t.fire_at <= now)
    }

    /// Returns the number of registered triggers.
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Returns true when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl TriggerSink for InMemoryTriggerSink {
    fn clear(&mut self) -> EngineResult<()> {
        self.triggers.clear();
        Ok(())
    }

    fn register(&mut self, trigger: Trigger) -> EngineResult<()> {
        if self.triggers.iter().any(|t| t.key == trigger.key) {
            return Err(EngineError::SchedulingError {
                message: format!("trigger '{}' is already registered", trigger.key),
            });
        }
        let at = self
            .triggers
            .partition_point(|t| (t.fire_at, t.kind) <= (trigger.fire_at, trigger.kind));
        self.triggers.insert(at, trigger);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_trigger_key_is_kind_and_day() {
        let trigger = Trigger::new(TriggerKind::Submission, "10/01/2024 - 10/15/2024", at(2024, 10, 10, 10));
        assert_eq!(trigger.key, "submission:2024-10-10");
    }

    #[test]
    fn test_in_memory_sink_keeps_firing_order() {
        let mut sink = InMemoryTriggerSink::new();
        sink.register(Trigger::new(TriggerKind::Submission, "p", at(2024, 10, 10, 10)))
            .unwrap();
        sink.register(Trigger::new(TriggerKind::PeriodStart, "p", at(2024, 10, 1, 8)))
            .unwrap();
        sink.register(Trigger::new(TriggerKind::Reminder, "p", at(2024, 10, 9, 9)))
            .unwrap();

        let kinds: Vec<_> = sink.triggers().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TriggerKind::PeriodStart, TriggerKind::Reminder, TriggerKind::Submission]
        );
        assert_eq!(sink.due(at(2024, 10, 9, 12)).count(), 2);
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let mut sink = InMemoryTriggerSink::new();
        let trigger = Trigger::new(TriggerKind::Reminder, "p", at(2024, 10, 9, 9));
        sink.register(trigger.clone()).unwrap();
        assert!(matches!(
            sink.register(trigger),
            Err(EngineError::SchedulingError { .. })
        ));
    }

    #[test]
    fn test_clear_empties_sink() {
        let mut sink = InMemoryTriggerSink::new();
        sink.register(Trigger::new(TriggerKind::Reminder, "p", at(2024, 10, 9, 9)))
            .unwrap();
        sink.clear().unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_fire_instant_in_dst_gap_is_error() {
        // 02:00 on March 10, 2024 does not exist in Vancouver.
        let trigger = Trigger::new(TriggerKind::Reminder, "p", at(2024, 3, 10, 2));
        assert!(trigger.fire_instant(chrono_tz::America::Vancouver).is_err());

        let trigger = Trigger::new(TriggerKind::Reminder, "p", at(2024, 3, 11, 9));
        let instant = trigger.fire_instant(chrono_tz::America::Vancouver).unwrap();
        assert_eq!(instant.with_timezone(&chrono::Utc).hour(), 16);
    }
}
