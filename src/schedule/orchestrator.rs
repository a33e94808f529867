//! Schedule orchestration.
//!
//! Connects the period selector and the resolver to a [`TriggerSink`]. Each
//! period gets three triggers: one when the period starts, one on the
//! reminder day, and one at the email instant for submission.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, info};

use crate::calculation::{current_period, next_period, periods_for_year, resolve_period};
use crate::config::{ConfigLoader, ScheduleSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PeriodDates};

use super::trigger::{Trigger, TriggerKind, TriggerSink};

/// The period in effect at some instant, with its resolved dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentPeriod {
    /// The selected period.
    pub period: PayPeriod,
    /// Its pay, email and reminder dates.
    pub dates: PeriodDates,
}

/// Plans and installs pay period triggers.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::PayPeriod;
/// use timesheet_engine::schedule::{ScheduleOrchestrator, TriggerKind};
///
/// let orchestrator = ScheduleOrchestrator::new(chrono_tz::America::Vancouver, 8, 9);
/// let triggers = orchestrator.plan_period(&PayPeriod::first_half(2024, 10).unwrap()).unwrap();
/// assert_eq!(triggers.len(), 3);
/// assert_eq!(triggers[2].kind, TriggerKind::Submission);
/// assert_eq!(triggers[2].fire_at.to_string(), "2024-10-10 10:00:00");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleOrchestrator {
    timezone: Tz,
    period_start_hour: u32,
    reminder_hour: u32,
}

impl ScheduleOrchestrator {
    /// Creates an orchestrator for `timezone` with the given trigger hours.
    pub fn new(timezone: Tz, period_start_hour: u32, reminder_hour: u32) -> Self {
        Self {
            timezone,
            period_start_hour,
            reminder_hour,
        }
    }

    /// Creates an orchestrator from scheduling settings and a parsed timezone.
    pub fn from_settings(settings: &ScheduleSettings, timezone: Tz) -> Self {
        Self::new(timezone, settings.period_start_hour, settings.reminder_hour)
    }

    /// Creates an orchestrator from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::from_settings(config.schedule(), config.timezone())
    }

    /// Returns the timezone periods are selected in.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Plans the period-start, reminder and submission triggers of `period`,
    /// in that order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SchedulingError`] when a configured hour is not
    /// a valid hour of the day.
    pub fn plan_period(&self, period: &PayPeriod) -> EngineResult<Vec<Trigger>> {
        let dates = resolve_period(period);
        Ok(vec![
            self.period_start_trigger(period)?,
            Trigger::new(
                TriggerKind::Reminder,
                dates.label(),
                at_hour(dates.reminder_date(), self.reminder_hour)?,
            ),
            Trigger::new(TriggerKind::Submission, dates.label(), dates.email_date()),
        ])
    }

    /// Plans every trigger of `year`: 24 periods, three triggers each.
    pub fn plan_year(&self, year: i32) -> EngineResult<Vec<Trigger>> {
        let mut triggers = Vec::new();
        for period in periods_for_year(year)? {
            triggers.extend(self.plan_period(&period)?);
        }
        debug!(year, count = triggers.len(), "Planned yearly schedule");
        Ok(triggers)
    }

    /// Returns the period in effect at `now` in the configured timezone.
    pub fn current(&self, now: DateTime<Utc>) -> EngineResult<CurrentPeriod> {
        let period = current_period(now, self.timezone)?;
        let dates = resolve_period(&period);
        Ok(CurrentPeriod { period, dates })
    }

    /// Replaces the triggers in `sink` with those of the period in effect at
    /// `now`.
    ///
    /// Registers the reminder and submission of the current period and the
    /// period-start trigger of the next one. Triggers whose local time is
    /// not after `now` are skipped.
    pub fn schedule_current<S: TriggerSink>(
        &self,
        now: DateTime<Utc>,
        sink: &mut S,
    ) -> EngineResult<CurrentPeriod> {
        let current = self.current(now)?;
        let local_now = now.with_timezone(&self.timezone).naive_local();

        let mut triggers: Vec<Trigger> = self
            .plan_period(&current.period)?
            .into_iter()
            .filter(|t| t.kind != TriggerKind::PeriodStart)
            .collect();
        triggers.push(self.period_start_trigger(&next_period(&current.period)?)?);

        sink.clear()?;
        let mut registered = 0usize;
        for trigger in triggers {
            if trigger.fire_at <= local_now {
                debug!(key = %trigger.key, "Skipping trigger in the past");
                continue;
            }
            sink.register(trigger)?;
            registered += 1;
        }

        info!(
            period = %current.period,
            pay_date = %current.dates.pay_date(),
            email_date = %current.dates.email_date(),
            registered,
            "Scheduled current pay period"
        );

        Ok(current)
    }

    fn period_start_trigger(&self, period: &PayPeriod) -> EngineResult<Trigger> {
        Ok(Trigger::new(
            TriggerKind::PeriodStart,
            period.label(),
            at_hour(period.start_date(), self.period_start_hour)?,
        ))
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> EngineResult<NaiveDateTime> {
    NaiveTime::from_hms_opt(hour, 0, 0)
        .map(|time| date.and_time(time))
        .ok_or_else(|| EngineError::SchedulingError {
            message: format!("hour {} is not a valid hour of the day", hour),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::PERIODS_PER_YEAR;
    use crate::schedule::InMemoryTriggerSink;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn orchestrator() -> ScheduleOrchestrator {
        ScheduleOrchestrator::new(chrono_tz::America::Vancouver, 8, 9)
    }

    fn local(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    // ==========================================================================
    // Planning
    // ==========================================================================

    #[test]
    fn test_plan_period_uses_configured_hours() {
        let triggers = orchestrator()
            .plan_period(&PayPeriod::first_half(2024, 10).unwrap())
            .unwrap();

        assert_eq!(triggers[0].kind, TriggerKind::PeriodStart);
        assert_eq!(triggers[0].fire_at, local(2024, 10, 1, 8));
        assert_eq!(triggers[1].kind, TriggerKind::Reminder);
        assert_eq!(triggers[1].fire_at, local(2024, 10, 9, 9));
        assert_eq!(triggers[2].kind, TriggerKind::Submission);
        assert_eq!(triggers[2].fire_at, local(2024, 10, 10, 10));
        assert!(triggers.iter().all(|t| t.period_label == "10/01/2024 - 10/15/2024"));
    }

    #[test]
    fn test_plan_year_is_complete_and_deterministic() {
        let first = orchestrator().plan_year(2025).unwrap();
        let second = orchestrator().plan_year(2025).unwrap();
        assert_eq!(first.len(), PERIODS_PER_YEAR * 3);
        assert_eq!(first, second);

        let keys: HashSet<_> = first.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys.len(), first.len());
    }

    #[test]
    fn test_invalid_hour_is_scheduling_error() {
        let orchestrator = ScheduleOrchestrator::new(chrono_tz::UTC, 25, 9);
        let result = orchestrator.plan_period(&PayPeriod::first_half(2024, 1).unwrap());
        assert!(matches!(result, Err(EngineError::SchedulingError { .. })));
    }

    // ==========================================================================
    // Scheduling the current period
    // ==========================================================================

    #[test]
    fn test_schedule_current_registers_remaining_triggers() {
        // 08:00 Vancouver time on October 1, 2024.
        let now = Utc.with_ymd_and_hms(2024, 10, 1, 15, 0, 0).unwrap();
        let mut sink = InMemoryTriggerSink::new();

        let current = orchestrator().schedule_current(now, &mut sink).unwrap();

        assert_eq!(current.period, PayPeriod::first_half(2024, 10).unwrap());
        let fired: Vec<_> = sink.triggers().iter().map(|t| (t.kind, t.fire_at)).collect();
        assert_eq!(
            fired,
            vec![
                (TriggerKind::Reminder, local(2024, 10, 9, 9)),
                (TriggerKind::Submission, local(2024, 10, 10, 10)),
                (TriggerKind::PeriodStart, local(2024, 10, 16, 8)),
            ]
        );
    }

    #[test]
    fn test_schedule_current_replaces_previous_triggers() {
        let mut sink = InMemoryTriggerSink::new();
        let before = Utc.with_ymd_and_hms(2024, 10, 1, 15, 0, 0).unwrap();
        orchestrator().schedule_current(before, &mut sink).unwrap();

        let after = Utc.with_ymd_and_hms(2024, 10, 16, 15, 0, 0).unwrap();
        orchestrator().schedule_current(after, &mut sink).unwrap();

        assert_eq!(sink.len(), 3);
        assert!(sink
            .triggers()
            .iter()
            .filter(|t| t.kind != TriggerKind::PeriodStart)
            .all(|t| t.period_label == "10/16/2024 - 10/31/2024"));
    }

    #[test]
    fn test_schedule_current_skips_past_triggers() {
        // Noon Vancouver time on the 10th, after the reminder and submission.
        let now = Utc.with_ymd_and_hms(2024, 10, 10, 19, 0, 0).unwrap();
        let mut sink = InMemoryTriggerSink::new();
        orchestrator().schedule_current(now, &mut sink).unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.triggers()[0].kind, TriggerKind::PeriodStart);
    }

    #[test]
    fn test_current_period_uses_configured_timezone() {
        // 2024-11-01 02:00 UTC is still October 31 in Vancouver.
        let now = Utc.with_ymd_and_hms(2024, 11, 1, 2, 0, 0).unwrap();
        let current = orchestrator().current(now).unwrap();
        assert_eq!(current.period.month(), 10);
        assert_eq!(current.dates.label(), "10/16/2024 - 10/31/2024");
    }
}
