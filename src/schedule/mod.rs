//! Trigger scheduling for pay periods.
//!
//! The [`ScheduleOrchestrator`] selects the current period, resolves its
//! dates and installs the resulting [`Trigger`]s into a [`TriggerSink`]
//! provided by the host.

mod orchestrator;
mod trigger;

pub use orchestrator::{CurrentPeriod, ScheduleOrchestrator};
pub use trigger::{InMemoryTriggerSink, Trigger, TriggerKind, TriggerSink};
