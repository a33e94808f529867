//! Pay Period Engine for Biweekly Timesheets
//!
//! This crate works out, for each half-month pay period, when pay is issued,
//! when the timesheet is emailed and when the employee is reminded, taking
//! weekends and British Columbia statutory holidays into account. It also
//! plans the triggers that drive the cycle and hands finished timesheets to
//! host-provided export and mail services.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod schedule;
