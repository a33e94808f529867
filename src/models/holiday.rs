//! Statutory holiday models.
//!
//! This module contains the closed set of British Columbia statutory holidays
//! the engine knows about and the [`HolidayRecord`] produced for each of them
//! when a year's calendar is computed.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Version tag of the holiday table; bump when a holiday is added or its
/// observance rule changes.
pub const HOLIDAY_TABLE_VERSION: &str = "bc-2019";

/// The ten statutory holidays observed by the engine.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::StatutoryHoliday;
///
/// assert_eq!(StatutoryHoliday::ALL.len(), 10);
/// assert_eq!(StatutoryHoliday::Thanksgiving.name(), "Thanksgiving");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatutoryHoliday {
    /// January 1st, moved to Monday when it falls on a weekend.
    NewYearsDay,
    /// Third Monday of February.
    FamilyDay,
    /// Two days before Easter Sunday.
    GoodFriday,
    /// Monday preceding May 25th.
    VictoriaDay,
    /// July 1st, moved to Monday when it falls on a weekend.
    CanadaDay,
    /// First Monday of August.
    BritishColumbiaDay,
    /// First Monday of September.
    LabourDay,
    /// Second Monday of October.
    Thanksgiving,
    /// November 11th, moved to Monday when it falls on a weekend.
    RemembranceDay,
    /// December 25th; a Saturday Christmas is observed on the Friday before.
    ChristmasDay,
}

impl StatutoryHoliday {
    /// Every holiday in calendar order.
    pub const ALL: [StatutoryHoliday; 10] = [
        StatutoryHoliday::NewYearsDay,
        StatutoryHoliday::FamilyDay,
        StatutoryHoliday::GoodFriday,
        StatutoryHoliday::VictoriaDay,
        StatutoryHoliday::CanadaDay,
        StatutoryHoliday::BritishColumbiaDay,
        StatutoryHoliday::LabourDay,
        StatutoryHoliday::Thanksgiving,
        StatutoryHoliday::RemembranceDay,
        StatutoryHoliday::ChristmasDay,
    ];

    /// Human-readable holiday name.
    pub fn name(&self) -> &'static str {
        match self {
            StatutoryHoliday::NewYearsDay => "New Year's Day",
            StatutoryHoliday::FamilyDay => "Family Day",
            StatutoryHoliday::GoodFriday => "Good Friday",
            StatutoryHoliday::VictoriaDay => "Victoria Day",
            StatutoryHoliday::CanadaDay => "Canada Day",
            StatutoryHoliday::BritishColumbiaDay => "British Columbia Day",
            StatutoryHoliday::LabourDay => "Labour Day",
            StatutoryHoliday::Thanksgiving => "Thanksgiving",
            StatutoryHoliday::RemembranceDay => "Remembrance Day",
            StatutoryHoliday::ChristmasDay => "Christmas Day",
        }
    }
}

impl std::fmt::Display for StatutoryHoliday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A holiday's observed date in a specific year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Which holiday this is.
    pub holiday: StatutoryHoliday,
    /// The holiday's display name.
    pub name: String,
    /// Date on which the holiday is observed.
    pub observed_date: NaiveDate,
    /// Day of week of `observed_date`.
    pub weekday: Weekday,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_holidays_have_distinct_names() {
        let mut names: Vec<&str> = StatutoryHoliday::ALL.iter().map(|h| h.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_serialize_holiday_snake_case() {
        let json = serde_json::to_string(&StatutoryHoliday::BritishColumbiaDay).unwrap();
        assert_eq!(json, "\"british_columbia_day\"");
    }

    #[test]
    fn test_serialize_holiday_record() {
        let record = HolidayRecord {
            holiday: StatutoryHoliday::ChristmasDay,
            name: StatutoryHoliday::ChristmasDay.name().to_string(),
            observed_date: NaiveDate::from_ymd_opt(2027, 12, 24).unwrap(),
            weekday: Weekday::Fri,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"holiday\":\"christmas_day\""));
        assert!(json.contains("\"observed_date\":\"2027-12-24\""));
        assert!(json.contains("\"weekday\":\"Fri\""));
    }
}
