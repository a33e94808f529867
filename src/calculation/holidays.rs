//! Statutory holiday calculation.
//!
//! This module computes the observed date of each British Columbia statutory
//! holiday for a given year: Good Friday from the Gregorian Easter
//! computus, Monday holidays from their position in the month, and
//! fixed-date holidays with their weekend observance rules.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::models::{HolidayRecord, StatutoryHoliday};

/// First year of the Gregorian calendar for Easter purposes.
pub const FIRST_GREGORIAN_YEAR: i32 = 1583;

/// How a fixed-date holiday falling on a weekend is observed.
///
/// The rules differ per holiday and are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekendRoll {
    /// Saturday moves forward two days, Sunday forward one day.
    ForwardToMonday,
    /// Saturday moves back one day to Friday, Sunday forward one day.
    SaturdayBackSundayForward,
}

/// Which occurrence of a weekday within a month is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayOccurrence {
    /// The nth occurrence counting from the 1st (1-based).
    Nth(u8),
    /// The last occurrence strictly before the given day of the month.
    PrecedingDay(u32),
}

/// Computes Easter Sunday using Oudin's (1940) Gregorian algorithm.
///
/// Returns `None` for years before [`FIRST_GREGORIAN_YEAR`].
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < FIRST_GREGORIAN_YEAR {
        return None;
    }

    let g = year % 19;
    let c = year / 100;
    let h = (c - c / 4 - (8 * c + 13) / 25 + 19 * g + 15) % 30;
    let i = h - (h / 28) * (1 - (h / 28) * (29 / (h + 1)) * ((21 - g) / 11));
    let j = (year + year / 4 + i + 2 - c + c / 4) % 7;
    let l = i - j;
    let month = 3 + (l + 40) / 44;
    let day = l + 28 - 31 * (month / 4);

    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

/// Computes Good Friday, two days before Easter Sunday.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::good_friday;
/// use chrono::NaiveDate;
///
/// assert_eq!(good_friday(2025), NaiveDate::from_ymd_opt(2025, 4, 18));
/// ```
pub fn good_friday(year: i32) -> Option<NaiveDate> {
    easter_sunday(year)?.checked_sub_days(Days::new(2))
}

/// Computes the day of the month of a weekday occurrence.
///
/// `WeekdayOccurrence::PrecedingDay(25)` with `Weekday::Mon` gives the
/// Monday preceding the 25th, which is how Victoria Day is placed.
///
/// Returns `None` when the occurrence does not exist (e.g. a 5th Monday).
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{nth_weekday, WeekdayOccurrence};
/// use chrono::Weekday;
///
/// // Thanksgiving 2024: second Monday of October.
/// assert_eq!(nth_weekday(WeekdayOccurrence::Nth(2), Weekday::Mon, 2024, 10), Some(14));
/// // Victoria Day 2024: Monday preceding May 25.
/// assert_eq!(nth_weekday(WeekdayOccurrence::PrecedingDay(25), Weekday::Mon, 2024, 5), Some(20));
/// ```
pub fn nth_weekday(
    occurrence: WeekdayOccurrence,
    weekday: Weekday,
    year: i32,
    month: u32,
) -> Option<u32> {
    match occurrence {
        WeekdayOccurrence::Nth(n) => {
            NaiveDate::from_weekday_of_month_opt(year, month, weekday, n).map(|d| d.day())
        }
        WeekdayOccurrence::PrecedingDay(day) => {
            let anchor = NaiveDate::from_ymd_opt(year, month, day)?;
            let mut back = (anchor.weekday().num_days_from_monday() + 7
                - weekday.num_days_from_monday())
                % 7;
            if back == 0 {
                back = 7;
            }
            let found = anchor.checked_sub_days(Days::new(u64::from(back)))?;
            (found.month() == month).then_some(found.day())
        }
    }
}

/// Computes the observed date of a fixed-date holiday.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::{observed_holiday, WeekendRoll};
/// use chrono::NaiveDate;
///
/// // Canada Day 2023 fell on a Saturday.
/// assert_eq!(
///     observed_holiday(2023, 7, 1, WeekendRoll::ForwardToMonday),
///     NaiveDate::from_ymd_opt(2023, 7, 3)
/// );
/// // Christmas 2021 fell on a Saturday.
/// assert_eq!(
///     observed_holiday(2021, 12, 25, WeekendRoll::SaturdayBackSundayForward),
///     NaiveDate::from_ymd_opt(2021, 12, 24)
/// );
/// ```
pub fn observed_holiday(year: i32, month: u32, day: u32, roll: WeekendRoll) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    match (date.weekday(), roll) {
        (Weekday::Sat, WeekendRoll::ForwardToMonday) => date.checked_add_days(Days::new(2)),
        (Weekday::Sat, WeekendRoll::SaturdayBackSundayForward) => {
            date.checked_sub_days(Days::new(1))
        }
        (Weekday::Sun, _) => date.checked_add_days(Days::new(1)),
        _ => Some(date),
    }
}

impl StatutoryHoliday {
    /// The date on which this holiday is observed in `year`.
    ///
    /// Returns `None` only when the year is outside the supported calendar.
    pub fn observed_date(&self, year: i32) -> Option<NaiveDate> {
        let monday = |occurrence: WeekdayOccurrence, month: u32| {
            nth_weekday(occurrence, Weekday::Mon, year, month)
                .and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
        };

        match self {
            StatutoryHoliday::NewYearsDay => {
                observed_holiday(year, 1, 1, WeekendRoll::ForwardToMonday)
            }
            StatutoryHoliday::FamilyDay => monday(WeekdayOccurrence::Nth(3), 2),
            StatutoryHoliday::GoodFriday => good_friday(year),
            StatutoryHoliday::VictoriaDay => monday(WeekdayOccurrence::PrecedingDay(25), 5),
            StatutoryHoliday::CanadaDay => {
                observed_holiday(year, 7, 1, WeekendRoll::ForwardToMonday)
            }
            StatutoryHoliday::BritishColumbiaDay => monday(WeekdayOccurrence::Nth(1), 8),
            StatutoryHoliday::LabourDay => monday(WeekdayOccurrence::Nth(1), 9),
            StatutoryHoliday::Thanksgiving => monday(WeekdayOccurrence::Nth(2), 10),
            StatutoryHoliday::RemembranceDay => {
                observed_holiday(year, 11, 11, WeekendRoll::ForwardToMonday)
            }
            StatutoryHoliday::ChristmasDay => {
                observed_holiday(year, 12, 25, WeekendRoll::SaturdayBackSundayForward)
            }
        }
    }

    /// Builds the [`HolidayRecord`] for `year`.
    pub fn record(&self, year: i32) -> Option<HolidayRecord> {
        let observed_date = self.observed_date(year)?;
        Some(HolidayRecord {
            holiday: *self,
            name: self.name().to_string(),
            observed_date,
            weekday: observed_date.weekday(),
        })
    }
}

/// Computes every statutory holiday observed in `year`, in calendar order.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::holidays_for_year;
///
/// let holidays = holidays_for_year(2025);
/// assert_eq!(holidays.len(), 10);
/// assert_eq!(holidays[2].name, "Good Friday");
/// ```
pub fn holidays_for_year(year: i32) -> Vec<HolidayRecord> {
    StatutoryHoliday::ALL
        .iter()
        .filter_map(|holiday| holiday.record(year))
        .collect()
}

/// Returns the holiday observed on `date`, if any.
pub fn holiday_on(date: NaiveDate) -> Option<StatutoryHoliday> {
    StatutoryHoliday::ALL
        .iter()
        .copied()
        .find(|holiday| holiday.observed_date(date.year()) == Some(date))
}

/// Returns true for weekdays that are not statutory holidays.
pub fn is_business_day(date: NaiveDate) -> bool {
    !is_weekend(date) && holiday_on(date).is_none()
}

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
