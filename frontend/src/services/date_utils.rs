use chrono::{Datelike, Days, NaiveDate};

/// Cells in the calendar grid: six full weeks
pub const CALENDAR_CELLS: usize = 42;

#[derive(Clone, Debug, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
}

impl CalendarDay {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

/// Step a (year, month) pair by `delta` months
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Header text for the month view, e.g. "January 2024"
pub fn month_title(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_default()
}

/// Sunday-first grid covering `month`, padded with days from the
/// neighbouring months. Empty for an out-of-range month.
pub fn generate_calendar_days(year: i32, month: u32) -> Vec<CalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let padding = first.weekday().num_days_from_sunday() as u64;
    let Some(start) = first.checked_sub_days(Days::new(padding)) else {
        return Vec::new();
    };

    start
        .iter_days()
        .take(CALENDAR_CELLS)
        .map(|date| CalendarDay {
            date,
            is_current_month: date.month() == month && date.year() == year,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2024, 1, -1), (2023, 12));
        assert_eq!(shift_month(2024, 12, 1), (2025, 1));
        assert_eq!(shift_month(2024, 6, 0), (2024, 6));
        assert_eq!(shift_month(2024, 3, -14), (2023, 1));
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(2024, 1), "January 2024");
        assert_eq!(month_title(2024, 13), "");
    }

    #[test]
    fn test_calendar_grid_starts_on_sunday() {
        // 1 January 2024 is a Monday
        let days = generate_calendar_days(2024, 1);
        assert_eq!(days.len(), CALENDAR_CELLS);
        assert_eq!(days[0].date, date(2023, 12, 31));
        assert!(!days[0].is_current_month);
        assert_eq!(days[1].date, date(2024, 1, 1));
        assert!(days[1].is_current_month);
        assert_eq!(days[41].date, date(2024, 2, 10));
        assert_eq!(days.iter().filter(|d| d.is_current_month).count(), 31);
    }

    #[test]
    fn test_calendar_grid_month_starting_on_sunday() {
        // 1 September 2024 is a Sunday
        let days = generate_calendar_days(2024, 9);
        assert_eq!(days[0].date, date(2024, 9, 1));
        assert_eq!(days[0].day(), 1);
    }
}
