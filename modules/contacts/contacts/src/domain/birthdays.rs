//! Upcoming-birthday window.
//!
//! A window is built from "today" and a number of days and compares only the
//! month and day of a birthday, never the year. It distinguishes two shapes:
//!
//! - `SameMonth`: `today + days` lands in the current month, so the window is
//!   a day range inside that month.
//! - `MonthBoundary`: `today + days` lands in another month (including the
//!   December to January wrap). The window is the tail of today's month plus
//!   the head of the end month.
//!
//! Months strictly between the start and end month are not covered. With
//! `days` large enough to span three or more months those birthdays are left
//! out; callers rely on this exact behaviour.

use chrono::{Datelike, Days, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthdayWindow {
    SameMonth {
        month: u32,
        from_day: u32,
        to_day: u32,
    },
    MonthBoundary {
        start_month: u32,
        start_day: u32,
        end_month: u32,
        end_day: u32,
    },
}

impl BirthdayWindow {
    /// Build the window `[today, today + days]`.
    ///
    /// Returns `None` when `today + days` is outside the supported calendar range.
    #[must_use]
    pub fn starting_at(today: NaiveDate, days: u32) -> Option<Self> {
        let end = today.checked_add_days(Days::new(u64::from(days)))?;

        let window = if today.month() == end.month() {
            Self::SameMonth {
                month: today.month(),
                from_day: today.day(),
                to_day: end.day(),
            }
        } else {
            Self::MonthBoundary {
                start_month: today.month(),
                start_day: today.day(),
                end_month: end.month(),
                end_day: end.day(),
            }
        };
        Some(window)
    }

    /// Whether a birthday's month and day fall inside the window.
    #[must_use]
    pub fn contains(&self, birthday: NaiveDate) -> bool {
        let (month, day) = (birthday.month(), birthday.day());
        match *self {
            Self::SameMonth {
                month: m,
                from_day,
                to_day,
            } => month == m && (from_day..=to_day).contains(&day),
            Self::MonthBoundary {
                start_month,
                start_day,
                end_month,
                end_day,
            } => {
                (month == start_month && day >= start_day) || (month == end_month && day <= end_day)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_month_window_bounds_are_inclusive() {
        let window = BirthdayWindow::starting_at(date(2024, 6, 10), 5).unwrap();
        assert_eq!(
            window,
            BirthdayWindow::SameMonth {
                month: 6,
                from_day: 10,
                to_day: 15
            }
        );

        assert!(window.contains(date(1990, 6, 12)));
        assert!(window.contains(date(1985, 6, 10)));
        assert!(window.contains(date(2001, 6, 15)));
        assert!(!window.contains(date(1990, 6, 9)));
        assert!(!window.contains(date(1990, 6, 16)));
        assert!(!window.contains(date(1990, 7, 12)));
    }

    #[test]
    fn window_crossing_into_next_month() {
        let window = BirthdayWindow::starting_at(date(2024, 6, 25), 10).unwrap();
        assert_eq!(
            window,
            BirthdayWindow::MonthBoundary {
                start_month: 6,
                start_day: 25,
                end_month: 7,
                end_day: 5
            }
        );

        assert!(window.contains(date(1992, 6, 28)));
        assert!(window.contains(date(1975, 7, 3)));
        assert!(!window.contains(date(1975, 7, 10)));
        assert!(!window.contains(date(1992, 6, 24)));
    }

    #[test]
    fn window_wraps_over_new_year() {
        let window = BirthdayWindow::starting_at(date(2024, 12, 28), 7).unwrap();

        assert!(window.contains(date(1990, 12, 31)));
        assert!(window.contains(date(1990, 1, 4)));
        assert!(!window.contains(date(1990, 1, 5)));
        assert!(!window.contains(date(1990, 12, 27)));
    }

    #[test]
    fn zero_days_matches_only_today() {
        let window = BirthdayWindow::starting_at(date(2024, 3, 1), 0).unwrap();

        assert!(window.contains(date(2000, 3, 1)));
        assert!(!window.contains(date(2000, 3, 2)));
        assert!(!window.contains(date(2000, 2, 29)));
    }

    #[test]
    fn leap_day_birthday_inside_february_window() {
        let window = BirthdayWindow::starting_at(date(2024, 2, 27), 3).unwrap();

        assert!(window.contains(date(2000, 2, 29)));
        assert!(window.contains(date(2000, 3, 1)));
    }

    #[test]
    fn window_spanning_three_months_skips_the_middle_month() {
        // 2024-01-15 + 75 days = 2024-03-30
        let window = BirthdayWindow::starting_at(date(2024, 1, 15), 75).unwrap();
        assert_eq!(
            window,
            BirthdayWindow::MonthBoundary {
                start_month: 1,
                start_day: 15,
                end_month: 3,
                end_day: 30
            }
        );

        assert!(window.contains(date(1990, 1, 20)));
        assert!(window.contains(date(1990, 3, 10)));
        // February lies inside the calendar range but is not covered.
        assert!(!window.contains(date(1990, 2, 20)));
    }

    #[test]
    fn out_of_range_end_date_yields_none() {
        assert!(BirthdayWindow::starting_at(NaiveDate::MAX, 1).is_none());
    }
}
