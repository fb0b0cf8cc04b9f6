//! Elapsed-age arithmetic for the dog page: a span between two dates
//! expressed as days, weeks, fractional months and fractional years.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Age {
    pub date_of_interest: String,
    pub days: i64,
    pub weeks: i64,
    pub months: f64,
    pub years: f64,
}

/// Break down the span from `dob` to `doi`.
///
/// Months count whole calendar months; once the day-of-month falls short of
/// the birth day the month is not yet complete, so one is subtracted and a
/// quarter-month is added per full week into the current month.
pub fn age_between(dob: DateTime<Utc>, doi: DateTime<Utc>) -> Age {
    let age_days = (doi - dob).num_seconds() as f64 / 86_400.0;
    let age_weeks = age_days / 7.0;
    let whole_years = doi.year() - dob.year();

    let mut months = f64::from(doi.month() as i32 - dob.month() as i32 + whole_years * 12);
    if doi.day() < dob.day() {
        months -= 1.0;
        months += (doi.day() as f64 / 7.0).round() / 4.0;
    }

    Age {
        date_of_interest: doi.format("%a %d-%b-%Y").to_string(),
        days: age_days.round() as i64,
        weeks: age_weeks.round() as i64,
        months,
        years: months / 12.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_calendar_month() {
        let age = age_between(date(2022, 7, 28), date(2022, 8, 28));
        assert_eq!(age.days, 31);
        assert_eq!(age.weeks, 4);
        assert_relative_eq!(age.months, 1.0);
        assert_relative_eq!(age.years, 1.0 / 12.0);
    }

    #[test]
    fn test_two_calendar_months() {
        let age = age_between(date(2022, 7, 28), date(2022, 9, 28));
        assert_eq!(age.days, 62);
        assert_eq!(age.weeks, 9);
        assert_relative_eq!(age.months, 2.0);
    }

    #[test]
    fn test_partial_month_quarter_steps() {
        // 5 days into the month: one rounded week, a quarter month.
        let age = age_between(date(2022, 7, 28), date(2023, 1, 5));
        assert_eq!(age.days, 161);
        assert_eq!(age.weeks, 23);
        assert_relative_eq!(age.months, 5.25);
        assert_relative_eq!(age.years, 5.25 / 12.0);
    }

    #[test]
    fn test_year_boundary() {
        let age = age_between(date(2022, 7, 28), date(2023, 7, 28));
        assert_eq!(age.days, 365);
        assert_relative_eq!(age.months, 12.0);
        assert_relative_eq!(age.years, 1.0);
    }

    #[test]
    fn test_date_of_interest_format() {
        let age = age_between(date(2022, 7, 28), date(2023, 1, 5));
        assert_eq!(age.date_of_interest, "Thu 05-Jan-2023");
    }
}
