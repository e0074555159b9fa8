use chrono::{Datelike, NaiveDate};

/// Divides `numerator` by `denominator`, returning 0 when the denominator is
/// not strictly positive.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// `part` as a percentage of `whole`, or 0 when `whole` is not positive.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    safe_ratio(part, whole) * 100.0
}

/// Returns the (year, month) that lies `offset` calendar months after `date`.
pub fn shift_month(date: NaiveDate, offset: u32) -> (i32, u32) {
    let month0 = date.month0() + offset;
    let year = date.year() + (month0 / 12) as i32;
    let month = month0 % 12 + 1;
    (year, month)
}

pub fn month_label(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_ratio_guards_zero_denominator() {
        assert_eq!(safe_ratio(10.0, 0.0), 0.0);
        assert_eq!(safe_ratio(0.0, 0.0), 0.0);
        assert_eq!(safe_ratio(10.0, -5.0), 0.0);
        assert_eq!(safe_ratio(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(25.0, 200.0), 12.5);
        assert_eq!(percent_of(25.0, 0.0), 0.0);
    }

    #[test]
    fn test_shift_month_wraps_year() {
        let date = NaiveDate::from_ymd_opt(2023, 11, 15).unwrap();
        assert_eq!(shift_month(date, 0), (2023, 11));
        assert_eq!(shift_month(date, 1), (2023, 12));
        assert_eq!(shift_month(date, 2), (2024, 1));
        assert_eq!(shift_month(date, 14), (2025, 1));
    }

    #[test]
    fn test_month_label_and_first_day() {
        assert_eq!(month_label(2024, 3), "2024-03");

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            first_day_of_month(date),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }
}
