//! Derived age in whole years.

use jiff::civil::Date;

use crate::error::CoreError;

/// Whole years elapsed between `birth` and `today`.
///
/// One year is subtracted when the birth month/day has not been reached yet in
/// `today`'s year. A `today` earlier than `birth` yields a negative value;
/// callers that display ages clamp as needed.
pub fn years_between(birth: Date, today: Date) -> i16 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Today's civil date in the system time zone.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

/// Parse an ISO `YYYY-MM-DD` date as entered in the date-of-birth field.
pub fn parse_date(value: &str) -> Result<Date, CoreError> {
    value
        .trim()
        .parse::<Date>()
        .map_err(|e| CoreError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        })
}
