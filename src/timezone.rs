//! Conversion between stored UTC timestamps and the server's local time.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};
use time_tz::{Offset, OffsetResult, PrimitiveDateTimeExt, TimeZone, timezones};

use crate::Error;

/// The format used for timestamps in API responses, e.g. "2024-01-31 09:30:00".
const TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const ISO_TIMESTAMP_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Get the current UTC offset for a canonical timezone name, e.g. "Pacific/Auckland".
///
/// Returns `None` if the timezone name is not known.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Format `timestamp` as local time "YYYY-MM-DD HH:MM:SS" with no offset marker.
///
/// # Errors
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a known timezone.
pub fn format_local_timestamp(
    timestamp: OffsetDateTime,
    canonical_timezone: &str,
) -> Result<String, Error> {
    let tz = timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;
    let offset = tz.get_offset_utc(&timestamp).to_utc();

    timestamp
        .to_offset(offset)
        .format(TIMESTAMP_FORMAT)
        .map_err(|error| Error::TimestampFormatError(error.to_string()))
}

/// Parse a local date-time entered by a client.
///
/// Accepts "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DDTHH:MM:SS" and "YYYY-MM-DD"
/// (midnight). The result is interpreted in `canonical_timezone`. A time
/// repeated when daylight saving ends resolves to the earlier instant.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` does not match any accepted format
/// or names a time skipped when daylight saving starts, and
/// [Error::InvalidTimezoneError] if `canonical_timezone` is not a known timezone.
pub fn parse_local_datetime(
    field: &'static str,
    text: &str,
    canonical_timezone: &str,
) -> Result<OffsetDateTime, Error> {
    let tz = timezones::get_by_name(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

    let text = text.trim();
    let invalid_date = || Error::InvalidDate {
        field,
        value: text.to_owned(),
    };

    let local = PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(text, ISO_TIMESTAMP_FORMAT))
        .or_else(|_| {
            Date::parse(text, DATE_FORMAT).map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT))
        })
        .map_err(|_| invalid_date())?;

    match local.assume_timezone(tz) {
        OffsetResult::Some(timestamp) => Ok(timestamp),
        OffsetResult::Ambiguous(first, second) => Ok(first.min(second)),
        OffsetResult::None => Err(invalid_date()),
    }
}

#[cfg(test)]
mod timezone_tests {
    use time::{UtcOffset, macros::datetime};

    use crate::Error;

    use super::{format_local_timestamp, get_local_offset, parse_local_datetime};

    #[test]
    fn get_local_offset_for_utc() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn get_local_offset_for_unknown_timezone() {
        assert_eq!(get_local_offset("Middle/Earth"), None);
    }

    #[test]
    fn formats_utc_timestamp() {
        let got = format_local_timestamp(datetime!(2024-03-05 07:08:09.123 UTC), "Etc/UTC");

        assert_eq!(got, Ok("2024-03-05 07:08:09".to_owned()));
    }

    #[test]
    fn formats_timestamp_in_local_time() {
        // Auckland is UTC+13 during daylight saving in January.
        let got = format_local_timestamp(datetime!(2024-01-10 20:00:00 UTC), "Pacific/Auckland");

        assert_eq!(got, Ok("2024-01-11 09:00:00".to_owned()));
    }

    #[test]
    fn format_fails_on_unknown_timezone() {
        let got = format_local_timestamp(datetime!(2024-01-10 20:00:00 UTC), "Middle/Earth");

        assert_eq!(got, Err(Error::InvalidTimezoneError("Middle/Earth".to_owned())));
    }

    #[test]
    fn parses_all_accepted_formats() {
        let want = datetime!(2024-01-31 09:30:00 UTC);

        assert_eq!(
            parse_local_datetime("date", "2024-01-31 09:30:00", "Etc/UTC"),
            Ok(want)
        );
        assert_eq!(
            parse_local_datetime("date", "2024-01-31T09:30:00", "Etc/UTC"),
            Ok(want)
        );
        assert_eq!(
            parse_local_datetime("date", "2024-01-31", "Etc/UTC"),
            Ok(datetime!(2024-01-31 00:00:00 UTC))
        );
    }

    #[test]
    fn parses_in_local_timezone() {
        let got = parse_local_datetime("date", "2024-01-11 09:00:00", "Pacific/Auckland");

        assert_eq!(got, Ok(datetime!(2024-01-10 20:00:00 UTC)));
    }

    #[test]
    fn parses_day_before_daylight_saving_ends() {
        // Auckland leaves daylight saving (UTC+13 -> UTC+12) at 03:00 on 2024-04-07.
        let got = parse_local_datetime("date", "2024-04-06 23:00:00", "Pacific/Auckland");

        assert_eq!(got, Ok(datetime!(2024-04-06 10:00:00 UTC)));
        assert_eq!(
            format_local_timestamp(datetime!(2024-04-06 10:00:00 UTC), "Pacific/Auckland"),
            Ok("2024-04-06 23:00:00".to_owned())
        );
    }

    #[test]
    fn parses_after_daylight_saving_ends() {
        let got = parse_local_datetime("date", "2024-04-07 12:00:00", "Pacific/Auckland");

        assert_eq!(got, Ok(datetime!(2024-04-07 00:00:00 UTC)));
    }

    #[test]
    fn repeated_local_time_resolves_to_earlier_instant() {
        // 02:30 happens twice on 2024-04-07 in Auckland, first at UTC+13.
        let got = parse_local_datetime("date", "2024-04-07 02:30:00", "Pacific/Auckland");

        assert_eq!(got, Ok(datetime!(2024-04-06 13:30:00 UTC)));
    }

    #[test]
    fn skipped_local_time_fails() {
        // Auckland clocks jump from 02:00 to 03:00 on 2024-09-29.
        let got = parse_local_datetime("date", "2024-09-29 02:30:00", "Pacific/Auckland");

        assert_eq!(
            got,
            Err(Error::InvalidDate {
                field: "date",
                value: "2024-09-29 02:30:00".to_owned()
            })
        );
    }

    #[test]
    fn parse_fails_on_garbage() {
        let got = parse_local_datetime("opening_balance_date", "yesterday", "Etc/UTC");

        assert_eq!(
            got,
            Err(Error::InvalidDate {
                field: "opening_balance_date",
                value: "yesterday".to_owned()
            })
        );
    }
}
