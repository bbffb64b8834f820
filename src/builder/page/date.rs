use chrono::{FixedOffset, NaiveDate, TimeZone};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FILE_DATE_REGEX: Regex = Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap();
}

/// Midnight of the `YYYY-MM-DD` found in a file name, as an RFC 3339
/// timestamp in the site offset. `None` if the name has no valid date.
pub fn date_from_file_name(file_name: &str, offset: &FixedOffset) -> Option<String> {
    let caps = FILE_DATE_REGEX.captures(file_name)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;

    let midnight = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
    let date = offset.from_local_datetime(&midnight).single()?;

    Some(date.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
}
