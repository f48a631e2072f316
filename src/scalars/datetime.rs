//! Date and time scalar codecs.
//!
//! Representations follow the storage model of the embedding layer: dates as
//! days since 1970-01-01, times as microseconds since midnight, timestamps as
//! microseconds since the epoch, and time-with-offset as microseconds plus a
//! UTC offset in seconds. Text forms are ISO 8601 with a space separator for
//! timestamps.
//!
//! The time-with-offset codec binds through the plain time driver
//! representation; drivers that round-trip `timetz` natively hand back the
//! offset-carrying variant and it passes through unconverted.

use eyre::{bail, ensure, Result, WrapErr};

use crate::types::{ScalarCodec, SqlTypeCode, SqlValue, ValueKind};

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

const MICROS_PER_SECOND: i64 = 1_000_000;
const MICROS_PER_DAY: i64 = 86_400 * MICROS_PER_SECOND;

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

fn date_to_days(year: i32, month: u32, day: u32) -> i32 {
    let mut days: i32 = 0;

    if year >= 1970 {
        for y in 1970..year {
            days += if is_leap_year(y) { 366 } else { 365 };
        }
    } else {
        for y in year..1970 {
            days -= if is_leap_year(y) { 366 } else { 365 };
        }
    }

    for m in 1..month {
        days += days_in_month(year, m) as i32;
    }

    days + day as i32 - 1
}

fn days_to_date(days: i32) -> (i32, u32, u32) {
    let mut year = 1970;
    let mut remaining = days;

    if remaining >= 0 {
        loop {
            let in_year = if is_leap_year(year) { 366 } else { 365 };
            if remaining < in_year {
                break;
            }
            remaining -= in_year;
            year += 1;
        }
    } else {
        while remaining < 0 {
            year -= 1;
            remaining += if is_leap_year(year) { 366 } else { 365 };
        }
    }

    let mut month = 1;
    loop {
        let in_month = days_in_month(year, month) as i32;
        if remaining < in_month {
            break;
        }
        remaining -= in_month;
        month += 1;
    }

    (year, month, remaining as u32 + 1)
}

pub(crate) fn parse_date_text(text: &str) -> Result<i32> {
    let text = text.trim();
    let parts: Vec<&str> = text.split('-').collect();
    // a leading '-' for negative years would split differently; out of range
    ensure!(
        parts.len() == 3,
        "invalid date format '{}': expected YYYY-MM-DD",
        text
    );

    let year: i32 = parts[0]
        .parse()
        .wrap_err_with(|| format!("invalid year in date: '{}'", parts[0]))?;
    let month: u32 = parts[1]
        .parse()
        .wrap_err_with(|| format!("invalid month in date: '{}'", parts[1]))?;
    let day: u32 = parts[2]
        .parse()
        .wrap_err_with(|| format!("invalid day in date: '{}'", parts[2]))?;

    ensure!(
        (1..=12).contains(&month),
        "invalid month {} in date '{}': must be 1-12",
        month,
        text
    );
    let max_day = days_in_month(year, month);
    ensure!(
        (1..=max_day).contains(&day),
        "invalid day {} in date '{}': month {} has {} days",
        day,
        text,
        month,
        max_day
    );

    Ok(date_to_days(year, month, day))
}

pub(crate) fn format_date_text(days: i32) -> String {
    let (year, month, day) = days_to_date(days);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

pub(crate) fn parse_time_text(text: &str) -> Result<i64> {
    let text = text.trim();
    let (clock, frac) = match text.find('.') {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    ensure!(
        parts.len() == 3,
        "invalid time format '{}': expected HH:MM:SS",
        text
    );

    let hour: i64 = parts[0]
        .parse()
        .wrap_err_with(|| format!("invalid hour in time: '{}'", parts[0]))?;
    let minute: i64 = parts[1]
        .parse()
        .wrap_err_with(|| format!("invalid minute in time: '{}'", parts[1]))?;
    let second: i64 = parts[2]
        .parse()
        .wrap_err_with(|| format!("invalid second in time: '{}'", parts[2]))?;

    ensure!((0..=23).contains(&hour), "invalid hour {} in time '{}'", hour, text);
    ensure!(
        (0..=59).contains(&minute),
        "invalid minute {} in time '{}'",
        minute,
        text
    );
    ensure!(
        (0..=59).contains(&second),
        "invalid second {} in time '{}'",
        second,
        text
    );

    let mut micros = (hour * 3600 + minute * 60 + second) * MICROS_PER_SECOND;
    if let Some(frac) = frac {
        ensure!(
            !frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit()),
            "invalid fractional seconds: '{}'",
            frac
        );
        let padded = format!("{:0<6}", frac);
        let fractional: i64 = padded[..6]
            .parse()
            .wrap_err_with(|| format!("invalid fractional seconds: '{}'", frac))?;
        micros += fractional;
    }
    Ok(micros)
}

pub(crate) fn format_time_text(micros: i64) -> String {
    let seconds = micros / MICROS_PER_SECOND;
    let frac = micros % MICROS_PER_SECOND;
    let hour = seconds / 3600;
    let minute = (seconds / 60) % 60;
    let second = seconds % 60;
    if frac == 0 {
        format!("{:02}:{:02}:{:02}", hour, minute, second)
    } else {
        let frac_text = format!("{:06}", frac);
        format!(
            "{:02}:{:02}:{:02}.{}",
            hour,
            minute,
            second,
            frac_text.trim_end_matches('0')
        )
    }
}

fn parse_offset_text(text: &str) -> Result<i32> {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => (1, &text[1..]),
        Some(b'-') => (-1, &text[1..]),
        _ => bail!("invalid UTC offset: '{}'", text),
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None => (rest, "00"),
    };
    let hours: i32 = hours
        .parse()
        .wrap_err_with(|| format!("invalid offset hours: '{}'", text))?;
    let minutes: i32 = minutes
        .parse()
        .wrap_err_with(|| format!("invalid offset minutes: '{}'", text))?;
    ensure!(
        (0..=18).contains(&hours) && (0..=59).contains(&minutes),
        "UTC offset out of range: '{}'",
        text
    );
    Ok(sign * (hours * 3600 + minutes * 60))
}

fn format_offset_text(offset_secs: i32) -> String {
    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs / 60) % 60)
}

/// DATE columns, days since 1970-01-01.
#[derive(Debug)]
pub struct DateCodec {
    keys: Vec<String>,
}

impl DateCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["date", "Date"]),
        }
    }
}

impl ScalarCodec for DateCodec {
    fn name(&self) -> &str {
        "date"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Date
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Date
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Date(days) => Ok(format_date_text(*days)),
            other => bail!("unknown conversion from {:?} to date text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Date(parse_date_text(text)?))
    }
}

/// TIME columns, microseconds since midnight.
#[derive(Debug)]
pub struct TimeCodec {
    keys: Vec<String>,
}

impl TimeCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["time", "Time"]),
        }
    }
}

impl ScalarCodec for TimeCodec {
    fn name(&self) -> &str {
        "time"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Time
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Time
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Time(micros) => Ok(format_time_text(*micros)),
            other => bail!("unknown conversion from {:?} to time text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        Ok(SqlValue::Time(parse_time_text(text)?))
    }
}

/// TIME WITH TIME ZONE columns; binds through the plain time representation.
#[derive(Debug)]
pub struct TimeTzCodec {
    keys: Vec<String>,
}

impl TimeTzCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["timetz", "TimeTz"]),
        }
    }
}

impl ScalarCodec for TimeTzCodec {
    fn name(&self) -> &str {
        "timetz"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Time
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::TimeTz
    }

    fn driver_kind(&self) -> ValueKind {
        ValueKind::Time
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::TimeTz(micros, offset) => Ok(format!(
                "{}{}",
                format_time_text(*micros),
                format_offset_text(*offset)
            )),
            other => bail!("unknown conversion from {:?} to timetz text", other.kind()),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let text = text.trim();
        let split = text
            .rfind(['+', '-'])
            .filter(|idx| *idx > 0)
            .ok_or_else(|| eyre::eyre!("invalid timetz '{}': missing UTC offset", text))?;
        let micros = parse_time_text(&text[..split])?;
        let offset = parse_offset_text(&text[split..])?;
        Ok(SqlValue::TimeTz(micros, offset))
    }

    fn to_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            // the driver time slot carries no offset
            SqlValue::TimeTz(micros, _) => Ok(SqlValue::Time(*micros)),
            other => bail!("unknown conversion from {:?} to driver time", other.kind()),
        }
    }

    fn from_driver(&self, value: &SqlValue) -> Result<SqlValue> {
        match value {
            SqlValue::TimeTz(micros, offset) => Ok(SqlValue::TimeTz(*micros, *offset)),
            SqlValue::Time(micros) => Ok(SqlValue::TimeTz(*micros, 0)),
            other => bail!("unknown conversion from {:?} to timetz", other.kind()),
        }
    }
}

/// TIMESTAMP columns, microseconds since the epoch.
#[derive(Debug)]
pub struct TimestampCodec {
    keys: Vec<String>,
}

impl TimestampCodec {
    pub fn new() -> Self {
        Self {
            keys: keys(&["timestamp", "Timestamp"]),
        }
    }
}

impl ScalarCodec for TimestampCodec {
    fn name(&self) -> &str {
        "timestamp"
    }

    fn registration_keys(&self) -> &[String] {
        &self.keys
    }

    fn sql_type(&self) -> SqlTypeCode {
        SqlTypeCode::Timestamp
    }

    fn host_kind(&self) -> ValueKind {
        ValueKind::Timestamp
    }

    fn quoted_literal(&self) -> bool {
        false
    }

    fn to_text(&self, value: &SqlValue) -> Result<String> {
        match value {
            SqlValue::Timestamp(micros) => {
                let days = micros.div_euclid(MICROS_PER_DAY);
                let in_day = micros.rem_euclid(MICROS_PER_DAY);
                Ok(format!(
                    "{} {}",
                    format_date_text(days as i32),
                    format_time_text(in_day)
                ))
            }
            other => bail!(
                "unknown conversion from {:?} to timestamp text",
                other.kind()
            ),
        }
    }

    fn from_text(&self, text: &str) -> Result<SqlValue> {
        let text = text.trim();
        let split = text
            .find('T')
            .or_else(|| text.find(' '))
            .ok_or_else(|| {
                eyre::eyre!(
                    "invalid timestamp format '{}': expected YYYY-MM-DD HH:MM:SS",
                    text
                )
            })?;
        let days = parse_date_text(&text[..split])?;
        let micros = parse_time_text(&text[split + 1..])?;
        Ok(SqlValue::Timestamp(days as i64 * MICROS_PER_DAY + micros))
    }
}
