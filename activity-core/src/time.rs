//! Time utilities: lenient due-date parsing with calendar normalisation.
//!
//! Input is a `YYYY-MM-DD` date and an `HH:MM` time typed at the console.
//! Parsing never fails: scanning stops at the first unreadable field and the
//! rest are treated as zero, then the fields are carried through calendar
//! arithmetic (`2024-13-01` is `2025-01-01`, a missing day is the last day of
//! the previous month).

use chrono::{Duration, Months, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Display format for due timestamps.
pub const DUE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A due timestamp with minute resolution.
///
/// Ordering is a single total order over the full timestamp. Deserialized
/// values go through `From<NaiveDateTime>`, so seconds are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "NaiveDateTime", into = "NaiveDateTime")]
pub struct DueDateTime(NaiveDateTime);

impl DueDateTime {
    /// Normalise scanned fields into a timestamp.
    ///
    /// If a field pushes the value outside chrono's range, the result clamps
    /// to the earliest or latest representable timestamp in the direction of
    /// that field's offset.
    pub fn from_fields(fields: &ParsedFields) -> Self {
        Self(normalise(fields))
    }
}

impl From<NaiveDateTime> for DueDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        // minute resolution
        let trimmed = dt
            .with_second(0)
            .and_then(|d| d.with_nanosecond(0))
            .unwrap_or(dt);
        Self(trimmed)
    }
}

impl From<DueDateTime> for NaiveDateTime {
    fn from(due: DueDateTime) -> Self {
        due.0
    }
}

impl fmt::Display for DueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DUE_FORMAT))
    }
}

/// Raw fields scanned from the date and time strings, before normalisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParsedFields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,

    /// Date fields actually read (0..=3).
    pub date_fields: usize,
    /// Time fields actually read (0..=2).
    pub time_fields: usize,
}

impl ParsedFields {
    pub fn scan(date: &str, time: &str) -> Self {
        let mut d = [0i64; 3];
        let mut t = [0i64; 2];
        let date_fields = scan_ints(date, '-', &mut d);
        let time_fields = scan_ints(time, ':', &mut t);

        Self {
            year: d[0],
            month: d[1],
            day: d[2],
            hour: t[0],
            minute: t[1],
            date_fields,
            time_fields,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.date_fields == 3 && self.time_fields == 2
    }
}

/// Parse a due date (`YYYY-MM-DD`) and time (`HH:MM`) into a timestamp.
///
/// Malformed input is tolerated; see the module docs.
pub fn parse_due_datetime(date: &str, time: &str) -> DueDateTime {
    let fields = ParsedFields::scan(date, time);
    if !fields.is_complete() {
        warn!(
            date,
            time,
            date_fields = fields.date_fields,
            time_fields = fields.time_fields,
            "incomplete due date/time, missing fields default to zero"
        );
    }
    DueDateTime::from_fields(&fields)
}

/// Read up to `out.len()` integers separated by `sep`. Returns how many were read.
fn scan_ints(input: &str, sep: char, out: &mut [i64]) -> usize {
    let mut rest = input;
    for (i, slot) in out.iter_mut().enumerate() {
        if i > 0 {
            match rest.strip_prefix(sep) {
                Some(r) => rest = r,
                None => return i,
            }
        }
        match scan_int(rest) {
            Some((value, r)) => {
                *slot = value;
                rest = r;
            }
            None => return i,
        }
    }
    out.len()
}

/// Leading whitespace, optional sign, then at least one digit.
fn scan_int(input: &str) -> Option<(i64, &str)> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = s[..digits].parse().ok()?;
    Some((if negative { -value } else { value }, &s[digits..]))
}

/// `year-01-01 00:00 + (month-1) months + (day-1) days + hour hours + minute minutes`.
///
/// Offsets are applied in that order; the first one that overflows decides
/// the clamp direction and the rest are ignored.
fn normalise(f: &ParsedFields) -> NaiveDateTime {
    let start = i32::try_from(f.year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        .and_then(|d| d.and_hms_opt(0, 0, 0));
    let Some(dt) = start else {
        return bound(f.year);
    };
    let Some(dt) = add_months(dt, f.month - 1) else {
        return bound(f.month - 1);
    };
    let Some(dt) = add_delta(dt, Duration::try_days(f.day - 1)) else {
        return bound(f.day - 1);
    };
    let Some(dt) = add_delta(dt, Duration::try_hours(f.hour)) else {
        return bound(f.hour);
    };
    add_delta(dt, Duration::try_minutes(f.minute)).unwrap_or_else(|| bound(f.minute))
}

fn bound(offset: i64) -> NaiveDateTime {
    if offset < 0 {
        NaiveDateTime::MIN
    } else {
        NaiveDateTime::MAX
    }
}

fn add_delta(dt: NaiveDateTime, delta: Option<Duration>) -> Option<NaiveDateTime> {
    dt.checked_add_signed(delta?)
}

fn add_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let n = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        dt.checked_add_months(n)
    } else {
        dt.checked_sub_months(n)
    }
}
