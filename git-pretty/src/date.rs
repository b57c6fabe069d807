//! Calendar renderings of a [`git2::Time`].
//!
//! All calendar modes render in the timezone the identity line recorded,
//! not the local one. `Relative` is the only mode that looks at the
//! clock.

use chrono::{DateTime, FixedOffset, Utc};

/// The date rendering modes of `--date=` and of the `%ad`-family
/// placeholders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateMode {
    /// `Sat Jan 1 00:00:00 2000 +0000`
    #[default]
    Default,
    /// `Sat, 1 Jan 2000 00:00:00 +0000`
    Rfc2822,
    /// `3 weeks ago`
    Relative,
    /// `2000-01-01 00:00:00 +0000`
    Iso,
    /// `2000-01-01T00:00:00+00:00`
    IsoStrict,
    /// `2000-01-01`
    Short,
    /// `946684800 +0000`
    Raw,
    /// `946684800`
    Unix,
    /// Short for old dates, time of day for recent ones.
    Human,
}

/// Render `time` in the given mode. Timestamps that fall outside the
/// representable range render as the empty string.
pub fn format(time: git2::Time, mode: DateMode) -> String {
    match mode {
        DateMode::Unix => time.seconds().to_string(),
        DateMode::Raw => format!("{} {}", time.seconds(), offset(time)),
        DateMode::Relative => relative(time.seconds()),
        DateMode::Default => strftime(time, "%a %b %-d %H:%M:%S %Y %z"),
        DateMode::Rfc2822 => zoned(time).map(|dt| dt.to_rfc2822()).unwrap_or_default(),
        DateMode::Iso => strftime(time, "%Y-%m-%d %H:%M:%S %z"),
        DateMode::IsoStrict => strftime(time, "%Y-%m-%dT%H:%M:%S%:z"),
        DateMode::Short => strftime(time, "%Y-%m-%d"),
        DateMode::Human => human(time),
    }
}

fn offset(time: git2::Time) -> String {
    let minutes = time.offset_minutes();
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.abs();
    format!("{}{:02}{:02}", sign, minutes / 60, minutes % 60)
}

fn zoned(time: git2::Time) -> Option<DateTime<FixedOffset>> {
    let tz = FixedOffset::east_opt(time.offset_minutes() * 60)?;
    Some(DateTime::from_timestamp(time.seconds(), 0)?.with_timezone(&tz))
}

fn strftime(time: git2::Time, fmt: &str) -> String {
    zoned(time)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

fn human(time: git2::Time) -> String {
    const YEAR: i64 = 365 * 24 * 3600;
    let age = Utc::now().timestamp() - time.seconds();
    if age > YEAR {
        strftime(time, "%b %-d %Y")
    } else {
        strftime(time, "%a %b %-d %H:%M")
    }
}

fn relative(seconds: i64) -> String {
    let diff = Utc::now().timestamp() - seconds;
    if diff < 0 {
        return "in the future".to_string();
    }
    if diff < 90 {
        return format!("{} ago", plural(diff, "second"));
    }
    let diff = (diff + 30) / 60;
    if diff < 90 {
        return format!("{} ago", plural(diff, "minute"));
    }
    let diff = (diff + 30) / 60;
    if diff < 36 {
        return format!("{} ago", plural(diff, "hour"));
    }
    let diff = (diff + 12) / 24;
    if diff < 14 {
        return format!("{} ago", plural(diff, "day"));
    }
    if diff < 70 {
        return format!("{} ago", plural((diff + 3) / 7, "week"));
    }
    if diff < 365 {
        return format!("{} ago", plural((diff + 15) / 30, "month"));
    }
    let years = diff / 365;
    let months = (diff % 365 + 15) / 30;
    if months > 0 {
        format!("{}, {} ago", plural(years, "year"), plural(months, "month"))
    } else {
        format!("{} ago", plural(years, "year"))
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
