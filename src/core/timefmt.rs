// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, NaiveDateTime, Utc};

/// What the display shows when nothing is running.
pub const ZERO_ELAPSED: &str = "00:00:00";

/// Sentinel for rows with no usable start instant.
pub const NO_START: &str = "--";

/// Formats the elapsed time between `start` and `end` (or `now` if the
/// session is still open) as zero-padded `HH:MM:SS`.
///
/// Hours are unbounded: a session left running overnight formats as
/// `27:14:02`, not wrapped. Negative deltas (clock skew, end before start)
/// clamp to `00:00:00`; this function never shows a negative duration and
/// never fails.
pub fn format_elapsed(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    let Some(start) = start else {
        return NO_START.to_string();
    };

    let end = end.unwrap_or(now);
    let secs = (end - start).num_seconds().max(0);

    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    format!("{h:02}:{m:02}:{s:02}")
}

/// Parses a wire timestamp as UTC.
///
/// The backend sends bare `YYYY-MM-DD HH:MM:SS` strings that are UTC by
/// contract; any embedded offset or trailing `Z` is ignored rather than
/// applied. Returns `None` for anything unparseable, which downstream
/// renders as the `--` sentinel.
pub fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let s = s.strip_suffix('Z').unwrap_or(s);
    let s = strip_numeric_offset(s);

    const FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

    for f in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, f) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Drops a trailing `+HH:MM`, `-HH:MM`, `+HHMM` or `-HHMM` offset.
fn strip_numeric_offset(s: &str) -> &str {
    let b = s.as_bytes();

    if b.len() > 6 {
        let i = b.len() - 6;
        if (b[i] == b'+' || b[i] == b'-') && b[b.len() - 3] == b':' {
            return &s[..i];
        }
    }

    if b.len() > 5 {
        let i = b.len() - 5;
        if (b[i] == b'+' || b[i] == b'-') && s[i + 1..].bytes().all(|c| c.is_ascii_digit()) {
            return &s[..i];
        }
    }

    s
}
