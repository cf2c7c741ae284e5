use chrono::{DateTime, TimeZone, Utc};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Converts fractional Unix seconds into a point in time, keeping the
/// sub-second part at nanosecond resolution. Returns `None` for non-finite or
/// out of range values.
pub fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    let mut secs = whole as i64;
    let mut nanos = ((seconds - whole) * NANOS_PER_SEC).round() as u32;
    if nanos >= 1_000_000_000 {
        secs = secs.checked_add(1)?;
        nanos = 0;
    }
    Utc.timestamp_opt(secs, nanos).single()
}

/// Inverse of [`from_unix_seconds`].
pub fn to_unix_seconds(time: &DateTime<Utc>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / NANOS_PER_SEC
}

/// Edit state of a comment or post. The API sends `false` for posts that were
/// never edited and the edit time otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edited {
    NeverEdited,
    EditedUnknownTime,
    EditedAt(DateTime<Utc>),
}

impl Edited {
    pub fn is_edited(&self) -> bool {
        !matches!(self, Self::NeverEdited)
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::EditedAt(time) => Some(*time),
            _ => None,
        }
    }
}

impl Default for Edited {
    fn default() -> Self {
        Self::NeverEdited
    }
}
