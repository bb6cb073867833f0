use chrono::{DateTime, Datelike, Months, Utc};
use std::sync::Arc;

/// Lowest note a book can receive.
pub const MIN_NOTE: i32 = 2;
/// Highest note a book can receive.
pub const FULL_NOTE: i32 = 10;
/// Books younger than this keep the full freshness score.
pub const GRACE_PERIOD_MONTHS: f64 = 6.0;

// Only used when calendar arithmetic overflows chrono's supported range.
const AVERAGE_MONTH_SECS: f64 = 365.2425 * 86_400.0 / 12.0;

/// Source of "now" for note calculation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Blends a book's freshness with its author's reputation.
///
/// Algorithm:
/// - <= 6 months                                  => 10 (10 - 0)
/// - > 6 months and < 1 year 6 months             => 9  (10 - 1)
/// - >= 1 year 6 months and < 2 years 6 months    => 8  (10 - 2)
/// - ...
/// - floored at `MIN_NOTE`
///
/// The note is then the mean of freshness and reputation, rounded and
/// clamped to `[MIN_NOTE, FULL_NOTE]`.
#[derive(Clone)]
pub struct NoteCalculator {
    clock: Arc<dyn Clock>,
}

impl Default for NoteCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NoteCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteCalculator").finish_non_exhaustive()
    }
}

impl NoteCalculator {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    pub fn freshness_score(&self, publish_date: DateTime<Utc>) -> i32 {
        freshness_score_at(publish_date, self.clock.now())
    }

    pub fn note_for_book(&self, publish_date: DateTime<Utc>, author_reputation: i32) -> i32 {
        note_for_book_at(publish_date, author_reputation, self.clock.now())
    }
}

/// Freshness of a book published at `publish_date`, evaluated at `now`.
///
/// Future dates count as zero elapsed time and get `FULL_NOTE`.
pub fn freshness_score_at(publish_date: DateTime<Utc>, now: DateTime<Utc>) -> i32 {
    let elapsed_months = months_between(publish_date, now);
    if elapsed_months <= GRACE_PERIOD_MONTHS {
        return FULL_NOTE;
    }

    let elapsed_years = round_half_up(elapsed_months / 12.0);
    i64::from(FULL_NOTE)
        .saturating_sub(elapsed_years)
        .max(i64::from(MIN_NOTE)) as i32
}

/// Note of a book evaluated at `now`. Reputation is not validated; the
/// final clamp keeps the result in range.
pub fn note_for_book_at(
    publish_date: DateTime<Utc>,
    author_reputation: i32,
    now: DateTime<Utc>,
) -> i32 {
    let freshness = i64::from(freshness_score_at(publish_date, now));
    // floor(mean + 0.5)
    let average = (freshness + i64::from(author_reputation) + 1).div_euclid(2);
    average.clamp(i64::from(MIN_NOTE), i64::from(FULL_NOTE)) as i32
}

/// Rounds halves towards positive infinity (1.5 -> 2, -1.5 -> -1).
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Fractional calendar months from `from` to `to`; negative when `to` is
/// earlier than `from`.
pub fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    month_diff(to, from)
}

/// Months from `b` to `a`, counted from whichever date has the later
/// day-of-month. That date is shifted by whole months into the other
/// date's month (clamped at month end), and the remainder is the share of
/// the neighbouring month between the shifted date and the other date.
fn month_diff(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    if a.day() < b.day() {
        return -month_diff(b, a);
    }

    calendar_month_diff(a, b)
        .unwrap_or_else(|| (a - b).num_seconds() as f64 / AVERAGE_MONTH_SECS)
}

fn calendar_month_diff(a: DateTime<Utc>, b: DateTime<Utc>) -> Option<f64> {
    let wheel = (b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32;
    let anchor = shift_months(a, wheel)?;
    let behind = b < anchor;
    let neighbour = shift_months(a, if behind { wheel - 1 } else { wheel + 1 })?;

    let offset = (b - anchor).num_milliseconds() as f64;
    let span = if behind {
        anchor - neighbour
    } else {
        neighbour - anchor
    }
    .num_milliseconds() as f64;

    // + 0.0 turns -0.0 into 0.0
    Some(-(wheel as f64 + offset / span) + 0.0)
}

fn shift_months(date: DateTime<Utc>, months: i32) -> Option<DateTime<Utc>> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}
