use chrono::{DateTime, TimeZone, Utc};

/// Source of "now". Services and repositories read time through this so
/// tests can pin it.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The zero instant, `0001-01-01T00:00:00Z`. Clients send it to mean "unset".
pub fn zero_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn is_zero_time(dt: &DateTime<Utc>) -> bool {
    *dt == zero_time()
}

/// `None` and the zero instant both count as unset.
pub fn is_unset(dt: Option<&DateTime<Utc>>) -> bool {
    dt.map_or(true, is_zero_time)
}

/// Returns `dt` unless it is unset, in which case the clock's current instant.
pub fn stamp(dt: Option<DateTime<Utc>>, clock: &dyn Clock) -> DateTime<Utc> {
    match dt {
        Some(dt) if !is_zero_time(&dt) => dt,
        _ => clock.now(),
    }
}
