use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PositionScale};
use crate::core::ticks::{MAX_TICK_HINT, tick_step, ticks};
use crate::error::{ChartError, ChartResult};

const MILLIS_SECOND: f64 = 1_000.0;
const MILLIS_MINUTE: f64 = MILLIS_SECOND * 60.0;
const MILLIS_HOUR: f64 = MILLIS_MINUTE * 60.0;
const MILLIS_DAY: f64 = MILLIS_HOUR * 24.0;
const MILLIS_WEEK: f64 = MILLIS_DAY * 7.0;
const MILLIS_MONTH: f64 = MILLIS_DAY * 30.0;
const MILLIS_YEAR: f64 = MILLIS_DAY * 365.0;

const MAX_CALENDAR_TICKS: usize = 10_000;

/// Calendar unit a time tick is aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    /// Weeks starting on Sunday.
    Week,
    Month,
    Year,
}

/// Calendar-aligned tick cadence: every `step` units of `unit`.
///
/// Sub-day steps are counted within the parent field (seconds of the minute,
/// days of the month, months of the year) so boundaries stay calendar-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: u32,
}

const TICK_INTERVALS: [(TimeUnit, u32, f64); 18] = [
    (TimeUnit::Second, 1, MILLIS_SECOND),
    (TimeUnit::Second, 5, 5.0 * MILLIS_SECOND),
    (TimeUnit::Second, 15, 15.0 * MILLIS_SECOND),
    (TimeUnit::Second, 30, 30.0 * MILLIS_SECOND),
    (TimeUnit::Minute, 1, MILLIS_MINUTE),
    (TimeUnit::Minute, 5, 5.0 * MILLIS_MINUTE),
    (TimeUnit::Minute, 15, 15.0 * MILLIS_MINUTE),
    (TimeUnit::Minute, 30, 30.0 * MILLIS_MINUTE),
    (TimeUnit::Hour, 1, MILLIS_HOUR),
    (TimeUnit::Hour, 3, 3.0 * MILLIS_HOUR),
    (TimeUnit::Hour, 6, 6.0 * MILLIS_HOUR),
    (TimeUnit::Hour, 12, 12.0 * MILLIS_HOUR),
    (TimeUnit::Day, 1, MILLIS_DAY),
    (TimeUnit::Day, 2, 2.0 * MILLIS_DAY),
    (TimeUnit::Week, 1, MILLIS_WEEK),
    (TimeUnit::Month, 1, MILLIS_MONTH),
    (TimeUnit::Month, 3, 3.0 * MILLIS_MONTH),
    (TimeUnit::Year, 1, MILLIS_YEAR),
];

impl TimeInterval {
    #[must_use]
    pub const fn new(unit: TimeUnit, step: u32) -> Self {
        Self {
            unit,
            step: if step == 0 { 1 } else { step },
        }
    }

    /// Picks the cadence whose duration is closest to `span / count`.
    #[must_use]
    pub fn for_span(start_ms: f64, stop_ms: f64, count: usize) -> Option<Self> {
        if count == 0 || !start_ms.is_finite() || !stop_ms.is_finite() {
            return None;
        }

        let count = count.min(MAX_TICK_HINT);
        let target = (stop_ms - start_ms).abs() / count as f64;
        let index = TICK_INTERVALS.partition_point(|(_, _, duration)| *duration <= target);

        if index == TICK_INTERVALS.len() {
            let years = tick_step(start_ms / MILLIS_YEAR, stop_ms / MILLIS_YEAR, count)
                .abs()
                .round()
                .max(1.0);
            return Some(Self::new(TimeUnit::Year, years as u32));
        }
        if index == 0 {
            let millis = tick_step(start_ms, stop_ms, count).abs().max(1.0);
            return Some(Self::new(TimeUnit::Millisecond, millis.round() as u32));
        }

        let (lower_unit, lower_step, lower_duration) = TICK_INTERVALS[index - 1];
        let (upper_unit, upper_step, upper_duration) = TICK_INTERVALS[index];
        if target / lower_duration < upper_duration / target {
            Some(Self::new(lower_unit, lower_step))
        } else {
            Some(Self::new(upper_unit, upper_step))
        }
    }

    /// Latest boundary at or before `time`.
    #[must_use]
    pub fn floor(self, time: DateTime<Utc>) -> DateTime<Utc> {
        let step = self.step;
        match self.unit {
            TimeUnit::Millisecond => {
                let millis = time.timestamp_millis();
                let floored = millis - millis.rem_euclid(i64::from(step));
                Utc.timestamp_millis_opt(floored).single().unwrap_or(time)
            }
            TimeUnit::Second => {
                let second = time.second() - time.second() % step;
                truncate(time, time.hour(), time.minute(), second)
            }
            TimeUnit::Minute => {
                let minute = time.minute() - time.minute() % step;
                truncate(time, time.hour(), minute, 0)
            }
            TimeUnit::Hour => {
                let hour = time.hour() - time.hour() % step;
                truncate(time, hour, 0, 0)
            }
            TimeUnit::Day => {
                let day = time.day() - (time.day() - 1) % step;
                midnight(time.year(), time.month(), day).unwrap_or(time)
            }
            TimeUnit::Week => {
                let back = i64::from(time.weekday().num_days_from_sunday());
                truncate(time, 0, 0, 0) - Duration::days(back)
            }
            TimeUnit::Month => {
                let month0 = time.month0() - time.month0() % step;
                midnight(time.year(), month0 + 1, 1).unwrap_or(time)
            }
            TimeUnit::Year => {
                let year = time.year() - time.year().rem_euclid(step as i32);
                midnight(year, 1, 1).unwrap_or(time)
            }
        }
    }

    /// Earliest boundary at or after `time`.
    #[must_use]
    pub fn ceil(self, time: DateTime<Utc>) -> DateTime<Utc> {
        let floored = self.floor(time);
        if floored == time {
            floored
        } else {
            self.next(floored).unwrap_or(time)
        }
    }

    /// First boundary strictly after the boundary `time`.
    #[must_use]
    pub fn next(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let step = self.step;
        if self.unit == TimeUnit::Millisecond {
            return time.checked_add_signed(Duration::milliseconds(i64::from(step)));
        }

        let mut candidate = self.advance_unit(time)?;
        while !self.is_boundary(candidate) {
            candidate = self.advance_unit(candidate)?;
        }
        Some(candidate)
    }

    /// Boundaries in `[start, stop]`, capped to keep pathological spans bounded.
    #[must_use]
    pub fn range(self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut out = Vec::new();
        let mut current = self.ceil(start);
        while current <= stop && out.len() < MAX_CALENDAR_TICKS {
            out.push(current);
            match self.next(current) {
                Some(next) if next > current => current = next,
                _ => break,
            }
        }
        out
    }

    fn advance_unit(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.unit {
            TimeUnit::Millisecond => time.checked_add_signed(Duration::milliseconds(1)),
            TimeUnit::Second => time.checked_add_signed(Duration::seconds(1)),
            TimeUnit::Minute => time.checked_add_signed(Duration::minutes(1)),
            TimeUnit::Hour => time.checked_add_signed(Duration::hours(1)),
            TimeUnit::Day => time.checked_add_signed(Duration::days(1)),
            TimeUnit::Week => time.checked_add_signed(Duration::weeks(1)),
            TimeUnit::Month => {
                let (year, month) = if time.month() == 12 {
                    (time.year() + 1, 1)
                } else {
                    (time.year(), time.month() + 1)
                };
                midnight(year, month, 1)
            }
            TimeUnit::Year => midnight(time.year() + 1, 1, 1),
        }
    }

    fn is_boundary(self, time: DateTime<Utc>) -> bool {
        let step = self.step;
        match self.unit {
            TimeUnit::Millisecond | TimeUnit::Week => true,
            TimeUnit::Second => time.second() % step == 0,
            TimeUnit::Minute => time.minute() % step == 0,
            TimeUnit::Hour => time.hour() % step == 0,
            TimeUnit::Day => (time.day() - 1) % step == 0,
            TimeUnit::Month => time.month0() % step == 0,
            TimeUnit::Year => time.year().rem_euclid(step as i32) == 0,
        }
    }
}

fn truncate(time: DateTime<Utc>, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    time.date_naive()
        .and_hms_opt(hour, minute, second)
        .map(|naive| naive.and_utc())
        .unwrap_or(time)
}

fn midnight(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn to_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis.round() as i64).single()
}

/// Continuous scale over UTC instants.
///
/// Mapping is affine on epoch milliseconds; ticks and nicing snap to calendar
/// boundaries rather than round numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (DateTime<Utc>, DateTime<Utc>), range: (f64, f64)) -> ChartResult<Self> {
        Ok(Self {
            linear: LinearScale::new((to_millis(domain.0), to_millis(domain.1)), range)?,
        })
    }

    /// Returns the domain as UTC instants.
    pub fn domain(self) -> ChartResult<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = self.linear.domain();
        match (from_millis(start), from_millis(end)) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(ChartError::InvalidData(
                "time scale domain is outside the representable range".to_owned(),
            )),
        }
    }

    #[must_use]
    pub fn domain_millis(self) -> (f64, f64) {
        self.linear.domain()
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.linear.range()
    }

    #[must_use]
    pub fn map(self, time: DateTime<Utc>) -> f64 {
        self.linear.map(to_millis(time))
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> Option<DateTime<Utc>> {
        from_millis(self.linear.invert(pixel))
    }

    #[must_use]
    pub fn tick_interval(self, count: usize) -> Option<TimeInterval> {
        let (start, end) = self.linear.domain();
        TimeInterval::for_span(start, end, count)
    }

    /// Calendar-aligned tick instants inside the domain.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<DateTime<Utc>> {
        let (start_ms, end_ms) = self.linear.domain();
        let reverse = end_ms < start_ms;
        let (lo_ms, hi_ms) = if reverse {
            (end_ms, start_ms)
        } else {
            (start_ms, end_ms)
        };
        let (Some(lo), Some(hi)) = (from_millis(lo_ms), from_millis(hi_ms)) else {
            return Vec::new();
        };
        if lo == hi {
            return if count == 0 { Vec::new() } else { vec![lo] };
        }
        let Some(interval) = TimeInterval::for_span(lo_ms, hi_ms, count) else {
            return Vec::new();
        };

        let mut out = if interval.unit == TimeUnit::Millisecond {
            ticks(lo_ms, hi_ms, count)
                .into_iter()
                .filter_map(from_millis)
                .collect()
        } else {
            interval.range(lo, hi)
        };
        if reverse {
            out.reverse();
        }
        out
    }

    /// Returns a copy whose domain ends sit on calendar boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let Some(interval) = self.tick_interval(count) else {
            return self;
        };
        let (start_ms, end_ms) = self.linear.domain();
        let reverse = end_ms < start_ms;
        let (lo_ms, hi_ms) = if reverse {
            (end_ms, start_ms)
        } else {
            (start_ms, end_ms)
        };
        let (Some(lo), Some(hi)) = (from_millis(lo_ms), from_millis(hi_ms)) else {
            return self;
        };

        let lo = to_millis(interval.floor(lo));
        let hi = to_millis(interval.ceil(hi));
        let domain = if reverse { (hi, lo) } else { (lo, hi) };
        match LinearScale::new(domain, self.linear.range()) {
            Ok(linear) => Self { linear },
            Err(_) => self,
        }
    }

    /// Multi-scale label: the coarsest unit at which `time` is not a boundary
    /// decides the format.
    #[must_use]
    pub fn format_tick(time: DateTime<Utc>) -> String {
        let second = TimeInterval::new(TimeUnit::Second, 1);
        let minute = TimeInterval::new(TimeUnit::Minute, 1);
        let hour = TimeInterval::new(TimeUnit::Hour, 1);
        let day = TimeInterval::new(TimeUnit::Day, 1);
        let week = TimeInterval::new(TimeUnit::Week, 1);
        let month = TimeInterval::new(TimeUnit::Month, 1);
        let year = TimeInterval::new(TimeUnit::Year, 1);

        let pattern = if second.floor(time) < time {
            ".%3f"
        } else if minute.floor(time) < time {
            ":%S"
        } else if hour.floor(time) < time {
            "%I:%M"
        } else if day.floor(time) < time {
            "%I %p"
        } else if month.floor(time) < time {
            if week.floor(time) < time {
                "%a %d"
            } else {
                "%b %d"
            }
        } else if year.floor(time) < time {
            "%B"
        } else {
            "%Y"
        };
        time.format(pattern).to_string()
    }
}

impl PositionScale<DateTime<Utc>> for TimeScale {
    fn position(&self, value: &DateTime<Utc>) -> Option<f64> {
        Some(self.map(*value))
    }
}
