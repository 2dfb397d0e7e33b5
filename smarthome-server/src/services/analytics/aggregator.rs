use time::{Duration, OffsetDateTime};

use super::{Period, TimedValue};

/// Half-open slice `[start, end)` of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl Window {
    pub fn contains(&self, time: OffsetDateTime) -> bool {
        self.start <= time && time < self.end
    }
}

/// Consecutive windows of a fixed size covering `[period.start, period.end)`.
///
/// The last window is cut short at `period.end` instead of overflowing it. A
/// non-positive size yields no windows.
#[derive(Debug, Clone)]
pub struct Windows {
    next: OffsetDateTime,
    end: OffsetDateTime,
    size: Duration,
}

impl Windows {
    pub fn new(period: &Period, size: Duration) -> Self {
        Self {
            next: period.start,
            end: period.end,
            size,
        }
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size <= Duration::ZERO || self.next >= self.end {
            return None;
        }

        let start = self.next;
        let end = start
            .checked_add(self.size)
            .map_or(self.end, |end| end.min(self.end));

        self.next = end;

        Some(Window { start, end })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetPowerPeak {
    /// Grid sum minus power source sum inside `window`
    pub value: f64,
    pub window: Window,
}

/// Highest per-window net power, grid readings minus power source readings.
///
/// Windows without a single reading on either side are skipped rather than
/// scored as zero, so a period without data yields `None`. On ties the
/// earliest window is kept.
pub fn peak_net_power(
    period: &Period,
    window_size: Duration,
    grid: &[TimedValue],
    source: &[TimedValue],
) -> Option<NetPowerPeak> {
    let grid = sorted_by_time(grid);
    let source = sorted_by_time(source);

    let mut grid_cursor = 0;
    let mut source_cursor = 0;
    let mut peak: Option<NetPowerPeak> = None;

    for window in Windows::new(period, window_size) {
        if grid_cursor >= grid.len() && source_cursor >= source.len() {
            break;
        }

        let grid_sum = window_sum(&grid, &mut grid_cursor, &window);
        let source_sum = window_sum(&source, &mut source_cursor, &window);

        let value = match (grid_sum, source_sum) {
            (None, None) => continue,
            (grid_sum, source_sum) => grid_sum.unwrap_or(0.0) - source_sum.unwrap_or(0.0),
        };

        if peak.is_none_or(|peak| value > peak.value) {
            peak = Some(NetPowerPeak { value, window });
        }
    }

    peak
}

fn sorted_by_time(readings: &[TimedValue]) -> Vec<TimedValue> {
    let mut readings = readings.to_vec();
    readings.sort_by(|a, b| a.time.cmp(&b.time));
    readings
}

/// Sums the readings inside `window`, advancing `cursor` past them.
///
/// `readings` must be sorted by time and windows visited in order.
fn window_sum(readings: &[TimedValue], cursor: &mut usize, window: &Window) -> Option<f64> {
    while *cursor < readings.len() && readings[*cursor].time < window.start {
        *cursor += 1;
    }

    let mut sum = None;
    while *cursor < readings.len() && window.contains(readings[*cursor].time) {
        sum = Some(sum.unwrap_or(0.0) + readings[*cursor].value);
        *cursor += 1;
    }

    sum
}
