use time::Duration;

use super::TimedValue;

/// Largest `|a.value - b.value|` over every pair recorded at most `tolerance` apart.
///
/// A full pairwise scan: every reading of `first` is checked against every
/// reading of `second`, so input order does not matter. The boundary is
/// inclusive, readings exactly `tolerance` apart are still compared. Returns
/// `None` when no pair is close enough in time.
pub fn max_instant_difference(
    first: &[TimedValue],
    second: &[TimedValue],
    tolerance: Duration,
) -> Option<f64> {
    let tolerance = tolerance.whole_seconds();

    first
        .iter()
        .flat_map(|a| second.iter().map(move |b| (a, b)))
        .filter(|(a, b)| (a.time - b.time).whole_seconds().abs() <= tolerance)
        .map(|(a, b)| (a.value - b.value).abs())
        .fold(None, |max: Option<f64>, difference| {
            Some(max.map_or(difference, |max| max.max(difference)))
        })
}
