use time::{OffsetDateTime, UtcOffset};

/// A requested time span. Callers build it freely; consumers validate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl Period {
    /// Bounds are kept in UTC whatever offset they came with.
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self {
            start: start.to_offset(UtcOffset::UTC),
            end: end.to_offset(UtcOffset::UTC),
        }
    }

    /// Both bounds are required; a missing one yields no period at all.
    pub fn from_bounds(start: Option<OffsetDateTime>, end: Option<OffsetDateTime>) -> Option<Self> {
        Some(Self::new(start?, end?))
    }

    pub fn is_valid(&self, now: OffsetDateTime) -> bool {
        is_valid_period(Some(self.start), Some(self.end), now)
    }
}

/// Both bounds present, `start` strictly before `end`, and `end` not in the future.
pub fn is_valid_period(
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start < end && end <= now,
        _ => false,
    }
}
