use chrono::{DateTime, Utc};

use crate::model::{DAY_MS, Ms, Room};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Start or end date not picked yet.
    MissingDates,
    /// End is not strictly after start.
    EmptyRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    GuestsOutOfRange {
        guests: u32,
        capacity: u32,
    },
}

impl ValidationError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingDates => "missing_dates",
            ValidationError::EmptyRange { .. } => "empty_range",
            ValidationError::GuestsOutOfRange { .. } => "guests_out_of_range",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingDates => write!(f, "start and end dates are required"),
            ValidationError::EmptyRange { start, end } => {
                write!(f, "end date {end} must be after start date {start}")
            }
            ValidationError::GuestsOutOfRange { guests, capacity } => {
                write!(f, "{guests} guests outside allowed range 1..={capacity}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Live figures for the booking modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingSummary {
    pub days: i64,
    pub guests: u32,
    pub total: u64,
}

/// Whole days between two instants, rounding any partial day up.
/// Negative when `end` precedes `start`.
pub fn duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let diff: Ms = end.timestamp_millis() - start.timestamp_millis();
    let whole = diff.div_euclid(DAY_MS);
    if diff.rem_euclid(DAY_MS) == 0 { whole } else { whole + 1 }
}

/// Price for the stay, charging at least one day. Tolerates degenerate
/// ranges so a running total can be shown while dates are being picked.
pub fn total_price(room: &Room, start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let days = duration_days(start, end).max(1) as u64;
    u64::from(room.price) * days
}

/// Check a prospective booking, returning the concrete date pair on success.
pub fn validate_booking(
    room: &Room,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    guests: u32,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(ValidationError::MissingDates);
    };
    if end <= start {
        return Err(ValidationError::EmptyRange { start, end });
    }
    if guests < 1 || guests > room.capacity {
        return Err(ValidationError::GuestsOutOfRange {
            guests,
            capacity: room.capacity,
        });
    }
    Ok((start, end))
}

pub fn is_valid_booking(
    room: &Room,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    guests: u32,
) -> bool {
    validate_booking(room, start, end, guests).is_ok()
}

/// Summary shown once both dates are picked and span at least part of a day.
pub fn summary(
    room: &Room,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    guests: u32,
) -> Option<BookingSummary> {
    let (start, end) = (start?, end?);
    let days = duration_days(start, end);
    if days <= 0 {
        return None;
    }
    Some(BookingSummary {
        days,
        guests,
        total: total_price(room, start, end),
    })
}
