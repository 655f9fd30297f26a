// Metric names. The library only emits through the `metrics` facade; the
// embedding application decides whether a recorder is installed.

/// Counter: bookings created.
pub const BOOKINGS_CREATED_TOTAL: &str = "staybook_bookings_created_total";

/// Counter: bookings removed by cancellation (no-op cancels excluded).
pub const BOOKINGS_CANCELLED_TOTAL: &str = "staybook_bookings_cancelled_total";

/// Counter: load/save failures against the key-value store. Labels: op.
pub const PERSISTENCE_FAILURES_TOTAL: &str = "staybook_persistence_failures_total";

/// Counter: create calls refused by validation. Labels: reason.
pub const VALIDATION_REJECTIONS_TOTAL: &str = "staybook_validation_rejections_total";

/// Gauge: bookings currently held in memory.
pub const BOOKINGS_ACTIVE: &str = "staybook_bookings_active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOp {
    Load,
    Save,
}

impl PersistOp {
    pub fn label(&self) -> &'static str {
        match self {
            PersistOp::Load => "load",
            PersistOp::Save => "save",
        }
    }
}

pub fn record_persistence_failure(op: PersistOp) {
    metrics::counter!(PERSISTENCE_FAILURES_TOTAL, "op" => op.label()).increment(1);
}
