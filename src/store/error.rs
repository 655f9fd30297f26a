#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Backing store cannot be reached at all.
    Unavailable(String),
    Io(String),
    /// Stored text is not a booking collection.
    Corrupt(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::Unavailable(e) => write!(f, "store unavailable: {e}"),
            PersistenceError::Io(e) => write!(f, "store I/O error: {e}"),
            PersistenceError::Corrupt(e) => write!(f, "corrupt stored data: {e}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<std::io::Error> for PersistenceError {
    fn from(e: std::io::Error) -> Self {
        PersistenceError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        PersistenceError::Corrupt(e.to_string())
    }
}

/// Result of a mutation that already took effect in memory. `warning` is set
/// when mirroring it to the persistent store failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub warning: Option<PersistenceError>,
}

impl<T> Outcome<T> {
    pub fn is_persisted(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
