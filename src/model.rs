use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Unix milliseconds. All duration arithmetic happens in this unit.
pub type Ms = i64;

/// One calendar day in ms.
pub const DAY_MS: Ms = 86_400_000;

/// Kind of stay a room offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Private,
    Shared,
    Family,
    Studio,
    Longterm,
}

impl RoomType {
    pub const ALL: [RoomType; 5] = [
        RoomType::Private,
        RoomType::Shared,
        RoomType::Family,
        RoomType::Studio,
        RoomType::Longterm,
    ];

    /// The wire name (`"private"`, `"longterm"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Private => "private",
            RoomType::Shared => "shared",
            RoomType::Family => "family",
            RoomType::Studio => "studio",
            RoomType::Longterm => "longterm",
        }
    }

    pub fn parse(s: &str) -> Option<RoomType> {
        RoomType::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable room. Defined once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub description: String,
    /// Max guests, at least 1.
    pub capacity: u32,
    /// Cost per calendar day, strictly positive.
    pub price: u32,
    /// Display order is significant (cards preview the first few).
    pub amenities: Vec<String>,
    pub floor: u32,
}

impl Room {
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }
}

/// A saved stay. `room_name` and `total_price` are snapshots taken at
/// creation time and are never recomputed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(alias = "stayId")]
    pub room_id: String,
    #[serde(alias = "stayName")]
    pub room_name: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_date")]
    pub end_date: DateTime<Utc>,
    pub guests: u32,
    pub total_price: u64,
}

impl Booking {
    /// Upcoming iff the stay starts at or after `now`. The end date plays no
    /// part, so a stay in progress counts as past.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.start_date >= now
    }
}

/// Parse a stored date: an RFC 3339 date-time, or a bare `YYYY-MM-DD`
/// calendar date taken as midnight UTC.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
}

/// Upcoming and past bookings, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub upcoming: Vec<Booking>,
    pub past: Vec<Booking>,
}
