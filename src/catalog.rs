use std::collections::HashSet;

use crate::model::{Room, RoomType};

/// Fixed amenity vocabulary offered as filter checkboxes.
pub const AMENITIES: [&str; 18] = [
    "WiFi",
    "Attached Bathroom",
    "Shared Bathroom",
    "Hot Water",
    "Balcony",
    "Natural Light",
    "Air Conditioning",
    "Fan",
    "Storage",
    "Kitchen Access",
    "Home Food Available",
    "Nearby Restaurants",
    "Workspace",
    "Desk & Chair",
    "Washing Machine",
    "Housekeeping",
    "Drinking Water",
    "Power Backup",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateId(String),
    ZeroCapacity(String),
    NonPositivePrice(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::DuplicateId(id) => write!(f, "duplicate room id: {id}"),
            CatalogError::ZeroCapacity(id) => write!(f, "room {id} has zero capacity"),
            CatalogError::NonPositivePrice(id) => write!(f, "room {id} has no price"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only table of rooms, in display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    rooms: Vec<Room>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, zero capacity and zero price.
    pub fn new(rooms: Vec<Room>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(rooms.len());
        for room in &rooms {
            if !seen.insert(room.id.as_str()) {
                return Err(CatalogError::DuplicateId(room.id.clone()));
            }
            if room.capacity == 0 {
                return Err(CatalogError::ZeroCapacity(room.id.clone()));
            }
            if room.price == 0 {
                return Err(CatalogError::NonPositivePrice(room.id.clone()));
            }
        }
        Ok(Self { rooms })
    }

    /// The six stays the site ships with.
    pub fn reference() -> Self {
        let rooms = vec![
            room(
                "1",
                "Private Stay — Executive Room",
                RoomType::Private,
                "Comfortable private room suitable for short or extended stays",
                2,
                299,
                &["WiFi", "Attached Bathroom", "Air Conditioning", "Balcony", "Hot Water"],
                5,
            ),
            room(
                "2",
                "Shared Stay — Modern Room",
                RoomType::Shared,
                "Affordable shared accommodation with essential amenities",
                4,
                99,
                &["WiFi", "Shared Bathroom", "Natural Light", "Storage", "Fan"],
                3,
            ),
            room(
                "3",
                "Family Stay — Spacious Suite",
                RoomType::Family,
                "Spacious family accommodation with kitchen and multiple beds",
                6,
                399,
                &["WiFi", "Kitchen Access", "Washing Machine", "Balcony", "Hot Water"],
                2,
            ),
            room(
                "4",
                "Studio Stay — Compact Living",
                RoomType::Studio,
                "Modern studio with workspace, perfect for working professionals",
                2,
                199,
                &["WiFi", "Attached Bathroom", "Workspace", "Air Conditioning", "Kitchen Access"],
                4,
            ),
            room(
                "5",
                "Long-term Stay — Furnished Flat",
                RoomType::Longterm,
                "Fully furnished flat ideal for extended stays with all amenities",
                3,
                179,
                &["WiFi", "Kitchen Access", "Washing Machine", "Housekeeping", "Power Backup"],
                1,
            ),
            room(
                "6",
                "Private Stay — Deluxe Room",
                RoomType::Private,
                "Comfortable deluxe room with home food service available",
                2,
                249,
                &["WiFi", "Attached Bathroom", "Natural Light", "Balcony", "Home Food Available"],
                6,
            ),
        ];
        Self { rooms }
    }

    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn room(
    id: &str,
    name: &str,
    room_type: RoomType,
    description: &str,
    capacity: u32,
    price: u32,
    amenities: &[&str],
    floor: u32,
) -> Room {
    Room {
        id: id.into(),
        name: name.into(),
        room_type,
        description: description.into(),
        capacity,
        price,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        floor,
    }
}
