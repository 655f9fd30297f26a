use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::model::{Room, RoomType};

/// Price ceiling of a freshly reset filter.
pub const DEFAULT_MAX_PRICE: u32 = 500;

/// Room type constraint, or the `"all"` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomTypeFilter {
    #[default]
    All,
    Only(RoomType),
}

impl RoomTypeFilter {
    /// Parse a select value: `"all"` or a room type wire name.
    pub fn parse(s: &str) -> Option<Self> {
        if s == "all" {
            return Some(RoomTypeFilter::All);
        }
        RoomType::parse(s).map(RoomTypeFilter::Only)
    }

    pub fn admits(&self, room_type: RoomType) -> bool {
        match self {
            RoomTypeFilter::All => true,
            RoomTypeFilter::Only(t) => *t == room_type,
        }
    }
}

/// Predicate over room attributes. No field constrains another; any
/// combination is legal, including ones that match nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub room_type: RoomTypeFilter,
    pub min_capacity: u32,
    pub max_price: u32,
    /// Required amenities. Empty means no constraint.
    pub amenities: BTreeSet<String>,
}

impl Default for Filter {
    fn default() -> Self {
        Self::reset()
    }
}

impl Filter {
    /// `{ all, 0 guests, 500/day, no amenities }`
    pub fn reset() -> Self {
        Self {
            room_type: RoomTypeFilter::All,
            min_capacity: 0,
            max_price: DEFAULT_MAX_PRICE,
            amenities: BTreeSet::new(),
        }
    }

    pub fn with_type(mut self, room_type: RoomTypeFilter) -> Self {
        self.room_type = room_type;
        self
    }

    pub fn with_min_capacity(mut self, min_capacity: u32) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn with_max_price(mut self, max_price: u32) -> Self {
        self.max_price = max_price;
        self
    }

    pub fn with_amenity(mut self, amenity: impl Into<String>) -> Self {
        self.amenities.insert(amenity.into());
        self
    }

    /// Checkbox semantics: add if absent, remove if present.
    /// Returns whether the amenity is required afterwards.
    pub fn toggle_amenity(&mut self, amenity: &str) -> bool {
        if self.amenities.remove(amenity) {
            false
        } else {
            self.amenities.insert(amenity.to_string());
            true
        }
    }

    pub fn matches(&self, room: &Room) -> bool {
        self.room_type.admits(room.room_type)
            && room.capacity >= self.min_capacity
            && room.price <= self.max_price
            && self.amenities.iter().all(|a| room.has_amenity(a))
    }
}

/// Every room the filter admits, in catalog order.
pub fn apply<'a>(filter: &Filter, catalog: &'a Catalog) -> Vec<&'a Room> {
    catalog.iter().filter(|room| filter.matches(room)).collect()
}
