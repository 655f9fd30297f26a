//! Display lookups for the presentation layer.

use crate::model::RoomType;

pub fn room_type_label(room_type: RoomType) -> &'static str {
    match room_type {
        RoomType::Private => "Private Stay",
        RoomType::Shared => "Shared Stay",
        RoomType::Family => "Family Stay",
        RoomType::Studio => "Studio Stay",
        RoomType::Longterm => "Long-term Stay",
    }
}

/// Label for a raw type string; unknown strings are shown as-is.
pub fn type_label(raw: &str) -> String {
    RoomType::parse(raw)
        .map(|t| room_type_label(t).to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn floor_label(floor: u32) -> String {
    if floor == 1 {
        return "Ground floor access".to_string();
    }
    format!("{floor}th Floor (lift available)")
}

/// Element id for an amenity checkbox: each whitespace run becomes one `-`,
/// including runs at either end.
pub fn amenity_element_id(amenity: &str) -> String {
    let mut id = String::with_capacity("amenity-".len() + amenity.len());
    id.push_str("amenity-");
    let mut in_run = false;
    for c in amenity.chars() {
        if c.is_whitespace() {
            if !in_run {
                id.push('-');
            }
            in_run = true;
        } else {
            id.push(c);
            in_run = false;
        }
    }
    id
}
