//! Pipe-delimited food slot format.
//!
//! ```text
//! v1: name|hp|stam|eitr|remaining|total
//! v2: name|hp|stam|eitr|remaining|total|prefabRef
//! v3: name|hp|stam|eitr|remaining|total|prefabRef|regen
//! ```
//!
//! Encoding always writes v3 with one decimal of precision. Decoding accepts
//! any record with at least six fields; missing trailing fields default, and
//! unreadable numbers fall back to zero individually.

use crate::state::{FoodSlot, sanitize};

use super::error::CodecError;

const SEPARATOR: char = '|';

/// Known layouts of a food slot record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FoodSlotFormat {
    V1,
    V2,
    V3,
}

impl FoodSlotFormat {
    pub const CURRENT: Self = Self::V3;

    pub const fn field_count(&self) -> usize {
        match self {
            Self::V1 => 6,
            Self::V2 => 7,
            Self::V3 => 8,
        }
    }

    /// Layout implied by a field count; anything longer than v3 reads as v3.
    pub fn detect(fields: usize) -> Option<Self> {
        match fields {
            0..=5 => None,
            6 => Some(Self::V1),
            7 => Some(Self::V2),
            _ => Some(Self::V3),
        }
    }
}

/// Encodes a slot as v3. Inactive slots encode as the empty string.
pub fn encode_food_slot(slot: &FoodSlot) -> String {
    if !slot.is_active() {
        return String::new();
    }
    format!(
        "{}|{:.1}|{:.1}|{:.1}|{:.1}|{:.1}|{}|{:.1}",
        strip_separator(&slot.item_name),
        sanitize(slot.health_bonus),
        sanitize(slot.stamina_bonus),
        sanitize(slot.eitr_bonus),
        sanitize(slot.remaining_time),
        sanitize(slot.total_time),
        strip_separator(&slot.item_prefab_ref),
        sanitize(slot.regen_per_tick),
    )
}

/// Decodes any supported version. The empty string is an empty slot.
///
/// A decoded slot whose name is empty or whose timer has run out comes back
/// as the default (inactive) slot.
pub fn decode_food_slot(raw: &str) -> Result<FoodSlot, CodecError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(FoodSlot::default());
    }

    let fields: Vec<&str> = raw.split(SEPARATOR).collect();
    let format = FoodSlotFormat::detect(fields.len()).ok_or(CodecError::TooFewFields {
        found: fields.len(),
        min: FoodSlotFormat::V1.field_count(),
    })?;

    let slot = FoodSlot {
        item_name: fields[0].to_owned(),
        health_bonus: number(fields[1]),
        stamina_bonus: number(fields[2]),
        eitr_bonus: number(fields[3]),
        remaining_time: number(fields[4]),
        total_time: number(fields[5]),
        item_prefab_ref: if format >= FoodSlotFormat::V2 {
            fields[6].to_owned()
        } else {
            String::new()
        },
        regen_per_tick: if format >= FoodSlotFormat::V3 {
            number(fields[7])
        } else {
            0.0
        },
    };

    if slot.is_active() {
        Ok(slot)
    } else {
        Ok(FoodSlot::default())
    }
}

/// Locale-invariant float parse; unreadable, non-finite or negative values become 0.
fn number(field: &str) -> f32 {
    field.trim().parse::<f32>().map(sanitize).unwrap_or(0.0).max(0.0)
}

fn strip_separator(text: &str) -> String {
    text.chars().filter(|c| *c != SEPARATOR).collect()
}
