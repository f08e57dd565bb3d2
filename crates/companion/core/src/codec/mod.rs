//! Persistence codec: how each subsystem's state maps onto record fields.
//!
//! Decoders never reject a whole record for one bad field. Each function here
//! is pure; the flush/load orchestration lives in [`crate::agent`].
mod error;
mod food;
pub mod keys;
mod record;
mod rested;
mod skills;

pub use error::CodecError;
pub use food::{FoodSlotFormat, decode_food_slot, encode_food_slot};
pub use record::{HostId, MemoryRecord, Record, RecordValue, RecordWriter};
pub use rested::{decode_rested, encode_rested};
pub use skills::{decode_skills, encode_skills};

use crate::state::sanitize;

/// Stamina stored in the record, or `default` (the current max) when absent,
/// mistyped or not a finite number.
pub fn decode_stamina(record: &dyn Record, default: f32) -> f32 {
    match record.get_float(keys::STAMINA) {
        Some(value) if value.is_finite() => value.max(0.0),
        _ => sanitize(default),
    }
}
