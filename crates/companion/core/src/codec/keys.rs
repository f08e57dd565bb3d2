//! Record key names. Shared with the host game's save format; never rename.

pub const FOOD_SLOT_KEYS: [&str; crate::state::FOOD_SLOT_COUNT] =
    ["food_slot_0", "food_slot_1", "food_slot_2"];
pub const STAMINA: &str = "stamina";
pub const SKILLS: &str = "skills";
pub const IN_BED: &str = "in_bed";
pub const RESTED: &str = "rested";
