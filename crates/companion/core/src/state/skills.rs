use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Highest level a skill can reach.
pub const MAX_SKILL_LEVEL: f32 = 100.0;

/// Skill identifiers, named as they appear in the persisted ledger.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillId {
    Swords,
    Knives,
    Clubs,
    Polearms,
    Spears,
    Blocking,
    Axes,
    Bows,
    Crossbows,
    ElementalMagic,
    BloodMagic,
    Unarmed,
    Pickaxes,
    WoodCutting,
    Jump,
    Sneak,
    Run,
    Swim,
    Fishing,
    Cooking,
    Farming,
    Crafting,
    Ride,
}

/// Progress of one skill.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SkillRecord {
    /// Clamped to `[0, 100]`.
    pub level: f32,
    /// Progress toward the next level; reset whenever `level` increments.
    pub accumulator: f32,
}

impl SkillRecord {
    pub const fn new(level: f32, accumulator: f32) -> Self {
        Self { level, accumulator }
    }

    /// Accumulator value needed to reach the next level.
    ///
    /// `floor(level + 1)^1.5 * 0.5 + 0.5`, identical to the vanilla curve.
    pub fn next_level_requirement(&self) -> f32 {
        (self.level + 1.0).floor().powf(1.5) * 0.5 + 0.5
    }

    /// Both level and accumulator are effectively zero.
    pub fn is_blank(&self) -> bool {
        self.level.abs() < 1e-4 && self.accumulator.abs() < 1e-4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn requirement_matches_vanilla_curve() {
        assert_eq!(SkillRecord::new(0.0, 0.0).next_level_requirement(), 1.0);
        let at_three = SkillRecord::new(3.4, 0.0).next_level_requirement();
        assert!((at_three - (4.0f32.powf(1.5) * 0.5 + 0.5)).abs() < 1e-5);
    }

    #[test]
    fn skill_names_round_trip_through_strings() {
        assert_eq!(SkillId::WoodCutting.to_string(), "WoodCutting");
        assert_eq!(SkillId::from_str("Swords").ok(), Some(SkillId::Swords));
        assert!(SkillId::from_str("Dancing").is_err());
    }
}
