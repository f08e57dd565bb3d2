use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::state::SkillId;

/// Static tuning of a single skill.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub skill: SkillId,
    /// Base accumulator gain per raise.
    pub increase_step: f32,
}

impl SkillDefinition {
    pub const DEFAULT_STEP: f32 = 1.0;
}

/// Per-skill tuning table, shared read-only between agents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillTable {
    definitions: BTreeMap<SkillId, SkillDefinition>,
}

impl SkillTable {
    pub fn new(definitions: impl IntoIterator<Item = SkillDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|d| (d.skill, d)).collect(),
        }
    }

    /// Every known skill with the default step.
    pub fn standard() -> Self {
        Self::new(SkillId::iter().map(|skill| SkillDefinition {
            skill,
            increase_step: SkillDefinition::DEFAULT_STEP,
        }))
    }

    pub fn definition(&self, skill: SkillId) -> Option<&SkillDefinition> {
        self.definitions.get(&skill)
    }

    pub fn increase_step(&self, skill: SkillId) -> Option<f32> {
        self.definition(skill).map(|d| d.increase_step)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
