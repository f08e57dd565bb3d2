//! Skill tuning table loader.

use std::path::Path;

use companion_core::{SkillDefinition, SkillTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, ensure_positive, read_file};

const EMBEDDED: &str = include_str!("../../data/skills.ron");

/// Skill table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for the [`SkillTable`] from RON files.
pub struct SkillTableLoader;

impl SkillTableLoader {
    pub fn load(path: &Path) -> LoadResult<SkillTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn embedded() -> LoadResult<SkillTable> {
        Self::parse(EMBEDDED)
    }

    /// Later entries for the same skill override earlier ones.
    pub fn parse(content: &str) -> LoadResult<SkillTable> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill table RON: {}", e))?;
        for definition in &catalog.skills {
            ensure_positive(
                &format!("{}.increase_step", definition.skill),
                definition.increase_step,
            )?;
        }
        Ok(SkillTable::new(catalog.skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use companion_core::SkillId;

    #[test]
    fn embedded_table_covers_every_skill() {
        assert_eq!(SkillTableLoader::embedded().unwrap(), SkillTable::standard());
    }

    #[test]
    fn sparse_table_leaves_other_skills_unknown() {
        let table =
            SkillTableLoader::parse("(skills: [(skill: Axes, increase_step: 0.5)])").unwrap();
        assert_eq!(table.increase_step(SkillId::Axes), Some(0.5));
        assert_eq!(table.increase_step(SkillId::Run), None);
    }

    #[test]
    fn rejects_unknown_skill_and_zero_step() {
        assert!(SkillTableLoader::parse("(skills: [(skill: Dancing, increase_step: 1.0)])").is_err());
        let err = SkillTableLoader::parse("(skills: [(skill: Run, increase_step: 0.0)])")
            .unwrap_err();
        assert!(err.to_string().contains("Run.increase_step"));
    }
}
