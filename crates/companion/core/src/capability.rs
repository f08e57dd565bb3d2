//! Capability dispatch for engine actions shared by players and companions.
//!
//! Hosts route stamina and skill actions of any character through these
//! helpers once, at the call site, along with the record that decides who owns
//! the character. A character that answers `None` takes the host's regular
//! path.

use crate::agent::CompanionNeeds;
use crate::codec::Record;
use crate::events::EventLog;
use crate::skills::SkillProgressionTracker;
use crate::stamina::StaminaController;
use crate::state::SkillId;

/// Skill access handed out by [`Capabilities::skills_mut`].
pub struct SkillAccess<'a> {
    pub tracker: &'a mut SkillProgressionTracker,
    /// Rested skill bonus in effect (0 without the buff).
    pub rested_xp_modifier: f32,
    pub events: &'a mut EventLog,
}

impl SkillAccess<'_> {
    pub fn raise(&mut self, skill: SkillId, factor: f32) -> bool {
        self.tracker
            .raise(skill, factor, self.rested_xp_modifier, self.events)
    }
}

/// Needs subsystems a character may carry.
///
/// Companions answer only while `record` names this host as owner, so mirrors
/// fall through to the host's regular path and never mutate their local copy.
pub trait Capabilities {
    fn stamina_mut(&mut self, _record: &dyn Record) -> Option<&mut StaminaController> {
        None
    }

    fn skills_mut(&mut self, _record: &dyn Record) -> Option<SkillAccess<'_>> {
        None
    }
}

impl Capabilities for CompanionNeeds {
    fn stamina_mut(&mut self, record: &dyn Record) -> Option<&mut StaminaController> {
        self.owned_stamina(record)
    }

    fn skills_mut(&mut self, record: &dyn Record) -> Option<SkillAccess<'_>> {
        self.owned_skills(record)
            .map(|(tracker, rested_xp_modifier, events)| SkillAccess {
                tracker,
                rested_xp_modifier,
                events,
            })
    }
}

/// Discrete stamina action (a harvesting swing). `None` when the character
/// has no stamina controller.
pub fn try_use_stamina(
    agent: &mut dyn Capabilities,
    record: &dyn Record,
    amount: f32,
) -> Option<bool> {
    agent.stamina_mut(record).map(|stamina| stamina.try_use(amount))
}

/// Intercepted stamina cost (attacking, blocking). Returns whether it was
/// handled here.
pub fn drain_stamina(agent: &mut dyn Capabilities, record: &dyn Record, amount: f32) -> bool {
    match agent.stamina_mut(record) {
        Some(stamina) => {
            stamina.drain(amount);
            true
        }
        None => false,
    }
}

/// Instant-restore consumable. Returns whether it was handled here.
pub fn restore_stamina(agent: &mut dyn Capabilities, record: &dyn Record, amount: f32) -> bool {
    match agent.stamina_mut(record) {
        Some(stamina) => {
            stamina.restore(amount);
            true
        }
        None => false,
    }
}

/// Skill gain. `None` when the character has no progression tracker.
pub fn raise_skill(
    agent: &mut dyn Capabilities,
    record: &dyn Record,
    skill: SkillId,
    factor: f32,
) -> Option<bool> {
    agent.skills_mut(record).map(|mut skills| skills.raise(skill, factor))
}
