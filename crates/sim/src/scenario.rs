//! Two hosts, one companion: a scripted afternoon at camp.
//!
//! The first host owns the companion for most of the run; ownership then
//! moves to the second host, which reloads from the shared record and carries
//! on. Each host keeps its own `CompanionNeeds`.

use anyhow::Result;
use companion_content::ContentFactory;
use companion_core::{
    Behavior, CompanionNeeds, ControllerView, Env, HostId, MemoryRecord, Motion, MotionFlags,
    PcgRng, Position, Record, SkillId, Surroundings, raise_skill, roll_seed, try_use_stamina,
};
use tracing::info;

use crate::config::SimConfig;
use crate::world::{BED, Camp, Legs, PLAYER, Stash};

const ALPHA: HostId = HostId(1);
const BETA: HostId = HostId(2);

const SPRINT: (f32, f32) = (5.0, 10.0);
const PLAYER_SITS: (f32, f32) = (15.0, 40.0);
const GO_TO_BED: f32 = 45.0;
const WAKE_UP: f32 = 70.0;
const HOSTILE_FOR: f32 = 3.0;
const CHOP_EVERY: f32 = 2.0;
const CHOP_STAMINA: f32 = 8.0;

/// One host's view of the companion.
struct Side {
    agent: CompanionNeeds,
    rng: PcgRng,
    stash: Stash,
    legs: Legs,
    surroundings: Surroundings,
}

impl Side {
    fn new(agent: CompanionNeeds) -> Self {
        Self {
            agent,
            rng: PcgRng,
            stash: Stash::default(),
            legs: Legs::default(),
            surroundings: Surroundings::at(Position::ORIGIN, Behavior::Follow(PLAYER)),
        }
    }

    fn with_env<R>(
        &mut self,
        camp: &Camp,
        f: impl FnOnce(&mut CompanionNeeds, &mut Env<'_>, &Surroundings) -> R,
    ) -> R {
        let surroundings = self.surroundings;
        let mut env = Env::new(camp, &self.rng, &mut self.stash, &mut self.legs);
        f(&mut self.agent, &mut env, &surroundings)
    }

    fn tick(&mut self, camp: &Camp, record: &mut MemoryRecord, dt: f32) {
        self.with_env(camp, |agent, env, surroundings| {
            agent.tick(dt, env, surroundings, record)
        });
    }
}

/// End-of-run numbers.
#[derive(Debug)]
pub struct Summary {
    pub frames: u32,
    pub owner: Option<HostId>,
    pub active_food: usize,
    pub food_left: u32,
    pub stamina: f32,
    pub max_health: f32,
    pub rested_remaining: f32,
    pub wood_cutting: f32,
    pub events: usize,
    pub record_keys: usize,
}

pub struct Scenario {
    config: SimConfig,
    camp: Camp,
    record: MemoryRecord,
    sides: [Side; 2],
    events: usize,
    chops: u64,
}

impl Scenario {
    pub fn new(config: SimConfig) -> Result<Self> {
        let factory = match &config.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::embedded(),
        };
        let needs = factory.load_config()?;
        let tables = factory.load_tables()?;
        let catalog = factory.load_items()?;

        let mut first = Side::new(CompanionNeeds::new(ALPHA, needs.clone(), tables.clone()));
        for item in catalog.food() {
            first.stash.add(item.clone(), config.food_stacks);
        }
        let second = Side::new(CompanionNeeds::new(BETA, needs, tables));

        info!(
            target: "sim",
            food_kinds = catalog.food().count(),
            units = first.stash.units(),
            "Scenario ready"
        );

        Ok(Self {
            config,
            camp: Camp::new(),
            record: MemoryRecord::new(ALPHA),
            sides: [first, second],
            events: 0,
            chops: 0,
        })
    }

    pub fn run(mut self) -> Summary {
        let dt = self.config.dt;
        let frames = self.config.frames();

        for frame in 0..frames {
            let t = frame as f32 * dt;
            self.script(t, dt);
            for side in self.sides.iter_mut() {
                side.tick(&self.camp, &mut self.record, dt);
            }
            self.log_events();
        }

        let owner = self.owner_index();
        let side = &mut self.sides[owner];
        side.agent.teardown(&mut self.record);
        self.log_events();

        let side = &self.sides[owner];
        Summary {
            frames,
            owner: self.record.owner(),
            active_food: side.agent.food().active_count(),
            food_left: side.stash.units(),
            stamina: side.agent.stamina().current(),
            max_health: side.agent.max_health(),
            rested_remaining: side.agent.rested().remaining(),
            wood_cutting: side.agent.skills().level(SkillId::WoodCutting),
            events: self.events,
            record_keys: self.record.len(),
        }
    }

    fn owner_index(&self) -> usize {
        if self.record.owner() == Some(BETA) { 1 } else { 0 }
    }

    /// Applies everything scheduled for the frame starting at `t`.
    fn script(&mut self, t: f32, dt: f32) {
        let at = |mark: f32| mark >= t && mark < t + dt;

        if at(self.config.handoff_at) {
            self.handoff();
        }
        if let Some(hostile_at) = self.config.hostile_at {
            self.camp.hostile = (hostile_at..hostile_at + HOSTILE_FOR).contains(&t);
        }

        let owner = self.owner_index();
        let camp = &self.camp;
        let record = &self.record;
        let side = &mut self.sides[owner];

        side.surroundings.motion = if (SPRINT.0..SPRINT.1).contains(&t) {
            Motion {
                flags: MotionFlags::MOVING,
                speed: 6.0,
                walk_speed: 2.0,
            }
        } else {
            Motion::idle(2.0)
        };
        side.surroundings.controller = Some(ControllerView {
            handle: PLAYER,
            position: Position::new(1.0, 0.0, 0.0),
            sitting_for: (PLAYER_SITS.0..PLAYER_SITS.1)
                .contains(&t)
                .then(|| t - PLAYER_SITS.0),
        });

        if at(GO_TO_BED) || at(WAKE_UP) {
            let ordered = side.with_env(camp, |agent, env, surroundings| {
                agent.command_sleep(BED, env, surroundings, record)
            });
            info!(target: "sim", t, ordered, "Bed command");
        }

        if side.legs.step(&mut side.surroundings.position, dt) {
            side.with_env(camp, |agent, env, surroundings| {
                agent.on_arrived(env, surroundings, record)
            });
        }
        if side.legs.is_walking() {
            side.surroundings.motion = Motion {
                flags: MotionFlags::MOVING,
                speed: Legs::SPEED,
                walk_speed: Legs::SPEED,
            };
        }

        let chop_due = (t / CHOP_EVERY).floor() != ((t + dt) / CHOP_EVERY).floor();
        if chop_due && !side.agent.rest().is_resting() {
            self.chops += 1;
            self.chop(owner);
        }
    }

    /// Swings an axe: costs stamina and trains wood cutting when affordable.
    fn chop(&mut self, owner: usize) {
        let record = &self.record;
        let side = &mut self.sides[owner];
        if try_use_stamina(&mut side.agent, record, CHOP_STAMINA) != Some(true) {
            return;
        }
        let skill = SkillId::WoodCutting;
        let seed = roll_seed(side.agent.host().0, self.chops, skill as u32);
        let factor = side.agent.skills().random_skill_factor(skill, &side.rng, seed);
        raise_skill(&mut side.agent, record, skill, factor);
    }

    /// Moves ownership to the other host. The companion's stash and position
    /// travel with it.
    fn handoff(&mut self) {
        let from = self.owner_index();
        let to = 1 - from;
        let stash = std::mem::take(&mut self.sides[from].stash);
        let surroundings = self.sides[from].surroundings;
        self.sides[to].stash = stash;
        self.sides[to].surroundings = surroundings;

        let host = if to == 0 { ALPHA } else { BETA };
        self.record.set_owner(Some(host));
        info!(target: "sim", from = from + 1, to = to + 1, "Ownership handed off");
    }

    fn log_events(&mut self) {
        for side in self.sides.iter_mut() {
            let host = side.agent.host().0;
            for event in side.agent.drain_events() {
                self.events += 1;
                info!(target: "sim", host, ?event, "Companion event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_hands_off_without_losing_state() {
        let summary = Scenario::new(SimConfig::default()).unwrap().run();
        assert_eq!(summary.owner, Some(BETA));
        assert_eq!(summary.active_food, 3);
        assert!(summary.wood_cutting >= 1.0);
        assert!(summary.rested_remaining > 0.0);
        assert!(summary.events > 0);
    }
}
