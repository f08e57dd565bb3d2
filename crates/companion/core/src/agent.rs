//! The per-agent aggregate: every needs subsystem plus ownership handling.
//!
//! Hosts call [`CompanionNeeds::tick`] once per frame. On the owner it runs the
//! simulation and flushes on schedule; on every other host it only polls the
//! record and overwrites its mirror.

use tracing::{debug, info, warn};

use crate::codec::{HostId, Record, RecordWriter, decode_food_slot, encode_food_slot, keys};
use crate::config::NeedsConfig;
use crate::env::{Env, ItemDescriptor, Surroundings, Tables, WorldOracle};
use crate::events::{EventLog, NeedsEvent};
use crate::food::{ConsumeContext, FoodEffectTracker};
use crate::rest::{RestContext, RestStateMachine, RestStopReason, RestTransition};
use crate::rested::RestedBuffAccumulator;
use crate::skills::SkillProgressionTracker;
use crate::stamina::StaminaController;
use crate::state::{
    EntityHandle, FoodSlot, Position, RestMode, RestTargetKind, SkillId, StatusEffects, Vitals,
    sanitize,
};
use crate::sync::{Authority, FlushDue, Handoff, SyncSchedule};

pub struct CompanionNeeds {
    host: HostId,
    tables: Tables,
    vitals: Vitals,
    status: StatusEffects,
    food: FoodEffectTracker,
    stamina: StaminaController,
    rest: RestStateMachine,
    rested: RestedBuffAccumulator,
    skills: SkillProgressionTracker,
    sync: SyncSchedule,
    events: EventLog,
    in_bed_dirty: bool,
    mirrored_in_bed: bool,
}

impl CompanionNeeds {
    pub fn new(host: HostId, config: NeedsConfig, tables: Tables) -> Self {
        Self {
            host,
            vitals: Vitals::new(config.vitals.base_health),
            status: StatusEffects::empty(),
            food: FoodEffectTracker::new(config.food),
            stamina: StaminaController::new(config.stamina),
            rest: RestStateMachine::new(config.rest),
            rested: RestedBuffAccumulator::new(config.rested, tables.balance.clone()),
            skills: SkillProgressionTracker::new(tables.skills.clone(), tables.balance.clone()),
            sync: SyncSchedule::new(&config.sync),
            events: EventLog::new(),
            in_bed_dirty: false,
            mirrored_in_bed: false,
            tables,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn host(&self) -> HostId {
        self.host
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn status_effects(&self) -> &StatusEffects {
        &self.status
    }

    pub fn food(&self) -> &FoodEffectTracker {
        &self.food
    }

    pub fn stamina(&self) -> &StaminaController {
        &self.stamina
    }

    pub fn rest(&self) -> &RestStateMachine {
        &self.rest
    }

    pub fn rested(&self) -> &RestedBuffAccumulator {
        &self.rested
    }

    pub fn skills(&self) -> &SkillProgressionTracker {
        &self.skills
    }

    /// Role observed on the last tick or owner operation; `None` before either.
    pub fn authority(&self) -> Option<Authority> {
        self.sync.authority()
    }

    pub fn is_owner(&self) -> bool {
        self.sync.is_owner()
    }

    pub fn max_health(&self) -> f32 {
        self.food.max_health(self.vitals.base_health)
    }

    /// Sleeping on the owner; the replicated flag on mirrors.
    pub fn in_bed(&self) -> bool {
        if self.is_owner() {
            self.rest.in_bed()
        } else {
            self.mirrored_in_bed
        }
    }

    pub fn drain_events(&mut self) -> Vec<NeedsEvent> {
        self.events.drain()
    }

    // ========================================================================
    // Tick
    // ========================================================================

    pub fn tick(
        &mut self,
        dt: f32,
        env: &mut Env<'_>,
        surroundings: &Surroundings,
        record: &mut dyn Record,
    ) {
        let dt = sanitize(dt).max(0.0);
        let handoff = self.observe_authority(record);

        if self.sync.is_owner() {
            self.simulate(dt, env, surroundings);
            let due = self.sync.owner_tick(dt);
            self.write(record, due);
        } else if handoff == Handoff::Unchanged && self.sync.mirror_tick(dt) {
            self.load(record);
        }
    }

    /// Reads this host's role from the record and reloads on any change.
    fn observe_authority(&mut self, record: &dyn Record) -> Handoff {
        let authority = Authority::of(record, self.host);
        let handoff = self.sync.observe(authority, self.host);
        match handoff {
            Handoff::Unchanged => {}
            Handoff::BecameMirror => self.load(record),
            Handoff::BecameOwner => {
                self.load(record);
                // Rest state is not replicated; rewrite a flag left by the old owner.
                self.in_bed_dirty = record.get_bool(keys::IN_BED) != Some(self.rest.in_bed());
            }
        }
        handoff
    }

    /// Owner gate for out-of-tick operations. Checks the record itself, so a
    /// host that just lost ownership stops mutating before its next tick.
    fn owns(&mut self, record: &dyn Record) -> bool {
        self.observe_authority(record);
        self.sync.is_owner()
    }

    fn simulate(&mut self, dt: f32, env: &mut Env<'_>, surroundings: &Surroundings) {
        let world = env.world;

        self.status.tick(dt);
        self.food.tick(dt, &mut self.vitals, &mut self.events);
        {
            let mut ctx = ConsumeContext {
                world,
                inventory: &mut *env.inventory,
                status: &mut self.status,
                vitals: &mut self.vitals,
                events: &mut self.events,
            };
            self.food.tick_auto_consume(dt, &mut ctx);
        }

        let multiplier = self.rested.modifiers().health_regen_multiplier;
        let regen = self.food.health_regen(dt, multiplier);
        let max_health = self.max_health();
        self.vitals.heal(regen, max_health);

        let rest_tick = {
            let mut ctx = RestContext {
                world,
                locomotion: &mut *env.locomotion,
                surroundings,
            };
            self.rest.tick(dt, &mut ctx)
        };
        self.vitals.heal(rest_tick.heal, max_health);
        self.apply_rest_transitions(world, surroundings.position);

        let position = surroundings.position;
        self.rested
            .tick(dt, || world.comfort_at(position).level(), &mut self.events);

        self.stamina.tick(
            dt,
            self.food.total_stamina_bonus(),
            &surroundings.motion,
            self.rested.stamina_regen_factor(),
        );
    }

    /// Turns rest transitions into stamina, rested buff and `in_bed` effects.
    fn apply_rest_transitions(&mut self, world: &dyn WorldOracle, position: Position) {
        for transition in self.rest.take_transitions() {
            match transition {
                RestTransition::Approaching { kind } => {
                    self.events.push(NeedsEvent::RestApproach { kind });
                }
                RestTransition::Started { kind, directed } => {
                    self.stamina.set_resting(true);
                    match kind {
                        RestTargetKind::Fire => self.rested.start_resting(),
                        RestTargetKind::Bed => {
                            let comfort = world.comfort_at(position).level();
                            self.rested.apply(comfort, &mut self.events);
                            self.in_bed_dirty = true;
                        }
                    }
                    self.events.push(NeedsEvent::RestStarted { kind, directed });
                }
                RestTransition::Stopped { from, reason } => {
                    self.stamina.set_resting(false);
                    self.rested.stop_resting();
                    if from == RestMode::Sleeping {
                        let comfort = world.comfort_at(position).level();
                        self.rested.apply(comfort, &mut self.events);
                        self.in_bed_dirty = true;
                    }
                    self.events.push(NeedsEvent::RestStopped { reason });
                }
            }
        }
    }

    // ========================================================================
    // Owner operations
    // ========================================================================
    //
    // Every operation below reads the current owner from `record` and is a
    // no-op returning false unless it is this host.

    /// Eats an item now, outside the auto-consume schedule.
    pub fn try_consume(
        &mut self,
        item: &ItemDescriptor,
        env: &mut Env<'_>,
        record: &dyn Record,
    ) -> bool {
        if !self.owns(record) {
            return false;
        }
        let mut ctx = ConsumeContext {
            world: env.world,
            inventory: &mut *env.inventory,
            status: &mut self.status,
            vitals: &mut self.vitals,
            events: &mut self.events,
        };
        match self.food.consume(item, &mut ctx) {
            Ok(_) => {
                self.stamina.update_max(self.food.total_stamina_bonus());
                true
            }
            Err(error) => {
                debug!(target: "companion::food", item = %item.name, %error, "Consumption refused");
                false
            }
        }
    }

    /// Replaces a refreshable slot with `item`.
    pub fn try_refresh(
        &mut self,
        item: &ItemDescriptor,
        slot: usize,
        env: &mut Env<'_>,
        record: &dyn Record,
    ) -> bool {
        if !self.owns(record) {
            return false;
        }
        let mut ctx = ConsumeContext {
            world: env.world,
            inventory: &mut *env.inventory,
            status: &mut self.status,
            vitals: &mut self.vitals,
            events: &mut self.events,
        };
        let refreshed = self.food.try_refresh(item, slot, &mut ctx);
        if refreshed {
            self.stamina.update_max(self.food.total_stamina_bonus());
        }
        refreshed
    }

    pub fn command_sit(
        &mut self,
        fire: EntityHandle,
        env: &mut Env<'_>,
        surroundings: &Surroundings,
        record: &dyn Record,
    ) -> bool {
        self.with_rest(env, surroundings, record, |rest, ctx| {
            rest.command_sit(fire, ctx)
        })
    }

    pub fn command_sleep(
        &mut self,
        bed: EntityHandle,
        env: &mut Env<'_>,
        surroundings: &Surroundings,
        record: &dyn Record,
    ) -> bool {
        self.with_rest(env, surroundings, record, |rest, ctx| {
            rest.command_sleep(bed, ctx)
        })
    }

    /// Locomotion reached the rest target.
    pub fn on_arrived(
        &mut self,
        env: &mut Env<'_>,
        surroundings: &Surroundings,
        record: &dyn Record,
    ) -> bool {
        self.with_rest(env, surroundings, record, |rest, ctx| rest.on_arrived(ctx))
    }

    pub fn stop_rest(
        &mut self,
        env: &mut Env<'_>,
        surroundings: &Surroundings,
        record: &dyn Record,
    ) -> bool {
        self.with_rest(env, surroundings, record, |rest, ctx| {
            rest.stop_all(RestStopReason::Commanded, ctx)
        })
    }

    fn with_rest(
        &mut self,
        env: &mut Env<'_>,
        surroundings: &Surroundings,
        record: &dyn Record,
        command: impl FnOnce(&mut RestStateMachine, &mut RestContext<'_>) -> bool,
    ) -> bool {
        if !self.owns(record) {
            return false;
        }
        let changed = {
            let mut ctx = RestContext {
                world: env.world,
                locomotion: &mut *env.locomotion,
                surroundings,
            };
            command(&mut self.rest, &mut ctx)
        };
        self.apply_rest_transitions(env.world, surroundings.position);
        changed
    }

    /// Raises a skill, adding the rested bonus while the buff is active.
    pub fn raise_skill(&mut self, skill: SkillId, factor: f32, record: &dyn Record) -> bool {
        if !self.owns(record) {
            return false;
        }
        let bonus = self.rested.modifiers().skill_xp_modifier;
        self.skills.raise(skill, factor, bonus, &mut self.events)
    }

    /// Death hook: applies the skill penalty.
    pub fn on_death(&mut self, record: &dyn Record) {
        if self.owns(record) {
            self.skills.on_death();
        }
    }

    /// The stamina pool on the owner, with its max brought up to the food
    /// eaten since the last tick.
    pub(crate) fn owned_stamina(&mut self, record: &dyn Record) -> Option<&mut StaminaController> {
        if !self.owns(record) {
            return None;
        }
        self.stamina.update_max(self.food.total_stamina_bonus());
        Some(&mut self.stamina)
    }

    pub(crate) fn owned_skills(
        &mut self,
        record: &dyn Record,
    ) -> Option<(&mut SkillProgressionTracker, f32, &mut EventLog)> {
        if !self.owns(record) {
            return None;
        }
        let bonus = self.rested.modifiers().skill_xp_modifier;
        Some((&mut self.skills, bonus, &mut self.events))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Overwrites local state from the record.
    pub fn load(&mut self, record: &dyn Record) {
        for (index, key) in keys::FOOD_SLOT_KEYS.iter().enumerate() {
            let raw = record.get_str(key).unwrap_or_default();
            let slot = decode_food_slot(raw).unwrap_or_else(|error| {
                warn!(target: "companion::sync", key, %error, "Dropping malformed food slot");
                FoodSlot::default()
            });
            self.food.restore_slot(index, slot);
        }
        self.food.take_dirty();

        self.stamina.update_max(self.food.total_stamina_bonus());
        self.stamina.load(record);
        self.skills.load(record);
        self.rested.load(record);
        self.mirrored_in_bed = record.get_bool(keys::IN_BED).unwrap_or(false);
        self.in_bed_dirty = false;
        self.vitals.clamp_to(self.max_health());

        debug!(
            target: "companion::sync",
            host = self.host.0,
            food = self.food.active_count(),
            stamina = self.stamina.current(),
            "Loaded from record"
        );
    }

    /// Writes every dirty subsystem now. False when this host is not the owner.
    pub fn flush(&mut self, record: &mut dyn Record) -> bool {
        self.write(record, FlushDue::ALL)
    }

    /// Final flush before the agent is destroyed.
    pub fn teardown(&mut self, record: &mut dyn Record) -> bool {
        let flushed = self.flush(record);
        if flushed {
            info!(target: "companion::sync", host = self.host.0, "Final flush on teardown");
        }
        flushed
    }

    fn write(&mut self, record: &mut dyn Record, due: FlushDue) -> bool {
        let Some(mut writer) = RecordWriter::for_host(record, self.host) else {
            return false;
        };

        if due.food && self.food.take_dirty() {
            for (key, slot) in keys::FOOD_SLOT_KEYS.iter().zip(self.food.slots()) {
                writer.set_str(key, encode_food_slot(slot));
            }
        }
        if due.skills && self.skills.is_dirty() {
            self.skills.flush(&mut writer);
        }
        if due.stamina && self.stamina.is_dirty() {
            self.stamina.flush(&mut writer);
        }
        if self.in_bed_dirty {
            writer.set_bool(keys::IN_BED, self.rest.in_bed());
            self.in_bed_dirty = false;
        }
        if self.rested.is_dirty() {
            self.rested.flush(&mut writer);
        }
        true
    }

    // ========================================================================
    // World reload
    // ========================================================================

    /// Swaps in reloaded tables and resets every cache derived from them.
    pub fn on_world_reload(&mut self, tables: Tables) {
        self.rested.reset_cache(tables.balance.clone());
        self.skills
            .reset_tables(tables.skills.clone(), tables.balance.clone());
        self.tables = tables;
        info!(target: "companion::sync", host = self.host.0, "Tables reloaded");
    }
}
