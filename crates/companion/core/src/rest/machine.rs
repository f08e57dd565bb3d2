use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::RestConfig;
use crate::env::{Behavior, Locomotion, RestTargetView, Surroundings, WorldOracle};
use crate::state::{EntityHandle, IntervalTimer, RestMode, RestRecord, RestTarget, RestTargetKind, sanitize};

use super::{RestStopReason, RestTransition};

/// Undrained transitions kept; the oldest is dropped past this.
const MAX_PENDING: usize = 4;

/// Collaborators for one rest update.
pub struct RestContext<'a> {
    pub world: &'a dyn WorldOracle,
    pub locomotion: &'a mut dyn Locomotion,
    pub surroundings: &'a Surroundings,
}

/// Result of one [`RestStateMachine::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RestTick {
    /// Health to restore this frame.
    pub heal: f32,
}

#[derive(Clone, Debug)]
pub struct RestStateMachine {
    record: RestRecord,
    config: RestConfig,
    organic_timer: IntervalTimer,
    heal_timer: IntervalTimer,
    pending: ArrayVec<RestTransition, MAX_PENDING>,
}

impl RestStateMachine {
    pub fn new(config: RestConfig) -> Self {
        Self {
            record: RestRecord::default(),
            organic_timer: IntervalTimer::new(config.organic_check_interval),
            heal_timer: IntervalTimer::new(config.heal_interval),
            config,
            pending: ArrayVec::new(),
        }
    }

    pub fn record(&self) -> &RestRecord {
        &self.record
    }

    pub fn mode(&self) -> RestMode {
        self.record.mode
    }

    pub fn is_resting(&self) -> bool {
        self.record.mode.is_resting()
    }

    pub fn in_bed(&self) -> bool {
        self.record.mode == RestMode::Sleeping
    }

    /// Transitions since the last call, oldest first.
    pub fn take_transitions(&mut self) -> ArrayVec<RestTransition, MAX_PENDING> {
        std::mem::take(&mut self.pending)
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    pub fn tick(&mut self, dt: f32, ctx: &mut RestContext<'_>) -> RestTick {
        let dt = sanitize(dt).max(0.0);
        match self.record.mode {
            RestMode::Idle => {
                if self.organic_timer.advance(dt) {
                    self.organic_check(ctx);
                }
                RestTick::default()
            }
            RestMode::Navigating => {
                self.watch_navigation(dt, ctx);
                RestTick::default()
            }
            RestMode::Sitting => self.hold_sitting(dt, ctx),
            RestMode::Sleeping => self.hold_sleeping(dt, ctx),
        }
    }

    fn organic_check(&mut self, ctx: &mut RestContext<'_>) {
        let here = ctx.surroundings.position;
        let Some(controller) = ctx.surroundings.controller else {
            return;
        };
        let recently_sat = controller
            .sitting_for
            .is_some_and(|t| t <= self.config.sit_gesture_window);
        if !recently_sat
            || !ctx.surroundings.is_following(controller.handle)
            || !here.within(&controller.position, self.config.player_radius)
        {
            return;
        }
        let Some(fire) = ctx.world.nearest_burning_fire(here, self.config.fire_radius) else {
            return;
        };
        if ctx.world.hostile_within(here, self.config.hostile_radius) {
            return;
        }
        let Some(view) = ctx.world.rest_target(fire) else {
            return;
        };
        let target = RestTarget {
            handle: fire,
            kind: RestTargetKind::Fire,
        };
        self.commit(target, view, false, ctx);
    }

    fn watch_navigation(&mut self, dt: f32, ctx: &mut RestContext<'_>) {
        self.record.nav_timeout_remaining -= dt;
        let alive = self
            .record
            .target
            .and_then(|t| ctx.world.rest_target(t.handle))
            .is_some();
        if !alive {
            self.stop_all(RestStopReason::TargetLost, ctx);
        } else if self.record.nav_timeout_remaining <= 0.0 {
            self.stop_all(RestStopReason::Timeout, ctx);
        }
    }

    fn hold_sitting(&mut self, dt: f32, ctx: &mut RestContext<'_>) -> RestTick {
        let view = self
            .record
            .target
            .and_then(|t| ctx.world.rest_target(t.handle));
        let Some(fire) = view else {
            self.stop_all(RestStopReason::TargetLost, ctx);
            return RestTick::default();
        };
        if let Some(reason) = self.sitting_interruption(&fire, ctx) {
            self.stop_all(reason, ctx);
            return RestTick::default();
        }

        ctx.locomotion.stop();
        ctx.locomotion.face(fire.position);
        self.heal(dt)
    }

    fn sitting_interruption(
        &self,
        fire: &RestTargetView,
        ctx: &RestContext<'_>,
    ) -> Option<RestStopReason> {
        let here = ctx.surroundings.position;
        if !fire.burning {
            return Some(RestStopReason::FireOut);
        }
        if ctx.world.hostile_within(here, self.config.hostile_radius) {
            return Some(RestStopReason::Hostile);
        }
        if self.record.directed {
            return None;
        }

        let Some(controller) = ctx.surroundings.controller else {
            return Some(RestStopReason::ControllerLeft);
        };
        if !controller.is_sitting() {
            Some(RestStopReason::ControllerLeft)
        } else if !ctx.surroundings.is_following(controller.handle) {
            Some(RestStopReason::FollowDisengaged)
        } else if !here.within(&controller.position, self.config.player_radius) {
            Some(RestStopReason::OutOfRange)
        } else {
            None
        }
    }

    fn hold_sleeping(&mut self, dt: f32, ctx: &mut RestContext<'_>) -> RestTick {
        let view = self
            .record
            .target
            .and_then(|t| ctx.world.rest_target(t.handle));
        let Some(bed) = view else {
            self.stop_all(RestStopReason::TargetLost, ctx);
            return RestTick::default();
        };
        if ctx
            .world
            .hostile_within(ctx.surroundings.position, self.config.hostile_radius)
        {
            self.stop_all(RestStopReason::Hostile, ctx);
            return RestTick::default();
        }

        Self::pin_to(&bed, ctx.locomotion);
        self.heal(dt)
    }

    fn heal(&mut self, dt: f32) -> RestTick {
        let heal = if self.heal_timer.advance(dt) {
            self.config.heal_amount
        } else {
            0.0
        };
        RestTick { heal }
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Directed sit at a fire. Returns whether the command changed state.
    pub fn command_sit(&mut self, fire: EntityHandle, ctx: &mut RestContext<'_>) -> bool {
        self.command(fire, RestTargetKind::Fire, ctx)
    }

    /// Directed sleep in a bed. Returns whether the command changed state.
    pub fn command_sleep(&mut self, bed: EntityHandle, ctx: &mut RestContext<'_>) -> bool {
        self.command(bed, RestTargetKind::Bed, ctx)
    }

    fn command(&mut self, handle: EntityHandle, kind: RestTargetKind, ctx: &mut RestContext<'_>) -> bool {
        let directed_rest = self.record.directed && self.record.mode.is_resting();
        let approaching_same = self.record.mode == RestMode::Navigating
            && self.record.target_kind() == Some(kind);
        if directed_rest || approaching_same {
            return self.stop_all(RestStopReason::Toggled, ctx);
        }

        let Some(view) = ctx.world.rest_target(handle) else {
            debug!(target: "companion::rest", ?handle, "Rest target not found");
            return false;
        };
        if view.kind != kind || (kind == RestTargetKind::Fire && !view.burning) {
            debug!(
                target: "companion::rest",
                ?handle,
                expected = ?kind,
                found = ?view.kind,
                burning = view.burning,
                "Rest target unusable"
            );
            return false;
        }

        self.stop_all(RestStopReason::Commanded, ctx);

        let target = RestTarget { handle, kind };
        let here = ctx.surroundings.position;
        if here.within(&view.position, self.config.commit_distance) {
            self.commit(target, view, true, ctx);
        } else {
            let destination = view.attach.map_or(view.position, |a| a.position);
            self.record = RestRecord {
                mode: RestMode::Navigating,
                directed: true,
                target: Some(target),
                nav_target: destination,
                nav_timeout_remaining: self.config.nav_timeout,
            };
            ctx.locomotion.move_to(destination);
            debug!(
                target: "companion::rest",
                kind = ?kind,
                distance = here.distance(&view.position),
                "Navigating to rest target"
            );
            self.report(RestTransition::Approaching { kind });
        }
        true
    }

    /// Arrival signal from locomotion. Commits if still navigating.
    pub fn on_arrived(&mut self, ctx: &mut RestContext<'_>) -> bool {
        if self.record.mode != RestMode::Navigating {
            return false;
        }
        let Some(target) = self.record.target else {
            return self.stop_all(RestStopReason::TargetLost, ctx);
        };
        match ctx.world.rest_target(target.handle) {
            Some(view) if target.kind == RestTargetKind::Fire && !view.burning => {
                self.stop_all(RestStopReason::FireOut, ctx)
            }
            Some(view) => {
                self.commit(target, view, self.record.directed, ctx);
                true
            }
            None => self.stop_all(RestStopReason::TargetLost, ctx),
        }
    }

    fn commit(
        &mut self,
        target: RestTarget,
        view: RestTargetView,
        directed: bool,
        ctx: &mut RestContext<'_>,
    ) {
        let mode = match target.kind {
            RestTargetKind::Fire => RestMode::Sitting,
            RestTargetKind::Bed => RestMode::Sleeping,
        };
        self.record = RestRecord {
            mode,
            directed,
            target: Some(target),
            nav_target: view.position,
            nav_timeout_remaining: 0.0,
        };
        self.heal_timer.reset();

        ctx.locomotion.stop();
        match target.kind {
            RestTargetKind::Fire => ctx.locomotion.face(view.position),
            RestTargetKind::Bed => Self::pin_to(&view, ctx.locomotion),
        }

        info!(
            target: "companion::rest",
            mode = mode.as_str(),
            directed,
            handle = ?target.handle,
            "Rest started"
        );
        self.report(RestTransition::Started {
            kind: target.kind,
            directed,
        });
    }

    fn report(&mut self, transition: RestTransition) {
        if self.pending.is_full() {
            self.pending.remove(0);
        }
        self.pending.push(transition);
    }

    fn pin_to(bed: &RestTargetView, locomotion: &mut dyn Locomotion) {
        match bed.attach {
            Some(attach) => locomotion.pin(attach.position, attach.yaw),
            None => locomotion.pin(bed.position, 0.0),
        }
    }

    /// Leaves any rest or approach and hands locomotion back to the regular
    /// behaviour. Returns false when already idle.
    pub fn stop_all(&mut self, reason: RestStopReason, ctx: &mut RestContext<'_>) -> bool {
        let from = self.record.mode;
        if from == RestMode::Idle {
            return false;
        }
        self.record = RestRecord::default();
        self.organic_timer.reset();

        match ctx.surroundings.behavior {
            Behavior::Follow(leader) => ctx.locomotion.follow(leader),
            Behavior::Hold(point) => ctx.locomotion.hold(point),
        }

        debug!(
            target: "companion::rest",
            from = from.as_str(),
            reason = reason.as_str(),
            "Rest stopped"
        );
        self.report(RestTransition::Stopped { from, reason });
        true
    }
}
