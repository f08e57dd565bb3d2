//! Owner/mirror cadence.
//!
//! The owner flushes each subsystem on its own interval; every other host
//! polls the record and overwrites its mirror. A host that gains ownership
//! reloads from the record once before it starts simulating, so state written
//! by the previous owner is never lost.

use tracing::info;

use crate::codec::{HostId, Record};
use crate::config::SyncConfig;
use crate::state::IntervalTimer;

/// This host's role for one agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Authority {
    Owner,
    Mirror,
}

impl Authority {
    pub fn of(record: &dyn Record, host: HostId) -> Self {
        if record.is_owned_by(host) {
            Self::Owner
        } else {
            Self::Mirror
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Mirror => "mirror",
        }
    }
}

/// Role change observed at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    Unchanged,
    /// First tick as owner, or ownership just arrived. Reload before simulating.
    BecameOwner,
    /// First tick as mirror, or ownership just left. Poll right away.
    BecameMirror,
}

/// Subsystems whose flush interval elapsed this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushDue {
    pub food: bool,
    pub skills: bool,
    pub stamina: bool,
}

impl FlushDue {
    pub const ALL: Self = Self {
        food: true,
        skills: true,
        stamina: true,
    };
}

#[derive(Clone, Debug)]
pub struct SyncSchedule {
    food: IntervalTimer,
    skills: IntervalTimer,
    stamina: IntervalTimer,
    poll: IntervalTimer,
    authority: Option<Authority>,
}

impl SyncSchedule {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            food: IntervalTimer::new(config.food_flush_interval),
            skills: IntervalTimer::new(config.skills_flush_interval),
            stamina: IntervalTimer::new(config.stamina_flush_interval),
            poll: IntervalTimer::new(config.poll_interval),
            authority: None,
        }
    }

    /// Role as of the last [`Self::observe`]; `None` before the first tick.
    pub fn authority(&self) -> Option<Authority> {
        self.authority
    }

    pub fn is_owner(&self) -> bool {
        self.authority == Some(Authority::Owner)
    }

    /// Records this tick's role and reports any change. Timers restart on
    /// every change.
    pub fn observe(&mut self, authority: Authority, host: HostId) -> Handoff {
        if self.authority == Some(authority) {
            return Handoff::Unchanged;
        }
        let previous = self.authority.replace(authority);
        for timer in [&mut self.food, &mut self.skills, &mut self.stamina, &mut self.poll] {
            timer.reset();
        }
        info!(
            target: "companion::sync",
            host = host.0,
            from = previous.map(|a| a.as_str()),
            to = authority.as_str(),
            "Authority changed"
        );
        match authority {
            Authority::Owner => Handoff::BecameOwner,
            Authority::Mirror => Handoff::BecameMirror,
        }
    }

    /// Advances the owner flush timers.
    pub fn owner_tick(&mut self, dt: f32) -> FlushDue {
        FlushDue {
            food: self.food.advance(dt),
            skills: self.skills.advance(dt),
            stamina: self.stamina.advance(dt),
        }
    }

    /// Advances the mirror poll timer; true when a poll is due.
    pub fn mirror_tick(&mut self, dt: f32) -> bool {
        self.poll.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MemoryRecord;

    #[test]
    fn authority_follows_record_owner() {
        let mut record = MemoryRecord::new(HostId(1));
        assert_eq!(Authority::of(&record, HostId(1)), Authority::Owner);
        assert_eq!(Authority::of(&record, HostId(2)), Authority::Mirror);
        record.set_owner(None);
        assert_eq!(Authority::of(&record, HostId(1)), Authority::Mirror);
    }

    #[test]
    fn handoff_is_reported_once() {
        let mut sync = SyncSchedule::new(&SyncConfig::default());
        assert_eq!(sync.authority(), None);
        assert_eq!(sync.observe(Authority::Mirror, HostId(2)), Handoff::BecameMirror);
        assert_eq!(sync.observe(Authority::Mirror, HostId(2)), Handoff::Unchanged);
        assert_eq!(sync.observe(Authority::Owner, HostId(2)), Handoff::BecameOwner);
        assert!(sync.is_owner());
    }

    #[test]
    fn owner_intervals_are_independent() {
        let mut sync = SyncSchedule::new(&SyncConfig::default());
        sync.observe(Authority::Owner, HostId(1));

        let mut food_flushes = 0;
        let mut stamina_flushes = 0;
        for _ in 0..10 {
            let due = sync.owner_tick(1.0);
            food_flushes += usize::from(due.food);
            stamina_flushes += usize::from(due.stamina);
        }
        assert_eq!(food_flushes, 2);
        assert_eq!(stamina_flushes, 10);
    }

    #[test]
    fn mirror_polls_every_half_second() {
        let mut sync = SyncSchedule::new(&SyncConfig::default());
        sync.observe(Authority::Mirror, HostId(2));
        assert!(!sync.mirror_tick(0.25));
        assert!(sync.mirror_tick(0.25));
        assert!(!sync.mirror_tick(0.25));
    }
}
