//! Wave scheduling and the spawn timeline.
//!
//! `WaveScheduler` tracks the current wave, how many of its enemies have
//! spawned and how many are still alive. The timeline is a tick countdown:
//! the first enemy spawns on the tick the wave starts, then one every
//! `spawn_interval` until the wave's count is issued.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use holdout_core::config::{ArenaConfig, EnemyTemplate, WaveSpec};
use holdout_core::events::Notification;
use holdout_core::types::{secs_to_ticks, Position, WaveTag};

use crate::world_setup;

/// In-flight spawn timeline for one wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpawnTimeline {
    to_spawn: u32,
    countdown: u64,
    interval_ticks: u64,
}

/// Result of asking for the next wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveStart {
    /// Zero-based index of the wave that started.
    Started(usize),
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    waves: Vec<WaveSpec>,
    current: Option<usize>,
    /// Bumped on every wave start or restart.
    run: u32,
    spawned: u32,
    remaining: u32,
    timeline: Option<SpawnTimeline>,
    cleared_signalled: bool,
}

impl WaveScheduler {
    pub fn new(waves: Vec<WaveSpec>) -> Self {
        Self {
            waves,
            current: None,
            run: 0,
            spawned: 0,
            remaining: 0,
            timeline: None,
            cleared_signalled: false,
        }
    }

    pub fn total_waves(&self) -> u32 {
        self.waves.len() as u32
    }

    /// Zero-based index of the current wave, if one has started.
    pub fn current_wave(&self) -> Option<usize> {
        self.current
    }

    /// 1-based wave number for display; 0 before the first wave.
    pub fn wave_number(&self) -> u32 {
        self.current.map_or(0, |i| i as u32 + 1)
    }

    /// Tag stamped on enemies spawned by the current wave run.
    pub fn current_tag(&self) -> Option<WaveTag> {
        self.current.map(|index| WaveTag {
            index,
            run: self.run,
        })
    }

    pub fn current_spec(&self) -> Option<&WaveSpec> {
        self.current.and_then(|i| self.waves.get(i))
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_spawning(&self) -> bool {
        self.timeline.is_some()
    }

    /// Advance to the next wave and start its timeline.
    pub fn start_next_wave(&mut self, notifications: &mut Vec<Notification>) -> WaveStart {
        let next = self.current.map_or(0, |i| i + 1);
        if next >= self.waves.len() {
            self.cancel();
            info!(waves = self.waves.len(), "wave sequence exhausted");
            return WaveStart::Exhausted;
        }
        self.current = Some(next);
        self.begin(next, notifications);
        WaveStart::Started(next)
    }

    /// Restart the current wave from its first spawn. No-op before the first wave.
    /// Enemies left over from the aborted run no longer count toward the wave.
    pub fn restart_wave(&mut self, notifications: &mut Vec<Notification>) -> bool {
        match self.current {
            Some(index) => {
                self.begin(index, notifications);
                true
            }
            None => false,
        }
    }

    /// Push the current wave progress and remaining count, for adapters
    /// that need to initialize their display.
    pub fn announce(&self, notifications: &mut Vec<Notification>) {
        notifications.push(Notification::WaveProgress {
            current: self.wave_number(),
            total: self.total_waves(),
        });
        notifications.push(Notification::EnemiesRemaining {
            count: self.remaining,
        });
    }

    /// Drop the in-flight timeline.
    pub fn cancel(&mut self) {
        self.timeline = None;
    }

    /// Back to before the first wave.
    pub fn reset(&mut self) {
        self.current = None;
        self.run = 0;
        self.spawned = 0;
        self.remaining = 0;
        self.timeline = None;
        self.cleared_signalled = false;
    }

    fn begin(&mut self, index: usize, notifications: &mut Vec<Notification>) {
        let Some(spec) = self.waves.get(index).copied() else {
            return;
        };
        self.run = self.run.wrapping_add(1);
        self.spawned = 0;
        self.remaining = spec.enemy_count;
        self.cleared_signalled = false;
        self.timeline = Some(SpawnTimeline {
            to_spawn: spec.enemy_count,
            countdown: 0,
            interval_ticks: secs_to_ticks(spec.spawn_interval),
        });

        info!(
            wave = index + 1,
            total = self.waves.len(),
            enemies = spec.enemy_count,
            "wave started"
        );
        notifications.push(Notification::WaveProgress {
            current: index as u32 + 1,
            total: self.total_waves(),
        });
        notifications.push(Notification::EnemiesRemaining {
            count: self.remaining,
        });
    }

    /// Count a death (or escape) of an enemy tagged `wave`.
    /// Enemies from other waves, from an aborted run of this wave, or spawned
    /// outside the scheduler are ignored.
    pub fn record_enemy_death(
        &mut self,
        wave: Option<WaveTag>,
        notifications: &mut Vec<Notification>,
    ) -> bool {
        let current = self.current_tag();
        if wave.is_none() || wave != current {
            debug!(?wave, ?current, "death outside the current wave run ignored");
            return false;
        }
        if self.remaining == 0 {
            warn!(wave = self.wave_number(), "enemy death with none remaining; clamped to zero");
        } else {
            self.remaining -= 1;
        }
        notifications.push(Notification::EnemiesRemaining {
            count: self.remaining,
        });
        true
    }

    /// All enemies of the current wave have spawned and none remain.
    pub fn is_cleared(&self) -> bool {
        match self.current_spec() {
            Some(spec) => self.spawned >= spec.enemy_count && self.remaining == 0,
            None => false,
        }
    }

    /// True the first time the current wave is observed cleared, false after.
    pub fn take_cleared(&mut self) -> bool {
        if self.cleared_signalled || !self.is_cleared() {
            return false;
        }
        self.cleared_signalled = true;
        info!(wave = self.wave_number(), "wave cleared");
        true
    }

    /// Advance the timeline one tick. Returns true if an enemy is due this tick.
    pub fn next_spawn(&mut self) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };

        let due = timeline.countdown == 0;
        if due {
            timeline.to_spawn -= 1;
            timeline.countdown = timeline.interval_ticks;
            self.spawned += 1;
        }
        timeline.countdown = timeline.countdown.saturating_sub(1);

        if timeline.to_spawn == 0 {
            self.timeline = None;
        }
        due
    }
}

/// Advance the spawn timeline and place any enemy that is due.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    scheduler: &mut WaveScheduler,
    arena: &ArenaConfig,
    enemy: &EnemyTemplate,
) {
    if !scheduler.next_spawn() {
        return;
    }
    let (Some(tag), Some(spec)) = (scheduler.current_tag(), scheduler.current_spec().copied())
    else {
        return;
    };

    let lo = arena.enemy_spawn_margin;
    let hi = arena.width - arena.enemy_spawn_margin;
    let x = if lo < hi {
        rng.gen_range(lo..=hi)
    } else {
        arena.width * 0.5
    };

    let entity = world_setup::spawn_enemy(
        world,
        enemy,
        Position::new(x, arena.enemy_spawn_y),
        spec.health_multiplier,
        Some(tag),
    );
    debug!(?entity, wave = tag.index + 1, run = tag.run, x, "enemy spawned");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(counts: &[u32], interval: f32) -> WaveScheduler {
        WaveScheduler::new(
            counts
                .iter()
                .map(|&enemy_count| WaveSpec {
                    enemy_count,
                    spawn_interval: interval,
                    health_multiplier: 1.0,
                })
                .collect(),
        )
    }

    #[test]
    fn timeline_spawns_at_zero_n_two_n() {
        let mut s = scheduler(&[3], 0.5);
        let mut notes = Vec::new();
        assert_eq!(s.start_next_wave(&mut notes), WaveStart::Started(0));

        let due: Vec<u64> = (0..60u64).filter(|_| s.next_spawn()).collect();
        assert_eq!(due, vec![0, 15, 30]);
        assert_eq!(s.spawned(), 3);
        assert!(!s.is_spawning());
    }

    #[test]
    fn start_emits_progress_and_remaining() {
        let mut s = scheduler(&[4, 6], 1.0);
        let mut notes = Vec::new();
        s.start_next_wave(&mut notes);
        assert_eq!(
            notes,
            vec![
                Notification::WaveProgress {
                    current: 1,
                    total: 2
                },
                Notification::EnemiesRemaining { count: 4 },
            ]
        );
    }

    #[test]
    fn exhausted_past_last_wave() {
        let mut s = scheduler(&[1], 1.0);
        let mut notes = Vec::new();
        assert_eq!(s.start_next_wave(&mut notes), WaveStart::Started(0));
        assert_eq!(s.start_next_wave(&mut notes), WaveStart::Exhausted);
        assert!(!s.is_spawning());

        let mut empty = scheduler(&[], 1.0);
        assert_eq!(empty.start_next_wave(&mut notes), WaveStart::Exhausted);
    }

    #[test]
    fn cleared_exactly_once() {
        let mut s = scheduler(&[2], 0.0);
        let mut notes = Vec::new();
        s.start_next_wave(&mut notes);
        let tag = s.current_tag();
        s.next_spawn();
        s.record_enemy_death(tag, &mut notes);
        // One still to spawn.
        assert!(!s.take_cleared());

        s.next_spawn();
        s.record_enemy_death(tag, &mut notes);
        assert!(s.take_cleared());
        assert!(!s.take_cleared());
    }

    #[test]
    fn deaths_from_other_waves_are_ignored() {
        let mut s = scheduler(&[2, 2], 1.0);
        let mut notes = Vec::new();
        s.start_next_wave(&mut notes);
        let first = s.current_tag();
        s.start_next_wave(&mut notes);
        notes.clear();

        assert!(!s.record_enemy_death(first, &mut notes));
        assert!(!s.record_enemy_death(None, &mut notes));
        assert_eq!(s.remaining(), 2);
        assert!(notes.is_empty());
    }

    #[test]
    fn underflow_is_clamped() {
        let mut s = scheduler(&[1], 1.0);
        let mut notes = Vec::new();
        s.start_next_wave(&mut notes);
        let tag = s.current_tag();
        s.record_enemy_death(tag, &mut notes);
        s.record_enemy_death(tag, &mut notes);
        assert_eq!(s.remaining(), 0);
        assert_eq!(
            notes.last(),
            Some(&Notification::EnemiesRemaining { count: 0 })
        );
    }

    #[test]
    fn restart_resets_counts_without_advancing() {
        let mut s = scheduler(&[3, 3], 1.0);
        let mut notes = Vec::new();
        assert!(!s.restart_wave(&mut notes));

        s.start_next_wave(&mut notes);
        s.next_spawn();
        let tag = s.current_tag();
        s.record_enemy_death(tag, &mut notes);
        assert!(s.restart_wave(&mut notes));
        assert_eq!(s.current_wave(), Some(0));
        assert_eq!(s.spawned(), 0);
        assert_eq!(s.remaining(), 3);
        assert!(s.is_spawning());
    }

    #[test]
    fn restart_ignores_enemies_of_the_aborted_run() {
        let mut s = scheduler(&[3], 1.0);
        let mut notes = Vec::new();
        s.start_next_wave(&mut notes);
        let aborted = s.current_tag();
        s.next_spawn();

        s.restart_wave(&mut notes);
        let fresh = s.current_tag();
        assert_ne!(aborted, fresh);
        assert_eq!(fresh.map(|t| t.index), Some(0));

        assert!(!s.record_enemy_death(aborted, &mut notes));
        assert_eq!(s.remaining(), 3);
        for _ in 0..3 {
            while !s.next_spawn() {}
        }
        s.record_enemy_death(fresh, &mut notes);
        s.record_enemy_death(fresh, &mut notes);
        assert!(!s.take_cleared());
        s.record_enemy_death(fresh, &mut notes);
        assert!(s.take_cleared());
    }
}
