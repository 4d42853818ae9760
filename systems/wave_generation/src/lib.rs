#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave generation system.
//!
//! Translates a `WaveStarted` event into a schedule of `SpawnEnemy`
//! commands. The composition is a closed-form function of the wave
//! number, and spawn delays accumulate across the schedule so enemies
//! trickle in rather than arriving in one clump.

use std::time::Duration;

use rampart_core::{Command, EnemyKind, Event, WaveComposition, WaveNumber};

/// Gap between consecutive normal enemy spawns.
const NORMAL_CADENCE: Duration = Duration::from_millis(650);
/// Gap between consecutive fast enemy spawns.
const FAST_CADENCE: Duration = Duration::from_millis(550);
/// Gap between consecutive tank enemy spawns.
const TANK_CADENCE: Duration = Duration::from_millis(1_100);

/// Pure system that schedules the enemy roster for each started wave.
#[derive(Debug, Default)]
pub struct WaveGeneration;

impl WaveGeneration {
    /// Consumes world events and emits the spawn schedule for every wave
    /// that started.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::WaveStarted { wave } = event {
                schedule_wave(*wave, out);
            }
        }
    }
}

fn schedule_wave(wave: WaveNumber, out: &mut Vec<Command>) {
    let composition = WaveComposition::for_wave(wave);
    let mut offset = Duration::ZERO;

    let mut push_group = |kind: EnemyKind, count: u32, cadence: Duration| {
        let stats = kind.stats_for_wave(wave);
        for _ in 0..count {
            out.push(Command::SpawnEnemy {
                kind,
                health: stats.health,
                speed: stats.speed,
                reward: stats.reward,
                delay: offset,
            });
            offset = offset.saturating_add(cadence);
        }
    };

    push_group(EnemyKind::Normal, composition.normal, NORMAL_CADENCE);
    push_group(EnemyKind::Fast, composition.fast, FAST_CADENCE);
    push_group(EnemyKind::Tank, composition.tank, TANK_CADENCE);
    push_group(EnemyKind::Boss, composition.boss, Duration::ZERO);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawns_for(wave: u32) -> Vec<Command> {
        let mut generation = WaveGeneration;
        let mut out = Vec::new();
        generation.handle(
            &[Event::WaveStarted {
                wave: WaveNumber::new(wave),
            }],
            &mut out,
        );
        out
    }

    fn kind_of(command: &Command) -> EnemyKind {
        match command {
            Command::SpawnEnemy { kind, .. } => *kind,
            other => panic!("expected SpawnEnemy, got {other:?}"),
        }
    }

    fn delay_of(command: &Command) -> Duration {
        match command {
            Command::SpawnEnemy { delay, .. } => *delay,
            other => panic!("expected SpawnEnemy, got {other:?}"),
        }
    }

    #[test]
    fn first_wave_is_six_normals_on_the_normal_cadence() {
        let spawns = spawns_for(1);
        assert_eq!(spawns.len(), 6);
        for (index, command) in spawns.iter().enumerate() {
            assert_eq!(kind_of(command), EnemyKind::Normal);
            assert_eq!(delay_of(command), NORMAL_CADENCE * index as u32);
        }
    }

    #[test]
    fn spawned_stats_follow_the_wave_scaling() {
        let spawns = spawns_for(3);
        match &spawns[0] {
            Command::SpawnEnemy {
                kind,
                health,
                speed,
                reward,
                ..
            } => {
                assert_eq!(*kind, EnemyKind::Normal);
                assert!((*health - 76.0).abs() < f32::EPSILON, "40 + 12 * 3");
                assert!((*speed - 1.21).abs() < 1e-6, "1.0 + 0.07 * 3");
                assert_eq!(*reward, 18, "12 + 2 * 3");
            }
            other => panic!("expected SpawnEnemy, got {other:?}"),
        }
    }

    #[test]
    fn later_waves_mix_in_fast_and_tank_groups() {
        let spawns = spawns_for(4);
        let composition = WaveComposition::for_wave(WaveNumber::new(4));
        assert_eq!(spawns.len() as u32, composition.total());

        let normals = spawns
            .iter()
            .filter(|command| kind_of(command) == EnemyKind::Normal);
        let fasts: Vec<_> = spawns
            .iter()
            .filter(|command| kind_of(command) == EnemyKind::Fast)
            .collect();
        let tanks: Vec<_> = spawns
            .iter()
            .filter(|command| kind_of(command) == EnemyKind::Tank)
            .collect();
        assert_eq!(normals.count() as u32, composition.normal);
        assert_eq!(fasts.len() as u32, composition.fast);
        assert_eq!(tanks.len() as u32, composition.tank);

        // The fast group starts where the normal group left off.
        let normal_span = NORMAL_CADENCE * composition.normal;
        assert_eq!(delay_of(fasts[0]), normal_span);
        assert_eq!(delay_of(fasts[1]), normal_span + FAST_CADENCE);
    }

    #[test]
    fn every_fifth_wave_ends_with_a_single_boss() {
        let spawns = spawns_for(5);
        let bosses: Vec<_> = spawns
            .iter()
            .filter(|command| kind_of(command) == EnemyKind::Boss)
            .collect();
        assert_eq!(bosses.len(), 1);

        let last = spawns.last().expect("wave 5 is non-empty");
        assert_eq!(kind_of(last), EnemyKind::Boss);
        let max_delay = spawns.iter().map(delay_of).max().expect("non-empty");
        assert_eq!(delay_of(last), max_delay);
    }

    #[test]
    fn unrelated_events_schedule_nothing() {
        let mut generation = WaveGeneration;
        let mut out = Vec::new();
        generation.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(16),
            }],
            &mut out,
        );
        assert!(out.is_empty());
    }
}
