#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic projectile flight system.
//!
//! Every tick each projectile resolves to exactly one command: a discard
//! when its target vanished, an impact when it closed within the impact
//! radius, or a fixed-speed homing step toward the target's current
//! position.

use rampart_core::{Command, EnemyView, Event, ProjectileSnapshot, ProjectileView, IMPACT_RADIUS};

/// Pure system that reacts to world events and emits projectile commands.
#[derive(Debug, Default)]
pub struct Projectiles;

impl Projectiles {
    /// Consumes world events and immutable views to emit one command per
    /// projectile in flight.
    pub fn handle(
        &mut self,
        events: &[Event],
        projectile_view: &ProjectileView,
        enemy_view: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for projectile in projectile_view.iter() {
            out.push(resolve_flight(projectile, enemy_view));
        }
    }
}

fn resolve_flight(projectile: &ProjectileSnapshot, enemy_view: &EnemyView) -> Command {
    let Some(target) = enemy_view.get(projectile.target) else {
        return Command::DiscardProjectile {
            projectile: projectile.id,
        };
    };

    if projectile.position.distance_to(target.position) < IMPACT_RADIUS {
        return Command::ImpactProjectile {
            projectile: projectile.id,
        };
    }

    Command::AdvanceProjectile {
        projectile: projectile.id,
        to: projectile
            .position
            .step_toward(target.position, projectile.speed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::{
        EnemyId, EnemyKind, EnemySnapshot, ProjectileId, WorldPoint, PROJECTILE_SPEED,
    };
    use std::time::Duration;

    fn projectile_at(position: WorldPoint, target: u32) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: ProjectileId::new(7),
            position,
            target: EnemyId::new(target),
            damage: 12,
            speed: PROJECTILE_SPEED,
            explosive: false,
        }
    }

    fn enemy_at(id: u32, position: WorldPoint) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Normal,
            position,
            segment: 0,
            health: 40.0,
            max_health: 40.0,
            speed: 1.0,
            reward: 12,
            active: true,
            spawn_in: Duration::ZERO,
        }
    }

    fn tick_events() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]
    }

    #[test]
    fn distant_targets_draw_a_homing_step() {
        let mut projectiles = Projectiles;
        let view = ProjectileView::from_snapshots(vec![projectile_at(
            WorldPoint::new(100.0, 100.0),
            1,
        )]);
        let enemies =
            EnemyView::from_snapshots(vec![enemy_at(1, WorldPoint::new(200.0, 100.0))]);

        let mut out = Vec::new();
        projectiles.handle(&tick_events(), &view, &enemies, &mut out);

        assert_eq!(
            out,
            vec![Command::AdvanceProjectile {
                projectile: ProjectileId::new(7),
                to: WorldPoint::new(108.0, 100.0),
            }]
        );
    }

    #[test]
    fn close_targets_trigger_an_impact() {
        let mut projectiles = Projectiles;
        let view = ProjectileView::from_snapshots(vec![projectile_at(
            WorldPoint::new(100.0, 100.0),
            1,
        )]);
        let enemies =
            EnemyView::from_snapshots(vec![enemy_at(1, WorldPoint::new(110.0, 100.0))]);

        let mut out = Vec::new();
        projectiles.handle(&tick_events(), &view, &enemies, &mut out);

        assert_eq!(
            out,
            vec![Command::ImpactProjectile {
                projectile: ProjectileId::new(7),
            }]
        );
    }

    #[test]
    fn vanished_targets_discard_the_projectile() {
        let mut projectiles = Projectiles;
        let view = ProjectileView::from_snapshots(vec![projectile_at(
            WorldPoint::new(100.0, 100.0),
            1,
        )]);
        let enemies = EnemyView::from_snapshots(Vec::new());

        let mut out = Vec::new();
        projectiles.handle(&tick_events(), &view, &enemies, &mut out);

        assert_eq!(
            out,
            vec![Command::DiscardProjectile {
                projectile: ProjectileId::new(7),
            }]
        );
    }

    #[test]
    fn idle_frames_produce_no_commands() {
        let mut projectiles = Projectiles;
        let view = ProjectileView::from_snapshots(vec![projectile_at(
            WorldPoint::new(100.0, 100.0),
            1,
        )]);
        let enemies =
            EnemyView::from_snapshots(vec![enemy_at(1, WorldPoint::new(200.0, 100.0))]);

        let mut out = Vec::new();
        projectiles.handle(&[], &view, &enemies, &mut out);
        assert!(out.is_empty());
    }
}
