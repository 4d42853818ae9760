#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks enemies along the waypoint path.

use rampart_core::{Command, EnemySnapshot, EnemyView, Event, PathLayout, WAYPOINT_CAPTURE_RADIUS};

/// Pure system that reacts to world events and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Consumes world events and the enemy view to emit one movement step
    /// per active enemy.
    ///
    /// Enemies that stand on the final waypoint produce a `LeakEnemy`
    /// command instead of a step.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemy_view: &EnemyView,
        path: &PathLayout,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for enemy in enemy_view.iter() {
            if !enemy.active {
                continue;
            }
            out.push(plan_step(enemy, path));
        }
    }
}

/// Plans the next command for a single enemy: a fixed-speed step toward the
/// upcoming waypoint, a segment advance when the enemy already stands close
/// enough to it, or a leak once the route is exhausted.
fn plan_step(enemy: &EnemySnapshot, path: &PathLayout) -> Command {
    let Some(leg) = path.leg_toward(enemy.segment, enemy.position) else {
        return Command::LeakEnemy { enemy: enemy.id };
    };

    // Advancing the segment without moving prevents overshoot jitter at
    // waypoint corners; `step_toward` clamps onto near waypoints, so the
    // capture triggers on the following tick.
    if leg.distance < WAYPOINT_CAPTURE_RADIUS {
        return Command::AdvanceEnemy {
            enemy: enemy.id,
            to: enemy.position,
            segment: enemy.segment + 1,
        };
    }

    Command::AdvanceEnemy {
        enemy: enemy.id,
        to: enemy.position.step_toward(leg.target, enemy.speed),
        segment: enemy.segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rampart_core::{EnemyId, EnemyKind, WorldPoint};
    use std::time::Duration;

    fn straight_path() -> PathLayout {
        PathLayout::new(vec![
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(100.0, 0.0),
            WorldPoint::new(100.0, 100.0),
        ])
    }

    fn enemy_at(position: WorldPoint, segment: u32, speed: f32, active: bool) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(1),
            kind: EnemyKind::Normal,
            position,
            segment,
            health: 40.0,
            max_health: 40.0,
            speed,
            reward: 12,
            active,
            spawn_in: if active {
                Duration::ZERO
            } else {
                Duration::from_millis(650)
            },
        }
    }

    fn tick_events() -> Vec<Event> {
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(16),
        }]
    }

    #[test]
    fn steps_are_fixed_speed_along_the_current_leg() {
        let mut movement = Movement;
        let view = EnemyView::from_snapshots(vec![enemy_at(
            WorldPoint::new(10.0, 0.0),
            0,
            2.0,
            true,
        )]);

        let mut out = Vec::new();
        movement.handle(&tick_events(), &view, &straight_path(), &mut out);

        assert_eq!(
            out,
            vec![Command::AdvanceEnemy {
                enemy: EnemyId::new(1),
                to: WorldPoint::new(12.0, 0.0),
                segment: 0,
            }]
        );
    }

    #[test]
    fn near_waypoints_advance_the_segment_without_moving() {
        let mut movement = Movement;
        let view = EnemyView::from_snapshots(vec![enemy_at(
            WorldPoint::new(96.0, 0.0),
            0,
            2.0,
            true,
        )]);

        let mut out = Vec::new();
        movement.handle(&tick_events(), &view, &straight_path(), &mut out);

        assert_eq!(
            out,
            vec![Command::AdvanceEnemy {
                enemy: EnemyId::new(1),
                to: WorldPoint::new(96.0, 0.0),
                segment: 1,
            }]
        );
    }

    #[test]
    fn steps_clamp_onto_the_waypoint_instead_of_overshooting() {
        let mut movement = Movement;
        let view = EnemyView::from_snapshots(vec![enemy_at(
            WorldPoint::new(94.0, 0.0),
            0,
            8.0,
            true,
        )]);

        let mut out = Vec::new();
        movement.handle(&tick_events(), &view, &straight_path(), &mut out);

        assert_eq!(
            out,
            vec![Command::AdvanceEnemy {
                enemy: EnemyId::new(1),
                to: WorldPoint::new(100.0, 0.0),
                segment: 0,
            }]
        );
    }

    #[test]
    fn exhausted_route_leaks_the_enemy() {
        let mut movement = Movement;
        let view = EnemyView::from_snapshots(vec![enemy_at(
            WorldPoint::new(100.0, 100.0),
            2,
            2.0,
            true,
        )]);

        let mut out = Vec::new();
        movement.handle(&tick_events(), &view, &straight_path(), &mut out);

        assert_eq!(
            out,
            vec![Command::LeakEnemy {
                enemy: EnemyId::new(1)
            }]
        );
    }

    #[test]
    fn pending_enemies_do_not_move() {
        let mut movement = Movement;
        let view = EnemyView::from_snapshots(vec![enemy_at(
            WorldPoint::new(10.0, 0.0),
            0,
            2.0,
            false,
        )]);

        let mut out = Vec::new();
        movement.handle(&tick_events(), &view, &straight_path(), &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn idle_frames_produce_no_commands() {
        let mut movement = Movement;
        let view = EnemyView::from_snapshots(vec![enemy_at(
            WorldPoint::new(10.0, 0.0),
            0,
            2.0,
            true,
        )]);

        let mut out = Vec::new();
        movement.handle(&[], &view, &straight_path(), &mut out);

        assert!(out.is_empty());
    }
}
