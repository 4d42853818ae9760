#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic fire control system.
//!
//! Pairs every cooled-down tower with a target and emits `FireProjectile`
//! commands. Target selection scans the enemy view in identifier order and
//! takes the first active enemy inside the tower's range, so older enemies
//! are engaged before newer ones and the choice never depends on iteration
//! luck.

use rampart_core::{Command, EnemyId, EnemyView, Event, TowerSnapshot, TowerTarget, TowerView};

/// Pure system that reacts to world events and emits fire commands.
#[derive(Debug, Default)]
pub struct FireControl;

impl FireControl {
    /// Consumes world events and immutable views to emit one shot per
    /// ready tower with a target in range.
    pub fn handle(
        &mut self,
        events: &[Event],
        tower_view: &TowerView,
        enemy_view: &EnemyView,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for pairing in acquire_targets(tower_view, enemy_view) {
            out.push(Command::FireProjectile {
                tower: pairing.tower,
                target: pairing.enemy,
            });
        }
    }
}

/// Resolves the tower/enemy pairings for the current tick.
fn acquire_targets(tower_view: &TowerView, enemy_view: &EnemyView) -> Vec<TowerTarget> {
    tower_view
        .iter()
        .filter(|tower| tower.ready_in.is_zero())
        .filter_map(|tower| {
            select_target(tower, enemy_view).map(|enemy| TowerTarget {
                tower: tower.id,
                enemy,
            })
        })
        .collect()
}

fn select_target(tower: &TowerSnapshot, enemy_view: &EnemyView) -> Option<EnemyId> {
    enemy_view
        .iter()
        .find(|enemy| {
            enemy.active && enemy.position.distance_to(tower.position) <= tower.range
        })
        .map(|enemy| enemy.id)
}
