//! Authoritative tower state management utilities.

use std::collections::BTreeMap;
use std::time::Duration;

use rampart_core::{TowerId, TowerKind, TowerSnapshot, WorldPoint};

const UPGRADE_DAMAGE_FACTOR: f32 = 1.45;
const UPGRADE_RANGE_FACTOR: f32 = 1.12;
const UPGRADE_INTERVAL_FACTOR: f32 = 0.93;
const UPGRADE_COST_FACTOR: f32 = 1.7;

/// Mutable state of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    pub(crate) id: TowerId,
    pub(crate) kind: TowerKind,
    pub(crate) position: WorldPoint,
    pub(crate) level: u32,
    pub(crate) damage: u32,
    pub(crate) range: f32,
    pub(crate) fire_interval: Duration,
    pub(crate) last_shot: Option<Duration>,
    pub(crate) upgrade_cost: u32,
}

impl TowerState {
    fn new(id: TowerId, kind: TowerKind, position: WorldPoint) -> Self {
        Self {
            id,
            kind,
            position,
            level: 1,
            damage: kind.base_damage(),
            range: kind.base_range(),
            fire_interval: kind.base_fire_interval(),
            last_shot: None,
            upgrade_cost: kind.base_upgrade_cost(),
        }
    }

    /// Time remaining before the tower may fire again on the given clock.
    pub(crate) fn ready_in(&self, clock: Duration) -> Duration {
        match self.last_shot {
            None => Duration::ZERO,
            Some(at) => at.saturating_add(self.fire_interval).saturating_sub(clock),
        }
    }

    /// Stamps the cooldown; called only when a shot was actually fired.
    pub(crate) fn mark_fired(&mut self, clock: Duration) {
        self.last_shot = Some(clock);
    }

    /// Applies one level of multiplicative stat growth, flooring every
    /// result to the enclosing integer unit.
    pub(crate) fn apply_upgrade(&mut self) {
        self.level = self.level.saturating_add(1);
        self.damage = (self.damage as f32 * UPGRADE_DAMAGE_FACTOR).floor() as u32;
        self.range = (self.range * UPGRADE_RANGE_FACTOR).floor();
        let millis = (self.fire_interval.as_millis() as f32 * UPGRADE_INTERVAL_FACTOR).floor();
        self.fire_interval = Duration::from_millis(millis as u64);
        self.upgrade_cost = (self.upgrade_cost as f32 * UPGRADE_COST_FACTOR).floor() as u32;
    }

    /// Captures a read-only snapshot of the tower on the given clock.
    pub(crate) fn snapshot(&self, clock: Duration) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            level: self.level,
            damage: self.damage,
            range: self.range,
            fire_interval: self.fire_interval,
            ready_in: self.ready_in(clock),
            upgrade_cost: self.upgrade_cost,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug, Default)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: u32,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Removes every tower and restarts identifier allocation.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_tower_id = 0;
    }

    /// Constructs a tower of the provided kind and allocates its identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, position: WorldPoint) -> TowerId {
        let id = TowerId::new(self.next_tower_id);
        self.next_tower_id = self.next_tower_id.saturating_add(1);
        let _ = self.entries.insert(id, TowerState::new(id, kind, position));
        id
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    /// Iterator over the stored towers in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    /// Iterator over the center positions of every stored tower.
    pub(crate) fn positions(&self) -> impl Iterator<Item = WorldPoint> + '_ {
        self.entries.values().map(|tower| tower.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_towers_carry_level_one_base_stats() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Basic, WorldPoint::new(100.0, 100.0));
        let tower = registry.get(id).expect("tower was inserted");

        assert_eq!(tower.level, 1);
        assert_eq!(tower.damage, 12);
        assert!((tower.range - 120.0).abs() < f32::EPSILON);
        assert_eq!(tower.fire_interval, Duration::from_millis(900));
        assert_eq!(tower.upgrade_cost, 40);
        assert!(tower.last_shot.is_none());
    }

    #[test]
    fn upgrade_applies_floored_multiplicative_growth() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Basic, WorldPoint::new(100.0, 100.0));
        registry
            .get_mut(id)
            .expect("tower was inserted")
            .apply_upgrade();

        let tower = registry.get(id).expect("tower was inserted");
        assert_eq!(tower.level, 2);
        assert_eq!(tower.damage, 17, "12 * 1.45 floors to 17");
        assert!((tower.range - 134.0).abs() < f32::EPSILON, "120 * 1.12 floors to 134");
        assert_eq!(tower.fire_interval, Duration::from_millis(837), "900 * 0.93");
        assert_eq!(tower.upgrade_cost, 68, "40 * 1.7 floors to 68");
    }

    #[test]
    fn ready_in_tracks_the_cooldown_window() {
        let mut registry = TowerRegistry::new();
        let id = registry.insert(TowerKind::Rapid, WorldPoint::new(0.0, 0.0));
        let tower = registry.get_mut(id).expect("tower was inserted");

        assert_eq!(tower.ready_in(Duration::ZERO), Duration::ZERO);

        tower.mark_fired(Duration::from_millis(1_000));
        assert_eq!(
            tower.ready_in(Duration::from_millis(1_100)),
            Duration::from_millis(200)
        );
        assert_eq!(tower.ready_in(Duration::from_millis(1_300)), Duration::ZERO);
        assert_eq!(tower.ready_in(Duration::from_millis(5_000)), Duration::ZERO);
    }

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = TowerRegistry::new();
        let first = registry.insert(TowerKind::Basic, WorldPoint::new(100.0, 100.0));
        let second = registry.insert(TowerKind::Sniper, WorldPoint::new(200.0, 100.0));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);

        registry.clear();
        let restarted = registry.insert(TowerKind::Basic, WorldPoint::new(100.0, 100.0));
        assert_eq!(restarted.get(), 0);
    }
}
