#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestrator for Rampart Defence.
//!
//! Owns the authoritative world together with the pure systems and pumps
//! them in a fixed order every tick: the clock advances first, then
//! movement, then fire control, then projectile flight. Commands the
//! systems propose are applied to the world immediately, so each later
//! stage observes the effects of the earlier ones within the same tick.

use std::time::Duration;

use rampart_core::{
    Command, EnemyView, Event, GamePhase, HudSnapshot, PathLayout, PlacementError,
    PlacementPreview, Playfield, ProjectileView, TowerId, TowerKind, TowerView, UpgradeError,
    WaveComposition, WaveNumber, WorldPoint,
};
use rampart_system_fire_control::FireControl;
use rampart_system_movement::Movement;
use rampart_system_projectiles::Projectiles;
use rampart_system_wave_generation::WaveGeneration;
use rampart_world::{apply, query, World};

/// Owns the world and the systems composing one defence session.
#[derive(Debug, Default)]
pub struct Session {
    world: World,
    movement: Movement,
    wave_generation: WaveGeneration,
    fire_control: FireControl,
    projectiles: Projectiles,
    events: Vec<Event>,
}

impl Session {
    /// Creates a session at the menu with starting resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted by the most recent operation on this session.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Moves the session from the menu into pre-wave preparation.
    pub fn begin_preparation(&mut self) {
        self.events.clear();
        apply(&mut self.world, Command::BeginPreparation, &mut self.events);
    }

    /// Starts the next wave and schedules its spawn roster.
    ///
    /// Ignored unless the session sits in the preparation phase.
    pub fn start_wave(&mut self) {
        self.events.clear();
        apply(&mut self.world, Command::StartWave, &mut self.events);

        let mut commands = Vec::new();
        self.wave_generation.handle(&self.events, &mut commands);
        for command in commands {
            apply(&mut self.world, command, &mut self.events);
        }
    }

    /// Returns the session to the menu and restores starting resources.
    pub fn reset(&mut self) {
        self.events.clear();
        apply(&mut self.world, Command::Reset, &mut self.events);
    }

    /// Arms a tower kind for placement previews, or clears the selection.
    pub fn select_tower_kind(&mut self, kind: Option<TowerKind>) {
        self.events.clear();
        apply(
            &mut self.world,
            Command::SelectTowerKind { kind },
            &mut self.events,
        );
    }

    /// Records the latest pointer position for placement previews.
    pub fn set_pointer(&mut self, at: WorldPoint) {
        self.events.clear();
        apply(&mut self.world, Command::PointerMoved { at }, &mut self.events);
    }

    /// Attempts to place a tower of `kind` centred at `at`.
    pub fn place_tower(
        &mut self,
        kind: TowerKind,
        at: WorldPoint,
    ) -> Result<TowerId, PlacementError> {
        self.events.clear();
        self.world.place_tower(kind, at, &mut self.events)
    }

    /// Attempts to level up the identified tower, returning the level reached.
    pub fn upgrade_tower(&mut self, tower: TowerId) -> Result<u32, UpgradeError> {
        self.events.clear();
        self.world.upgrade_tower(tower, &mut self.events)
    }

    /// Advances the simulation by `dt` of virtual time.
    ///
    /// Outside the `Playing` phase this is a no-op, so menu and
    /// preparation screens can keep pumping their frame loop freely.
    pub fn tick(&mut self, dt: Duration) -> &[Event] {
        self.events.clear();
        if query::phase(&self.world) != GamePhase::Playing {
            return &self.events;
        }

        apply(&mut self.world, Command::Tick { dt }, &mut self.events);

        let mut commands = Vec::new();

        let enemy_view = query::enemy_view(&self.world);
        self.movement.handle(
            &self.events,
            &enemy_view,
            query::path(&self.world),
            &mut commands,
        );
        for command in commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }

        let enemy_view = query::enemy_view(&self.world);
        let tower_view = query::tower_view(&self.world);
        self.fire_control
            .handle(&self.events, &tower_view, &enemy_view, &mut commands);
        for command in commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }

        let enemy_view = query::enemy_view(&self.world);
        let projectile_view = query::projectile_view(&self.world);
        self.projectiles
            .handle(&self.events, &projectile_view, &enemy_view, &mut commands);
        for command in commands {
            apply(&mut self.world, command, &mut self.events);
        }

        &self.events
    }

    /// Captures the session counters shown on the HUD.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        query::hud(&self.world)
    }

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        query::phase(&self.world)
    }

    /// Ordinal of the most recently started wave.
    #[must_use]
    pub fn wave(&self) -> WaveNumber {
        query::wave(&self.world)
    }

    /// Current reading of the session's virtual clock.
    #[must_use]
    pub fn clock(&self) -> Duration {
        query::clock(&self.world)
    }

    /// Waypoint route enemies travel.
    #[must_use]
    pub fn path(&self) -> &PathLayout {
        query::path(&self.world)
    }

    /// Dimensions of the playfield.
    #[must_use]
    pub fn playfield(&self) -> Playfield {
        query::playfield(&self.world)
    }

    /// Read-only view of the wave roster.
    #[must_use]
    pub fn enemies(&self) -> EnemyView {
        query::enemy_view(&self.world)
    }

    /// Read-only view of the towers on the playfield.
    #[must_use]
    pub fn towers(&self) -> TowerView {
        query::tower_view(&self.world)
    }

    /// Read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectiles(&self) -> ProjectileView {
        query::projectile_view(&self.world)
    }

    /// Tower kind currently armed for placement previews.
    #[must_use]
    pub fn selected_tower_kind(&self) -> Option<TowerKind> {
        query::selected_tower_kind(&self.world)
    }

    /// Validity preview for placing the armed tower kind under the pointer.
    #[must_use]
    pub fn placement_preview(&self) -> Option<PlacementPreview> {
        query::placement_preview(&self.world)
    }

    /// Composition of the wave the next `start_wave` call would launch.
    #[must_use]
    pub fn next_wave_preview(&self) -> WaveComposition {
        query::next_wave_preview(&self.world)
    }
}
