#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Rampart Defence.
//!
//! The [`World`] owns the session counters, the virtual clock, and the
//! enemy/tower/projectile rosters. All mutations flow through [`apply`],
//! which validates every command — including the ones emitted by pure
//! systems — before executing it and broadcasting the resulting
//! [`Event`] values.

mod placement;
mod towers;

use std::time::Duration;

use rampart_core::{
    Command, EnemyId, EnemyKind, Event, GamePhase, PathLayout, PlacementError, Playfield,
    ProjectileId, TowerId, TowerKind, UpgradeError, WaveNumber, WorldPoint, PROJECTILE_SPEED,
    SCORE_PER_REWARD, SPLASH_FACTOR, SPLASH_RADIUS, STARTING_GOLD, STARTING_LIVES,
};

use towers::TowerRegistry;

const DEFAULT_PLAYFIELD: Playfield = Playfield::new(1000.0, 700.0);

/// Waypoint route enemies travel, from the off-screen spawn on the left to
/// the defended base on the right.
const DEFAULT_WAYPOINTS: [WorldPoint; 20] = [
    WorldPoint::new(-20.0, 100.0),
    WorldPoint::new(150.0, 100.0),
    WorldPoint::new(150.0, 250.0),
    WorldPoint::new(300.0, 250.0),
    WorldPoint::new(300.0, 100.0),
    WorldPoint::new(450.0, 100.0),
    WorldPoint::new(450.0, 350.0),
    WorldPoint::new(250.0, 350.0),
    WorldPoint::new(250.0, 500.0),
    WorldPoint::new(500.0, 500.0),
    WorldPoint::new(500.0, 200.0),
    WorldPoint::new(700.0, 200.0),
    WorldPoint::new(700.0, 450.0),
    WorldPoint::new(600.0, 450.0),
    WorldPoint::new(600.0, 600.0),
    WorldPoint::new(850.0, 600.0),
    WorldPoint::new(850.0, 350.0),
    WorldPoint::new(950.0, 350.0),
    WorldPoint::new(950.0, 550.0),
    WorldPoint::new(1020.0, 550.0),
];

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: WorldPoint,
    segment: u32,
    health: f32,
    max_health: f32,
    speed: f32,
    reward: u32,
    spawn_at: Duration,
}

#[derive(Clone, Debug)]
struct Projectile {
    id: ProjectileId,
    position: WorldPoint,
    target: EnemyId,
    damage: u32,
    speed: f32,
    explosive: bool,
}

/// Represents the authoritative Rampart Defence session state.
#[derive(Debug)]
pub struct World {
    phase: GamePhase,
    gold: u32,
    lives: u32,
    score: u64,
    wave: WaveNumber,
    clock: Duration,
    playfield: Playfield,
    path: PathLayout,
    enemies: Vec<Enemy>,
    towers: TowerRegistry,
    projectiles: Vec<Projectile>,
    next_enemy_id: u32,
    next_projectile_id: u32,
    selected_kind: Option<TowerKind>,
    pointer: Option<WorldPoint>,
}

impl World {
    /// Creates a new session at the menu with starting resources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Menu,
            gold: STARTING_GOLD,
            lives: STARTING_LIVES,
            score: 0,
            wave: WaveNumber::new(0),
            clock: Duration::ZERO,
            playfield: DEFAULT_PLAYFIELD,
            path: PathLayout::new(DEFAULT_WAYPOINTS.to_vec()),
            enemies: Vec::new(),
            towers: TowerRegistry::new(),
            projectiles: Vec::new(),
            next_enemy_id: 0,
            next_projectile_id: 0,
            selected_kind: None,
            pointer: None,
        }
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|entry| entry.id == enemy)
    }

    fn projectile_index(&self, projectile: ProjectileId) -> Option<usize> {
        self.projectiles
            .iter()
            .position(|entry| entry.id == projectile)
    }

    fn enemy_is_active(&self, enemy: &Enemy) -> bool {
        enemy.spawn_at <= self.clock
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase != phase {
            self.phase = phase;
            out_events.push(Event::PhaseChanged { phase });
        }
    }

    fn set_gold(&mut self, gold: u32, out_events: &mut Vec<Event>) {
        if self.gold != gold {
            self.gold = gold;
            out_events.push(Event::GoldChanged { gold });
        }
    }

    fn set_lives(&mut self, lives: u32, out_events: &mut Vec<Event>) {
        if self.lives != lives {
            self.lives = lives;
            out_events.push(Event::LivesChanged { lives });
        }
    }

    fn set_score(&mut self, score: u64, out_events: &mut Vec<Event>) {
        if self.score != score {
            self.score = score;
            out_events.push(Event::ScoreChanged { score });
        }
    }

    /// Removes enemies whose health reached zero, crediting gold and score
    /// exactly once per enemy. Runs at the start of every tick so a slain
    /// enemy never moves or leaks in the same tick.
    fn cleanup_defeated(&mut self, out_events: &mut Vec<Event>) {
        let mut gold = self.gold;
        let mut score = self.score;

        let mut index = 0;
        while index < self.enemies.len() {
            if self.enemies[index].health <= 0.0 {
                let slain = self.enemies.remove(index);
                gold = gold.saturating_add(slain.reward);
                score = score.saturating_add(u64::from(slain.reward) * SCORE_PER_REWARD);
                out_events.push(Event::EnemySlain {
                    enemy: slain.id,
                    reward: slain.reward,
                });
            } else {
                index += 1;
            }
        }

        self.set_gold(gold, out_events);
        self.set_score(score, out_events);
    }

    fn check_wave_complete(&mut self, out_events: &mut Vec<Event>) {
        if self.phase == GamePhase::Playing && self.enemies.is_empty() {
            self.set_phase(GamePhase::WaveComplete, out_events);
        }
    }

    /// Attempts to place a tower, emitting the same events the equivalent
    /// command would produce.
    pub fn place_tower(
        &mut self,
        kind: TowerKind,
        at: WorldPoint,
        out_events: &mut Vec<Event>,
    ) -> Result<TowerId, PlacementError> {
        match self.try_place(kind, at) {
            Ok(tower) => {
                out_events.push(Event::TowerPlaced { tower, kind, at });
                out_events.push(Event::GoldChanged { gold: self.gold });
                Ok(tower)
            }
            Err(reason) => {
                out_events.push(Event::TowerPlacementRejected { kind, at, reason });
                Err(reason)
            }
        }
    }

    /// Attempts to level up a tower, emitting the same events the
    /// equivalent command would produce. Returns the level reached.
    pub fn upgrade_tower(
        &mut self,
        tower: TowerId,
        out_events: &mut Vec<Event>,
    ) -> Result<u32, UpgradeError> {
        match self.try_upgrade(tower) {
            Ok(level) => {
                out_events.push(Event::TowerUpgraded { tower, level });
                out_events.push(Event::GoldChanged { gold: self.gold });
                Ok(level)
            }
            Err(reason) => {
                out_events.push(Event::TowerUpgradeRejected { tower, reason });
                Err(reason)
            }
        }
    }

    fn try_place(&mut self, kind: TowerKind, at: WorldPoint) -> Result<TowerId, PlacementError> {
        if self.phase == GamePhase::Playing {
            return Err(PlacementError::WaveInProgress);
        }

        placement::validate(
            at,
            kind.cost(),
            self.gold,
            self.towers.positions(),
            &self.path,
            &self.playfield,
        )?;

        self.gold = self.gold.saturating_sub(kind.cost());
        Ok(self.towers.insert(kind, at))
    }

    fn try_upgrade(&mut self, tower: TowerId) -> Result<u32, UpgradeError> {
        if self.phase == GamePhase::Playing {
            return Err(UpgradeError::WaveInProgress);
        }

        let state = self.towers.get(tower).ok_or(UpgradeError::MissingTower)?;
        if state.level >= rampart_core::MAX_TOWER_LEVEL {
            return Err(UpgradeError::MaxLevel);
        }
        let cost = state.upgrade_cost;
        if self.gold < cost {
            return Err(UpgradeError::InsufficientGold);
        }

        let state = self
            .towers
            .get_mut(tower)
            .ok_or(UpgradeError::MissingTower)?;
        state.apply_upgrade();
        let level = state.level;
        self.gold = self.gold.saturating_sub(cost);
        Ok(level)
    }

    fn restore_starting_state(&mut self, out_events: &mut Vec<Event>) {
        self.set_phase(GamePhase::Menu, out_events);
        self.set_gold(STARTING_GOLD, out_events);
        self.set_lives(STARTING_LIVES, out_events);
        self.set_score(0, out_events);
        self.wave = WaveNumber::new(0);
        self.clock = Duration::ZERO;
        self.enemies.clear();
        self.towers.clear();
        self.projectiles.clear();
        self.next_enemy_id = 0;
        self.next_projectile_id = 0;
        self.selected_kind = None;
        self.pointer = None;
    }

    fn apply_impact(&mut self, index: usize) {
        let projectile = self.projectiles.remove(index);
        let Some(target_index) = self.enemy_index(projectile.target) else {
            return;
        };

        let impact_point = self.enemies[target_index].position;
        let direct = projectile.damage as f32;
        self.enemies[target_index].health -= direct;

        if projectile.explosive {
            let splash = direct * SPLASH_FACTOR;
            for enemy in &mut self.enemies {
                if enemy.id == projectile.target || enemy.spawn_at > self.clock {
                    continue;
                }
                if enemy.position.distance_to(impact_point) < SPLASH_RADIUS {
                    enemy.health -= splash;
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
            world.cleanup_defeated(out_events);
            world.check_wave_complete(out_events);
        }
        Command::BeginPreparation => {
            if world.phase == GamePhase::Menu {
                world.set_phase(GamePhase::WaveComplete, out_events);
            }
        }
        Command::StartWave => {
            if world.phase != GamePhase::WaveComplete {
                return;
            }
            world.wave = world.wave.next();
            world.enemies.clear();
            world.projectiles.clear();
            world.set_phase(GamePhase::Playing, out_events);
            out_events.push(Event::WaveStarted { wave: world.wave });
        }
        Command::PlaceTower { kind, at } => {
            let _ = world.place_tower(kind, at, out_events);
        }
        Command::UpgradeTower { tower } => {
            let _ = world.upgrade_tower(tower, out_events);
        }
        Command::SelectTowerKind { kind } => {
            world.selected_kind = kind;
        }
        Command::PointerMoved { at } => {
            world.pointer = Some(at);
        }
        Command::Reset => {
            world.restore_starting_state(out_events);
        }
        Command::SpawnEnemy {
            kind,
            health,
            speed,
            reward,
            delay,
        } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            let Some(position) = world.path.spawn_point() else {
                return;
            };
            let id = EnemyId::new(world.next_enemy_id);
            world.next_enemy_id = world.next_enemy_id.saturating_add(1);
            world.enemies.push(Enemy {
                id,
                kind,
                position,
                segment: 0,
                health,
                max_health: health,
                speed,
                reward,
                spawn_at: world.clock.saturating_add(delay),
            });
            out_events.push(Event::EnemySpawned { enemy: id, kind });
        }
        Command::AdvanceEnemy { enemy, to, segment } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            let segment_count = world.path.waypoints().len() as u32;
            let clock = world.clock;
            let Some(index) = world.enemy_index(enemy) else {
                return;
            };
            let entry = &mut world.enemies[index];
            if entry.spawn_at > clock || segment < entry.segment || segment >= segment_count {
                return;
            }
            entry.position = to;
            entry.segment = segment;
        }
        Command::LeakEnemy { enemy } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            let Some(index) = world.enemy_index(enemy) else {
                return;
            };
            let entry = &world.enemies[index];
            if entry.spawn_at > world.clock {
                return;
            }
            if world.path.leg_toward(entry.segment, entry.position).is_some() {
                return;
            }

            let _ = world.enemies.remove(index);
            let lives = world.lives.saturating_sub(1);
            out_events.push(Event::EnemyLeaked { enemy });
            world.set_lives(lives, out_events);
            if world.lives == 0 {
                world.set_phase(GamePhase::GameOver, out_events);
            }
        }
        Command::FireProjectile { tower, target } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            let clock = world.clock;
            let target_active = world
                .enemy_index(target)
                .map(|index| world.enemies[index].spawn_at <= clock)
                .unwrap_or(false);
            if !target_active {
                return;
            }
            let Some(state) = world.towers.get_mut(tower) else {
                return;
            };
            if !state.ready_in(clock).is_zero() {
                return;
            }

            state.mark_fired(clock);
            let position = state.position;
            let damage = state.damage;
            let explosive = state.kind.is_explosive();
            let id = ProjectileId::new(world.next_projectile_id);
            world.next_projectile_id = world.next_projectile_id.saturating_add(1);
            world.projectiles.push(Projectile {
                id,
                position,
                target,
                damage,
                speed: PROJECTILE_SPEED,
                explosive,
            });
            out_events.push(Event::ProjectileFired {
                projectile: id,
                tower,
                target,
            });
        }
        Command::AdvanceProjectile { projectile, to } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            if let Some(index) = world.projectile_index(projectile) {
                world.projectiles[index].position = to;
            }
        }
        Command::ImpactProjectile { projectile } => {
            if world.phase != GamePhase::Playing {
                return;
            }
            if let Some(index) = world.projectile_index(projectile) {
                world.apply_impact(index);
            }
        }
        Command::DiscardProjectile { projectile } => {
            if let Some(index) = world.projectile_index(projectile) {
                let _ = world.projectiles.remove(index);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use rampart_core::{
        EnemySnapshot, EnemyView, GamePhase, HudSnapshot, PathLayout, PlacementPreview, Playfield,
        ProjectileSnapshot, ProjectileView, TowerKind, TowerView, WaveComposition, WaveNumber,
    };

    use super::{placement, World};

    /// Captures the session counters shown on the HUD.
    #[must_use]
    pub fn hud(world: &World) -> HudSnapshot {
        HudSnapshot {
            phase: world.phase,
            gold: world.gold,
            lives: world.lives,
            score: world.score,
            wave: world.wave,
        }
    }

    /// Current lifecycle phase of the session.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Current reading of the session's virtual clock.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Provides read-only access to the playfield dimensions.
    #[must_use]
    pub fn playfield(world: &World) -> Playfield {
        world.playfield
    }

    /// Provides read-only access to the waypoint route.
    #[must_use]
    pub fn path(world: &World) -> &PathLayout {
        &world.path
    }

    /// Tower kind currently armed for placement previews.
    #[must_use]
    pub fn selected_tower_kind(world: &World) -> Option<TowerKind> {
        world.selected_kind
    }

    /// Captures a read-only view of the wave roster.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                segment: enemy.segment,
                health: enemy.health,
                max_health: enemy.max_health,
                speed: enemy.speed,
                reward: enemy.reward,
                active: world.enemy_is_active(enemy),
                spawn_in: enemy.spawn_at.saturating_sub(world.clock),
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the towers on the playfield.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(
            world
                .towers
                .iter()
                .map(|tower| tower.snapshot(world.clock))
                .collect(),
        )
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| ProjectileSnapshot {
                    id: projectile.id,
                    position: projectile.position,
                    target: projectile.target,
                    damage: projectile.damage,
                    speed: projectile.speed,
                    explosive: projectile.explosive,
                })
                .collect(),
        )
    }

    /// Composition of the wave that `StartWave` would launch next.
    #[must_use]
    pub fn next_wave_preview(world: &World) -> WaveComposition {
        WaveComposition::for_wave(world.wave.next())
    }

    /// Validity preview for placing the armed tower kind under the pointer.
    ///
    /// Returns `None` until both a tower kind is selected and a pointer
    /// position has been reported.
    #[must_use]
    pub fn placement_preview(world: &World) -> Option<PlacementPreview> {
        let kind = world.selected_kind?;
        let at = world.pointer?;

        let rejection = if world.phase == GamePhase::Playing {
            Some(rampart_core::PlacementError::WaveInProgress)
        } else {
            placement::validate(
                at,
                kind.cost(),
                world.gold,
                world.towers.positions(),
                &world.path,
                &world.playfield,
            )
            .err()
        };

        Some(PlacementPreview {
            kind,
            at,
            placeable: rejection.is_none(),
            rejection,
        })
    }

    /// Ordinal of the most recently started wave.
    #[must_use]
    pub fn wave(world: &World) -> WaveNumber {
        world.wave
    }
}
