#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rampart Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to deterministically. Systems consume event
//! streams, query immutable snapshots, and respond exclusively with new
//! command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gold balance a fresh session starts with.
pub const STARTING_GOLD: u32 = 120;

/// Lives a fresh session starts with.
pub const STARTING_LIVES: u32 = 25;

/// Highest level any tower can reach through upgrades.
pub const MAX_TOWER_LEVEL: u32 = 5;

/// Travel speed of every projectile, in world units per tick.
pub const PROJECTILE_SPEED: f32 = 8.0;

/// Distance at which a projectile is considered to have struck its target.
pub const IMPACT_RADIUS: f32 = 15.0;

/// Radius around an explosive impact within which splash damage applies.
pub const SPLASH_RADIUS: f32 = 60.0;

/// Fraction of the direct damage dealt to enemies caught in the splash.
pub const SPLASH_FACTOR: f32 = 0.5;

/// Clearance kept free on each side of the path centerline for placement.
pub const PATH_CLEARANCE: f32 = 45.0;

/// Minimum separation between the centers of two towers.
pub const TOWER_SPACING: f32 = 60.0;

/// Border strip along the playfield edge where towers cannot be placed.
pub const BORDER_INSET: f32 = 30.0;

/// Distance below which an enemy snaps to the next path segment instead of
/// moving, preventing overshoot jitter at waypoint corners.
pub const WAYPOINT_CAPTURE_RADIUS: f32 = 5.0;

/// Score awarded per point of reward when an enemy is slain.
pub const SCORE_PER_REWARD: u64 = 10;

/// Position expressed in continuous world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new point from world-unit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Computes the Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Advances `distance` units along the normalized direction toward
    /// `target`, landing exactly on the target when it is closer than the
    /// requested distance.
    #[must_use]
    pub fn step_toward(self, target: WorldPoint, distance: f32) -> WorldPoint {
        let remaining = self.distance_to(target);
        if remaining <= distance || remaining == 0.0 {
            return target;
        }

        let scale = distance / remaining;
        WorldPoint::new(
            self.x + (target.x - self.x) * scale,
            self.y + (target.y - self.y) * scale,
        )
    }
}

/// Remaining leg of a path segment, as seen from a traveller's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathLeg {
    /// Waypoint the traveller is heading toward.
    pub target: WorldPoint,
    /// Euclidean distance from the traveller to the target waypoint.
    pub distance: f32,
}

/// Immutable ordered waypoint sequence enemies travel along.
///
/// The first waypoint is the spawn, the last one is the defended base.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathLayout {
    waypoints: Vec<WorldPoint>,
}

impl PathLayout {
    /// Creates a path from an ordered waypoint sequence.
    #[must_use]
    pub fn new(waypoints: Vec<WorldPoint>) -> Self {
        Self { waypoints }
    }

    /// Ordered waypoints defining the route.
    #[must_use]
    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    /// Point where enemies enter the playfield, if the path is non-empty.
    #[must_use]
    pub fn spawn_point(&self) -> Option<WorldPoint> {
        self.waypoints.first().copied()
    }

    /// Returns the leg from `from` toward the waypoint following `segment`,
    /// or `None` when the segment index already points at the final waypoint.
    #[must_use]
    pub fn leg_toward(&self, segment: u32, from: WorldPoint) -> Option<PathLeg> {
        let next = usize::try_from(segment).ok()?.checked_add(1)?;
        let target = self.waypoints.get(next).copied()?;
        Some(PathLeg {
            target,
            distance: from.distance_to(target),
        })
    }
}

/// Rectangular playfield towers and enemies inhabit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    width: f32,
    height: f32,
}

impl Playfield {
    /// Creates a playfield with the provided dimensions in world units.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the playfield in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the playfield in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether `point` lies inside the playfield shrunk by `inset`
    /// on every side.
    #[must_use]
    pub fn contains_with_inset(&self, point: WorldPoint, inset: f32) -> bool {
        point.x() >= inset
            && point.x() <= self.width - inset
            && point.y() >= inset
            && point.y() <= self.height - inset
    }
}

/// Unique identifier assigned to an enemy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Ordinal of a wave within a session; the first playable wave is 1.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// Creates a wave number wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying ordinal.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the following wave number.
    #[must_use]
    pub const fn next(self) -> WaveNumber {
        WaveNumber(self.0.saturating_add(1))
    }
}

/// Lifecycle state of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Pre-game screen; towers may be placed, no wave is scheduled.
    Menu,
    /// A wave is in progress and the simulation is ticking.
    Playing,
    /// The previous wave is cleared; placement and the next wave are open.
    WaveComplete,
    /// Lives reached zero; terminal until the session is reset.
    GameOver,
}

/// Enemy archetypes with distinct stat curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline enemy making up the bulk of every wave.
    Normal,
    /// Quick but fragile; appears from wave 2.
    Fast,
    /// Slow and heavily armored; appears from wave 3.
    Tank,
    /// Single heavyweight closing every fifth wave.
    Boss,
}

/// Resolved stats of an enemy at a particular wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Hit points the enemy spawns with.
    pub health: f32,
    /// Travel speed in world units per tick.
    pub speed: f32,
    /// Gold credited when the enemy is slain.
    pub reward: u32,
}

impl EnemyKind {
    const fn base_health(self) -> f32 {
        match self {
            Self::Normal => 40.0,
            Self::Fast => 25.0,
            Self::Tank => 120.0,
            Self::Boss => 250.0,
        }
    }

    const fn health_growth(self) -> f32 {
        match self {
            Self::Normal => 12.0,
            Self::Fast => 8.0,
            Self::Tank => 35.0,
            Self::Boss => 60.0,
        }
    }

    const fn base_speed(self) -> f32 {
        match self {
            Self::Normal => 1.0,
            Self::Fast => 2.0,
            Self::Tank => 0.6,
            Self::Boss => 0.8,
        }
    }

    const fn speed_growth(self) -> f32 {
        match self {
            Self::Normal => 0.07,
            Self::Fast => 0.1,
            Self::Tank => 0.03,
            Self::Boss => 0.04,
        }
    }

    const fn base_reward(self) -> u32 {
        match self {
            Self::Normal => 12,
            Self::Fast => 18,
            Self::Tank => 30,
            Self::Boss => 60,
        }
    }

    const fn reward_growth(self) -> u32 {
        match self {
            Self::Normal => 2,
            Self::Fast => 3,
            Self::Tank => 5,
            Self::Boss => 12,
        }
    }

    /// Resolves the kind's stats for the given wave by applying the linear
    /// per-wave growth terms to the base values.
    #[must_use]
    pub fn stats_for_wave(self, wave: WaveNumber) -> EnemyStats {
        let wave = wave.get();
        EnemyStats {
            health: self.base_health() + self.health_growth() * wave as f32,
            speed: self.base_speed() + self.speed_growth() * wave as f32,
            reward: self
                .base_reward()
                .saturating_add(self.reward_growth().saturating_mul(wave)),
        }
    }
}

/// Types of towers that can be constructed on the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Balanced all-rounder.
    Basic,
    /// Long range, heavy damage, slow cycle.
    Sniper,
    /// Short range, light damage, very fast cycle.
    Rapid,
    /// Wide coverage with minimal damage per shot.
    Freeze,
    /// Moderate stats; its projectiles deal area splash damage on impact.
    Explosive,
}

impl TowerKind {
    /// Gold required to place a tower of this kind.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Basic => 50,
            Self::Sniper => 100,
            Self::Rapid => 80,
            Self::Freeze => 120,
            Self::Explosive => 150,
        }
    }

    /// Damage dealt per projectile at level 1.
    #[must_use]
    pub const fn base_damage(self) -> u32 {
        match self {
            Self::Basic => 12,
            Self::Sniper => 50,
            Self::Rapid => 6,
            Self::Freeze => 4,
            Self::Explosive => 35,
        }
    }

    /// Targeting radius in world units at level 1.
    #[must_use]
    pub const fn base_range(self) -> f32 {
        match self {
            Self::Basic => 120.0,
            Self::Sniper => 220.0,
            Self::Rapid => 100.0,
            Self::Freeze => 140.0,
            Self::Explosive => 110.0,
        }
    }

    /// Minimum interval between consecutive shots at level 1.
    #[must_use]
    pub const fn base_fire_interval(self) -> Duration {
        match self {
            Self::Basic => Duration::from_millis(900),
            Self::Sniper => Duration::from_millis(2200),
            Self::Rapid => Duration::from_millis(300),
            Self::Freeze => Duration::from_millis(1400),
            Self::Explosive => Duration::from_millis(1700),
        }
    }

    /// Gold required for the first upgrade.
    #[must_use]
    pub const fn base_upgrade_cost(self) -> u32 {
        match self {
            Self::Basic => 40,
            Self::Sniper => 75,
            Self::Rapid => 55,
            Self::Freeze => 80,
            Self::Explosive => 90,
        }
    }

    /// Reports whether projectiles of this kind splash on impact.
    #[must_use]
    pub const fn is_explosive(self) -> bool {
        matches!(self, Self::Explosive)
    }
}

/// Enemy counts composing a single wave.
///
/// Counts are closed-form functions of the wave number, shared by wave
/// generation and the pre-wave preview so the two can never disagree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveComposition {
    /// Number of normal enemies in the wave.
    pub normal: u32,
    /// Number of fast enemies in the wave.
    pub fast: u32,
    /// Number of tank enemies in the wave.
    pub tank: u32,
    /// Number of boss enemies in the wave (zero or one).
    pub boss: u32,
}

impl WaveComposition {
    /// Resolves the composition for the provided wave number.
    #[must_use]
    pub const fn for_wave(wave: WaveNumber) -> Self {
        let n = wave.get();
        Self {
            normal: 4 + 2 * n,
            fast: if n >= 2 { 1 + n / 2 } else { 0 },
            tank: if n >= 3 { n / 3 } else { 0 },
            boss: if n > 0 && n % 5 == 0 { 1 } else { 0 },
        }
    }

    /// Total number of enemies in the wave.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.normal + self.fast + self.tank + self.boss
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Moves the session from the menu into pre-wave preparation.
    BeginPreparation,
    /// Starts the next wave from the preparation phase.
    StartWave,
    /// Requests placement of a tower at the provided position.
    PlaceTower {
        /// Kind of tower to construct.
        kind: TowerKind,
        /// Center position for the new tower.
        at: WorldPoint,
    },
    /// Requests a level-up of an existing tower.
    UpgradeTower {
        /// Identifier of the tower to upgrade.
        tower: TowerId,
    },
    /// Updates the tower kind armed for placement previews.
    SelectTowerKind {
        /// Kind to arm, or `None` to clear the selection.
        kind: Option<TowerKind>,
    },
    /// Updates the tracked pointer position used by placement previews.
    PointerMoved {
        /// Latest pointer position in world units.
        at: WorldPoint,
    },
    /// Returns the session to the menu and restores starting resources.
    Reset,
    /// Requests insertion of one enemy into the wave roster.
    SpawnEnemy {
        /// Archetype of the enemy to insert.
        kind: EnemyKind,
        /// Hit points the enemy spawns with.
        health: f32,
        /// Travel speed in world units per tick.
        speed: f32,
        /// Gold credited when the enemy is slain.
        reward: u32,
        /// Delay after wave start before the enemy becomes active.
        delay: Duration,
    },
    /// Requests that an enemy advance along the path.
    AdvanceEnemy {
        /// Identifier of the enemy to move.
        enemy: EnemyId,
        /// Position the enemy occupies after the step.
        to: WorldPoint,
        /// Path segment the enemy occupies after the step.
        segment: u32,
    },
    /// Reports that an enemy reached the base at the end of the path.
    LeakEnemy {
        /// Identifier of the leaking enemy.
        enemy: EnemyId,
    },
    /// Requests that a tower fire a projectile at a target enemy.
    FireProjectile {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Identifier of the targeted enemy.
        target: EnemyId,
    },
    /// Moves a projectile one homing step toward its target.
    AdvanceProjectile {
        /// Identifier of the projectile to move.
        projectile: ProjectileId,
        /// Position the projectile occupies after the step.
        to: WorldPoint,
    },
    /// Detonates a projectile that reached its target.
    ImpactProjectile {
        /// Identifier of the impacting projectile.
        projectile: ProjectileId,
    },
    /// Discards a projectile whose target no longer exists.
    DiscardProjectile {
        /// Identifier of the orphaned projectile.
        projectile: ProjectileId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the session entered a new lifecycle phase.
    PhaseChanged {
        /// Phase that became active after processing commands.
        phase: GamePhase,
    },
    /// Announces that a new wave began.
    WaveStarted {
        /// Ordinal of the wave that started.
        wave: WaveNumber,
    },
    /// Confirms that an enemy joined the wave roster.
    EnemySpawned {
        /// Identifier assigned to the enemy by the world.
        enemy: EnemyId,
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
    },
    /// Reports that an enemy was destroyed by damage.
    EnemySlain {
        /// Identifier of the slain enemy.
        enemy: EnemyId,
        /// Gold credited for the kill.
        reward: u32,
    },
    /// Reports that an enemy reached the base and cost a life.
    EnemyLeaked {
        /// Identifier of the enemy that leaked through.
        enemy: EnemyId,
    },
    /// Confirms that a tower was placed.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Kind of tower that was placed.
        kind: TowerKind,
        /// Center position of the new tower.
        at: WorldPoint,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Kind of tower requested for placement.
        kind: TowerKind,
        /// Position provided in the placement request.
        at: WorldPoint,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower levelled up.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Level the tower reached.
        level: u32,
    },
    /// Reports that a tower upgrade request was rejected.
    TowerUpgradeRejected {
        /// Identifier of the tower targeted for upgrade.
        tower: TowerId,
        /// Specific reason the upgrade failed.
        reason: UpgradeError,
    },
    /// Confirms that a tower fired a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile by the world.
        projectile: ProjectileId,
        /// Tower that fired the shot.
        tower: TowerId,
        /// Enemy the projectile homes toward.
        target: EnemyId,
    },
    /// Reports the session's gold balance after a change.
    GoldChanged {
        /// New gold balance.
        gold: u32,
    },
    /// Reports the session's remaining lives after a change.
    LivesChanged {
        /// New number of remaining lives.
        lives: u32,
    },
    /// Reports the session's score after a change.
    ScoreChanged {
        /// New score total.
        score: u64,
    },
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// Placement is locked while a wave is in progress.
    #[error("tower placement is locked while a wave is in progress")]
    WaveInProgress,
    /// The session cannot afford the tower's cost.
    #[error("not enough gold to afford the tower")]
    InsufficientGold,
    /// The position falls inside the clearance kept free around the path.
    #[error("the position obstructs the enemy path")]
    PathObstruction,
    /// The position is too close to an existing tower's center.
    #[error("the position is too close to an existing tower")]
    TowerOverlap,
    /// The position lies outside the buildable area of the playfield.
    #[error("the position lies outside the buildable playfield")]
    OutOfBounds,
}

/// Reasons a tower upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum UpgradeError {
    /// Upgrades are locked while a wave is in progress.
    #[error("tower upgrades are locked while a wave is in progress")]
    WaveInProgress,
    /// No tower with the provided identifier exists.
    #[error("no tower with the provided identifier exists")]
    MissingTower,
    /// The session cannot afford the tower's upgrade cost.
    #[error("not enough gold to afford the upgrade")]
    InsufficientGold,
    /// The tower already reached the maximum level.
    #[error("the tower is already at the maximum level")]
    MaxLevel,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Position the enemy currently occupies.
    pub position: WorldPoint,
    /// Path segment the enemy is travelling along.
    pub segment: u32,
    /// Remaining hit points.
    pub health: f32,
    /// Hit points the enemy spawned with.
    pub max_health: f32,
    /// Travel speed in world units per tick.
    pub speed: f32,
    /// Gold credited when the enemy is slain.
    pub reward: u32,
    /// Indicates whether the enemy's scheduled spawn time has been reached.
    pub active: bool,
    /// Remaining delay before the enemy becomes active.
    pub spawn_in: Duration,
}

/// Read-only snapshot describing all enemies in the wave roster.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    ///
    /// Identifiers are allocated in spawn order, so sorting by id also
    /// restores the roster's deterministic iteration order.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot belonging to a particular enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Fixed center position of the tower.
    pub position: WorldPoint,
    /// Current level, between 1 and [`MAX_TOWER_LEVEL`].
    pub level: u32,
    /// Damage dealt per projectile.
    pub damage: u32,
    /// Targeting radius in world units.
    pub range: f32,
    /// Minimum interval between consecutive shots.
    pub fire_interval: Duration,
    /// Time remaining until the tower may fire again.
    pub ready_in: Duration,
    /// Gold required for the next upgrade.
    pub upgrade_cost: u32,
}

/// Read-only snapshot describing all towers on the playfield.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot belonging to a particular tower.
    #[must_use]
    pub fn get(&self, tower: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of towers captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no towers have been placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Position the projectile currently occupies.
    pub position: WorldPoint,
    /// Enemy the projectile homes toward; the target may vanish before
    /// impact, in which case the projectile is discarded.
    pub target: EnemyId,
    /// Damage applied to the target on impact.
    pub damage: u32,
    /// Travel speed in world units per tick.
    pub speed: f32,
    /// Indicates whether the impact splashes onto nearby enemies.
    pub explosive: bool,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of projectiles captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no projectiles are in flight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Session counters surfaced to the presentation layer every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    /// Current lifecycle phase.
    pub phase: GamePhase,
    /// Gold available for placement and upgrades.
    pub gold: u32,
    /// Remaining lives; the session ends when this reaches zero.
    pub lives: u32,
    /// Accumulated score.
    pub score: u64,
    /// Ordinal of the most recently started wave.
    pub wave: WaveNumber,
}

/// Firing assignment pairing a ready tower with its selected target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TowerTarget {
    /// Tower ready to fire.
    pub tower: TowerId,
    /// Enemy selected by the first-match targeting policy.
    pub enemy: EnemyId,
}

/// Declarative placement preview describing a potential tower construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementPreview {
    /// Kind of tower armed for placement.
    pub kind: TowerKind,
    /// Position under the pointer.
    pub at: WorldPoint,
    /// Indicates whether the preview represents a valid placement.
    pub placeable: bool,
    /// Rejection reason when the placement would fail.
    pub rejection: Option<PlacementError>,
}
