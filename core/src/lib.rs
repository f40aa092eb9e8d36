#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tower Defence engine.
//!
//! This crate defines the message surface that connects the simulation
//! driver, the authoritative world, and pure systems. Systems read immutable
//! views of the world and respond exclusively with [`Command`] values; the
//! world executes those commands via its `apply` entry point and broadcasts
//! [`Event`] values that downstream systems and presentation layers consume.
//! Player actions (build, upgrade, sell, wave start) bypass the command
//! stream because they must report success or failure synchronously; their
//! failure reasons live here as closed error enums.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of a single grid cell measured in pixels.
pub const CELL_SIZE: f32 = 40.0;

/// Highest level a tower may be upgraded to.
pub const MAX_TOWER_LEVEL: u8 = 3;

/// Maps a grid cell onto the pixel centre of that cell.
///
/// This is the only conversion between grid and pixel space. Tower placement,
/// projectile origins and enemy interpolation all go through it so that logic
/// and presentation never drift apart.
#[must_use]
pub fn cell_to_pixel(cell: CellCoord) -> PixelPoint {
    PixelPoint::new(
        cell.column() as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        cell.row() as f32 * CELL_SIZE + CELL_SIZE / 2.0,
    )
}

/// Describes the phase of the match state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Preparation between waves; the only phase in which a wave may start.
    Building,
    /// A wave is in progress and ticks advance the simulation.
    Wave,
    /// The final wave was cleared.
    Won,
    /// Lives ran out.
    Lost,
}

impl GamePhase {
    /// Reports whether the phase ends the match.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate from a row and a column.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Continuous position measured in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    /// Horizontal pixel coordinate.
    pub x: f32,
    /// Vertical pixel coordinate.
    pub y: f32,
}

impl PixelPoint {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: PixelPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: PixelPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Linearly interpolates towards `other`; `t = 0` yields `self`.
    #[must_use]
    pub fn lerp(self, other: PixelPoint, t: f32) -> PixelPoint {
        PixelPoint::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Static classification of a map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Open ground; the only cell kind towers may be built on.
    Grass,
    /// Part of an enemy route.
    Path,
    /// First cell of an enemy route.
    Spawn,
    /// Last cell of an enemy route.
    Exit,
    /// Decorative terrain that accepts neither towers nor enemies.
    Blocked,
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
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

/// Types of towers that can be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Fast-firing single-target tower.
    Arrow,
    /// Slow tower whose shells damage everything around the impact point.
    Cannon,
    /// Control tower that halves the speed of the enemies it hits.
    Frost,
    /// Tower whose bolts jump between nearby enemies.
    Tesla,
}

impl TowerKind {
    /// Every tower kind in catalog order.
    pub const ALL: [TowerKind; 4] = [Self::Arrow, Self::Cannon, Self::Frost, Self::Tesla];
}

/// Types of enemies that waves are composed of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Cheap baseline walker.
    Grunt,
    /// Fast but fragile.
    Runner,
    /// Slow and heavily armoured.
    Brute,
    /// Rare boss-tier enemy.
    Overlord,
}

impl EnemyKind {
    /// Fixed statistics of the enemy type; difficulty never alters them.
    #[must_use]
    pub const fn profile(self) -> EnemyProfile {
        match self {
            Self::Grunt => EnemyProfile {
                max_hp: 60.0,
                speed: 1.5,
                reward: 10,
            },
            Self::Runner => EnemyProfile {
                max_hp: 35.0,
                speed: 2.6,
                reward: 8,
            },
            Self::Brute => EnemyProfile {
                max_hp: 260.0,
                speed: 0.8,
                reward: 25,
            },
            Self::Overlord => EnemyProfile {
                max_hp: 1_500.0,
                speed: 0.55,
                reward: 150,
            },
        }
    }

    /// Descriptive tags presentation layers use to pick visuals and sounds.
    #[must_use]
    pub const fn tags(self) -> &'static [EnemyTag] {
        match self {
            Self::Grunt => &[EnemyTag::Swarm],
            Self::Runner => &[EnemyTag::Swarm, EnemyTag::Fast],
            Self::Brute => &[EnemyTag::Armored],
            Self::Overlord => &[EnemyTag::Armored, EnemyTag::Boss],
        }
    }
}

/// Fixed statistics shared by every enemy of one kind.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyProfile {
    /// Hit points an enemy spawns with.
    pub max_hp: f32,
    /// Base movement speed measured in cells per second.
    pub speed: f32,
    /// Gold and score credited when the enemy is killed.
    pub reward: u32,
}

/// Descriptive trait attached to an enemy kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTag {
    /// Arrives in large numbers.
    Swarm,
    /// Moves noticeably faster than the baseline.
    Fast,
    /// Absorbs a lot of damage.
    Armored,
    /// Boss-tier threat.
    Boss,
}

/// Scalar multiplier applied to wave enemy counts.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Difficulty(f32);

impl Difficulty {
    /// Relaxed waves.
    pub const EASY: Self = Self(0.75);
    /// Baseline waves.
    pub const NORMAL: Self = Self(1.0);
    /// Crowded waves.
    pub const HARD: Self = Self(1.5);

    /// Validates and wraps a difficulty multiplier.
    pub fn new(multiplier: f32) -> Result<Self, DifficultyError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(DifficultyError::OutOfRange(multiplier));
        }
        Ok(Self(multiplier))
    }

    /// Retrieves the raw multiplier.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Reasons a difficulty multiplier may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error, Serialize, Deserialize)]
pub enum DifficultyError {
    /// The multiplier was non-finite, zero or negative.
    #[error("difficulty multiplier {0} must be finite and positive")]
    OutOfRange(f32),
}

/// Single entry of a wave manifest.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    /// Kind of enemy to spawn.
    pub kind: EnemyKind,
    /// Seconds since the previous spawn of the same wave.
    pub delay: f32,
}

/// Ordered, timed spawn manifest for one wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveComposition {
    /// One-based wave index.
    pub wave: u32,
    /// Spawn entries in the order they are released.
    pub entries: Vec<SpawnEntry>,
    /// Gold credited when the wave is cleared.
    pub bonus: u32,
}

impl WaveComposition {
    /// Number of enemies the wave releases.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.entries.len()
    }

    /// Seconds between the wave start and its final spawn.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.entries.iter().map(|entry| entry.delay).sum()
    }
}

/// Tunable combat constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Total number of enemies a chain bolt may strike, primary included.
    pub chain_links: usize,
    /// Multiplier applied to the tower range when searching for the next link.
    pub chain_radius_factor: f32,
    /// Fraction of the full damage dealt to each secondary chain target.
    pub chain_falloff: f32,
    /// Seconds a frost hit keeps an enemy slowed.
    pub slow_duration: f32,
    /// Speed multiplier applied while an enemy is slowed.
    pub slow_factor: f32,
    /// Splash radius of cannon shells measured in cells.
    pub splash_radius_cells: f32,
    /// Normalised projectile flight progress gained per second.
    pub projectile_speed: f32,
}

impl CombatTuning {
    /// Splash radius of cannon shells measured in pixels.
    #[must_use]
    pub fn splash_radius(&self) -> f32 {
        self.splash_radius_cells * CELL_SIZE
    }
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            chain_links: 3,
            chain_radius_factor: 1.5,
            chain_falloff: 0.7,
            slow_duration: 2.0,
            slow_factor: 0.5,
            splash_radius_cells: 1.0,
            projectile_speed: 4.0,
        }
    }
}

/// Commands that express the per-tick world mutations systems may request.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances wave timers and tower cooldowns by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Instantiates an enemy at the start of the given path.
    SpawnEnemy {
        /// Kind of enemy to create.
        kind: EnemyKind,
        /// Index of the map path the enemy follows for its lifetime.
        path: usize,
    },
    /// Stores the result of advancing an enemy along its path.
    MoveEnemy {
        /// Enemy that moved.
        enemy: EnemyId,
        /// New continuous position along the path.
        progress: f32,
        /// Pixel position derived from the progress.
        position: PixelPoint,
        /// Remaining slow duration after decay.
        slow_timer: f32,
    },
    /// Records that an enemy reached the end of its path.
    LeakEnemy {
        /// Enemy that escaped.
        enemy: EnemyId,
    },
    /// Requests that a tower fire at the provided target.
    FireProjectile {
        /// Tower that fires.
        tower: TowerId,
        /// Primary target of the shot.
        target: EnemyId,
        /// Secondary targets for chain bolts, in strike order.
        chain: Vec<EnemyId>,
    },
    /// Advances every projectile in flight by the provided delta time.
    AdvanceProjectiles {
        /// Duration of simulated flight.
        dt: Duration,
    },
    /// Applies damage to an enemy.
    DamageEnemy {
        /// Enemy receiving the damage.
        enemy: EnemyId,
        /// Amount of hit points removed.
        amount: f32,
        /// Tower credited if the hit kills.
        source: TowerId,
    },
    /// Resets the slow timer of an enemy.
    SlowEnemy {
        /// Enemy to slow.
        enemy: EnemyId,
        /// Seconds the slow lasts.
        duration: f32,
    },
    /// Announces an area detonation at the provided impact point.
    Detonate {
        /// Impact point of the shell.
        position: PixelPoint,
    },
    /// Closes the active wave when nothing is left to spawn or fight.
    ResolveWaveEnd,
    /// Removes dead enemies and spent projectiles.
    Sweep,
}

/// Events broadcast by the world after processing commands and actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// A manifest entry became due and should be spawned.
    SpawnDue {
        /// Kind of enemy the entry describes.
        kind: EnemyKind,
    },
    /// An enemy entered the map.
    Spawn {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of the new enemy.
        kind: EnemyKind,
    },
    /// A tower fired a projectile.
    Fire {
        /// Tower that fired.
        tower: TowerId,
        /// Kind of the firing tower.
        kind: TowerKind,
        /// Pixel centre of the firing tower.
        position: PixelPoint,
    },
    /// A projectile reached its frozen destination.
    ProjectileImpact {
        /// Projectile that landed.
        projectile: ProjectileId,
    },
    /// An enemy was killed.
    Kill {
        /// Enemy that died.
        enemy: EnemyId,
        /// Kind of the enemy.
        kind: EnemyKind,
        /// Where the enemy died.
        position: PixelPoint,
    },
    /// An enemy escaped through an exit.
    Leak {
        /// Enemy that escaped.
        enemy: EnemyId,
    },
    /// A cannon shell detonated.
    Explosion {
        /// Impact point of the shell.
        position: PixelPoint,
    },
    /// An enemy was slowed.
    Slow {
        /// Enemy that was slowed.
        enemy: EnemyId,
    },
    /// A wave was cleared.
    WaveComplete {
        /// One-based index of the cleared wave.
        wave: u32,
        /// Gold credited for the clear.
        bonus: u32,
    },
    /// The match ended.
    GameOver {
        /// Whether the player won.
        won: bool,
    },
    /// A wave started.
    WaveStarted {
        /// One-based index of the started wave.
        wave: u32,
    },
    /// A tower was built.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Kind of the tower.
        kind: TowerKind,
        /// Cell the tower occupies.
        cell: CellCoord,
    },
    /// A tower gained a level.
    TowerUpgraded {
        /// Upgraded tower.
        tower: TowerId,
        /// Level after the upgrade.
        level: u8,
    },
    /// A tower was sold.
    TowerSold {
        /// Tower that was removed.
        tower: TowerId,
        /// Gold refunded to the player.
        refund: u32,
    },
}

impl Event {
    /// Reports whether the event belongs to the taxonomy consumed by renderers
    /// and audio, as opposed to bookkeeping shared between systems.
    #[must_use]
    pub const fn is_presentation(&self) -> bool {
        matches!(
            self,
            Self::Spawn { .. }
                | Self::Fire { .. }
                | Self::Kill { .. }
                | Self::Leak { .. }
                | Self::Explosion { .. }
                | Self::Slow { .. }
                | Self::WaveComplete { .. }
                | Self::GameOver { .. }
        )
    }
}

/// Reasons a tower placement may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum PlacementError {
    /// The cell lies outside the map.
    #[error("cell lies outside the map")]
    OutOfBounds,
    /// The cell is not grass.
    #[error("towers can only be built on grass")]
    NotBuildable,
    /// Another tower already occupies the cell.
    #[error("cell is already occupied by a tower")]
    Occupied,
    /// The player cannot afford the tower.
    #[error("not enough gold: need {cost}, have {gold}")]
    InsufficientGold {
        /// Price of the tower.
        cost: u32,
        /// Gold available.
        gold: u32,
    },
    /// The match is over.
    #[error("the match is over")]
    GameOver,
}

/// Reasons a tower upgrade may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum UpgradeError {
    /// No tower with the provided identifier exists.
    #[error("no such tower")]
    MissingTower,
    /// The tower is already at the highest level.
    #[error("tower is already at the maximum level")]
    MaxLevel,
    /// The player cannot afford the upgrade.
    #[error("not enough gold: need {cost}, have {gold}")]
    InsufficientGold {
        /// Price of the upgrade.
        cost: u32,
        /// Gold available.
        gold: u32,
    },
    /// The match is over.
    #[error("the match is over")]
    GameOver,
}

/// Reasons a tower sale may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SellError {
    /// No tower with the provided identifier exists.
    #[error("no such tower")]
    MissingTower,
    /// The match is over.
    #[error("the match is over")]
    GameOver,
}

/// Reasons a wave start may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum WaveStartError {
    /// A wave is already running.
    #[error("a wave is already in progress")]
    WaveInProgress,
    /// The match is over.
    #[error("the match is over")]
    GameOver,
    /// Every wave has already been played.
    #[error("no waves remain")]
    NoWavesRemaining,
}

/// Immutable representation of a single tower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower that was constructed.
    pub kind: TowerKind,
    /// Cell the tower occupies.
    pub cell: CellCoord,
    /// Pixel centre of the tower.
    pub center: PixelPoint,
    /// Current level, starting at one.
    pub level: u8,
    /// Seconds until the tower may fire again.
    pub cooldown: f32,
    /// Enemies killed by this tower.
    pub total_kills: u32,
    /// Gold spent on placement and upgrades.
    pub spent: u32,
}

/// Immutable representation of a single enemy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points the enemy spawned with.
    pub max_hp: f32,
    /// Index of the path the enemy follows.
    pub path: usize,
    /// Continuous position along the path's waypoints.
    pub progress: f32,
    /// Base speed in cells per second.
    pub speed: f32,
    /// Seconds of slow remaining.
    pub slow_timer: f32,
    /// Pixel position derived from the progress.
    pub position: PixelPoint,
    /// Whether the enemy is still in play.
    pub alive: bool,
}

/// Immutable representation of a single projectile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Tower that fired the projectile.
    pub source: TowerId,
    /// Kind of the firing tower; selects the resolution behaviour.
    pub tower_kind: TowerKind,
    /// Pixel centre of the firing tower.
    pub from: PixelPoint,
    /// Target position frozen at fire time.
    pub to: PixelPoint,
    /// Normalised flight progress.
    pub progress: f32,
    /// Damage frozen at fire time.
    pub damage: f32,
    /// Primary target.
    pub target: EnemyId,
    /// Whether the projectile deals splash damage.
    pub aoe: bool,
    /// Secondary chain targets in strike order.
    pub chain_targets: Vec<EnemyId>,
}

impl ProjectileSnapshot {
    /// Pixel position of the projectile along its straight flight line.
    #[must_use]
    pub fn position(&self) -> PixelPoint {
        self.from.lerp(self.to, self.progress.min(1.0))
    }
}

/// Read-only snapshot describing all towers in deterministic order.
#[derive(Clone, Debug, Default)]
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

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all enemies in deterministic order.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over enemies that are still in play.
    pub fn alive(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.alive)
    }

    /// Looks up an enemy by identifier.
    #[must_use]
    pub fn get(&self, id: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all projectiles in deterministic order.
#[derive(Clone, Debug, Default)]
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

    /// Looks up a projectile by identifier.
    #[must_use]
    pub fn get(&self, id: ProjectileId) -> Option<&ProjectileSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Target assignment computed for a ready tower.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that should fire.
    pub tower: TowerId,
    /// Closest enemy within range.
    pub enemy: EnemyId,
    /// Secondary chain targets, empty for non-chain towers.
    pub chain: Vec<EnemyId>,
}

/// Complete read-only copy of the match state handed to external readers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Catalog index of the loaded map.
    pub map_index: usize,
    /// Difficulty the waves were generated with.
    pub difficulty: Difficulty,
    /// Current match phase.
    pub phase: GamePhase,
    /// Gold available to spend.
    pub gold: u32,
    /// Lives remaining.
    pub lives: u32,
    /// Accumulated score.
    pub score: u32,
    /// One-based index of the current or most recent wave; zero before the first.
    pub wave: u32,
    /// Total number of waves in the match.
    pub wave_count: u32,
    /// Enemies of the current wave not yet killed or leaked.
    pub enemies_remaining: u32,
    /// Seconds until the next queued spawn.
    pub spawn_timer: f32,
    /// Manifest entries still waiting to spawn.
    pub spawn_queue: Vec<SpawnEntry>,
    /// Towers on the map.
    pub towers: Vec<TowerSnapshot>,
    /// Enemies on the map.
    pub enemies: Vec<EnemySnapshot>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectileSnapshot>,
    /// Tower kind armed for placement by the UI, if any.
    pub selected_kind: Option<TowerKind>,
    /// Placed tower selected by the UI, if any.
    pub selected_tower: Option<TowerId>,
}
