#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the Tower Defence engine.
//!
//! The world is the single writer of match state. Per-tick mutations arrive
//! as [`Command`] values through [`apply`]; player actions are synchronous
//! functions that either fully succeed or leave the world untouched. Every
//! observable change is broadcast as an [`Event`].

mod entities;
mod towers;

use std::collections::VecDeque;

use tower_defence_core::{
    cell_to_pixel, CellCoord, CombatTuning, Command, Difficulty, EnemyId, EnemyKind, Event,
    GamePhase, PlacementError, ProjectileId, SellError, SpawnEntry, TowerId, TowerKind,
    UpgradeError, WaveComposition, WaveStartError,
};
use tower_defence_maps::Map;
use tower_defence_system_economy as economy;

use entities::{EnemyState, ProjectileState};
use towers::TowerRegistry;

/// Rules that seed a fresh world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    /// Gold available before the first wave.
    pub starting_gold: u32,
    /// Lives available before the first wave.
    pub starting_lives: u32,
    /// Combat constants shared by the world and the systems.
    pub combat: CombatTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            starting_gold: 200,
            starting_lives: 20,
            combat: CombatTuning::default(),
        }
    }
}

/// Represents the authoritative Tower Defence world state.
#[derive(Debug)]
pub struct World {
    map: Map,
    map_index: usize,
    difficulty: Difficulty,
    combat: CombatTuning,
    waves: Vec<WaveComposition>,
    phase: GamePhase,
    gold: u32,
    lives: u32,
    score: u32,
    wave: u32,
    enemies_remaining: u32,
    wave_bonus: u32,
    spawn_queue: VecDeque<SpawnEntry>,
    spawn_timer: f32,
    towers: TowerRegistry,
    enemies: Vec<EnemyState>,
    projectiles: Vec<ProjectileState>,
    next_enemy_id: u32,
    next_projectile_id: u32,
    selected_kind: Option<TowerKind>,
    selected_tower: Option<TowerId>,
}

impl World {
    /// Creates a world in the building phase on the provided map.
    #[must_use]
    pub fn new(
        map: Map,
        map_index: usize,
        difficulty: Difficulty,
        waves: Vec<WaveComposition>,
        config: WorldConfig,
    ) -> Self {
        Self {
            map,
            map_index,
            difficulty,
            combat: config.combat,
            waves,
            phase: GamePhase::Building,
            gold: config.starting_gold,
            lives: config.starting_lives,
            score: 0,
            wave: 0,
            enemies_remaining: 0,
            wave_bonus: 0,
            spawn_queue: VecDeque::new(),
            spawn_timer: 0.0,
            towers: TowerRegistry::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            next_enemy_id: 0,
            next_projectile_id: 0,
            selected_kind: None,
            selected_tower: None,
        }
    }

    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut EnemyState> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    fn alive_enemy(&self, id: EnemyId) -> Option<&EnemyState> {
        self.enemies.iter().find(|enemy| enemy.id == id && enemy.alive)
    }

    fn wave_count(&self) -> u32 {
        u32::try_from(self.waves.len()).unwrap_or(u32::MAX)
    }

    fn advance_spawn_timer(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        if self.spawn_queue.is_empty() {
            return;
        }

        self.spawn_timer -= dt;
        while self.spawn_timer <= 0.0 {
            let Some(entry) = self.spawn_queue.pop_front() else {
                break;
            };
            out_events.push(Event::SpawnDue { kind: entry.kind });
            match self.spawn_queue.front() {
                Some(next) => self.spawn_timer = next.delay,
                None => {
                    self.spawn_timer = 0.0;
                    break;
                }
            }
        }
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, path: usize, out_events: &mut Vec<Event>) {
        let Some(start) = self.map.path(path).and_then(|waypoints| waypoints.first()) else {
            tracing::warn!(?kind, path, "spawn requested on unknown path");
            return;
        };
        let position = cell_to_pixel(*start);
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        self.enemies.push(EnemyState::spawn(id, kind, path, position));
        out_events.push(Event::Spawn { enemy: id, kind });
    }

    fn leak_enemy(&mut self, id: EnemyId, out_events: &mut Vec<Event>) {
        let Some(enemy) = self.enemy_mut(id) else {
            tracing::warn!(enemy = id.get(), "leak requested for unknown enemy");
            return;
        };
        if !enemy.alive {
            return;
        }
        enemy.alive = false;

        self.lives = self.lives.saturating_sub(1);
        self.enemies_remaining = self.enemies_remaining.saturating_sub(1);
        out_events.push(Event::Leak { enemy: id });
        tracing::debug!(enemy = id.get(), lives = self.lives, "enemy leaked");

        if self.lives == 0 {
            self.phase = GamePhase::Lost;
            out_events.push(Event::GameOver { won: false });
            tracing::debug!(wave = self.wave, score = self.score, "match lost");
        }
    }

    fn fire_projectile(
        &mut self,
        tower_id: TowerId,
        target: EnemyId,
        chain: Vec<EnemyId>,
        out_events: &mut Vec<Event>,
    ) {
        let Some(to) = self.alive_enemy(target).map(|enemy| enemy.position) else {
            tracing::warn!(tower = tower_id.get(), enemy = target.get(), "fire at missing target");
            return;
        };
        let Some(tower) = self.towers.get_mut(tower_id) else {
            tracing::warn!(tower = tower_id.get(), "fire requested for missing tower");
            return;
        };
        if tower.cooldown > 0.0 {
            tracing::warn!(tower = tower_id.get(), "fire requested while cooling down");
            return;
        }

        tower.cooldown = economy::cooldown(tower.kind, tower.level);
        let kind = tower.kind;
        let damage = economy::damage(kind, tower.level);
        let from = cell_to_pixel(tower.cell);

        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        self.projectiles.push(ProjectileState {
            id,
            source: tower_id,
            tower_kind: kind,
            from,
            to,
            progress: 0.0,
            damage,
            target,
            chain_targets: chain,
            resolved: false,
        });
        out_events.push(Event::Fire {
            tower: tower_id,
            kind,
            position: from,
        });
    }

    fn advance_projectiles(&mut self, dt: f32, out_events: &mut Vec<Event>) {
        let amount = self.combat.projectile_speed * dt;
        for projectile in &mut self.projectiles {
            if projectile.advance(amount) {
                out_events.push(Event::ProjectileImpact {
                    projectile: projectile.id,
                });
            }
        }
    }

    fn damage_enemy(
        &mut self,
        id: EnemyId,
        amount: f32,
        source: TowerId,
        out_events: &mut Vec<Event>,
    ) {
        let Some(enemy) = self.enemy_mut(id) else {
            return;
        };
        if !enemy.alive {
            return;
        }

        enemy.hp -= amount;
        if enemy.hp > 0.0 {
            return;
        }

        enemy.alive = false;
        let kind = enemy.kind;
        let position = enemy.position;
        let reward = kind.profile().reward;

        self.gold = self.gold.saturating_add(reward);
        self.score = self.score.saturating_add(reward);
        self.enemies_remaining = self.enemies_remaining.saturating_sub(1);
        if let Some(tower) = self.towers.get_mut(source) {
            tower.total_kills = tower.total_kills.saturating_add(1);
        }
        out_events.push(Event::Kill {
            enemy: id,
            kind,
            position,
        });
        tracing::debug!(enemy = id.get(), ?kind, tower = source.get(), reward, "enemy killed");
    }

    fn resolve_wave_end(&mut self, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Wave
            || !self.spawn_queue.is_empty()
            || self.enemies.iter().any(|enemy| enemy.alive)
        {
            return;
        }

        let stray = self.projectiles.len();
        self.projectiles.clear();
        if stray > 0 {
            tracing::debug!(wave = self.wave, projectiles = stray, "discarded in-flight projectiles");
        }

        if self.wave >= self.wave_count() {
            self.phase = GamePhase::Won;
            out_events.push(Event::WaveComplete {
                wave: self.wave,
                bonus: 0,
            });
            out_events.push(Event::GameOver { won: true });
            tracing::debug!(wave = self.wave, score = self.score, "match won");
            return;
        }

        let bonus = self.wave_bonus;
        self.gold = self.gold.saturating_add(bonus);
        self.score = self.score.saturating_add(bonus);
        self.phase = GamePhase::Building;
        out_events.push(Event::WaveComplete {
            wave: self.wave,
            bonus,
        });
        tracing::debug!(wave = self.wave, bonus, gold = self.gold, "wave cleared");
    }

    fn sweep(&mut self) {
        self.enemies.retain(|enemy| enemy.alive);
        self.projectiles.retain(|projectile| !projectile.is_spent());
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the match is over only [`Command::Sweep`] has any effect, and ticks
/// are ignored outside of the wave phase.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.phase.is_terminal() && !matches!(command, Command::Sweep) {
        tracing::trace!(?command, phase = ?world.phase, "command ignored after match end");
        return;
    }

    match command {
        Command::Tick { dt } => {
            if world.phase != GamePhase::Wave {
                tracing::trace!(phase = ?world.phase, "tick ignored outside of a wave");
                return;
            }
            out_events.push(Event::TimeAdvanced { dt });
            let seconds = dt.as_secs_f32();
            world.advance_spawn_timer(seconds, out_events);
            for tower in world.towers.iter_mut() {
                tower.cooldown = (tower.cooldown - seconds).max(0.0);
            }
        }
        Command::SpawnEnemy { kind, path } => world.spawn_enemy(kind, path, out_events),
        Command::MoveEnemy {
            enemy,
            progress,
            position,
            slow_timer,
        } => match world.enemy_mut(enemy) {
            Some(state) if state.alive => {
                state.progress = progress;
                state.position = position;
                state.slow_timer = slow_timer;
            }
            _ => tracing::warn!(enemy = enemy.get(), "move requested for inactive enemy"),
        },
        Command::LeakEnemy { enemy } => world.leak_enemy(enemy, out_events),
        Command::FireProjectile {
            tower,
            target,
            chain,
        } => world.fire_projectile(tower, target, chain, out_events),
        Command::AdvanceProjectiles { dt } => {
            world.advance_projectiles(dt.as_secs_f32(), out_events);
        }
        Command::DamageEnemy {
            enemy,
            amount,
            source,
        } => world.damage_enemy(enemy, amount, source, out_events),
        Command::SlowEnemy { enemy, duration } => {
            if let Some(state) = world.enemy_mut(enemy) {
                if state.alive {
                    state.slow_timer = duration;
                    out_events.push(Event::Slow { enemy });
                }
            }
        }
        Command::Detonate { position } => out_events.push(Event::Explosion { position }),
        Command::ResolveWaveEnd => world.resolve_wave_end(out_events),
        Command::Sweep => world.sweep(),
    }
}

/// Builds a tower of the provided kind on a grass cell.
///
/// On failure the world is left untouched.
pub fn place_tower(
    world: &mut World,
    cell: CellCoord,
    kind: TowerKind,
    out_events: &mut Vec<Event>,
) -> Result<TowerId, PlacementError> {
    if world.phase.is_terminal() {
        return Err(PlacementError::GameOver);
    }
    if !world.map.in_bounds(cell) {
        return Err(PlacementError::OutOfBounds);
    }
    if !world.map.is_buildable(cell) {
        return Err(PlacementError::NotBuildable);
    }
    if world.towers.at(cell).is_some() {
        return Err(PlacementError::Occupied);
    }
    let cost = economy::placement_cost(kind);
    if world.gold < cost {
        return Err(PlacementError::InsufficientGold {
            cost,
            gold: world.gold,
        });
    }

    world.gold -= cost;
    let tower = world.towers.insert(kind, cell);
    world.selected_kind = None;
    out_events.push(Event::TowerPlaced { tower, kind, cell });
    tracing::debug!(tower = tower.get(), ?kind, ?cell, gold = world.gold, "tower placed");
    Ok(tower)
}

/// Raises a tower by one level, returning the new level.
pub fn upgrade_tower(
    world: &mut World,
    tower: TowerId,
    out_events: &mut Vec<Event>,
) -> Result<u8, UpgradeError> {
    if world.phase.is_terminal() {
        return Err(UpgradeError::GameOver);
    }
    let gold = world.gold;
    let state = world
        .towers
        .get_mut(tower)
        .ok_or(UpgradeError::MissingTower)?;
    let cost = economy::upgrade_cost(state.kind, state.level).ok_or(UpgradeError::MaxLevel)?;
    if gold < cost {
        return Err(UpgradeError::InsufficientGold { cost, gold });
    }

    state.level += 1;
    state.spent = state.spent.saturating_add(cost);
    let level = state.level;
    world.gold -= cost;
    out_events.push(Event::TowerUpgraded { tower, level });
    tracing::debug!(tower = tower.get(), level, cost, "tower upgraded");
    Ok(level)
}

/// Removes a tower and refunds part of its cumulative spend, returning the refund.
pub fn sell_tower(
    world: &mut World,
    tower: TowerId,
    out_events: &mut Vec<Event>,
) -> Result<u32, SellError> {
    if world.phase.is_terminal() {
        return Err(SellError::GameOver);
    }
    let state = world.towers.remove(tower).ok_or(SellError::MissingTower)?;
    let refund = economy::sell_value(state.spent);
    world.gold = world.gold.saturating_add(refund);
    if world.selected_tower == Some(tower) {
        world.selected_tower = None;
    }
    out_events.push(Event::TowerSold { tower, refund });
    tracing::debug!(tower = tower.get(), refund, "tower sold");
    Ok(refund)
}

/// Loads the next wave manifest and enters the wave phase, returning the wave index.
pub fn start_wave(world: &mut World, out_events: &mut Vec<Event>) -> Result<u32, WaveStartError> {
    match world.phase {
        GamePhase::Won | GamePhase::Lost => return Err(WaveStartError::GameOver),
        GamePhase::Wave => return Err(WaveStartError::WaveInProgress),
        GamePhase::Building => {}
    }
    let index = usize::try_from(world.wave).map_err(|_| WaveStartError::NoWavesRemaining)?;
    let composition = world
        .waves
        .get(index)
        .ok_or(WaveStartError::NoWavesRemaining)?;

    world.spawn_queue = composition.entries.iter().copied().collect();
    world.spawn_timer = world.spawn_queue.front().map_or(0.0, |entry| entry.delay);
    world.enemies_remaining = u32::try_from(composition.enemy_count()).unwrap_or(u32::MAX);
    world.wave_bonus = composition.bonus;
    world.wave += 1;
    world.phase = GamePhase::Wave;
    out_events.push(Event::WaveStarted { wave: world.wave });
    tracing::debug!(
        wave = world.wave,
        enemies = world.enemies_remaining,
        "wave started"
    );
    Ok(world.wave)
}

/// Arms a tower kind for placement, or clears the selection.
pub fn select_tower_kind(world: &mut World, kind: Option<TowerKind>) {
    world.selected_kind = kind;
}

/// Selects a placed tower, or clears the selection; unknown towers clear it.
pub fn select_tower(world: &mut World, tower: Option<TowerId>) {
    world.selected_tower = tower.filter(|id| world.towers.get(*id).is_some());
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use tower_defence_core::{
        CellCoord, CombatTuning, Difficulty, EnemyView, GamePhase, GameSnapshot, ProjectileView,
        TowerId, TowerSnapshot, TowerView,
    };
    use tower_defence_maps::Map;

    use super::World;

    /// Current match phase.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Gold available to spend.
    #[must_use]
    pub fn gold(world: &World) -> u32 {
        world.gold
    }

    /// Lives remaining.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// One-based index of the current or most recent wave.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.wave
    }

    /// Map the match is played on.
    #[must_use]
    pub fn map(world: &World) -> &Map {
        &world.map
    }

    /// Difficulty the waves were generated with.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        world.difficulty
    }

    /// Combat constants in effect.
    #[must_use]
    pub fn combat_tuning(world: &World) -> &CombatTuning {
        &world.combat
    }

    /// Captures a read-only view of every tower.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures a read-only view of every enemy still tracked by the world.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Snapshot of a single tower.
    #[must_use]
    pub fn tower(world: &World, id: TowerId) -> Option<TowerSnapshot> {
        world.towers.get(id).map(|tower| tower.snapshot())
    }

    /// Identifier of the tower standing on the provided cell.
    #[must_use]
    pub fn tower_at(world: &World, cell: CellCoord) -> Option<TowerId> {
        world.towers.at(cell).map(|tower| tower.id)
    }

    /// Deep copy of the complete match state.
    #[must_use]
    pub fn snapshot(world: &World) -> GameSnapshot {
        GameSnapshot {
            map_index: world.map_index,
            difficulty: world.difficulty,
            phase: world.phase,
            gold: world.gold,
            lives: world.lives,
            score: world.score,
            wave: world.wave,
            wave_count: world.wave_count(),
            enemies_remaining: world.enemies_remaining,
            spawn_timer: world.spawn_timer,
            spawn_queue: world.spawn_queue.iter().copied().collect(),
            towers: tower_view(world).into_vec(),
            enemies: enemy_view(world).into_vec(),
            projectiles: projectile_view(world).into_vec(),
            selected_kind: world.selected_kind,
            selected_tower: world.selected_tower,
        }
    }
}
