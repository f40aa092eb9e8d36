#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Driver-facing facade of the Tower Defence engine.
//!
//! [`Simulation`] owns the authoritative world together with every pure
//! system and pumps them in a fixed phase order on each [`Simulation::update`]:
//! spawn, move, target and fire, advance and resolve projectiles, wave-end
//! check, sweep. Only presentation events leave the facade; bookkeeping events
//! stay internal.

mod config;

use std::time::Duration;

use thiserror::Error;
use tower_defence_core::{
    CellCoord, Command, Difficulty, Event, GamePhase, GameSnapshot, PlacementError, SellError,
    TowerId, TowerKind, TowerTarget, UpgradeError, WaveStartError,
};
use tower_defence_maps::MapError;
use tower_defence_system_movement::Movement;
use tower_defence_system_spawning::{Config as SpawningConfig, Spawning};
use tower_defence_system_tower_combat::TowerCombat;
use tower_defence_system_tower_targeting::TowerTargeting;
use tower_defence_system_wave_generation::generate_waves;
use tower_defence_world::{self as world, query, World};

pub use config::SimulationConfig;

/// Reasons a match may fail to initialise.
#[derive(Debug, Error)]
pub enum InitError {
    /// The requested map could not be loaded.
    #[error("failed to load map")]
    Map(#[from] MapError),
}

/// Single owner of the match state and the systems that drive it.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    world: World,
    spawning: Spawning,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    commands: Vec<Command>,
    targets: Vec<TowerTarget>,
}

impl Simulation {
    /// Creates a match on the provided catalog map.
    pub fn new(
        config: SimulationConfig,
        map_index: usize,
        difficulty: Difficulty,
    ) -> Result<Self, InitError> {
        let world = build_world(&config, map_index, difficulty)?;
        Ok(Self {
            spawning: Spawning::new(SpawningConfig::new(config.seed)),
            config,
            world,
            movement: Movement::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            commands: Vec::new(),
            targets: Vec::new(),
        })
    }

    /// Resets all state and starts a fresh match on the provided map.
    ///
    /// On failure the current match is left untouched.
    pub fn initialize(&mut self, map_index: usize, difficulty: Difficulty) -> Result<(), InitError> {
        self.world = build_world(&self.config, map_index, difficulty)?;
        self.spawning = Spawning::new(SpawningConfig::new(self.config.seed));
        self.commands.clear();
        self.targets.clear();
        Ok(())
    }

    /// Configuration the match was created with.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Deep copy of the current match state.
    #[must_use]
    pub fn state(&self) -> GameSnapshot {
        query::snapshot(&self.world)
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advances the match by `dt` and returns the presentation events of the tick.
    ///
    /// Outside of the wave phase this is a no-op returning no events.
    pub fn update(&mut self, dt: Duration) -> Vec<Event> {
        if query::phase(&self.world) != GamePhase::Wave {
            return Vec::new();
        }

        let tuning = *query::combat_tuning(&self.world);
        let mut emitted = Vec::new();

        self.commands.push(Command::Tick { dt });
        let _ = self.flush(&mut emitted);
        let path_count = query::map(&self.world).path_count();
        self.spawning
            .handle(&emitted, path_count, &mut self.commands);
        let _ = self.flush(&mut emitted);

        let enemies = query::enemy_view(&self.world);
        self.movement.handle(
            &emitted,
            &enemies,
            query::map(&self.world).paths(),
            &tuning,
            &mut self.commands,
        );
        let _ = self.flush(&mut emitted);

        if query::phase(&self.world) == GamePhase::Wave {
            let towers = query::tower_view(&self.world);
            let enemies = query::enemy_view(&self.world);
            self.targeting
                .handle(&towers, &enemies, &tuning, &mut self.targets);
            self.combat.fire(&self.targets, &mut self.commands);
            let _ = self.flush(&mut emitted);

            self.commands.push(Command::AdvanceProjectiles { dt });
            let impacts = self.flush(&mut emitted);
            let projectiles = query::projectile_view(&self.world);
            let enemies = query::enemy_view(&self.world);
            self.combat.resolve(
                &emitted[impacts..],
                &projectiles,
                &enemies,
                &tuning,
                &mut self.commands,
            );
            let _ = self.flush(&mut emitted);

            self.commands.push(Command::ResolveWaveEnd);
            let _ = self.flush(&mut emitted);
        }

        self.commands.push(Command::Sweep);
        let _ = self.flush(&mut emitted);

        tracing::trace!(
            dt = dt.as_secs_f32(),
            events = emitted.len(),
            phase = ?query::phase(&self.world),
            "tick complete"
        );

        emitted.retain(Event::is_presentation);
        emitted
    }

    /// Enters the next wave.
    pub fn start_wave(&mut self) -> Result<u32, WaveStartError> {
        let mut events = Vec::new();
        let wave = world::start_wave(&mut self.world, &mut events)?;
        let path_count = query::map(&self.world).path_count();
        self.spawning
            .handle(&events, path_count, &mut self.commands);
        let _ = self.flush(&mut events);
        Ok(wave)
    }

    /// Builds a tower of the provided kind on a grass cell.
    pub fn place_tower(
        &mut self,
        cell: CellCoord,
        kind: TowerKind,
    ) -> Result<TowerId, PlacementError> {
        let mut events = Vec::new();
        world::place_tower(&mut self.world, cell, kind, &mut events)
    }

    /// Raises a tower by one level, returning the new level.
    pub fn upgrade_tower(&mut self, tower: TowerId) -> Result<u8, UpgradeError> {
        let mut events = Vec::new();
        world::upgrade_tower(&mut self.world, tower, &mut events)
    }

    /// Sells a tower, returning the refunded gold.
    pub fn sell_tower(&mut self, tower: TowerId) -> Result<u32, SellError> {
        let mut events = Vec::new();
        world::sell_tower(&mut self.world, tower, &mut events)
    }

    /// Arms a tower kind for placement, or clears the selection.
    pub fn select_tower_kind(&mut self, kind: Option<TowerKind>) {
        world::select_tower_kind(&mut self.world, kind);
    }

    /// Selects a placed tower, or clears the selection.
    pub fn select_tower(&mut self, tower: Option<TowerId>) {
        world::select_tower(&mut self.world, tower);
    }

    /// Applies every queued command and returns the index of the first new event.
    fn flush(&mut self, emitted: &mut Vec<Event>) -> usize {
        let start = emitted.len();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, emitted);
        }
        start
    }
}

fn build_world(
    config: &SimulationConfig,
    map_index: usize,
    difficulty: Difficulty,
) -> Result<World, InitError> {
    let map = tower_defence_maps::load(map_index)?;
    let waves = generate_waves(difficulty);
    tracing::debug!(
        map = map.name(),
        map_index,
        difficulty = difficulty.get(),
        waves = waves.len(),
        "match initialised"
    );
    Ok(World::new(
        map,
        map_index,
        difficulty,
        waves,
        config.world_config(),
    ))
}
