#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that assigns each due enemy to a path.
//!
//! The world owns the spawn timer and announces due manifest entries with
//! [`Event::SpawnDue`]. This system only decides which route a new enemy
//! follows. Its random stream is reseeded at every [`Event::WaveStarted`], so
//! the choices inside one wave never depend on how earlier waves played out.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tower_defence_core::{Command, Event};
use tower_defence_system_wave_generation::derive_wave_seed;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    seed: u64,
}

impl Config {
    /// Creates a new configuration from the match seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

/// Pure system that converts due manifest entries into spawn commands.
#[derive(Debug)]
pub struct Spawning {
    seed: u64,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(derive_wave_seed(config.seed, 0)),
        }
    }

    /// Consumes world events and emits one spawn command per due entry.
    pub fn handle(&mut self, events: &[Event], path_count: usize, out: &mut Vec<Command>) {
        for event in events {
            match *event {
                Event::WaveStarted { wave } => {
                    self.rng = ChaCha8Rng::seed_from_u64(derive_wave_seed(self.seed, wave));
                }
                Event::SpawnDue { kind } => {
                    if path_count == 0 {
                        tracing::warn!(?kind, "spawn due on a map without paths");
                        continue;
                    }
                    let path = self.rng.gen_range(0..path_count);
                    out.push(Command::SpawnEnemy { kind, path });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_defence_core::EnemyKind;

    #[test]
    fn single_path_maps_always_choose_the_first_route() {
        let mut spawning = Spawning::new(Config::new(99));
        let mut commands = Vec::new();
        let due = vec![
            Event::SpawnDue {
                kind: EnemyKind::Grunt
            };
            8
        ];
        spawning.handle(&due, 1, &mut commands);
        assert_eq!(commands.len(), 8);
        assert!(commands
            .iter()
            .all(|command| matches!(command, Command::SpawnEnemy { path: 0, .. })));
    }
}
