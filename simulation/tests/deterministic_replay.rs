use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use tower_defence_core::{CellCoord, Difficulty, Event, GamePhase, TowerKind};
use tower_defence_simulation::{Simulation, SimulationConfig};

const STEP: Duration = Duration::from_millis(50);
const MAX_STEPS: usize = 40_000;

fn play(map_index: usize, seed: u64) -> (Vec<Event>, u64) {
    let config = SimulationConfig {
        starting_gold: 600,
        seed,
        ..SimulationConfig::default()
    };
    let mut simulation = Simulation::new(config, map_index, Difficulty::HARD).expect("map loads");
    for (cell, kind) in [
        (CellCoord::new(3, 1), TowerKind::Tesla),
        (CellCoord::new(5, 2), TowerKind::Cannon),
        (CellCoord::new(2, 9), TowerKind::Frost),
        (CellCoord::new(6, 9), TowerKind::Arrow),
    ] {
        let _ = simulation.place_tower(cell, kind);
    }

    let mut events = Vec::new();
    for _ in 0..4 {
        if simulation.start_wave().is_err() {
            break;
        }
        for _ in 0..MAX_STEPS {
            if simulation.state().phase != GamePhase::Wave {
                break;
            }
            events.extend(simulation.update(STEP));
        }
    }

    let mut hasher = DefaultHasher::new();
    format!("{:?}", simulation.state()).hash(&mut hasher);
    (events, hasher.finish())
}

#[test]
fn identical_inputs_replay_identically() {
    for map_index in 0..3 {
        assert_eq!(play(map_index, 0x1234_5678), play(map_index, 0x1234_5678));
    }
}
