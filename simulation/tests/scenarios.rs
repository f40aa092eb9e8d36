use std::time::Duration;

use tower_defence_core::{
    CellCoord, Difficulty, Event, GamePhase, PlacementError, TowerKind, WaveStartError,
};
use tower_defence_maps::MapError;
use tower_defence_simulation::{InitError, Simulation, SimulationConfig};
use tower_defence_system_wave_generation::generate_waves;
use tower_defence_world::query;

const STEP: Duration = Duration::from_millis(100);
const MAX_STEPS: usize = 20_000;

fn meadow(config: SimulationConfig) -> Simulation {
    Simulation::new(config, 0, Difficulty::NORMAL).expect("meadow loads")
}

fn run_wave(simulation: &mut Simulation) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..MAX_STEPS {
        if simulation.state().phase != GamePhase::Wave {
            return events;
        }
        events.extend(simulation.update(STEP));
    }
    panic!("wave did not finish within {MAX_STEPS} steps");
}

fn count(events: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|event| predicate(event)).count()
}

#[test]
fn building_a_tower_before_the_first_wave() {
    let mut simulation = meadow(SimulationConfig::default());
    let before = simulation.state();
    assert_eq!(before.phase, GamePhase::Building);
    assert_eq!(before.gold, 200);

    let result = simulation.place_tower(CellCoord::new(2, 5), TowerKind::Arrow);

    assert!(result.is_ok());
    let after = simulation.state();
    assert_eq!(after.gold, 150);
    assert_eq!(after.towers.len(), 1);
}

#[test]
fn starting_the_first_wave_loads_its_generated_manifest() {
    let mut simulation = meadow(SimulationConfig::default());
    assert_eq!(simulation.state().wave, 0);

    assert_eq!(simulation.start_wave(), Ok(1));

    let state = simulation.state();
    assert_eq!(state.phase, GamePhase::Wave);
    assert_eq!(state.wave, 1);
    assert_eq!(state.spawn_queue, generate_waves(Difficulty::NORMAL)[0].entries);
    assert_eq!(simulation.start_wave(), Err(WaveStartError::WaveInProgress));
}

#[test]
fn updates_outside_a_wave_are_no_ops() {
    let mut simulation = meadow(SimulationConfig::default());
    let before = simulation.state();
    assert!(simulation.update(Duration::from_secs(5)).is_empty());
    assert_eq!(simulation.state(), before);
}

#[test]
fn undefended_wave_leaks_every_enemy_then_pays_its_bonus() {
    let mut simulation = meadow(SimulationConfig::default());
    let _ = simulation.start_wave().expect("wave starts");

    let events = run_wave(&mut simulation);

    let state = simulation.state();
    assert_eq!(count(&events, |e| matches!(e, Event::Spawn { .. })), 6);
    assert_eq!(count(&events, |e| matches!(e, Event::Leak { .. })), 6);
    assert_eq!(state.lives, 14);
    assert_eq!(state.phase, GamePhase::Building);
    assert_eq!(state.gold, 225);
    assert_eq!(state.score, 25);
    assert_eq!(state.enemies_remaining, 0);
    assert!(state.enemies.is_empty());
    assert_eq!(events.last(), Some(&Event::WaveComplete { wave: 1, bonus: 25 }));
}

#[test]
fn defended_wave_accounts_for_every_enemy() {
    let mut simulation = meadow(SimulationConfig::default());
    for cell in [
        CellCoord::new(0, 2),
        CellCoord::new(2, 2),
        CellCoord::new(0, 5),
        CellCoord::new(2, 5),
    ] {
        let _ = simulation
            .place_tower(cell, TowerKind::Arrow)
            .expect("grass next to the path");
    }
    assert_eq!(simulation.state().gold, 0);
    let _ = simulation.start_wave().expect("wave starts");

    let events = run_wave(&mut simulation);

    let state = simulation.state();
    let kills = count(&events, |e| matches!(e, Event::Kill { .. }));
    let leaks = count(&events, |e| matches!(e, Event::Leak { .. }));
    assert!(kills > 0);
    assert_eq!(kills + leaks, 6);
    assert_eq!(state.lives, 20 - leaks as u32);
    assert_eq!(state.gold, 10 * kills as u32 + 25);
    let credited: u32 = state.towers.iter().map(|tower| tower.total_kills).sum();
    assert_eq!(credited as usize, kills);
    assert!(events.iter().all(Event::is_presentation));
}

#[test]
fn running_out_of_lives_loses_the_match() {
    let mut simulation = meadow(SimulationConfig {
        starting_lives: 3,
        ..SimulationConfig::default()
    });
    let _ = simulation.start_wave().expect("wave starts");

    let events = run_wave(&mut simulation);

    let state = simulation.state();
    assert_eq!(state.phase, GamePhase::Lost);
    assert_eq!(state.lives, 0);
    assert_eq!(count(&events, |e| matches!(e, Event::Leak { .. })), 3);
    assert_eq!(events.last(), Some(&Event::GameOver { won: false }));
    assert_eq!(count(&events, |e| matches!(e, Event::WaveComplete { .. })), 0);

    assert!(simulation.update(STEP).is_empty());
    assert_eq!(simulation.state(), state);
    assert_eq!(
        simulation.place_tower(CellCoord::new(2, 5), TowerKind::Arrow),
        Err(PlacementError::GameOver)
    );
    assert_eq!(simulation.start_wave(), Err(WaveStartError::GameOver));
}

#[test]
fn clearing_the_final_wave_wins_without_a_bonus() {
    let mut simulation = meadow(SimulationConfig {
        starting_lives: 1_000_000,
        ..SimulationConfig::default()
    });
    let waves = generate_waves(Difficulty::NORMAL);
    let last = waves.len() as u32;

    let mut final_events = Vec::new();
    for expected in 1..=last {
        assert_eq!(simulation.start_wave(), Ok(expected));
        final_events = run_wave(&mut simulation);
    }

    let state = simulation.state();
    assert_eq!(state.phase, GamePhase::Won);
    let bonuses: u32 = waves.iter().map(|wave| wave.bonus).sum();
    assert_eq!(waves[waves.len() - 1].bonus, 0);
    assert_eq!(state.gold, 200 + bonuses);
    assert_eq!(
        &final_events[final_events.len() - 2..],
        &[
            Event::WaveComplete {
                wave: last,
                bonus: 0
            },
            Event::GameOver { won: true },
        ]
    );
    assert_eq!(simulation.start_wave(), Err(WaveStartError::GameOver));
}

#[test]
fn every_tower_kind_contributes_on_the_fork() {
    let mut simulation = Simulation::new(
        SimulationConfig {
            starting_gold: 1_000,
            ..SimulationConfig::default()
        },
        1,
        Difficulty::NORMAL,
    )
    .expect("fork loads");
    for (cell, kind) in [
        (CellCoord::new(3, 1), TowerKind::Cannon),
        (CellCoord::new(5, 1), TowerKind::Frost),
        (CellCoord::new(3, 2), TowerKind::Tesla),
        (CellCoord::new(5, 2), TowerKind::Arrow),
    ] {
        let _ = simulation.place_tower(cell, kind).expect("grass beside the spawn");
    }
    let _ = simulation.start_wave().expect("wave starts");

    let events = run_wave(&mut simulation);

    for kind in TowerKind::ALL {
        assert!(
            events
                .iter()
                .any(|event| matches!(event, Event::Fire { kind: fired, .. } if *fired == kind)),
            "{kind:?} never fired"
        );
    }
    assert!(count(&events, |e| matches!(e, Event::Explosion { .. })) > 0);
    assert!(count(&events, |e| matches!(e, Event::Slow { .. })) > 0);
    assert!(count(&events, |e| matches!(e, Event::Kill { .. })) > 0);
    assert_eq!(simulation.state().phase, GamePhase::Building);
}

#[test]
fn selling_mid_wave_keeps_the_match_consistent() {
    let mut simulation = meadow(SimulationConfig::default());
    let tower = simulation
        .place_tower(CellCoord::new(2, 1), TowerKind::Arrow)
        .expect("placement");
    simulation.select_tower(Some(tower));
    let _ = simulation.start_wave().expect("wave starts");
    for _ in 0..20 {
        let _ = simulation.update(STEP);
    }

    assert_eq!(simulation.sell_tower(tower), Ok(30));
    assert_eq!(simulation.state().selected_tower, None);

    let _ = run_wave(&mut simulation);
    assert_eq!(simulation.state().phase, GamePhase::Building);
}

#[test]
fn initialize_resets_the_match() {
    let mut simulation = meadow(SimulationConfig::default());
    let _ = simulation
        .place_tower(CellCoord::new(2, 5), TowerKind::Arrow)
        .expect("placement");
    let _ = simulation.start_wave().expect("wave starts");
    let _ = simulation.update(STEP);

    simulation
        .initialize(2, Difficulty::EASY)
        .expect("twin gates loads");

    let state = simulation.state();
    assert_eq!(state.map_index, 2);
    assert_eq!(state.difficulty, Difficulty::EASY);
    assert_eq!(state.phase, GamePhase::Building);
    assert_eq!(state.gold, 200);
    assert_eq!(state.wave, 0);
    assert!(state.towers.is_empty());
    assert!(state.enemies.is_empty());
}

#[test]
fn configured_rules_carry_across_initialize() {
    let config = SimulationConfig::from_toml_str(
        "starting_gold = 320\nstarting_lives = 7\nseed = 11\n",
    )
    .expect("valid config");
    let mut simulation = meadow(config);

    simulation
        .initialize(2, Difficulty::HARD)
        .expect("twin gates loads");

    assert_eq!(simulation.config(), &config);
    let world = simulation.world();
    assert_eq!(query::map(world).name(), "Twin Gates");
    assert_eq!(query::difficulty(world), Difficulty::HARD);
    assert_eq!(query::gold(world), 320);
    assert_eq!(query::lives(world), 7);
}

#[test]
fn initialize_with_an_unknown_map_keeps_the_current_match() {
    let mut simulation = meadow(SimulationConfig::default());
    let before = simulation.state();

    let error = simulation
        .initialize(99, Difficulty::NORMAL)
        .expect_err("no such map");

    assert!(matches!(
        error,
        InitError::Map(MapError::UnknownMap { index: 99, .. })
    ));
    assert_eq!(simulation.state(), before);
}
