use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use tower_defence_core::{Command, EnemyKind, Event};
use tower_defence_system_spawning::{Config, Spawning};

fn due(count: usize) -> Vec<Event> {
    let mut events = vec![Event::WaveStarted { wave: 3 }];
    events.extend((0..count).map(|index| Event::SpawnDue {
        kind: if index % 2 == 0 {
            EnemyKind::Grunt
        } else {
            EnemyKind::Runner
        },
    }));
    events
}

fn paths(commands: &[Command]) -> Vec<usize> {
    commands
        .iter()
        .map(|command| match command {
            Command::SpawnEnemy { path, .. } => *path,
            other => panic!("unexpected command emitted: {other:?}"),
        })
        .collect()
}

fn fingerprint(seed: u64) -> u64 {
    let mut spawning = Spawning::new(Config::new(seed));
    let mut commands = Vec::new();
    spawning.handle(&due(64), 2, &mut commands);
    let mut hasher = DefaultHasher::new();
    paths(&commands).hash(&mut hasher);
    hasher.finish()
}

#[test]
fn emits_one_command_per_due_entry_preserving_kind() {
    let mut spawning = Spawning::new(Config::new(7));
    let mut commands = Vec::new();
    spawning.handle(&due(5), 2, &mut commands);

    assert_eq!(commands.len(), 5);
    for (index, command) in commands.iter().enumerate() {
        let expected = if index % 2 == 0 {
            EnemyKind::Grunt
        } else {
            EnemyKind::Runner
        };
        match command {
            Command::SpawnEnemy { kind, path } => {
                assert_eq!(*kind, expected);
                assert!(*path < 2);
            }
            other => panic!("unexpected command emitted: {other:?}"),
        }
    }
}

#[test]
fn ignores_unrelated_events() {
    let mut spawning = Spawning::new(Config::new(7));
    let mut commands = Vec::new();
    spawning.handle(
        &[
            Event::WaveComplete { wave: 1, bonus: 25 },
            Event::GameOver { won: false },
        ],
        2,
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn map_without_paths_spawns_nothing() {
    let mut spawning = Spawning::new(Config::new(7));
    let mut commands = Vec::new();
    spawning.handle(&due(3), 0, &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn replays_are_deterministic_per_seed() {
    assert_eq!(fingerprint(0x1234_5678), fingerprint(0x1234_5678));
}

#[test]
fn both_routes_are_used() {
    let mut spawning = Spawning::new(Config::new(0x4d59_5df4_d0f3_3173));
    let mut commands = Vec::new();
    spawning.handle(&due(64), 2, &mut commands);
    let chosen = paths(&commands);
    assert!(chosen.contains(&0));
    assert!(chosen.contains(&1));
}

#[test]
fn wave_start_reseeds_the_stream() {
    let mut first = Spawning::new(Config::new(11));
    let mut warmed = Spawning::new(Config::new(11));

    let mut discarded = Vec::new();
    warmed.handle(&due(17), 2, &mut discarded);

    let mut a = Vec::new();
    let mut b = Vec::new();
    first.handle(&due(32), 2, &mut a);
    warmed.handle(&due(32), 2, &mut b);
    assert_eq!(paths(&a), paths(&b));
}
