use tower_defence_core::{
    CellCoord, Difficulty, EnemyKind, Event, GamePhase, PlacementError, SellError, SpawnEntry,
    TowerId, TowerKind, UpgradeError, WaveComposition, WaveStartError,
};
use tower_defence_world::{self as world, query, World, WorldConfig};

const GRASS: CellCoord = CellCoord::new(2, 5);

fn composition(wave: u32, kinds: &[EnemyKind], bonus: u32) -> WaveComposition {
    WaveComposition {
        wave,
        entries: kinds
            .iter()
            .enumerate()
            .map(|(index, &kind)| SpawnEntry {
                kind,
                delay: if index == 0 { 0.0 } else { 1.0 },
            })
            .collect(),
        bonus,
    }
}

fn meadow(gold: u32, waves: Vec<WaveComposition>) -> World {
    let map = tower_defence_maps::load(0).expect("meadow loads");
    World::new(
        map,
        0,
        Difficulty::NORMAL,
        waves,
        WorldConfig {
            starting_gold: gold,
            ..WorldConfig::default()
        },
    )
}

#[test]
fn fresh_world_reports_its_match_settings() {
    let world = World::new(
        tower_defence_maps::load(1).expect("fork loads"),
        1,
        Difficulty::HARD,
        vec![composition(1, &[EnemyKind::Grunt], 25)],
        WorldConfig::default(),
    );

    assert_eq!(query::difficulty(&world), Difficulty::HARD);
    assert_eq!(query::map(&world).name(), "Fork");
    assert_eq!(query::phase(&world), GamePhase::Building);
    assert_eq!(query::gold(&world), 200);
    assert_eq!(query::lives(&world), 20);
    assert_eq!(query::wave(&world), 0);
}

#[test]
fn placing_the_cheapest_tower_next_to_the_path() {
    let mut world = meadow(200, Vec::new());
    world::select_tower_kind(&mut world, Some(TowerKind::Arrow));
    let mut events = Vec::new();

    let tower = world::place_tower(&mut world, GRASS, TowerKind::Arrow, &mut events)
        .expect("grass accepts towers");

    let snapshot = query::snapshot(&world);
    assert_eq!(snapshot.gold, 150);
    assert_eq!(snapshot.towers.len(), 1);
    assert_eq!(snapshot.towers[0].cell, GRASS);
    assert_eq!(snapshot.selected_kind, None);
    assert_eq!(query::tower_at(&world, GRASS), Some(tower));
    assert_eq!(
        events,
        vec![Event::TowerPlaced {
            tower,
            kind: TowerKind::Arrow,
            cell: GRASS,
        }]
    );
}

#[test]
fn failed_placements_never_mutate() {
    let mut world = meadow(120, Vec::new());
    let mut events = Vec::new();
    let _ = world::place_tower(&mut world, GRASS, TowerKind::Arrow, &mut events)
        .expect("initial placement");
    world::select_tower_kind(&mut world, Some(TowerKind::Cannon));
    events.clear();

    let cases = [
        (CellCoord::new(10, 0), TowerKind::Arrow, PlacementError::OutOfBounds),
        (CellCoord::new(1, 5), TowerKind::Arrow, PlacementError::NotBuildable),
        (CellCoord::new(0, 13), TowerKind::Arrow, PlacementError::NotBuildable),
        (GRASS, TowerKind::Arrow, PlacementError::Occupied),
        (
            CellCoord::new(2, 6),
            TowerKind::Cannon,
            PlacementError::InsufficientGold { cost: 100, gold: 70 },
        ),
    ];

    for (cell, kind, expected) in cases {
        let before = query::snapshot(&world);
        assert_eq!(world::place_tower(&mut world, cell, kind, &mut events), Err(expected));
        assert_eq!(query::snapshot(&world), before);
        assert!(events.is_empty());
    }
}

#[test]
fn upgrades_charge_the_level_price_until_the_cap() {
    let mut world = meadow(500, Vec::new());
    let mut events = Vec::new();
    let tower = world::place_tower(&mut world, GRASS, TowerKind::Arrow, &mut events)
        .expect("placement");

    assert_eq!(world::upgrade_tower(&mut world, tower, &mut events), Ok(2));
    assert_eq!(query::gold(&world), 500 - 50 - 40);
    assert_eq!(world::upgrade_tower(&mut world, tower, &mut events), Ok(3));
    assert_eq!(query::gold(&world), 500 - 50 - 40 - 80);

    let before = query::snapshot(&world);
    assert_eq!(
        world::upgrade_tower(&mut world, tower, &mut events),
        Err(UpgradeError::MaxLevel)
    );
    assert_eq!(
        world::upgrade_tower(&mut world, TowerId::new(42), &mut events),
        Err(UpgradeError::MissingTower)
    );
    assert_eq!(query::snapshot(&world), before);

    let snapshot = query::tower(&world, tower).expect("tower");
    assert_eq!(snapshot.level, 3);
    assert_eq!(snapshot.spent, 170);
}

#[test]
fn upgrade_without_gold_is_rejected() {
    let mut world = meadow(60, Vec::new());
    let mut events = Vec::new();
    let tower = world::place_tower(&mut world, GRASS, TowerKind::Arrow, &mut events)
        .expect("placement");
    let before = query::snapshot(&world);
    assert_eq!(
        world::upgrade_tower(&mut world, tower, &mut events),
        Err(UpgradeError::InsufficientGold { cost: 40, gold: 10 })
    );
    assert_eq!(query::snapshot(&world), before);
}

#[test]
fn gold_is_conserved_and_selling_always_loses() {
    let mut world = meadow(1_000, Vec::new());
    let mut events = Vec::new();
    let mut paid = 0;
    let mut refunded = 0;

    let cells = [CellCoord::new(2, 5), CellCoord::new(2, 6), CellCoord::new(0, 4)];
    let mut towers = Vec::new();
    for (cell, kind) in cells.into_iter().zip([TowerKind::Arrow, TowerKind::Tesla, TowerKind::Frost]) {
        towers.push(world::place_tower(&mut world, cell, kind, &mut events).expect("placement"));
        paid += tower_defence_system_economy::placement_cost(kind);
    }
    let _ = world::upgrade_tower(&mut world, towers[1], &mut events).expect("upgrade");
    paid += 80;

    for tower in towers {
        let spent = query::tower(&world, tower).expect("tower").spent;
        let refund = world::sell_tower(&mut world, tower, &mut events).expect("sale");
        assert!(refund < spent);
        refunded += refund;
    }

    assert_eq!(query::gold(&world), 1_000 - paid + refunded);
    assert!(query::tower_view(&world).iter().next().is_none());
}

#[test]
fn selling_clears_a_dangling_selection() {
    let mut world = meadow(200, Vec::new());
    let mut events = Vec::new();
    let tower = world::place_tower(&mut world, GRASS, TowerKind::Arrow, &mut events)
        .expect("placement");
    world::select_tower(&mut world, Some(tower));
    assert_eq!(query::snapshot(&world).selected_tower, Some(tower));

    assert_eq!(world::sell_tower(&mut world, tower, &mut events), Ok(30));
    assert_eq!(query::snapshot(&world).selected_tower, None);
    assert_eq!(
        world::sell_tower(&mut world, tower, &mut events),
        Err(SellError::MissingTower)
    );
}

#[test]
fn selecting_an_unknown_tower_clears_the_selection() {
    let mut world = meadow(200, Vec::new());
    world::select_tower(&mut world, Some(TowerId::new(3)));
    assert_eq!(query::snapshot(&world).selected_tower, None);
}

#[test]
fn starting_a_wave_loads_its_manifest() {
    let first = composition(1, &[EnemyKind::Grunt, EnemyKind::Grunt, EnemyKind::Runner], 25);
    let mut world = meadow(200, vec![first.clone(), composition(2, &[EnemyKind::Grunt], 0)]);
    let mut events = Vec::new();

    assert_eq!(world::start_wave(&mut world, &mut events), Ok(1));

    let snapshot = query::snapshot(&world);
    assert_eq!(snapshot.phase, GamePhase::Wave);
    assert_eq!(snapshot.wave, 1);
    assert_eq!(snapshot.wave_count, 2);
    assert_eq!(snapshot.spawn_queue, first.entries);
    assert_eq!(snapshot.enemies_remaining, 3);
    assert_eq!(events, vec![Event::WaveStarted { wave: 1 }]);

    assert_eq!(
        world::start_wave(&mut world, &mut events),
        Err(WaveStartError::WaveInProgress)
    );
}

#[test]
fn matches_without_waves_cannot_start_one() {
    let mut world = meadow(200, Vec::new());
    let mut events = Vec::new();
    assert_eq!(
        world::start_wave(&mut world, &mut events),
        Err(WaveStartError::NoWavesRemaining)
    );
    assert_eq!(query::phase(&world), GamePhase::Building);
}

#[test]
fn actions_are_allowed_during_a_wave() {
    let mut world = meadow(200, vec![composition(1, &[EnemyKind::Grunt], 25)]);
    let mut events = Vec::new();
    let _ = world::start_wave(&mut world, &mut events).expect("wave starts");
    assert!(world::place_tower(&mut world, GRASS, TowerKind::Arrow, &mut events).is_ok());
}
