#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use tower_defence_core::{
    CombatTuning, EnemyId, EnemyView, PixelPoint, TowerKind, TowerTarget, TowerView, CELL_SIZE,
};
use tower_defence_system_economy as economy;

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    enemy_workspace: Vec<EnemyCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes targets for every tower whose cooldown has elapsed.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments. Towers are visited in id order and each picks the closest
    /// alive enemy within range; equidistant enemies resolve to the lowest id.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        enemies: &EnemyView,
        tuning: &CombatTuning,
        out: &mut Vec<TowerTarget>,
    ) {
        out.clear();

        self.prepare_enemy_workspace(enemies);
        if self.enemy_workspace.is_empty() {
            return;
        }

        for tower in towers.iter() {
            if tower.cooldown > 0.0 {
                continue;
            }

            let range = economy::range(tower.kind, tower.level) * CELL_SIZE;
            let Some(primary) = closest(&self.enemy_workspace, tower.center, range, &[]) else {
                continue;
            };

            let chain = if tower.kind == TowerKind::Tesla {
                self.chain_from(primary, range * tuning.chain_radius_factor, tuning)
            } else {
                Vec::new()
            };

            out.push(TowerTarget {
                tower: tower.id,
                enemy: primary.id,
                chain,
            });
        }
    }

    fn chain_from(
        &self,
        primary: EnemyCandidate,
        radius: f32,
        tuning: &CombatTuning,
    ) -> Vec<EnemyId> {
        let extra_links = tuning.chain_links.saturating_sub(1);
        let mut struck = vec![primary.id];
        let mut chain = Vec::with_capacity(extra_links);
        let mut previous = primary.position;

        while chain.len() < extra_links {
            let Some(next) = closest(&self.enemy_workspace, previous, radius, &struck) else {
                break;
            };
            struck.push(next.id);
            chain.push(next.id);
            previous = next.position;
        }

        chain
    }

    fn prepare_enemy_workspace(&mut self, enemies: &EnemyView) {
        self.enemy_workspace.clear();
        self.enemy_workspace
            .extend(enemies.alive().map(|snapshot| EnemyCandidate {
                id: snapshot.id,
                position: snapshot.position,
            }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct EnemyCandidate {
    id: EnemyId,
    position: PixelPoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance_sq: f32,
    candidate: EnemyCandidate,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance_sq != other.distance_sq {
            return self.distance_sq < other.distance_sq;
        }

        self.candidate.id < other.candidate.id
    }
}

fn closest(
    candidates: &[EnemyCandidate],
    origin: PixelPoint,
    radius: f32,
    excluded: &[EnemyId],
) -> Option<EnemyCandidate> {
    let max_distance = radius * radius;
    let mut best: Option<BestCandidate> = None;

    for candidate in candidates {
        if excluded.contains(&candidate.id) {
            continue;
        }

        let distance_sq = origin.distance_squared(candidate.position);
        if distance_sq > max_distance {
            continue;
        }

        let current = BestCandidate {
            distance_sq,
            candidate: *candidate,
        };

        match &mut best {
            Some(existing) => {
                if current.precedes(existing) {
                    *existing = current;
                }
            }
            None => best = Some(current),
        }
    }

    best.map(|best| best.candidate)
}
