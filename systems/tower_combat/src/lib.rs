#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns targeting data into shots and resolves impacts.
//!
//! Firing and resolution are two separate passes of the tick. Resolution
//! dispatches on the kind of the tower that fired the projectile and only
//! ever emits damage and status commands; the world decides whether a hit
//! kills and credits the reward exactly once.

use tower_defence_core::{
    CombatTuning, Command, EnemyId, EnemyView, Event, ProjectileSnapshot, ProjectileView,
    TowerKind, TowerTarget,
};

/// Tower combat system that queues firing and damage commands.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits one `Command::FireProjectile` per computed target.
    pub fn fire(&mut self, tower_targets: &[TowerTarget], out: &mut Vec<Command>) {
        out.extend(tower_targets.iter().map(|target| Command::FireProjectile {
            tower: target.tower,
            target: target.enemy,
            chain: target.chain.clone(),
        }));
    }

    /// Emits damage and status commands for every projectile that landed.
    ///
    /// Only [`Event::ProjectileImpact`] events are considered; the world
    /// raises one per projectile at the moment its flight completes.
    pub fn resolve(
        &mut self,
        events: &[Event],
        projectiles: &ProjectileView,
        enemies: &EnemyView,
        tuning: &CombatTuning,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();

        for event in events {
            let Event::ProjectileImpact { projectile } = event else {
                continue;
            };
            let Some(projectile) = projectiles.get(*projectile) else {
                continue;
            };
            self.resolve_projectile(projectile, enemies, tuning);
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }

    fn resolve_projectile(
        &mut self,
        projectile: &ProjectileSnapshot,
        enemies: &EnemyView,
        tuning: &CombatTuning,
    ) {
        let source = projectile.source;
        match projectile.tower_kind {
            TowerKind::Arrow => {
                if is_alive(enemies, projectile.target) {
                    self.scratch.push(Command::DamageEnemy {
                        enemy: projectile.target,
                        amount: projectile.damage,
                        source,
                    });
                }
            }
            TowerKind::Frost => {
                if is_alive(enemies, projectile.target) {
                    self.scratch.push(Command::DamageEnemy {
                        enemy: projectile.target,
                        amount: projectile.damage,
                        source,
                    });
                    self.scratch.push(Command::SlowEnemy {
                        enemy: projectile.target,
                        duration: tuning.slow_duration,
                    });
                }
            }
            TowerKind::Cannon => {
                self.scratch.push(Command::Detonate {
                    position: projectile.to,
                });
                let radius_sq = tuning.splash_radius() * tuning.splash_radius();
                for enemy in enemies.alive() {
                    if enemy.position.distance_squared(projectile.to) <= radius_sq {
                        self.scratch.push(Command::DamageEnemy {
                            enemy: enemy.id,
                            amount: projectile.damage,
                            source,
                        });
                    }
                }
            }
            TowerKind::Tesla => {
                if is_alive(enemies, projectile.target) {
                    self.scratch.push(Command::DamageEnemy {
                        enemy: projectile.target,
                        amount: projectile.damage,
                        source,
                    });
                }
                let falloff = projectile.damage * tuning.chain_falloff;
                for &link in &projectile.chain_targets {
                    if is_alive(enemies, link) {
                        self.scratch.push(Command::DamageEnemy {
                            enemy: link,
                            amount: falloff,
                            source,
                        });
                    }
                }
            }
        }
    }
}

fn is_alive(enemies: &EnemyView, id: EnemyId) -> bool {
    enemies.get(id).is_some_and(|enemy| enemy.alive)
}
