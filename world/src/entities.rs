//! Enemy and projectile state owned by the world.

use tower_defence_core::{
    EnemyId, EnemyKind, EnemySnapshot, PixelPoint, ProjectileId, ProjectileSnapshot, TowerId,
    TowerKind,
};

#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) path: usize,
    pub(crate) progress: f32,
    pub(crate) speed: f32,
    pub(crate) slow_timer: f32,
    pub(crate) position: PixelPoint,
    pub(crate) alive: bool,
}

impl EnemyState {
    /// Creates a full-health enemy standing on the first waypoint of `path`.
    pub(crate) fn spawn(id: EnemyId, kind: EnemyKind, path: usize, position: PixelPoint) -> Self {
        let profile = kind.profile();
        Self {
            id,
            kind,
            hp: profile.max_hp,
            max_hp: profile.max_hp,
            path,
            progress: 0.0,
            speed: profile.speed,
            slow_timer: 0.0,
            position,
            alive: true,
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            hp: self.hp,
            max_hp: self.max_hp,
            path: self.path,
            progress: self.progress,
            speed: self.speed,
            slow_timer: self.slow_timer,
            position: self.position,
            alive: self.alive,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct ProjectileState {
    pub(crate) id: ProjectileId,
    pub(crate) source: TowerId,
    pub(crate) tower_kind: TowerKind,
    pub(crate) from: PixelPoint,
    /// Target position frozen when the projectile was fired.
    pub(crate) to: PixelPoint,
    pub(crate) progress: f32,
    pub(crate) damage: f32,
    pub(crate) target: EnemyId,
    pub(crate) chain_targets: Vec<EnemyId>,
    /// Set once the impact has been announced; guards against a second resolution.
    pub(crate) resolved: bool,
}

impl ProjectileState {
    /// Advances the flight and reports whether the projectile landed during this step.
    pub(crate) fn advance(&mut self, amount: f32) -> bool {
        self.progress += amount;
        if self.progress >= 1.0 && !self.resolved {
            self.resolved = true;
            return true;
        }
        false
    }

    pub(crate) fn is_spent(&self) -> bool {
        self.progress >= 1.0
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            source: self.source,
            tower_kind: self.tower_kind,
            from: self.from,
            to: self.to,
            progress: self.progress,
            damage: self.damage,
            target: self.target,
            aoe: self.tower_kind == TowerKind::Cannon,
            chain_targets: self.chain_targets.clone(),
        }
    }
}
