//! Authoritative tower state management utilities.

use std::collections::BTreeMap;

use tower_defence_core::{cell_to_pixel, CellCoord, TowerId, TowerKind, TowerSnapshot};
use tower_defence_system_economy as economy;

/// Tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell the tower occupies.
    pub(crate) cell: CellCoord,
    /// Upgrade level, starting at 1.
    pub(crate) level: u8,
    /// Seconds until the next shot.
    pub(crate) cooldown: f32,
    /// Kills credited to the tower's projectiles.
    pub(crate) total_kills: u32,
    /// Gold invested through placement and upgrades.
    pub(crate) spent: u32,
}

impl TowerState {
    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            center: cell_to_pixel(self.cell),
            level: self.level,
            cooldown: self.cooldown,
            total_kills: self.total_kills,
            spent: self.spent,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
///
/// Identifiers are allocated monotonically and never reused, even after a
/// tower is sold.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Inserts a fresh level-one tower and returns its identifier.
    pub(crate) fn insert(&mut self, kind: TowerKind, cell: CellCoord) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().wrapping_add(1));
        let _ = self.entries.insert(
            id,
            TowerState {
                id,
                kind,
                cell,
                level: 1,
                cooldown: 0.0,
                total_kills: 0,
                spent: economy::placement_cost(kind),
            },
        );
        id
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<TowerState> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    /// Tower standing on the provided cell, if any.
    pub(crate) fn at(&self, cell: CellCoord) -> Option<&TowerState> {
        self.entries.values().find(|tower| tower.cell == cell)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TowerState> {
        self.entries.values_mut()
    }
}
