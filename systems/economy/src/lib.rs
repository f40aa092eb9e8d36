#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tower pricing and per-level statistics.
//!
//! Every number the world needs to charge for, refund, or fire a tower is
//! derived here from a fixed per-kind table and the tower level. The functions
//! are pure so that the world, the targeting system and presentation layers
//! always agree on the same values.

use tower_defence_core::{TowerKind, MAX_TOWER_LEVEL};

/// Range gained per level above the first, measured in cells.
const RANGE_PER_LEVEL: f32 = 0.3;

/// Relative fire-rate gain per level above the first.
const FIRE_RATE_PER_LEVEL: f32 = 0.15;

/// Share of the total spend refunded on sale, as a fraction `numerator / denominator`.
const REFUND_NUMERATOR: u32 = 3;
const REFUND_DENOMINATOR: u32 = 5;

/// Base statistics of a tower kind at level one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Gold charged for placement.
    pub cost: u32,
    /// Damage per hit at level one.
    pub base_damage: f32,
    /// Damage gained per level above the first.
    pub damage_bonus: f32,
    /// Firing range at level one measured in cells.
    pub base_range: f32,
    /// Shots per second at level one.
    pub base_fire_rate: f32,
    /// Upgrade price from level one; scales linearly with the current level.
    pub base_upgrade_cost: u32,
}

/// Looks up the static statistics of a tower kind.
#[must_use]
pub const fn stats(kind: TowerKind) -> TowerStats {
    match kind {
        TowerKind::Arrow => TowerStats {
            cost: 50,
            base_damage: 15.0,
            damage_bonus: 8.0,
            base_range: 3.0,
            base_fire_rate: 2.0,
            base_upgrade_cost: 40,
        },
        TowerKind::Cannon => TowerStats {
            cost: 100,
            base_damage: 30.0,
            damage_bonus: 15.0,
            base_range: 2.5,
            base_fire_rate: 0.6,
            base_upgrade_cost: 70,
        },
        TowerKind::Frost => TowerStats {
            cost: 75,
            base_damage: 6.0,
            damage_bonus: 4.0,
            base_range: 2.5,
            base_fire_rate: 1.0,
            base_upgrade_cost: 50,
        },
        TowerKind::Tesla => TowerStats {
            cost: 120,
            base_damage: 20.0,
            damage_bonus: 10.0,
            base_range: 2.8,
            base_fire_rate: 0.8,
            base_upgrade_cost: 80,
        },
    }
}

/// Gold charged to build a tower of the provided kind.
#[must_use]
pub const fn placement_cost(kind: TowerKind) -> u32 {
    stats(kind).cost
}

/// Damage dealt per hit at the provided level.
#[must_use]
pub fn damage(kind: TowerKind, level: u8) -> f32 {
    let stats = stats(kind);
    stats.base_damage + levels_above_first(level) * stats.damage_bonus
}

/// Firing range at the provided level, measured in cells.
#[must_use]
pub fn range(kind: TowerKind, level: u8) -> f32 {
    stats(kind).base_range + levels_above_first(level) * RANGE_PER_LEVEL
}

/// Shots per second at the provided level.
#[must_use]
pub fn fire_rate(kind: TowerKind, level: u8) -> f32 {
    stats(kind).base_fire_rate * (1.0 + levels_above_first(level) * FIRE_RATE_PER_LEVEL)
}

/// Seconds a tower waits between shots at the provided level.
#[must_use]
pub fn cooldown(kind: TowerKind, level: u8) -> f32 {
    1.0 / fire_rate(kind, level)
}

/// Price of raising a tower from `level` to `level + 1`.
///
/// Returns `None` once the tower has reached [`MAX_TOWER_LEVEL`].
#[must_use]
pub fn upgrade_cost(kind: TowerKind, level: u8) -> Option<u32> {
    if level == 0 || level >= MAX_TOWER_LEVEL {
        return None;
    }
    Some(stats(kind).base_upgrade_cost * u32::from(level))
}

/// Total gold invested in a tower that reached `level` through upgrades.
#[must_use]
pub fn cumulative_spend(kind: TowerKind, level: u8) -> u32 {
    let upgrades: u32 = (1..level.min(MAX_TOWER_LEVEL))
        .filter_map(|from| upgrade_cost(kind, from))
        .sum();
    placement_cost(kind) + upgrades
}

/// Gold refunded when a tower with the provided total spend is sold.
#[must_use]
pub const fn sell_value(spent: u32) -> u32 {
    spent * REFUND_NUMERATOR / REFUND_DENOMINATOR
}

fn levels_above_first(level: u8) -> f32 {
    f32::from(level.saturating_sub(1))
}
