#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that advances enemies along their routes.

use std::time::Duration;

use tower_defence_core::{
    cell_to_pixel, CellCoord, Command, CombatTuning, EnemySnapshot, EnemyView, Event, PixelPoint,
};

/// Pure system that reacts to elapsed time and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates a new movement system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Consumes world events and the enemy view to emit movement commands.
    ///
    /// Every alive enemy yields exactly one command: [`Command::MoveEnemy`]
    /// while it is still on its route, or [`Command::LeakEnemy`] once its
    /// progress reaches the final waypoint index.
    pub fn handle(
        &mut self,
        events: &[Event],
        enemies: &EnemyView,
        paths: &[Vec<CellCoord>],
        tuning: &CombatTuning,
        out: &mut Vec<Command>,
    ) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = elapsed.saturating_add(*dt);
            }
        }

        if elapsed.is_zero() {
            return;
        }

        let dt = elapsed.as_secs_f32();
        for enemy in enemies.alive() {
            let Some(path) = paths.get(enemy.path) else {
                tracing::warn!(enemy = enemy.id.get(), path = enemy.path, "enemy on unknown path");
                continue;
            };
            out.push(advance(enemy, path, dt, tuning));
        }
    }
}

fn advance(enemy: &EnemySnapshot, path: &[CellCoord], dt: f32, tuning: &CombatTuning) -> Command {
    let slow_timer = (enemy.slow_timer - dt).max(0.0);
    let speed = if slow_timer > 0.0 {
        enemy.speed * tuning.slow_factor
    } else {
        enemy.speed
    };
    let progress = enemy.progress + speed * dt;

    let last = path.len().saturating_sub(1);
    if progress >= last as f32 {
        return Command::LeakEnemy { enemy: enemy.id };
    }

    Command::MoveEnemy {
        enemy: enemy.id,
        progress,
        position: position_along(path, progress),
        slow_timer,
    }
}

/// Pixel position of a continuous progress value along a route.
///
/// Progress is clamped to the route; the integral part selects the segment
/// and the fractional part interpolates within it.
#[must_use]
pub fn position_along(path: &[CellCoord], progress: f32) -> PixelPoint {
    let Some(&last) = path.last() else {
        return PixelPoint::default();
    };
    let progress = progress.max(0.0);
    let index = progress.floor() as usize;
    if index + 1 >= path.len() {
        return cell_to_pixel(last);
    }
    let from = cell_to_pixel(path[index]);
    let to = cell_to_pixel(path[index + 1]);
    from.lerp(to, progress - index as f32)
}
