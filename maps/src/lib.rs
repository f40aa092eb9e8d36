#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static map model and the compiled-in map catalog.
//!
//! A [`Map`] is pure data: a grid of [`CellKind`] values plus one or more
//! precomputed routes from a spawn cell to an exit cell. Routes are authored
//! as axis-aligned corner points and expanded into one waypoint per traversed
//! cell, so one unit of enemy progress always equals one cell.

mod catalog;

pub use catalog::{catalog, MapDefinition};

use thiserror::Error;
use tower_defence_core::{CellCoord, CellKind};

/// Reasons a map definition may fail to load.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapError {
    /// The requested catalog index does not exist.
    #[error("map index {index} is out of range (catalog holds {available} maps)")]
    UnknownMap {
        /// Requested index.
        index: usize,
        /// Number of maps in the catalog.
        available: usize,
    },
    /// The definition contains no routes.
    #[error("map '{0}' defines no routes")]
    NoRoutes(&'static str),
    /// A route expands to fewer than two waypoints.
    #[error("route {route} must span at least two cells")]
    RouteTooShort {
        /// Index of the offending route.
        route: usize,
    },
    /// A corner lies outside the grid.
    #[error("route {route} leaves the grid at {cell:?}")]
    OutOfBounds {
        /// Index of the offending route.
        route: usize,
        /// Offending corner.
        cell: CellCoord,
    },
    /// Two consecutive corners are not on the same row or column.
    #[error("route {route} has a diagonal segment from {from:?} to {to:?}")]
    DiagonalSegment {
        /// Index of the offending route.
        route: usize,
        /// Segment start.
        from: CellCoord,
        /// Segment end.
        to: CellCoord,
    },
    /// A blocked overlay lies outside the grid.
    #[error("blocked cell {0:?} lies outside the grid")]
    BlockedOutOfBounds(CellCoord),
    /// A blocked overlay covers a route cell.
    #[error("blocked cell {0:?} overlaps a route")]
    BlockedRoute(CellCoord),
}

/// Loaded, validated map ready for simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct Map {
    name: &'static str,
    columns: u32,
    rows: u32,
    cells: Vec<CellKind>,
    paths: Vec<Vec<CellCoord>>,
}

impl Map {
    /// Builds a map from a catalog definition, validating every route.
    pub fn from_definition(definition: &MapDefinition) -> Result<Self, MapError> {
        if definition.routes.is_empty() {
            return Err(MapError::NoRoutes(definition.name));
        }

        let mut paths = Vec::with_capacity(definition.routes.len());
        for (route, corners) in definition.routes.iter().enumerate() {
            let waypoints = expand_route(route, corners, definition.columns, definition.rows)?;
            paths.push(waypoints);
        }

        let capacity = (definition.columns as usize) * (definition.rows as usize);
        let mut map = Self {
            name: definition.name,
            columns: definition.columns,
            rows: definition.rows,
            cells: vec![CellKind::Grass; capacity],
            paths,
        };

        let route_cells: Vec<CellCoord> = map.paths.iter().flatten().copied().collect();
        for cell in route_cells {
            map.set(cell, CellKind::Path);
        }
        let endpoints: Vec<(CellCoord, CellCoord)> = map
            .paths
            .iter()
            .map(|path| (path[0], path[path.len() - 1]))
            .collect();
        for (spawn, exit) in endpoints {
            map.set(spawn, CellKind::Spawn);
            map.set(exit, CellKind::Exit);
        }

        for &(row, column) in definition.blocked {
            let cell = CellCoord::new(row, column);
            match map.cell_kind(cell) {
                Some(CellKind::Grass) => map.set(cell, CellKind::Blocked),
                Some(_) => return Err(MapError::BlockedRoute(cell)),
                None => return Err(MapError::BlockedOutOfBounds(cell)),
            }
        }

        Ok(map)
    }

    /// Display name of the map.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Kind of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell_kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Reports whether a tower may stand on the cell, ignoring occupancy.
    #[must_use]
    pub fn is_buildable(&self, cell: CellCoord) -> bool {
        self.cell_kind(cell) == Some(CellKind::Grass)
    }

    /// Every route, each expanded to one waypoint per cell.
    #[must_use]
    pub fn paths(&self) -> &[Vec<CellCoord>] {
        &self.paths
    }

    /// Waypoints of a single route.
    #[must_use]
    pub fn path(&self, index: usize) -> Option<&[CellCoord]> {
        self.paths.get(index).map(Vec::as_slice)
    }

    /// Number of routes enemies may be assigned to.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Distinct spawn cells in route order.
    #[must_use]
    pub fn spawn_cells(&self) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> = Vec::new();
        for path in &self.paths {
            if !cells.contains(&path[0]) {
                cells.push(path[0]);
            }
        }
        cells
    }

    /// Distinct exit cells in route order.
    #[must_use]
    pub fn exit_cells(&self) -> Vec<CellCoord> {
        let mut cells: Vec<CellCoord> = Vec::new();
        for path in &self.paths {
            let exit = path[path.len() - 1];
            if !cells.contains(&exit) {
                cells.push(exit);
            }
        }
        cells
    }

    fn set(&mut self, cell: CellCoord, kind: CellKind) {
        if let Some(index) = self.index(cell) {
            self.cells[index] = kind;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.in_bounds(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Loads the map stored at `index` in the catalog.
pub fn load(index: usize) -> Result<Map, MapError> {
    let definitions = catalog();
    let definition = definitions.get(index).ok_or(MapError::UnknownMap {
        index,
        available: definitions.len(),
    })?;
    Map::from_definition(definition)
}

fn expand_route(
    route: usize,
    corners: &[(u32, u32)],
    columns: u32,
    rows: u32,
) -> Result<Vec<CellCoord>, MapError> {
    let mut waypoints: Vec<CellCoord> = Vec::new();

    for &(row, column) in corners {
        let corner = CellCoord::new(row, column);
        if row >= rows || column >= columns {
            return Err(MapError::OutOfBounds {
                route,
                cell: corner,
            });
        }

        let Some(&previous) = waypoints.last() else {
            waypoints.push(corner);
            continue;
        };

        if previous.row() != corner.row() && previous.column() != corner.column() {
            return Err(MapError::DiagonalSegment {
                route,
                from: previous,
                to: corner,
            });
        }

        let mut current = previous;
        while current != corner {
            current = step_towards(current, corner);
            waypoints.push(current);
        }
    }

    if waypoints.len() < 2 {
        return Err(MapError::RouteTooShort { route });
    }

    Ok(waypoints)
}

fn step_towards(from: CellCoord, to: CellCoord) -> CellCoord {
    let row = match from.row().cmp(&to.row()) {
        std::cmp::Ordering::Less => from.row() + 1,
        std::cmp::Ordering::Greater => from.row() - 1,
        std::cmp::Ordering::Equal => from.row(),
    };
    let column = if row == from.row() {
        match from.column().cmp(&to.column()) {
            std::cmp::Ordering::Less => from.column() + 1,
            std::cmp::Ordering::Greater => from.column() - 1,
            std::cmp::Ordering::Equal => from.column(),
        }
    } else {
        from.column()
    };
    CellCoord::new(row, column)
}
