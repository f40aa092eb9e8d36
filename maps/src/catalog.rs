//! Compiled-in map definitions.

/// Authoring-time description of a map.
///
/// Routes are listed as `(row, column)` corner points; consecutive corners
/// must share a row or a column. The first corner of a route becomes a spawn
/// cell and the last one an exit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapDefinition {
    /// Display name of the map.
    pub name: &'static str,
    /// Number of columns in the grid.
    pub columns: u32,
    /// Number of rows in the grid.
    pub rows: u32,
    /// Corner points of every route.
    pub routes: &'static [&'static [(u32, u32)]],
    /// Decorative cells that accept no towers.
    pub blocked: &'static [(u32, u32)],
}

const MEADOW: MapDefinition = MapDefinition {
    name: "Meadow",
    columns: 15,
    rows: 10,
    routes: &[&[(1, 0), (1, 11), (4, 11), (4, 3), (7, 3), (7, 14)]],
    blocked: &[(0, 13), (3, 0), (5, 7), (9, 1), (9, 10)],
};

const FORK: MapDefinition = MapDefinition {
    name: "Fork",
    columns: 15,
    rows: 10,
    routes: &[
        &[(4, 0), (4, 3), (1, 3), (1, 10), (4, 10), (4, 14)],
        &[(4, 0), (4, 3), (7, 3), (7, 10), (4, 10), (4, 14)],
    ],
    blocked: &[(0, 0), (4, 6), (9, 14)],
};

const TWIN_GATES: MapDefinition = MapDefinition {
    name: "Twin Gates",
    columns: 15,
    rows: 10,
    routes: &[
        &[(0, 2), (3, 2), (3, 8), (4, 8), (4, 14)],
        &[(9, 2), (6, 2), (6, 8), (4, 8), (4, 14)],
    ],
    blocked: &[(1, 12), (4, 0), (8, 12)],
};

static CATALOG: [MapDefinition; 3] = [MEADOW, FORK, TWIN_GATES];

/// Every map shipped with the game, in selection order.
#[must_use]
pub fn catalog() -> &'static [MapDefinition] {
    &CATALOG
}
