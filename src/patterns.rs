use tracing::debug;

use crate::engine::Universe;
use crate::error::LifeError;

/// A named shape as `(column, row)` offsets from its top-left origin.
pub struct Pattern {
    pub name: &'static str,
    pub offsets: &'static [(u32, u32)],
}

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    offsets: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const PULSAR: Pattern = Pattern {
    name: "pulsar",
    offsets: &[
        (3, 1), (4, 1), (5, 1), (9, 1), (10, 1), (11, 1),
        (1, 3), (6, 3), (8, 3), (13, 3),
        (1, 4), (6, 4), (8, 4), (13, 4),
        (1, 5), (6, 5), (8, 5), (13, 5),
        (3, 6), (4, 6), (5, 6), (9, 6), (10, 6), (11, 6),
        (3, 8), (4, 8), (5, 8), (9, 8), (10, 8), (11, 8),
        (1, 9), (6, 9), (8, 9), (13, 9),
        (1, 10), (6, 10), (8, 10), (13, 10),
        (1, 11), (6, 11), (8, 11), (13, 11),
        (3, 13), (4, 13), (5, 13), (9, 13), (10, 13), (11, 13),
    ],
};

pub const PATTERNS: &[Pattern] = &[
    GLIDER,
    PULSAR,
    Pattern {
        name: "block",
        offsets: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "blinker",
        offsets: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "toad",
        offsets: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        offsets: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "lwss",
        offsets: &[(1, 0), (4, 0), (0, 1), (0, 2), (4, 2), (0, 3), (1, 3), (2, 3), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        offsets: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "gosper-glider-gun",
        offsets: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

/// Look up a pattern by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Shift a flattened column/row list by `(column, row)`. A trailing
/// unpaired value is shifted as a column and left for the engine to reject.
pub fn translate(coords: &[u32], column: u32, row: u32) -> Vec<u32> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if i % 2 == 0 {
                v.saturating_add(column)
            } else {
                v.saturating_add(row)
            }
        })
        .collect()
}

impl Pattern {
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offsets as a flattened column/row list.
    pub fn flat(&self) -> Vec<u32> {
        self.offsets.iter().flat_map(|&(c, r)| [c, r]).collect()
    }

    /// Flattened list with the shape's origin moved to `(column, row)`.
    pub fn translate(&self, column: u32, row: u32) -> Vec<u32> {
        translate(&self.flat(), column, row)
    }

    /// Stamp the shape onto `universe` at `(column, row)`. Nothing is drawn
    /// if any cell would land off the grid.
    pub fn stamp(&self, universe: &mut Universe, column: u32, row: u32) -> Result<(), LifeError> {
        debug!(pattern = self.name, column, row, "stamping pattern");
        universe.set_cells_by_coords(&self.translate(column, row))
    }
}
