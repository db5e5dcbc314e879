use rand::XorShiftRng;
use std::error::Error;
use std::fmt;

use crate::cells::Cartesian3DCoordinate;
use crate::generators;
use crate::grid::GridField;
use crate::pathing;
use crate::units::{AttemptsCount, CellsCount, Depth, Height, Width};

/// A carved field guaranteed to hold at least one route between its corner cells,
/// together with the shortest such route and the attempt that produced it.
#[derive(Debug)]
pub struct SolvedMaze {
    pub field: GridField,
    pub path: Vec<Cartesian3DCoordinate>,
    pub attempts: AttemptsCount,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationError {
    EmptyDimension,
    AttemptsExhausted { attempts: AttemptsCount },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GenerationError::EmptyDimension => {
                write!(f, "every maze dimension needs at least one cell")
            }
            GenerationError::AttemptsExhausted { attempts } => {
                write!(f,
                       "no solvable maze was produced within {} generation attempts",
                       attempts.0)
            }
        }
    }
}

impl Error for GenerationError {}

/// Carve-and-solve maze generation with a bounded retry budget.
///
/// Each attempt owns a fresh fully `Blocked` field: carve it with the recursive
/// backtracker, breach `extra_openings` random cells, then search for the shortest
/// route between the corner cells. The first attempt with a route wins and the field
/// ownership moves out with it. A carve can leave the end corner unreachable (even
/// dimensions keep it off the carve lattice), so unsolvable fields are discarded and
/// the next attempt starts over with fresh randomness from the same `rng` stream.
///
/// Exhausting the budget is an ordinary outcome reported as `AttemptsExhausted`,
/// never a panic; the caller decides whether to give up or to try a bigger budget.
pub fn solvable_maze(width: Width,
                     height: Height,
                     depth: Depth,
                     max_attempts: AttemptsCount,
                     extra_openings: CellsCount,
                     rng: &mut XorShiftRng)
                     -> Result<SolvedMaze, GenerationError> {

    // Bad dimensions fail eagerly, even with a zero attempt budget.
    if width.0 == 0 || height.0 == 0 || depth.0 == 0 {
        return Err(GenerationError::EmptyDimension);
    }

    for attempt in 1..(max_attempts.0 + 1) {

        let mut field = GridField::new(width, height, depth)
            .map_err(|_| GenerationError::EmptyDimension)?;

        generators::recursive_backtracker(&mut field, rng);
        generators::breach_random_cells(&mut field, extra_openings, rng);

        if let Some(path) = pathing::shortest_path(&field, field.start(), field.end()) {
            return Ok(SolvedMaze {
                field: field,
                path: path,
                attempts: AttemptsCount(attempt),
            });
        }
    }

    Err(GenerationError::AttemptsExhausted { attempts: max_attempts })
}
