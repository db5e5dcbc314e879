use bit_set::BitSet;
use rand::{Rng, XorShiftRng};
use smallvec::SmallVec;
use std::cmp;

use crate::cells::{offset_coordinate, AXIAL_DIRECTIONS};
use crate::grid::GridField;
use crate::units::CellsCount;

/// Apply the recursive backtracker maze generation algorithm to a fully `Blocked` field.
///
/// Cells logically live on the even coordinates of the volume and the odd coordinate
/// between two such lattice cells acts as a removable wall. An explicit stack walks the
/// lattice depth first: from the cell on top of the stack, enumerate the in-bounds
/// lattice neighbours two steps away that have not been visited; open the wall cell and
/// a randomly chosen neighbour and push it, or pop to backtrack when no candidate is
/// left. Every reachable lattice cell is visited exactly once, so the opened cells form
/// a spanning tree of the even lattice - one passage between any two lattice cells.
///
/// The start and end corner cells are forced `Open` afterwards. An even length
/// dimension places the end corner off the lattice, in which case nothing guarantees a
/// passage reaches it - callers wanting a solvable maze retry the whole carve.
pub fn recursive_backtracker(field: &mut GridField, rng: &mut XorShiftRng) {

    let CellsCount(cells_count) = field.size();
    let mut visited = BitSet::with_capacity(cells_count);
    let start = field.start();

    field.open(start);
    visited.insert(field.grid_coordinate_to_index(start)
                        .expect("the start corner is always in bounds"));
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {

        // Unvisited lattice cells two steps away, paired with the wall cell between.
        let candidates = AXIAL_DIRECTIONS.iter()
            .filter_map(|&dir| {
                let wall = offset_coordinate(current, dir, 1)?;
                let lattice_cell = offset_coordinate(current, dir, 2)?;
                match field.grid_coordinate_to_index(lattice_cell) {
                    Some(index) if !visited.contains(index) => Some((wall, lattice_cell, index)),
                    _ => None,
                }
            })
            .collect::<SmallVec<[_; 6]>>();

        if candidates.is_empty() {
            stack.pop();
        } else {
            let (wall, lattice_cell, index) = candidates[rng.gen::<usize>() % candidates.len()];
            field.open(wall);
            field.open(lattice_cell);
            visited.insert(index);
            stack.push(lattice_cell);
        }
    }

    // Forced, not probabilistic: both corners must end up Open whatever the dimensions.
    field.open(field.start());
    field.open(field.end());
}

/// The carve post-process opening count the driver uses when not told otherwise:
/// five openings, less on tiny fields.
pub fn default_extra_openings(size: CellsCount) -> CellsCount {
    CellsCount(cmp::min(5, size.0 / 20))
}

/// Open `openings` uniformly random cells of the field, drawn independently.
///
/// A chosen cell may already be `Open` and a fresh opening need not touch anything
/// carved, so this can create cycles, shortcuts or isolated noise cells. Nothing
/// about maze solvability may rely on it.
pub fn breach_random_cells(field: &mut GridField, openings: CellsCount, rng: &mut XorShiftRng) {
    for _ in 0..openings.0 {
        let coord = field.random_cell(rng);
        field.open(coord);
    }
}
