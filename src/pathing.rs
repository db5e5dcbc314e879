use std::collections::VecDeque;
use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::Cartesian3DCoordinate;
use crate::grid::GridField;
use crate::units::CellsCount;
use crate::utils;
use crate::utils::FnvHashMap;

// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this out each time.
// Note generic parameter type aliases are not in the language - `type X = Y;` only works with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}


/// Hop distances from one `Open` start cell to every `Open` cell reachable from it.
/// Unreachable and `Blocked` cells have no distance.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: Cartesian3DCoordinate,
    distances: FnvHashMap<Cartesian3DCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Flood the field breadth first from `start_coordinate`.
    /// Returns None when the start coordinate is out of bounds or `Blocked`.
    pub fn for_field(field: &GridField,
                     start_coordinate: Cartesian3DCoordinate)
                     -> Option<Distances<MaxDistanceT>> {

        if !field.is_open(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let CellsCount(cells_count) = field.size();
        let mut distances = utils::fnv_hashmap(cells_count);
        distances.insert(start_coordinate, Zero::zero());

        // Every passage costs one step, so the first time a cell is seen its distance is
        // final - the distances map doubles as the visited set and the frontier never
        // needs revisiting logic.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                // All cells except the start cell are infinity distance from the start
                // until processed, represented as max_value when first accessed.
                let distance_to_cell: MaxDistanceT = *distances.entry(*cell_coord)
                    .or_insert_with(Bounded::max_value);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let neighbours = field.open_neighbours(*cell_coord);
                for neighbour_coord in &*neighbours {

                    let distance_to_neighbour: MaxDistanceT = *distances.entry(*neighbour_coord)
                        .or_insert_with(Bounded::max_value);
                    if distance_to_neighbour == Bounded::max_value() {

                        distances.insert(*neighbour_coord, distance_to_cell + One::one());
                        new_frontier.push(*neighbour_coord);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate: start_coordinate,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian3DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian3DCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_field(&self) -> SmallVec<[Cartesian3DCoordinate; 8]> {
        let mut furthest = SmallVec::<[Cartesian3DCoordinate; 8]>::new();
        let furthest_distance = self.max();

        for (coord, distance) in self.distances.iter() {
            if *distance == furthest_distance {
                furthest.push(*coord);
            }
        }
        furthest
    }
}

/// Compute the shortest path walking `Open` cells from `from` to `to`, both inclusive.
///
/// Breadth first search with a FIFO frontier: cells are expanded by increasing step
/// distance and every passage costs one step, so the search can stop and walk the
/// parent links back the moment `to` leaves the frontier - that path cannot be beaten.
/// Neighbours are expanded in the fixed axial direction order, making the returned
/// path reproducible for a given field.
///
/// Returns None when `to` is unreachable from `from`, or either cell is `Blocked` or
/// out of bounds. The field is never mutated and no search state outlives the call.
pub fn shortest_path(field: &GridField,
                     from: Cartesian3DCoordinate,
                     to: Cartesian3DCoordinate)
                     -> Option<Vec<Cartesian3DCoordinate>> {

    if !field.is_open(from) || !field.is_open(to) {
        return None;
    }

    let CellsCount(cells_count) = field.size();
    let mut parents: FnvHashMap<Cartesian3DCoordinate, Cartesian3DCoordinate> =
        utils::fnv_hashmap(cells_count);
    let mut visited = utils::fnv_hashset(cells_count);
    visited.insert(from);

    let mut frontier = VecDeque::new();
    frontier.push_back(from);

    while let Some(current) = frontier.pop_front() {

        if current == to {
            let mut path = vec![current];
            let mut backtrack = current;
            while let Some(&parent) = parents.get(&backtrack) {
                path.push(parent);
                backtrack = parent;
            }
            path.reverse();
            return Some(path);
        }

        let neighbours = field.open_neighbours(current);
        for neighbour_coord in &*neighbours {
            if !visited.contains(neighbour_coord) {
                visited.insert(*neighbour_coord);
                parents.insert(*neighbour_coord, current);
                frontier.push_back(*neighbour_coord);
            }
        }
    }

    None
}
