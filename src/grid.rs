use itertools::Itertools;
use rand::{Rng, XorShiftRng};
use std::fmt;
use std::rc::Rc;

use crate::cells::{offset_coordinate, Cartesian3DCoordinate, CompassAxial, CoordinateSmallVec,
                   AXIAL_DIRECTIONS};
use crate::grid_displays::GridDisplay;
use crate::units::{CellsCount, Depth, Height, Width};

/// Occupancy state of one grid cell. Everything starts `Blocked`; carving a maze
/// turns passage cells `Open`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Blocked,
    Open,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridFieldError {
    EmptyDimension,
}

/// A cuboid volume of `Blocked`/`Open` cells with two designated corner cells.
///
/// The cells are a flat row major `Vec`: x varies fastest, then y, then z.
/// `start` is the origin corner and `end` the diagonally opposite corner, fixed
/// for the lifetime of the field.
pub struct GridField {
    cells: Vec<CellState>,
    width: Width,
    height: Height,
    depth: Depth,
    start: Cartesian3DCoordinate,
    end: Cartesian3DCoordinate,
    grid_display: Option<Rc<GridDisplay>>,
}

impl fmt::Debug for GridField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "GridField :: width: {:?}, height: {:?}, depth: {:?}, open cells: {}",
               self.width,
               self.height,
               self.depth,
               self.cells.iter().filter(|&&state| state == CellState::Open).count())
    }
}

impl GridField {
    /// Create a fully `Blocked` field. Any zero length dimension is rejected as
    /// the corner cells would not exist.
    pub fn new(width: Width, height: Height, depth: Depth) -> Result<GridField, GridFieldError> {

        if width.0 == 0 || height.0 == 0 || depth.0 == 0 {
            return Err(GridFieldError::EmptyDimension);
        }

        let cells_count = width.0 * height.0 * depth.0;
        Ok(GridField {
            cells: vec![CellState::Blocked; cells_count],
            width: width,
            height: height,
            depth: depth,
            start: Cartesian3DCoordinate::new(0, 0, 0),
            end: Cartesian3DCoordinate::new(width.0 as u32 - 1,
                                            height.0 as u32 - 1,
                                            depth.0 as u32 - 1),
            grid_display: None,
        })
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<GridDisplay>> {
        &self.grid_display
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> Depth {
        self.depth
    }

    #[inline]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.cells.len())
    }

    #[inline]
    pub fn start(&self) -> Cartesian3DCoordinate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Cartesian3DCoordinate {
        self.end
    }

    /// The state of the cell at `coord`, None for an out of bounds coordinate.
    #[inline]
    pub fn cell_state(&self, coord: Cartesian3DCoordinate) -> Option<CellState> {
        self.grid_coordinate_to_index(coord).map(|index| self.cells[index])
    }

    #[inline]
    pub fn is_open(&self, coord: Cartesian3DCoordinate) -> bool {
        self.cell_state(coord) == Some(CellState::Open)
    }

    /// Open the cell at `coord`. Returns false if the coordinate is out of bounds.
    pub fn open(&mut self, coord: Cartesian3DCoordinate) -> bool {
        if let Some(index) = self.grid_coordinate_to_index(coord) {
            self.cells[index] = CellState::Open;
            true
        } else {
            false
        }
    }

    pub fn random_cell(&self, rng: &mut XorShiftRng) -> Cartesian3DCoordinate {
        let index = rng.gen::<usize>() % self.cells.len();
        Cartesian3DCoordinate::from_row_major_index(index, self.width, self.height)
    }

    /// Cells axially adjacent to a particular cell, whatever their state.
    pub fn neighbours(&self, coord: Cartesian3DCoordinate) -> CoordinateSmallVec {
        AXIAL_DIRECTIONS.iter()
                        .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
                        .collect()
    }

    /// Axially adjacent cells that are `Open`.
    pub fn open_neighbours(&self, coord: Cartesian3DCoordinate) -> CoordinateSmallVec {
        AXIAL_DIRECTIONS.iter()
                        .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
                        .filter(|&neighbour| self.is_open(neighbour))
                        .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian3DCoordinate,
                                  direction: CompassAxial)
                                  -> Option<Cartesian3DCoordinate> {
        offset_coordinate(coord, direction, 1).and_then(|neighbour_coord| {
            if self.is_valid_coordinate(neighbour_coord) {
                Some(neighbour_coord)
            } else {
                None
            }
        })
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian3DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0 &&
        (coord.z as usize) < self.depth.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian3DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            let Width(w) = self.width;
            let Height(h) = self.height;
            Some(((coord.z as usize * h) + coord.y as usize) * w + coord.x as usize)
        } else {
            None
        }
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: self.cells.len(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Renders the field one z layer at a time. `Blocked` cells print as solid blocks,
/// `Open` cells defer to any injected `GridDisplay` for their 3 glyph body.
impl fmt::Display for GridField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const BLOCKED_BODY: &str = "███";
        const OPEN_BODY: &str = "   ";

        let mut output = String::new();
        for z in 0..self.depth.0 {
            output.push_str(&format!("layer z={}\n", z));

            for y in 0..self.height.0 {
                let row_render = (0..self.width.0)
                    .map(|x| {
                        let coord = Cartesian3DCoordinate::new(x as u32, y as u32, z as u32);
                        if self.is_open(coord) {
                            self.grid_display
                                .as_ref()
                                .map_or(String::from(OPEN_BODY),
                                        |display| display.render_cell_body(coord))
                        } else {
                            String::from(BLOCKED_BODY)
                        }
                    })
                    .join("");
                output.push_str(&row_render);
                output.push('\n');
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    width: Width,
    height: Height,
}
impl Iterator for CellIter {
    type Item = Cartesian3DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cartesian3DCoordinate::from_row_major_index(self.current_cell_number,
                                                                    self.width,
                                                                    self.height);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

// Convenient when holding the GridField by value, otherwise `field.iter()` reads better
// than `&*field`.
impl<'a> IntoIterator for &'a GridField {
    type Item = Cartesian3DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools;
    use rand::{SeedableRng, XorShiftRng};
    use crate::units::{Depth, Height, Width};

    // Compare a smallvec to e.g. a vec! or &[T] without smallvec syntax noise.
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    fn small_field() -> GridField {
        GridField::new(Width(3), Height(3), Depth(3)).unwrap()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(GridField::new(Width(0), Height(3), Depth(3)).unwrap_err(),
                   GridFieldError::EmptyDimension);
        assert_eq!(GridField::new(Width(3), Height(0), Depth(3)).unwrap_err(),
                   GridFieldError::EmptyDimension);
        assert_eq!(GridField::new(Width(3), Height(3), Depth(0)).unwrap_err(),
                   GridFieldError::EmptyDimension);
    }

    #[test]
    fn field_size_and_dimensions() {
        let g = GridField::new(Width(4), Height(3), Depth(2)).unwrap();
        assert_eq!(g.size(), CellsCount(24));
        assert_eq!(g.width(), Width(4));
        assert_eq!(g.height(), Height(3));
        assert_eq!(g.depth(), Depth(2));
    }

    #[test]
    fn corner_cells_are_fixed_at_construction() {
        let g = GridField::new(Width(9), Height(9), Depth(5)).unwrap();
        assert_eq!(g.start(), Cartesian3DCoordinate::new(0, 0, 0));
        assert_eq!(g.end(), Cartesian3DCoordinate::new(8, 8, 4));

        let single = GridField::new(Width(1), Height(1), Depth(1)).unwrap();
        assert_eq!(single.start(), single.end());
    }

    #[test]
    fn all_cells_start_blocked() {
        let g = small_field();
        assert!(g.iter().all(|coord| g.cell_state(coord) == Some(CellState::Blocked)));
    }

    #[test]
    fn opening_cells() {
        let mut g = small_field();
        let a = Cartesian3DCoordinate::new(1, 2, 0);

        assert!(!g.is_open(a));
        assert!(g.open(a));
        assert!(g.is_open(a));
        assert_eq!(g.cell_state(a), Some(CellState::Open));

        // Opening twice is a no-op, not an error.
        assert!(g.open(a));
        assert!(g.is_open(a));
    }

    #[test]
    fn out_of_bounds_coordinates() {
        let mut g = small_field();
        let outside = Cartesian3DCoordinate::new(3, 0, 0);

        assert!(!g.is_valid_coordinate(outside));
        assert_eq!(g.cell_state(outside), None);
        assert!(!g.open(outside));
        assert_eq!(g.grid_coordinate_to_index(outside), None);
    }

    #[test]
    fn neighbour_cells() {
        let g = small_field();
        let c = |x, y, z| Cartesian3DCoordinate::new(x, y, z);

        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian3DCoordinate]| {
            let neighbours: Vec<Cartesian3DCoordinate> = g.neighbours(coord)
                                                          .iter()
                                                          .cloned()
                                                          .sorted();
            let expected: Vec<Cartesian3DCoordinate> = expected_neighbours.iter()
                                                                          .cloned()
                                                                          .sorted();
            assert_eq!(neighbours, expected);
        };

        // corner: three neighbours
        check_expected_neighbours(c(0, 0, 0), &[c(1, 0, 0), c(0, 1, 0), c(0, 0, 1)]);
        check_expected_neighbours(c(2, 2, 2), &[c(1, 2, 2), c(2, 1, 2), c(2, 2, 1)]);

        // face centre: five neighbours
        check_expected_neighbours(c(1, 1, 0),
                                  &[c(0, 1, 0), c(2, 1, 0), c(1, 0, 0), c(1, 2, 0), c(1, 1, 1)]);

        // body centre: the full six
        check_expected_neighbours(c(1, 1, 1),
                                  &[c(0, 1, 1), c(2, 1, 1), c(1, 0, 1), c(1, 2, 1), c(1, 1, 0),
                                    c(1, 1, 2)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_field();
        let c = |x, y, z| Cartesian3DCoordinate::new(x, y, z);
        let check_neighbour = |coord, dir: CompassAxial, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };

        check_neighbour(c(0, 0, 0), CompassAxial::North, None);
        check_neighbour(c(0, 0, 0), CompassAxial::West, None);
        check_neighbour(c(0, 0, 0), CompassAxial::Up, None);
        check_neighbour(c(0, 0, 0), CompassAxial::South, Some(c(0, 1, 0)));
        check_neighbour(c(0, 0, 0), CompassAxial::East, Some(c(1, 0, 0)));
        check_neighbour(c(0, 0, 0), CompassAxial::Down, Some(c(0, 0, 1)));

        check_neighbour(c(2, 2, 2), CompassAxial::South, None);
        check_neighbour(c(2, 2, 2), CompassAxial::East, None);
        check_neighbour(c(2, 2, 2), CompassAxial::Down, None);
        check_neighbour(c(2, 2, 2), CompassAxial::North, Some(c(2, 1, 2)));
    }

    #[test]
    fn open_neighbours_filters_blocked_cells() {
        let mut g = small_field();
        let c = |x, y, z| Cartesian3DCoordinate::new(x, y, z);

        assert_smallvec_eq!(g.open_neighbours(c(1, 1, 1)), &[]);

        g.open(c(1, 0, 1));
        g.open(c(1, 1, 0));
        let open: Vec<Cartesian3DCoordinate> = g.open_neighbours(c(1, 1, 1))
                                                .iter()
                                                .cloned()
                                                .sorted();
        assert_eq!(open, vec![c(1, 0, 1), c(1, 1, 0)].into_iter().sorted());
    }

    #[test]
    fn coordinate_index_round_trip() {
        let g = GridField::new(Width(4), Height(3), Depth(2)).unwrap();
        for (index, coord) in g.iter().enumerate() {
            assert_eq!(g.grid_coordinate_to_index(coord), Some(index));
        }
    }

    #[test]
    fn cell_iter() {
        let g = GridField::new(Width(2), Height(2), Depth(2)).unwrap();
        let c = |x, y, z| Cartesian3DCoordinate::new(x, y, z);
        assert_eq!(g.iter().collect::<Vec<Cartesian3DCoordinate>>(),
                   &[c(0, 0, 0), c(1, 0, 0), c(0, 1, 0), c(1, 1, 0),
                     c(0, 0, 1), c(1, 0, 1), c(0, 1, 1), c(1, 1, 1)]);
        assert_eq!(g.iter().size_hint(), (8, Some(8)));
    }

    #[test]
    fn random_cell_is_always_in_bounds() {
        let g = GridField::new(Width(4), Height(3), Depth(2)).unwrap();
        let mut rng = XorShiftRng::from_seed([0x0b4d_5eed, 0x9e37_79b9, 0x6a09_e667, 0xb7e1_5162]);
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn display_renders_blocked_and_open_cells() {
        let mut g = GridField::new(Width(2), Height(1), Depth(1)).unwrap();
        g.open(Cartesian3DCoordinate::new(0, 0, 0));

        let rendered = format!("{}", g);
        assert!(rendered.contains("layer z=0"));
        assert!(rendered.contains("   ███"));
    }
}
