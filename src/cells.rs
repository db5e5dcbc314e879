use smallvec::SmallVec;
use std::convert::From;

use crate::units::{Height, Width};

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian3DCoordinate {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Cartesian3DCoordinate {
    pub fn new(x: u32, y: u32, z: u32) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate { x: x, y: y, z: z }
    }

    /// Decode a coordinate from its row major index: x varies fastest, then y, then z.
    #[inline]
    pub fn from_row_major_index(index: usize,
                                width: Width,
                                height: Height)
                                -> Cartesian3DCoordinate {
        let Width(w) = width;
        let Height(h) = height;
        let x = index % w;
        let y = (index / w) % h;
        let z = index / (w * h);

        Cartesian3DCoordinate::new(x as u32, y as u32, z as u32)
    }
}

impl From<(u32, u32, u32)> for Cartesian3DCoordinate {
    fn from(x_y_z: (u32, u32, u32)) -> Cartesian3DCoordinate {
        Cartesian3DCoordinate::new(x_y_z.0, x_y_z.1, x_y_z.2)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian3DCoordinate; 6]>;

/// The six axis aligned directions of a 3d grid cell.
/// `North`/`South` step along y, `West`/`East` along x and `Up`/`Down` between z layers.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassAxial {
    North,
    South,
    West,
    East,
    Up,
    Down,
}

/// Neighbour expansion order used everywhere a cell's six neighbours are enumerated.
/// Search results must not depend on hash iteration order, so the order is fixed.
pub const AXIAL_DIRECTIONS: [CompassAxial; 6] = [CompassAxial::North,
                                                 CompassAxial::South,
                                                 CompassAxial::West,
                                                 CompassAxial::East,
                                                 CompassAxial::Up,
                                                 CompassAxial::Down];

/// Creates a new `Cartesian3DCoordinate` offset `steps` cells away in the given direction.
/// Returns None if the coordinate is not representable (steps below zero on an axis).
/// Upper bound checks belong to the grid that owns the coordinate space.
pub fn offset_coordinate(coord: Cartesian3DCoordinate,
                         dir: CompassAxial,
                         steps: u32)
                         -> Option<Cartesian3DCoordinate> {

    let Cartesian3DCoordinate { x, y, z } = coord;
    match dir {
        CompassAxial::North => {
            if y >= steps {
                Some(Cartesian3DCoordinate { y: y - steps, ..coord })
            } else {
                None
            }
        }
        CompassAxial::South => Some(Cartesian3DCoordinate { y: y + steps, ..coord }),
        CompassAxial::West => {
            if x >= steps {
                Some(Cartesian3DCoordinate { x: x - steps, ..coord })
            } else {
                None
            }
        }
        CompassAxial::East => Some(Cartesian3DCoordinate { x: x + steps, ..coord }),
        CompassAxial::Up => {
            if z >= steps {
                Some(Cartesian3DCoordinate { z: z - steps, ..coord })
            } else {
                None
            }
        }
        CompassAxial::Down => Some(Cartesian3DCoordinate { z: z + steps, ..coord }),
    }
}
