use crate::cells::{Cartesian3DCoordinate, CoordinateSmallVec};
use crate::pathing::{Distances, MaxDistance};
use crate::utils::FnvHashSet;

/// Render the contents of an `Open` grid cell as text.
/// The String should be 3 glyphs long, padded if required.
pub trait GridDisplay {
    fn render_cell_body(&self, _: Cartesian3DCoordinate) -> String {
        String::from("   ")
    }
}

impl<MaxDistanceT> GridDisplay for Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    fn render_cell_body(&self, coord: Cartesian3DCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian3DCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[Cartesian3DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian3DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: Cartesian3DCoordinate) -> String {

        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")
        } else if contains_coordinate(&self.end_coordinates) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}
