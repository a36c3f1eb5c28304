use std::cmp::Ordering;
use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Turn angle for a quarter turn to the left
pub const LEFT: f64 = -90.0;
/// Turn angle for a quarter turn to the right
pub const RIGHT: f64 = 90.0;
/// Turn angle for an eighth turn to the left
pub const HALF_LEFT: f64 = -45.0;
/// Turn angle for an eighth turn to the right
pub const HALF_RIGHT: f64 = 45.0;
pub const HALF_CIRCLE: f64 = 180.0;
pub const FULL_CIRCLE: f64 = 360.0;
pub const AHEAD: f64 = 0.0;

/// One of the eight compass headings.
///
/// Degrees are measured clockwise from the positive x-axis, with y growing
/// downwards, so north is 270.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassDirection {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl CompassDirection {
    pub const ALL: [CompassDirection; 8] = [
        CompassDirection::East,
        CompassDirection::SouthEast,
        CompassDirection::South,
        CompassDirection::SouthWest,
        CompassDirection::West,
        CompassDirection::NorthWest,
        CompassDirection::North,
        CompassDirection::NorthEast,
    ];

    pub fn degrees(&self) -> f64 {
        match self {
            CompassDirection::East => 0.0,
            CompassDirection::SouthEast => 45.0,
            CompassDirection::South => 90.0,
            CompassDirection::SouthWest => 135.0,
            CompassDirection::West => 180.0,
            CompassDirection::NorthWest => 225.0,
            CompassDirection::North => 270.0,
            CompassDirection::NorthEast => 315.0,
        }
    }

    /// Nearest compass heading for an arbitrary angle in degrees
    pub fn from_degrees(degrees: f64) -> Self {
        let normalized = degrees.rem_euclid(FULL_CIRCLE);
        let index = ((normalized + HALF_RIGHT / 2.0) / HALF_RIGHT) as usize % 8;
        Self::ALL[index]
    }

    pub fn opposite(&self) -> Self {
        Self::from_degrees(self.degrees() + HALF_CIRCLE)
    }
}

/// A cell on the grid, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Cell where a displacement arrow of length `distance + epsilon` cells,
    /// starting at the centre of this cell, ends up.
    ///
    /// For `distance == 1` the epsilon is 0.3, which yields the eight
    /// neighbours each 45 degrees wide. For longer distances it is -0.2.
    pub fn adjacent_location(&self, direction: f64, distance: i32) -> Self {
        let epsilon = if distance == 1 { 0.3 } else { -0.2 };
        self.displaced(direction, distance, epsilon)
    }

    /// One of the eight surrounding cells in the given direction
    pub fn neighbour_location(&self, direction: f64) -> Self {
        self.displaced(direction, 1, 0.3)
    }

    fn displaced(&self, direction: f64, distance: i32, epsilon: f64) -> Self {
        let radians = direction / 180.0 * PI;
        let length = distance as f64 + epsilon;
        let x = (self.x as f64 + 0.5 + length * radians.cos()).floor() as i32;
        let y = (self.y as f64 + 0.5 + length * radians.sin()).floor() as i32;
        Self::new(x, y)
    }

    /// Compass direction (in degrees) from this cell toward `target`,
    /// rounded to the nearest multiple of 45.
    pub fn direction_toward(&self, target: Location) -> i32 {
        let dx = (target.x - self.x) as f64;
        let dy = (target.y - self.y) as f64;
        // y axis points down, so the atan2 angle is already clockwise
        let angle = dy.atan2(dx).to_degrees();
        CompassDirection::from_degrees(angle).degrees() as i32
    }

    /// All cells intersecting a circle of `distance` cells around the centre
    /// of this cell, excluding the cell itself. Cells outside any grid are
    /// included; filter with `GameGrid::is_in_grid`.
    ///
    /// `distance = 1` gives the 8 surrounding cells, `distance = 0.5` only
    /// the 4 orthogonal ones.
    pub fn neighbour_locations(&self, distance: f64) -> Vec<Location> {
        let mut locations = Vec::new();
        let y_max = (distance + 0.5) as i32;
        for dy in 1..=y_max {
            let y1 = dy as f64 - 0.5;
            let x1 = (distance * distance - y1 * y1).max(0.0).sqrt();
            let x_max = (x1 + 0.5) as i32;
            for dx in 0..=x_max {
                locations.push(self.offset(dx, dy));
                locations.push(self.offset(dy, -dx));
                locations.push(self.offset(-dy, dx));
                locations.push(self.offset(-dx, -dy));
            }
        }
        locations
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbour_locations_by_compass() {
        let loc = Location::new(5, 5);
        assert_eq!(loc.neighbour_location(0.0), Location::new(6, 5));
        assert_eq!(loc.neighbour_location(90.0), Location::new(5, 6));
        assert_eq!(loc.neighbour_location(180.0), Location::new(4, 5));
        assert_eq!(loc.neighbour_location(270.0), Location::new(5, 4));
        assert_eq!(loc.neighbour_location(45.0), Location::new(6, 6));
        assert_eq!(loc.neighbour_location(225.0), Location::new(4, 4));
        assert_eq!(loc.neighbour_location(315.0), Location::new(6, 4));
    }

    #[test]
    fn test_adjacent_location_far() {
        let loc = Location::new(10, 10);
        assert_eq!(loc.adjacent_location(0.0, 5), Location::new(15, 10));
        assert_eq!(loc.adjacent_location(270.0, 5), Location::new(10, 5));
        assert_eq!(loc.adjacent_location(0.0, 1), Location::new(11, 10));
    }

    #[test]
    fn test_direction_toward() {
        let origin = Location::new(3, 3);
        assert_eq!(origin.direction_toward(Location::new(8, 3)), 0);
        assert_eq!(origin.direction_toward(Location::new(3, 9)), 90);
        assert_eq!(origin.direction_toward(Location::new(0, 3)), 180);
        assert_eq!(origin.direction_toward(Location::new(3, 0)), 270);
        assert_eq!(origin.direction_toward(Location::new(5, 5)), 45);
        assert_eq!(origin.direction_toward(Location::new(5, 1)), 315);
    }

    #[test]
    fn test_row_major_ordering() {
        let mut cells = vec![
            Location::new(2, 1),
            Location::new(0, 2),
            Location::new(1, 1),
            Location::new(5, 0),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Location::new(5, 0),
                Location::new(1, 1),
                Location::new(2, 1),
                Location::new(0, 2),
            ]
        );
    }

    #[test]
    fn test_neighbour_ring() {
        let center = Location::new(4, 4);

        let orthogonal = center.neighbour_locations(0.5);
        assert_eq!(orthogonal.len(), 4);
        assert!(orthogonal.contains(&Location::new(4, 5)));
        assert!(orthogonal.contains(&Location::new(3, 4)));

        let ring = center.neighbour_locations(1.0);
        assert_eq!(ring.len(), 8);
        assert!(!ring.contains(&center));
        assert!(ring.contains(&Location::new(5, 5)));
        assert!(ring.contains(&Location::new(3, 3)));
    }

    #[test]
    fn test_compass_rounding() {
        assert_eq!(CompassDirection::from_degrees(10.0), CompassDirection::East);
        assert_eq!(CompassDirection::from_degrees(-90.0), CompassDirection::North);
        assert_eq!(CompassDirection::from_degrees(720.0 + 135.0), CompassDirection::SouthWest);
        assert_eq!(CompassDirection::North.opposite(), CompassDirection::South);
        assert_eq!(CompassDirection::NorthEast.opposite(), CompassDirection::SouthWest);
    }

    #[test]
    fn test_display() {
        assert_eq!(Location::new(3, -2).to_string(), "(3, -2)");
    }
}
