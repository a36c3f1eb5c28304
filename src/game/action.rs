use serde::{Deserialize, Serialize};

use crate::grid::location::CompassDirection;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn compass(&self) -> CompassDirection {
        match self {
            Direction::Up => CompassDirection::North,
            Direction::Down => CompassDirection::South,
            Direction::Left => CompassDirection::West,
            Direction::Right => CompassDirection::East,
        }
    }

    /// The grid-aligned direction for a compass heading; diagonals have none
    pub fn from_compass(compass: CompassDirection) -> Option<Direction> {
        match compass {
            CompassDirection::North => Some(Direction::Up),
            CompassDirection::South => Some(Direction::Down),
            CompassDirection::West => Some(Direction::Left),
            CompassDirection::East => Some(Direction::Right),
            _ => None,
        }
    }

    /// Heading in degrees, as used by actors
    pub fn degrees(&self) -> f64 {
        self.compass().degrees()
    }

    /// A quarter turn clockwise
    pub fn turned_right(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// Action that can be taken in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Queue a turn in a specific direction
    Move(Direction),
    /// Continue in current direction
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_compass_agrees_with_delta() {
        use crate::grid::Location;

        let origin = Location::new(5, 5);
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (dx, dy) = direction.delta();
            assert_eq!(origin.neighbour_location(direction.degrees()), origin.offset(dx, dy));
            assert_eq!(Direction::from_compass(direction.compass()), Some(direction));
        }
        assert_eq!(Direction::from_compass(CompassDirection::NorthEast), None);
    }

    #[test]
    fn test_turned_right_cycles() {
        let mut direction = Direction::Up;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(direction);
            direction = direction.turned_right();
        }
        assert_eq!(direction, Direction::Up);
        assert_eq!(
            seen,
            vec![Direction::Up, Direction::Right, Direction::Down, Direction::Left]
        );
    }
}
