use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Tile coordinate in reality-bubble space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Roguelike distance: the larger of the two axis distances.
    #[must_use]
    pub fn rl_dist(self, other: Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// The 8 surrounding tiles, clockwise from north.
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        MOORE.iter().map(move |d| self + *d)
    }

    /// The 3x3 block centred on this tile in column-major order (x outer, y inner).
    pub fn block(self) -> impl Iterator<Item = Point> {
        (-1..=1).flat_map(move |dx| (-1..=1).map(move |dy| self.offset(dx, dy)))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 8-way neighbourhood offsets, clockwise from north.
pub const MOORE: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

/// 4-way neighbourhood offsets.
pub const ORTHOGONAL: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];
