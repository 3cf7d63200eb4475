// Player position and the inputs that move it
// Manual nudges from the map controls and simulated device sensors from the
// camera view all end in the same clamped point

use std::fmt;
use std::str::FromStr;

use crate::catalog::Point;
use crate::errors::HuntError;

/// Distance moved by one manual nudge
pub const DEFAULT_MOVE_STEP: f32 = 5.0;
/// Gain applied to beta and gamma tilt angles
const ORIENTATION_SENSITIVITY: f32 = 0.8;
/// Gain applied to the compass heading, added to the x axis
const HEADING_SENSITIVITY: f32 = 0.3;
/// Acceleration magnitude below which motion readings are ignored
const MOTION_THRESHOLD: f32 = 15.0;
/// Gain applied to accepted motion readings
const MOTION_SENSITIVITY: f32 = 2.0;

/// Manual movement directions; up decreases y as on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl FromStr for Direction {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "up" | "north" => Ok(Direction::Up),
            "s" | "down" | "south" => Ok(Direction::Down),
            "a" | "left" | "west" => Ok(Direction::Left),
            "d" | "right" | "east" => Ok(Direction::Right),
            other => Err(HuntError::InvalidUserInput {
                field: "direction".to_string(),
                reason: format!("'{}' is not one of w/a/s/d", other),
            }),
        }
    }
}

/// A device orientation reading, in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Compass heading
    pub alpha: f32,
    /// Front-to-back tilt
    pub beta: f32,
    /// Left-to-right tilt
    pub gamma: f32,
}

/// A device acceleration reading including gravity, in m/s^2
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Motion {
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// The live player position, always inside the map
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    point: Point,
    step: f32,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(Point::center(), DEFAULT_MOVE_STEP)
    }
}

impl Position {
    pub fn new(point: Point, step: f32) -> Self {
        Self {
            point: point.clamped(),
            step,
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn set(&mut self, point: Point) {
        self.point = point.clamped();
    }

    /// Move one step in `direction`
    pub fn nudge(&mut self, direction: Direction) {
        let Point { x, y } = self.point;
        let moved = match direction {
            Direction::Up => Point::new(x, y - self.step),
            Direction::Down => Point::new(x, y + self.step),
            Direction::Left => Point::new(x - self.step, y),
            Direction::Right => Point::new(x + self.step, y),
        };
        self.set(moved);
    }

    /// Tilt moves the player: gamma drives x, beta drives y and the heading
    /// adds a smaller drift on x. Clamped after all terms are applied.
    pub fn apply_orientation(&mut self, orientation: Orientation) {
        let x = self.point.x
            + orientation.gamma * ORIENTATION_SENSITIVITY
            + orientation.alpha * HEADING_SENSITIVITY;
        let y = self.point.y + orientation.beta * ORIENTATION_SENSITIVITY;
        self.set(Point::new(x, y));
    }

    /// Apply a motion reading, returning whether it was strong enough to move
    pub fn apply_motion(&mut self, motion: Motion) -> bool {
        if motion.magnitude() <= MOTION_THRESHOLD {
            return false;
        }
        let x = self.point.x + motion.x * MOTION_SENSITIVITY;
        let y = self.point.y + motion.y * MOTION_SENSITIVITY;
        self.set(Point::new(x, y));
        true
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.0}, {:.0})", self.point.x, self.point.y)
    }
}
