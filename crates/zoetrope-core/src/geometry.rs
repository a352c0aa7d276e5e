//! Geometric primitives for scene layout and positioning.
//!
//! # Coordinate System
//!
//! Zoetrope uses a coordinate system consistent with SVG: origin at the
//! top-left corner, X increasing rightward, Y increasing downward. All
//! coordinates are `f32`, like the SVG attributes they end up in.

/// A 2D point in scene coordinate space.
///
/// # Examples
///
/// ```
/// # use zoetrope_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(4.0, 6.0);
///
/// let sum = a.add(b);
/// assert_eq!(sum.x(), 14.0);
/// assert_eq!(sum.y(), 26.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point.
    pub fn sub(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Returns the midpoint between this point and another.
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Returns the Euclidean distance from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// Width and height dimensions of a scene element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the specified dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width.
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height.
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a size with the component-wise maximum of both sizes.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}
