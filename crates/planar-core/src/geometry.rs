//! Geometric primitives carried by drawing elements.
//!
//! This module provides the 3D types whose depth component the flattening
//! engine inspects and clears, together with the single tolerance used for
//! every "is this depth effectively zero" decision.
//!
//! # Overview
//!
//! - [`Point3`] - A position in world coordinates
//! - [`Vector3`] - A direction in world coordinates
//! - [`TOLERANCE`] and [`is_zero`] - The depth comparison shared by all rules
//!
//! # Coordinate System
//!
//! Drawings use the right-handed CAD world coordinate system:
//!
//! ```text
//!        +Z (depth)
//!         │
//!         │
//!         └──────► +X
//!        ╱
//!       ╱
//!     +Y
//! ```
//!
//! Flattening projects every depth-bearing value onto the `Z = 0` plane.

use serde::{Deserialize, Serialize};

/// Magnitude below which a depth value counts as zero.
pub const TOLERANCE: f64 = 1e-4;

/// Returns `true` when `value` is within [`TOLERANCE`] of zero.
///
/// The comparison is strict: a value of exactly `1e-4` is *not* zero.
///
/// # Examples
///
/// ```
/// use planar_core::geometry::is_zero;
///
/// assert!(is_zero(0.0));
/// assert!(is_zero(-0.00009999));
/// assert!(!is_zero(0.0001));
/// assert!(!is_zero(-5.0));
/// ```
pub fn is_zero(value: f64) -> bool {
    value.abs() < TOLERANCE
}

/// A point in 3D world coordinates.
///
/// Serialized as a `[x, y, z]` array.
///
/// # Examples
///
/// ```
/// use planar_core::geometry::Point3;
///
/// let raised = Point3::new(10.0, 20.0, 3.5);
/// assert!(!raised.is_planar());
///
/// let flat = raised.flattened();
/// assert_eq!(flat, Point3::new(10.0, 20.0, 0.0));
/// assert!(flat.is_planar());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate (depth) of the point
    pub fn z(self) -> f64 {
        self.z
    }

    /// Creates a new point with the specified z-coordinate
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    /// Checks whether the depth lies within [`TOLERANCE`] of zero
    pub fn is_planar(self) -> bool {
        is_zero(self.z)
    }

    /// Returns the projection of this point onto the `Z = 0` plane
    pub fn flattened(self) -> Self {
        self.with_z(0.0)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3> for [f64; 3] {
    fn from(point: Point3) -> Self {
        [point.x, point.y, point.z]
    }
}

/// A direction in 3D world coordinates.
///
/// Text elements carry one to orient their baseline. Serialized as a
/// `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3 {
    x: f64,
    y: f64,
    z: f64,
}

impl Vector3 {
    /// Unit vector along the X axis.
    pub const X_AXIS: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a new vector with the specified components
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the x component of the vector
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y component of the vector
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the depth component of the vector
    pub fn z(self) -> f64 {
        self.z
    }

    /// Checks whether the depth component lies within [`TOLERANCE`] of zero
    pub fn is_planar(self) -> bool {
        is_zero(self.z)
    }

    /// Returns this vector with its depth component removed
    pub fn flattened(self) -> Self {
        Self { z: 0.0, ..self }
    }
}

impl Default for Vector3 {
    fn default() -> Self {
        Self::X_AXIS
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(vector: Vector3) -> Self {
        [vector.x, vector.y, vector.z]
    }
}
