//! Drawing element kinds.
//!
//! [`Element`] is the closed set of geometric primitives a drawing can hold.
//! Each variant carries a fixed set of fields; the depth-bearing ones are
//! [`Point3`]/[`Vector3`] values, a scalar `elevation`, or a list of control
//! points. Everything else (radii, angles, text, 2D vertices) is carried
//! along untouched.
//!
//! Kinds the engine has no rule for are represented by [`Element::Opaque`],
//! which keeps the host's class name and the fields it was given.
//!
//! # Serialization
//!
//! Elements are internally tagged by `kind`:
//!
//! ```toml
//! kind = "circle"
//! center = [5.0, 5.0, 2.0]
//! radius = 1.5
//! ```

mod dimension;

pub use dimension::DimensionGeometry;

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Point3, Vector3},
    identifier::Id,
};

/// A single geometric drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    /// Finite line segment.
    Line { start: Point3, end: Point3 },

    /// Construction line, infinite in both directions.
    Xline {
        base_point: Point3,
        second_point: Point3,
    },

    /// Half-infinite construction line.
    Ray {
        base_point: Point3,
        second_point: Point3,
    },

    Arc {
        center: Point3,
        #[serde(default)]
        radius: f64,
        #[serde(default)]
        start_angle: f64,
        #[serde(default)]
        end_angle: f64,
    },

    Circle {
        center: Point3,
        #[serde(default)]
        radius: f64,
    },

    Ellipse {
        center: Point3,
        #[serde(default)]
        major_radius: f64,
        #[serde(default)]
        minor_radius: f64,
        #[serde(default)]
        rotation: f64,
    },

    /// Single-line text.
    Text {
        position: Point3,
        #[serde(default)]
        direction: Vector3,
        #[serde(default)]
        height: f64,
        #[serde(default)]
        value: String,
    },

    /// Multi-line text.
    #[serde(rename = "mtext")]
    MText {
        location: Point3,
        #[serde(default)]
        direction: Vector3,
        #[serde(default)]
        height: f64,
        #[serde(default)]
        contents: String,
    },

    /// Lightweight polyline; vertices live in the plane at `elevation`.
    Polyline {
        elevation: f64,
        #[serde(default)]
        vertices: Vec<[f64; 2]>,
    },

    /// Legacy 2D polyline; vertices live in the plane at `elevation`.
    #[serde(rename = "polyline2d")]
    Polyline2d {
        elevation: f64,
        #[serde(default)]
        vertices: Vec<[f64; 2]>,
    },

    Point { position: Point3 },

    /// Any of the dimension shapes, sharing a common elevation.
    Dimension {
        elevation: f64,
        geometry: DimensionGeometry,
    },

    Hatch {
        elevation: f64,
        #[serde(default)]
        pattern: String,
    },

    Spline {
        #[serde(default)]
        degree: u8,
        control_points: Vec<Point3>,
    },

    /// Four-cornered filled solid.
    Solid { corners: [Point3; 4] },

    /// Insertion of a container ("block") at a position.
    BlockReference {
        block: Id,
        position: Point3,
        #[serde(default)]
        rotation: f64,
        #[serde(default = "unit_scale")]
        scale: f64,
    },

    /// An element whose kind has no flattening rule.
    ///
    /// `properties` holds the element's remaining fields as read, so a host
    /// can write them back unchanged.
    Opaque {
        class_name: String,
        #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
        properties: toml::Table,
    },
}

fn unit_scale() -> f64 {
    1.0
}

impl Element {
    /// Kind names with a dedicated variant, as they appear in drawing files.
    pub const KINDS: &'static [&'static str] = &[
        "line",
        "xline",
        "ray",
        "arc",
        "circle",
        "ellipse",
        "text",
        "mtext",
        "polyline",
        "polyline2d",
        "point",
        "dimension",
        "hatch",
        "spline",
        "solid",
        "block_reference",
    ];

    /// Creates an [`Element::Opaque`] with no properties.
    pub fn opaque(class_name: impl Into<String>) -> Self {
        Self::Opaque {
            class_name: class_name.into(),
            properties: toml::Table::new(),
        }
    }

    /// Whether `kind` names one of the dedicated variants.
    pub fn is_known_kind(kind: &str) -> bool {
        Self::KINDS.contains(&kind)
    }

    /// Returns the kind name used in drawing files and diagnostics.
    ///
    /// For [`Element::Opaque`] this is the host class name.
    ///
    /// # Examples
    ///
    /// ```
    /// use planar_core::{element::Element, geometry::Point3};
    ///
    /// let point = Element::Point { position: Point3::default() };
    /// assert_eq!(point.kind_name(), "point");
    ///
    /// let solid = Element::opaque("3dsolid");
    /// assert_eq!(solid.kind_name(), "3dsolid");
    /// ```
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Line { .. } => "line",
            Self::Xline { .. } => "xline",
            Self::Ray { .. } => "ray",
            Self::Arc { .. } => "arc",
            Self::Circle { .. } => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::Text { .. } => "text",
            Self::MText { .. } => "mtext",
            Self::Polyline { .. } => "polyline",
            Self::Polyline2d { .. } => "polyline2d",
            Self::Point { .. } => "point",
            Self::Dimension { .. } => "dimension",
            Self::Hatch { .. } => "hatch",
            Self::Spline { .. } => "spline",
            Self::Solid { .. } => "solid",
            Self::BlockReference { .. } => "block_reference",
            Self::Opaque { class_name, .. } => class_name,
        }
    }

    /// Returns the container this element inserts, if it is a block reference.
    pub fn referenced_block(&self) -> Option<Id> {
        match self {
            Self::BlockReference { block, .. } => Some(*block),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referenced_block() {
        let reference = Element::BlockReference {
            block: Id::new("door"),
            position: Point3::default(),
            rotation: 0.0,
            scale: 1.0,
        };
        let line = Element::Line {
            start: Point3::default(),
            end: Point3::new(1.0, 0.0, 0.0),
        };

        assert_eq!(reference.referenced_block(), Some(Id::new("door")));
        assert_eq!(line.referenced_block(), None);
    }

    #[test]
    fn test_kind_name_of_dimension() {
        let dimension = Element::Dimension {
            elevation: 0.0,
            geometry: DimensionGeometry::Diametric {
                chord_point: Point3::default(),
                far_chord_point: Point3::default(),
            },
        };

        assert_eq!(dimension.kind_name(), "dimension");
    }

    #[test]
    fn test_known_kinds_match_kind_names() {
        let point = Element::Point {
            position: Point3::default(),
        };
        let reference = Element::BlockReference {
            block: Id::new("door"),
            position: Point3::default(),
            rotation: 0.0,
            scale: 1.0,
        };

        assert!(Element::is_known_kind(point.kind_name()));
        assert!(Element::is_known_kind(reference.kind_name()));
        assert!(Element::is_known_kind("mtext"));
        assert!(!Element::is_known_kind("viewport"));
        assert!(!Element::is_known_kind("opaque"));
    }
}
