//! Defining points of the dimension shapes.

use serde::{Deserialize, Serialize};

use crate::geometry::Point3;

/// The named defining points of one dimension shape.
///
/// Every shape lists exactly the points the host stores for it, so rules can
/// walk them uniformly through [`DimensionGeometry::points_mut`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum DimensionGeometry {
    Aligned {
        xline1_point: Point3,
        xline2_point: Point3,
        dim_line_point: Point3,
    },
    Arc {
        center: Point3,
        xline1_point: Point3,
        xline2_point: Point3,
        arc_point: Point3,
    },
    Diametric {
        chord_point: Point3,
        far_chord_point: Point3,
    },
    /// Angle between two lines.
    LineAngular {
        xline1_start: Point3,
        xline1_end: Point3,
        xline2_start: Point3,
        xline2_end: Point3,
        arc_point: Point3,
    },
    /// Angle defined by a vertex and two points.
    ThreePointAngular {
        center_point: Point3,
        xline1_point: Point3,
        xline2_point: Point3,
        arc_point: Point3,
    },
    Radial {
        center: Point3,
        chord_point: Point3,
    },
    /// Jogged radius for arcs whose center is off the sheet.
    RadialLarge {
        center: Point3,
        chord_point: Point3,
        override_center: Point3,
        jog_point: Point3,
    },
    Rotated {
        xline1_point: Point3,
        xline2_point: Point3,
        dim_line_point: Point3,
    },
    Ordinate {
        origin: Point3,
        defining_point: Point3,
        leader_end_point: Point3,
    },
}

impl DimensionGeometry {
    /// Returns the shape name used in drawing files.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Aligned { .. } => "aligned",
            Self::Arc { .. } => "arc",
            Self::Diametric { .. } => "diametric",
            Self::LineAngular { .. } => "line_angular",
            Self::ThreePointAngular { .. } => "three_point_angular",
            Self::Radial { .. } => "radial",
            Self::RadialLarge { .. } => "radial_large",
            Self::Rotated { .. } => "rotated",
            Self::Ordinate { .. } => "ordinate",
        }
    }

    /// Returns the defining points in declaration order.
    pub fn points(&self) -> Vec<Point3> {
        self.clone().points_mut().into_iter().map(|point| *point).collect()
    }

    /// Returns mutable access to every defining point in declaration order.
    pub fn points_mut(&mut self) -> Vec<&mut Point3> {
        match self {
            Self::Aligned {
                xline1_point,
                xline2_point,
                dim_line_point,
            }
            | Self::Rotated {
                xline1_point,
                xline2_point,
                dim_line_point,
            } => vec![xline1_point, xline2_point, dim_line_point],
            Self::Arc {
                center,
                xline1_point,
                xline2_point,
                arc_point,
            } => vec![center, xline1_point, xline2_point, arc_point],
            Self::Diametric {
                chord_point,
                far_chord_point,
            } => vec![chord_point, far_chord_point],
            Self::LineAngular {
                xline1_start,
                xline1_end,
                xline2_start,
                xline2_end,
                arc_point,
            } => vec![xline1_start, xline1_end, xline2_start, xline2_end, arc_point],
            Self::ThreePointAngular {
                center_point,
                xline1_point,
                xline2_point,
                arc_point,
            } => vec![center_point, xline1_point, xline2_point, arc_point],
            Self::Radial {
                center,
                chord_point,
            } => vec![center, chord_point],
            Self::RadialLarge {
                center,
                chord_point,
                override_center,
                jog_point,
            } => vec![center, chord_point, override_center, jog_point],
            Self::Ordinate {
                origin,
                defining_point,
                leader_end_point,
            } => vec![origin, defining_point, leader_end_point],
        }
    }
}
