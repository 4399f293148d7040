//! Selects the flattening rule for an element.

use log::warn;

use planar_core::element::Element;

use super::rules;

/// Result of running the rule table on one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenOutcome {
    /// At least one depth-bearing field was rewritten.
    Changed,
    /// The element was already planar; nothing was written.
    Unchanged,
    /// No rule exists for the element's kind; nothing was written.
    Unrecognized,
}

impl FlattenOutcome {
    /// Returns `true` only for [`FlattenOutcome::Changed`].
    pub fn changed(self) -> bool {
        matches!(self, Self::Changed)
    }

    fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }
}

/// Flattens `element` in place with the rule for its kind.
///
/// Unknown kinds are logged and reported as [`FlattenOutcome::Unrecognized`];
/// they never fail.
///
/// # Examples
///
/// ```
/// use planar::{
///     element::Element,
///     flatten::{FlattenOutcome, flatten_element},
///     geometry::Point3,
/// };
///
/// let mut circle = Element::Circle { center: Point3::new(0.0, 0.0, 8.0), radius: 2.0 };
/// assert_eq!(flatten_element(&mut circle), FlattenOutcome::Changed);
/// assert_eq!(flatten_element(&mut circle), FlattenOutcome::Unchanged);
/// ```
pub fn flatten_element(element: &mut Element) -> FlattenOutcome {
    let changed = match element {
        Element::Line { start, end } => rules::flatten_pair(start, end),
        Element::Xline {
            base_point,
            second_point,
        }
        | Element::Ray {
            base_point,
            second_point,
        } => rules::flatten_pair(base_point, second_point),
        Element::Arc { center, .. }
        | Element::Circle { center, .. }
        | Element::Ellipse { center, .. } => rules::flatten_point(center),
        Element::Point { position } | Element::BlockReference { position, .. } => {
            rules::flatten_point(position)
        }
        Element::Text {
            position,
            direction,
            ..
        }
        | Element::MText {
            location: position,
            direction,
            ..
        } => rules::flatten_anchored(position, direction),
        Element::Polyline { elevation, .. }
        | Element::Polyline2d { elevation, .. }
        | Element::Hatch { elevation, .. } => rules::flatten_elevation(elevation),
        Element::Dimension {
            elevation,
            geometry,
        } => rules::flatten_dimension(elevation, geometry),
        Element::Spline { control_points, .. } => rules::flatten_each(control_points.iter_mut()),
        Element::Solid { corners } => rules::flatten_each(corners.iter_mut()),
        Element::Opaque { class_name, .. } => {
            warn!(class_name = class_name.as_str(); "No flattening rule for element kind");
            return FlattenOutcome::Unrecognized;
        }
    };

    FlattenOutcome::from_changed(changed)
}

#[cfg(test)]
mod tests {
    use planar_core::{
        element::DimensionGeometry,
        geometry::{Point3, Vector3},
        identifier::Id,
    };

    use super::*;

    /// One instance of every kind, with every depth-bearing field at `depth`.
    fn every_kind(depth: f64) -> Vec<Element> {
        let p = |x: f64, y: f64| Point3::new(x, y, depth);
        let dimensions = [
            DimensionGeometry::Aligned {
                xline1_point: p(0.0, 0.0),
                xline2_point: p(10.0, 0.0),
                dim_line_point: p(5.0, 2.0),
            },
            DimensionGeometry::Arc {
                center: p(0.0, 0.0),
                xline1_point: p(5.0, 0.0),
                xline2_point: p(0.0, 5.0),
                arc_point: p(4.0, 4.0),
            },
            DimensionGeometry::Diametric {
                chord_point: p(5.0, 0.0),
                far_chord_point: p(-5.0, 0.0),
            },
            DimensionGeometry::LineAngular {
                xline1_start: p(0.0, 0.0),
                xline1_end: p(5.0, 0.0),
                xline2_start: p(0.0, 0.0),
                xline2_end: p(0.0, 5.0),
                arc_point: p(3.0, 3.0),
            },
            DimensionGeometry::ThreePointAngular {
                center_point: p(0.0, 0.0),
                xline1_point: p(5.0, 0.0),
                xline2_point: p(0.0, 5.0),
                arc_point: p(3.0, 3.0),
            },
            DimensionGeometry::Radial {
                center: p(0.0, 0.0),
                chord_point: p(5.0, 0.0),
            },
            DimensionGeometry::RadialLarge {
                center: p(0.0, 0.0),
                chord_point: p(50.0, 0.0),
                override_center: p(10.0, 0.0),
                jog_point: p(20.0, 2.0),
            },
            DimensionGeometry::Rotated {
                xline1_point: p(0.0, 0.0),
                xline2_point: p(10.0, 0.0),
                dim_line_point: p(5.0, -2.0),
            },
            DimensionGeometry::Ordinate {
                origin: p(0.0, 0.0),
                defining_point: p(7.0, 3.0),
                leader_end_point: p(7.0, 6.0),
            },
        ];

        let mut elements = vec![
            Element::Line {
                start: p(0.0, 0.0),
                end: p(1.0, 1.0),
            },
            Element::Xline {
                base_point: p(0.0, 0.0),
                second_point: p(1.0, 0.0),
            },
            Element::Ray {
                base_point: p(0.0, 0.0),
                second_point: p(0.0, 1.0),
            },
            Element::Arc {
                center: p(2.0, 2.0),
                radius: 1.0,
                start_angle: 0.0,
                end_angle: 1.5,
            },
            Element::Circle {
                center: p(3.0, 3.0),
                radius: 2.0,
            },
            Element::Ellipse {
                center: p(4.0, 4.0),
                major_radius: 3.0,
                minor_radius: 1.0,
                rotation: 0.0,
            },
            Element::Text {
                position: p(0.0, 10.0),
                direction: Vector3::new(1.0, 0.0, depth),
                height: 2.5,
                value: "A".to_string(),
            },
            Element::MText {
                location: p(0.0, 20.0),
                direction: Vector3::new(0.0, 1.0, depth),
                height: 2.5,
                contents: "B".to_string(),
            },
            Element::Polyline {
                elevation: depth,
                vertices: vec![[0.0, 0.0], [1.0, 0.0]],
            },
            Element::Polyline2d {
                elevation: depth,
                vertices: vec![[0.0, 0.0], [0.0, 1.0]],
            },
            Element::Point {
                position: p(9.0, 9.0),
            },
            Element::Hatch {
                elevation: depth,
                pattern: "ANSI31".to_string(),
            },
            Element::Spline {
                degree: 3,
                control_points: vec![p(0.0, 0.0), p(1.0, 2.0), p(3.0, 2.0), p(4.0, 0.0)],
            },
            Element::Solid {
                corners: [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)],
            },
            Element::BlockReference {
                block: Id::new("door"),
                position: p(6.0, 0.0),
                rotation: 0.0,
                scale: 1.0,
            },
        ];
        elements.extend(dimensions.into_iter().map(|geometry| Element::Dimension {
            elevation: depth,
            geometry,
        }));
        elements
    }

    fn depths(element: &Element) -> Vec<f64> {
        match element {
            Element::Line { start, end } => vec![start.z(), end.z()],
            Element::Xline {
                base_point,
                second_point,
            }
            | Element::Ray {
                base_point,
                second_point,
            } => vec![base_point.z(), second_point.z()],
            Element::Arc { center, .. }
            | Element::Circle { center, .. }
            | Element::Ellipse { center, .. } => vec![center.z()],
            Element::Point { position } | Element::BlockReference { position, .. } => {
                vec![position.z()]
            }
            Element::Text {
                position,
                direction,
                ..
            }
            | Element::MText {
                location: position,
                direction,
                ..
            } => vec![position.z(), direction.z()],
            Element::Polyline { elevation, .. }
            | Element::Polyline2d { elevation, .. }
            | Element::Hatch { elevation, .. } => vec![*elevation],
            Element::Dimension {
                elevation,
                geometry,
            } => {
                let mut all = vec![*elevation];
                all.extend(geometry.points().iter().map(|point| point.z()));
                all
            }
            Element::Spline { control_points, .. } => {
                control_points.iter().map(|point| point.z()).collect()
            }
            Element::Solid { corners } => corners.iter().map(|point| point.z()).collect(),
            Element::Opaque { .. } => Vec::new(),
        }
    }

    #[test]
    fn test_every_kind_is_flattened() {
        for mut element in every_kind(7.5) {
            let outcome = flatten_element(&mut element);

            assert_eq!(outcome, FlattenOutcome::Changed, "{}", element.kind_name());
            assert!(
                depths(&element).iter().all(|depth| *depth == 0.0),
                "{} still has depth",
                element.kind_name()
            );
        }
    }

    #[test]
    fn test_every_planar_kind_is_unchanged() {
        for mut element in every_kind(0.0) {
            let before = element.clone();

            let outcome = flatten_element(&mut element);

            assert_eq!(outcome, FlattenOutcome::Unchanged, "{}", element.kind_name());
            assert_eq!(element, before);
        }
    }

    #[test]
    fn test_every_kind_within_tolerance_is_unchanged() {
        for mut element in every_kind(-0.00009999) {
            let before = element.clone();

            assert!(!flatten_element(&mut element).changed(), "{}", element.kind_name());
            assert_eq!(element, before);
        }
    }

    #[test]
    fn test_every_kind_at_tolerance_is_changed() {
        for mut element in every_kind(0.0001) {
            assert!(flatten_element(&mut element).changed(), "{}", element.kind_name());
        }
    }

    #[test]
    fn test_every_dimension_shape_is_covered() {
        let shapes: Vec<_> = every_kind(1.0)
            .iter()
            .filter_map(|element| match element {
                Element::Dimension { geometry, .. } => Some(geometry.shape_name()),
                _ => None,
            })
            .collect();

        assert_eq!(shapes.len(), 9);
    }

    #[test]
    fn test_opaque_is_unrecognized() {
        let mut element = Element::opaque("3dsolid");
        let before = element.clone();

        assert_eq!(flatten_element(&mut element), FlattenOutcome::Unrecognized);
        assert!(!FlattenOutcome::Unrecognized.changed());
        assert_eq!(element, before);
    }
}
