//! Flattening rules grouped by the shape of the depth-bearing fields.
//!
//! Every rule inspects its fields with [`planar_core::geometry::is_zero`] and
//! returns `true` only when it wrote something. A rule that returns `false`
//! leaves its fields bit-for-bit untouched, which is what makes a second
//! flatten pass a no-op.

use planar_core::{
    element::DimensionGeometry,
    geometry::{Point3, Vector3, is_zero},
};

/// Single position: arc/circle/ellipse centers, points, block insertions.
pub fn flatten_point(point: &mut Point3) -> bool {
    if point.is_planar() {
        return false;
    }
    *point = point.flattened();
    true
}

/// Two defining points: lines, xlines, rays.
///
/// Either point out of the plane changes both.
pub fn flatten_pair(first: &mut Point3, second: &mut Point3) -> bool {
    if first.is_planar() && second.is_planar() {
        return false;
    }
    *first = first.flattened();
    *second = second.flattened();
    true
}

/// Position plus baseline direction: text and multi-line text.
///
/// Either value out of the plane changes both.
pub fn flatten_anchored(position: &mut Point3, direction: &mut Vector3) -> bool {
    if position.is_planar() && direction.is_planar() {
        return false;
    }
    *position = position.flattened();
    *direction = direction.flattened();
    true
}

/// Scalar elevation: polylines, 2D polylines, hatches.
pub fn flatten_elevation(elevation: &mut f64) -> bool {
    if is_zero(*elevation) {
        return false;
    }
    *elevation = 0.0;
    true
}

/// Independent points: spline control points, solid corners.
///
/// Only the points out of the plane are rewritten. Every point is visited
/// even after the first change.
pub fn flatten_each<'a>(points: impl IntoIterator<Item = &'a mut Point3>) -> bool {
    points
        .into_iter()
        .fold(false, |changed, point| flatten_point(point) | changed)
}

/// Dimensions: the shared elevation first, then each defining point.
pub fn flatten_dimension(elevation: &mut f64, geometry: &mut DimensionGeometry) -> bool {
    let elevation_changed = flatten_elevation(elevation);
    flatten_each(geometry.points_mut()) | elevation_changed
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_tolerance_boundary() {
        for (depth, expect_change) in [(0.00009999, false), (0.0001, true), (1.0, true), (-5.0, true)] {
            let original = Point3::new(3.0, 4.0, depth);
            let mut point = original;

            let changed = flatten_point(&mut point);

            assert_eq!(changed, expect_change, "depth {depth}");
            if expect_change {
                assert_eq!(point, Point3::new(3.0, 4.0, 0.0));
            } else {
                assert_eq!(point.z().to_bits(), original.z().to_bits());
            }
        }
    }

    #[test]
    fn test_elevation_tolerance_boundary() {
        for (value, expect_change) in [(0.00009999, false), (0.0001, true), (1.0, true), (-5.0, true)] {
            let mut elevation = value;

            assert_eq!(flatten_elevation(&mut elevation), expect_change, "elevation {value}");
            assert_eq!(elevation, if expect_change { 0.0 } else { value });
        }
    }

    #[test]
    fn test_pair_zeroes_both_points() {
        let mut start = Point3::new(0.0, 0.0, 0.00005);
        let mut end = Point3::new(1.0, 0.0, 2.0);

        assert!(flatten_pair(&mut start, &mut end));
        assert_eq!(start.z(), 0.0);
        assert_eq!(end.z(), 0.0);
    }

    #[test]
    fn test_pair_within_tolerance_is_untouched() {
        let mut start = Point3::new(0.0, 0.0, 0.00005);
        let mut end = Point3::new(1.0, 0.0, -0.00002);

        assert!(!flatten_pair(&mut start, &mut end));
        assert_eq!(start.z(), 0.00005);
        assert_eq!(end.z(), -0.00002);
    }

    #[test]
    fn test_anchored_direction_only() {
        let mut position = Point3::new(5.0, 5.0, 0.0);
        let mut direction = Vector3::new(1.0, 0.0, 0.5);

        assert!(flatten_anchored(&mut position, &mut direction));
        assert_eq!(direction, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_each_rewrites_only_failing_points() {
        let mut points = [
            Point3::new(0.0, 0.0, 0.00003),
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(2.0, 0.0, 0.0),
        ];

        assert!(flatten_each(points.iter_mut()));
        assert_eq!(points[0].z(), 0.00003);
        assert_eq!(points[1].z(), 0.0);
        assert_eq!(points[2].z(), 0.0);
    }

    #[test]
    fn test_each_on_planar_points_reports_no_change() {
        let mut points = vec![Point3::new(0.0, 0.0, 0.0); 4];
        assert!(!flatten_each(points.iter_mut()));
    }

    #[test]
    fn test_dimension_with_planar_elevation_and_raised_point() {
        let mut elevation = 0.0;
        let mut geometry = DimensionGeometry::Radial {
            center: Point3::new(0.0, 0.0, 0.0),
            chord_point: Point3::new(5.0, 0.0, 1.0),
        };

        assert!(flatten_dimension(&mut elevation, &mut geometry));
        assert!(geometry.points().iter().all(|point| point.z() == 0.0));
    }

    #[test]
    fn test_dimension_with_raised_elevation_only() {
        let mut elevation = 2.0;
        let mut geometry = DimensionGeometry::Diametric {
            chord_point: Point3::new(1.0, 0.0, 0.0),
            far_chord_point: Point3::new(-1.0, 0.0, 0.0),
        };

        assert!(flatten_dimension(&mut elevation, &mut geometry));
        assert_eq!(elevation, 0.0);
    }

    proptest! {
        #[test]
        fn prop_second_pass_never_changes(depths in prop::collection::vec(-10.0f64..10.0, 1..16)) {
            let mut points: Vec<Point3> = depths
                .iter()
                .enumerate()
                .map(|(i, z)| Point3::new(i as f64, 0.0, *z))
                .collect();

            flatten_each(points.iter_mut());
            let after_first = points.clone();

            prop_assert!(!flatten_each(points.iter_mut()));
            prop_assert_eq!(points, after_first);
        }

        #[test]
        fn prop_change_reported_iff_any_depth_fails(depths in prop::collection::vec(-0.001f64..0.001, 1..8)) {
            let mut points: Vec<Point3> = depths.iter().map(|z| Point3::new(0.0, 0.0, *z)).collect();
            let expected = depths.iter().any(|z| !is_zero(*z));

            prop_assert_eq!(flatten_each(points.iter_mut()), expected);
        }
    }
}
