use nalgebra::{Point2, Point3};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("axis sequences differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("cannot rotate an empty point set")]
    Empty,
    #[error("reference point has zero length in the rotation plane")]
    DegenerateReference,
}

fn check_lengths(left: usize, right: usize) -> Result<(), ProjectionError> {
    if left != right {
        return Err(ProjectionError::LengthMismatch { left, right });
    }
    Ok(())
}

/// rotates both sequences about the plane origin by the angle that maps the
/// reference entry (index 0) onto the positive u axis
///
/// afterwards `ru[0]` equals the reference vector's length and `rv[0]` is zero
/// (up to floating point error); all other entries are rotated by the same
/// angle, so pairwise distances are preserved
pub fn rotate_to_axis(us: &[f64], vs: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ProjectionError> {
    check_lengths(us.len(), vs.len())?;
    let (u0, v0) = match (us.first(), vs.first()) {
        (Some(&u), Some(&v)) => (u, v),
        _ => return Err(ProjectionError::Empty),
    };
    let l = (u0 * u0 + v0 * v0).sqrt();
    if l == 0. {
        // the reference sits on the rotation axis, no angle can be derived
        return Err(ProjectionError::DegenerateReference);
    }
    let cos_a = u0 / l;
    let sin_a = -v0 / l;

    let mut ru = Vec::with_capacity(us.len());
    let mut rv = Vec::with_capacity(vs.len());
    for (&u, &v) in us.iter().zip(vs.iter()) {
        ru.push(u * cos_a - v * sin_a);
        rv.push(u * sin_a + v * cos_a);
    }
    return Ok((ru, rv));
}

/// flattens a point set given as three axis sequences, index 0 being the
/// reference point whose direction approximates the patch normal
///
/// the z component is neutralized with two rotations, first against x then
/// against y; what remains of x and y is the flattened position. this is a
/// heuristic for nearly coplanar patches, not an orthogonal projection onto
/// a fitted plane
pub fn project_axes(
    xs: &[f64],
    ys: &[f64],
    zs: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), ProjectionError> {
    check_lengths(xs.len(), ys.len())?;
    check_lengths(xs.len(), zs.len())?;
    let (zs, xs) = rotate_to_axis(zs, xs)?;
    let (_, ys) = rotate_to_axis(&zs, ys)?;
    return Ok((xs, ys));
}

/// packed form of [`project_axes`]: output index i is the image of input
/// index i
pub fn project(points: &[Point3<f64>]) -> Result<Vec<Point2<f64>>, ProjectionError> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let zs: Vec<f64> = points.iter().map(|p| p.z).collect();
    let (xs, ys) = project_axes(&xs, &ys, &zs)?;
    let flat = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Point2::new(x, y))
        .collect();
    return Ok(flat);
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{distance, Point2, Point3};

    use super::{project, project_axes, rotate_to_axis, ProjectionError};

    #[test]
    fn reference_lands_on_axis() {
        let us = [3., 1., -2.];
        let vs = [4., 0., 5.];
        let (ru, rv) = rotate_to_axis(&us, &vs).unwrap();
        assert_relative_eq!(ru[0], 5., max_relative = 1e-12);
        assert_relative_eq!(rv[0], 0., epsilon = 1e-12);
    }

    #[test]
    fn rotation_preserves_pairwise_distances() {
        let us = [0.3, -1.2, 4.5, 0.01, 2.];
        let vs = [-0.7, 0.4, -3.3, 1.5, 2.];
        let (ru, rv) = rotate_to_axis(&us, &vs).unwrap();
        for i in 0..us.len() {
            for j in i + 1..us.len() {
                let before = distance(&Point2::new(us[i], vs[i]), &Point2::new(us[j], vs[j]));
                let after = distance(&Point2::new(ru[i], rv[i]), &Point2::new(ru[j], rv[j]));
                assert_relative_eq!(before, after, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn inverse_rotation_restores_input() {
        let us = [1., -0.5, 0.25];
        let vs = [2., 3., -0.75];
        let (ru, rv) = rotate_to_axis(&us, &vs).unwrap();

        // undo with the transposed rotation matrix, angle derived from the
        // same reference point
        let l = (us[0] * us[0] + vs[0] * vs[0]).sqrt();
        let cos_a = us[0] / l;
        let sin_a = -vs[0] / l;
        for i in 0..us.len() {
            let u = ru[i] * cos_a + rv[i] * sin_a;
            let v = -ru[i] * sin_a + rv[i] * cos_a;
            assert_relative_eq!(u, us[i], epsilon = 1e-12);
            assert_relative_eq!(v, vs[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn degenerate_reference_is_rejected() {
        let err = rotate_to_axis(&[0., 1.], &[0., 2.]).unwrap_err();
        assert_eq!(err, ProjectionError::DegenerateReference);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let err = rotate_to_axis(&[1., 2.], &[1., 2., 3.]).unwrap_err();
        assert_eq!(err, ProjectionError::LengthMismatch { left: 2, right: 3 });
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = rotate_to_axis(&[], &[]).unwrap_err();
        assert_eq!(err, ProjectionError::Empty);
    }

    #[test]
    fn reference_on_the_y_axis_hits_degenerate_reference() {
        // the first rotation works in the (z, x) plane, where a reference on
        // the y axis has zero length
        let points = [
            Point3::new(0., 1., 0.),
            Point3::new(1., 0., 0.),
            Point3::new(0., 0., 1.),
        ];
        let err = project(&points).unwrap_err();
        assert_eq!(err, ProjectionError::DegenerateReference);
    }

    #[test]
    fn axis_aligned_unit_points_project_exactly() {
        // reference (1,0,0): the first rotation maps its (z,x) vector onto
        // the z axis, the second is the identity
        let points = [
            Point3::new(1., 0., 0.),
            Point3::new(0., 1., 0.),
            Point3::new(0., 0., 1.),
        ];
        let flat = project(&points).unwrap();
        let expected = [
            Point2::new(0., 0.),
            Point2::new(0., 1.),
            Point2::new(-1., 0.),
        ];
        for (f, e) in flat.iter().zip(expected.iter()) {
            assert_relative_eq!(f.x, e.x, epsilon = 1e-12);
            assert_relative_eq!(f.y, e.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn project_keeps_order_and_count() {
        let points = [
            Point3::new(0.2, 0.3, 0.93),
            Point3::new(0.25, 0.28, 0.92),
            Point3::new(0.15, 0.33, 0.93),
            Point3::new(0.21, 0.25, 0.94),
        ];
        let flat = project(&points).unwrap();
        assert_eq!(flat.len(), points.len());

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let zs: Vec<f64> = points.iter().map(|p| p.z).collect();
        let (fx, fy) = project_axes(&xs, &ys, &zs).unwrap();
        for (i, p) in flat.iter().enumerate() {
            assert_eq!(p.x, fx[i]);
            assert_eq!(p.y, fy[i]);
        }
    }

    #[test]
    fn tangent_patch_at_the_pole_flattens_to_xy() {
        // reference along +z makes both rotations the identity, so a patch
        // in the z = 1 tangent plane keeps its x/y layout exactly
        let points = [
            Point3::new(0., 0., 1.),
            Point3::new(0.1, 0., 1.),
            Point3::new(0., -0.1, 1.),
            Point3::new(-0.05, 0.07, 1.),
        ];
        let flat = project(&points).unwrap();
        for (p, f) in points.iter().zip(flat.iter()) {
            assert_relative_eq!(f.x, p.x, epsilon = 1e-12);
            assert_relative_eq!(f.y, p.y, epsilon = 1e-12);
        }
    }
}
