use std::f64::consts::PI;

use nalgebra::{distance, Point3};
use tracing::debug;

/// discretization of the unit sphere with a fixed number of samples
///
/// any point set on the sphere works as a discretization; the default is a
/// Fibonacci lattice because it is deterministic and close to uniform
#[derive(Debug)]
pub struct Samples {
    points: Vec<Point3<f64>>,
}

impl Samples {
    /// Fibonacci lattice with n points
    pub fn new(n: usize) -> Self {
        assert!(n > 0, "sample count must be positive");
        let golden_angle = PI * (3. - (5f64).sqrt());
        let points = (0..n)
            .map(|i| {
                let z = 1. - 2. * (i as f64 + 0.5) / n as f64;
                let r = (1. - z * z).sqrt();
                let theta = golden_angle * i as f64;
                Point3::new(r * theta.cos(), r * theta.sin(), z)
            })
            .collect();
        debug!(n, "built sphere lattice");
        Samples { points }
    }

    /// adopts an arbitrary point set as discretization, snapping every point
    /// onto the unit sphere
    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        assert!(!points.is_empty(), "sample count must be positive");
        let points = points
            .into_iter()
            .map(|p| Point3::from(p.coords.normalize()))
            .collect();
        Samples { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Point3<f64> {
        self.points[index]
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// index of and distance to the sample closest to p
    pub fn near(&self, p: &Point3<f64>) -> (usize, f64) {
        self.points
            .iter()
            .enumerate()
            .map(|(i, s)| (i, distance(s, p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .expect("discretization is never empty")
    }

    /// the area around a sample: the sample itself first, followed by its k
    /// nearest other samples in ascending distance order
    ///
    /// returns fewer neighbors when the sphere holds less than k + 1 samples
    pub fn area(&self, index: usize, k: usize) -> Vec<Point3<f64>> {
        let center = self.points[index];
        let mut by_distance: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(i, p)| (distance(&center, p), i))
            .collect();
        by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut area = Vec::with_capacity(k + 1);
        area.push(center);
        area.extend(by_distance.iter().take(k).map(|&(_, i)| self.points[i]));
        return area;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{distance, Point3};

    use super::Samples;

    #[test]
    fn lattice_points_have_unit_norm() {
        let samples = Samples::new(300);
        assert_eq!(samples.len(), 300);
        for p in samples.points() {
            assert_relative_eq!(p.coords.norm(), 1., epsilon = 1e-12);
        }
    }

    #[test]
    fn area_is_center_first_and_sorted() {
        let samples = Samples::new(300);
        let area = samples.area(42, 8);
        assert_eq!(area.len(), 9);
        assert_eq!(area[0], samples.point(42));

        let mut last = 0.;
        for p in &area[1..] {
            let d = distance(&area[0], p);
            assert!(d >= last);
            assert!(d > 0.);
            last = d;
        }
    }

    #[test]
    fn area_is_bounded_by_the_discretization() {
        let samples = Samples::new(4);
        let area = samples.area(0, 8);
        assert_eq!(area.len(), 4);
    }

    #[test]
    fn near_finds_the_sample_itself() {
        let samples = Samples::new(100);
        let (i, d) = samples.near(&samples.point(17));
        assert_eq!(i, 17);
        assert_eq!(d, 0.);
    }

    #[test]
    fn near_finds_the_closest_sample() {
        let samples = Samples::new(100);
        // nudge a sample slightly off the sphere, it stays the closest
        let p = samples.point(3) * 1.1;
        let (i, _) = samples.near(&p);
        assert_eq!(i, 3);
    }

    #[test]
    fn from_points_snaps_onto_the_sphere() {
        let samples = Samples::from_points(vec![
            Point3::new(2., 0., 0.),
            Point3::new(0., 0.5, 0.),
            Point3::new(1., 1., 1.),
        ]);
        for p in samples.points() {
            assert_relative_eq!(p.coords.norm(), 1., epsilon = 1e-12);
        }
        assert_eq!(samples.point(0), Point3::new(1., 0., 0.));
    }
}
