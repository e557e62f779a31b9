use nalgebra::{Point2, Point3};
use tracing::debug;

use crate::palette;
use crate::pointcloud::PointCloud;
use crate::projection::{self, ProjectionError};
use crate::samples::Samples;
use crate::vertex::Vertex;

/// one inspected patch: the colored 3D neighborhood and its flattened image
///
/// index i of the flattened sequence is the image of vertex i, so both share
/// one color assignment
#[derive(Debug)]
pub struct Scene {
    patch: PointCloud<f64>,
    flat: Vec<Point2<f64>>,
}

impl Scene {
    /// assembles the scene for the area around sample `center`
    pub fn from_samples(
        samples: &Samples,
        center: usize,
        neighbors: usize,
    ) -> Result<Self, ProjectionError> {
        Scene::from_area(samples.area(center, neighbors))
    }

    /// `area` is center-first; the center keeps the distinguished color
    pub fn from_area(area: Vec<Point3<f64>>) -> Result<Self, ProjectionError> {
        let flat = projection::project(&area)?;
        debug!(points = area.len(), "assembled patch");

        let vertices = area
            .into_iter()
            .enumerate()
            .map(|(i, position)| Vertex {
                position,
                color: palette::color_for(i),
            })
            .collect();
        Ok(Scene {
            patch: PointCloud::from_vec(vertices),
            flat,
        })
    }

    pub fn patch(&self) -> &PointCloud<f64> {
        &self.patch
    }

    pub fn flat(&self) -> &[Point2<f64>] {
        &self.flat
    }
}
