use nalgebra::{Point3, Vector3};

use crate::vertex::{BaseFloat, Vertex};

#[derive(Debug)]
pub struct PointCloud<F: BaseFloat> {
    data: Vec<Vertex<F>>,
    bbox: BoundingBox<F>,
}

impl<F: BaseFloat> PointCloud<F> {
    pub fn from_vec(points: Vec<Vertex<F>>) -> Self {
        let bbox = PointCloud::calc_bbox(&points);
        PointCloud { data: points, bbox }
    }

    fn calc_bbox(points: &[Vertex<F>]) -> BoundingBox<F> {
        let first = points
            .first()
            .map(|v| v.position)
            .unwrap_or_else(Point3::origin);
        let mut min_corner = first;
        let mut max_corner = first;
        for v in points.iter() {
            min_corner = componentwise(&min_corner, &v.position, F::min);
            max_corner = componentwise(&max_corner, &v.position, F::max);
        }
        BoundingBox {
            min: min_corner,
            max: max_corner,
        }
    }

    pub fn points(&self) -> &Vec<Vertex<F>> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bounding_box(&self) -> &BoundingBox<F> {
        &self.bbox
    }
}

fn componentwise<F: BaseFloat>(
    a: &Point3<F>,
    b: &Point3<F>,
    pick: impl Fn(F, F) -> F,
) -> Point3<F> {
    Point3::new(pick(a.x, b.x), pick(a.y, b.y), pick(a.z, b.z))
}

#[derive(Debug, Clone, Copy)]
pub struct BoundingBox<F: BaseFloat> {
    min: Point3<F>,
    max: Point3<F>,
}

impl<F: BaseFloat> BoundingBox<F> {
    pub fn new(p1: Point3<F>, p2: Point3<F>) -> Self {
        BoundingBox {
            min: componentwise(&p1, &p2, F::min),
            max: componentwise(&p1, &p2, F::max),
        }
    }

    pub fn center(&self) -> Point3<F> {
        let two = F::from_f64(2.).unwrap();
        Point3::from((self.min.coords + self.max.coords) / two)
    }

    pub fn size(&self) -> Vector3<F> {
        self.max - self.min
    }

    /// half the longest edge, used for uniform view framing
    pub fn half_extent(&self) -> F {
        let size = self.size();
        let two = F::from_f64(2.).unwrap();
        size.x.max(size.y).max(size.z) / two
    }
}
