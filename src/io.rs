use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use approx::ulps_eq;
use ply_rs::{
    parser::Parser,
    ply::{Addable, Encoding, Ply},
    writer::Writer,
};
use thiserror::Error;
use tracing::info;

use crate::samples::Samples;
use crate::scene::Scene;
use crate::vertex::{FlatVertex, Vertex};

#[derive(Debug, Error)]
pub enum PlyError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file contains no vertex element")]
    MissingVertices,
    #[error("point {index} does not lie on the unit sphere")]
    OffSphere { index: usize },
}

/// writes the patch and its flattened image as two elements of one PLY file,
/// a "vertex" element with the 3D points and a "flat" element with their 2D
/// images, both colored and in matching order
pub fn export_scene(path: &Path, scene: &Scene) -> Result<(), PlyError> {
    let mut file = BufWriter::new(File::create(path)?);

    let mut vertex_def = Vertex::<f64>::element_def("vertex".to_string());
    vertex_def.count = scene.patch().len();
    let mut flat_def = FlatVertex::<f64>::element_def("flat".to_string());
    flat_def.count = scene.flat().len();

    let mut ply = Ply::<Vertex<f64>>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header.elements.add(vertex_def.clone());
    ply.header.elements.add(flat_def.clone());

    let flat: Vec<FlatVertex<f64>> = scene
        .flat()
        .iter()
        .zip(scene.patch().points())
        .map(|(p, v)| FlatVertex {
            position: *p,
            color: v.color,
        })
        .collect();

    let writer = Writer::<Vertex<f64>>::new();
    writer.write_header(&mut file, &ply.header)?;
    writer.write_payload_of_element(&mut file, scene.patch().points(), &vertex_def, &ply.header)?;

    let flat_writer = Writer::<FlatVertex<f64>>::new();
    flat_writer.write_payload_of_element(&mut file, &flat, &flat_def, &ply.header)?;

    info!(path = %path.display(), points = scene.patch().len(), "exported patch");
    return Ok(());
}

/// reads a point cloud as a substitute sphere discretization
///
/// every point must already sit on the unit sphere (small floating point
/// deviations are snapped back)
pub fn load_samples(path: &Path) -> Result<Samples, PlyError> {
    let mut file = BufReader::new(File::open(path)?);
    let parser = Parser::<Vertex<f64>>::new();
    let ply = parser.read_ply(&mut file)?;

    let vertices = ply
        .payload
        .get("vertex")
        .filter(|v| !v.is_empty())
        .ok_or(PlyError::MissingVertices)?;

    for (index, v) in vertices.iter().enumerate() {
        if !ulps_eq!(v.position.coords.norm(), 1., epsilon = 1e-3) {
            return Err(PlyError::OffSphere { index });
        }
    }

    info!(path = %path.display(), points = vertices.len(), "loaded sphere discretization");
    return Ok(Samples::from_points(
        vertices.iter().map(|v| v.position).collect(),
    ));
}
