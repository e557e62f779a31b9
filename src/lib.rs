mod io;
pub mod palette;
mod pointcloud;
pub mod projection;
mod render;
mod samples;
mod scene;
mod vertex;

pub use io::{export_scene, load_samples, PlyError};
pub use pointcloud::{BoundingBox, PointCloud};
pub use projection::{project, project_axes, rotate_to_axis, ProjectionError};
pub use render::{render_flat, render_focus, render_overview, render_views, RenderSettings};
pub use samples::Samples;
pub use scene::Scene;
pub use vertex::{BaseFloat, FlatVertex, PlyType, Vertex};
