use std::f64::consts::{PI, TAU};

use image::{Rgba, RgbaImage};
use nalgebra::{Point2, Point3, Rotation3};
use tracing::debug;

use crate::scene::Scene;

const WIREFRAME_COLOR: Rgba<u8> = Rgba([0xb0, 0xb0, 0xb0, 0xff]);

/// steps along each wireframe circle
const WIREFRAME_STEPS: usize = 512;

#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// edge length of the two small panels in pixels, the flattened panel is
    /// twice as large
    pub panel_size: u32,
    /// scatter marker radius in pixels
    pub point_size: u32,
    pub background_color: Rgba<u8>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            panel_size: 256,
            point_size: 4,
            background_color: Rgba([0xff, 0xff, 0xff, 0xff]),
        }
    }
}

/// fixed oblique view shared by the two 3D panels, tilted so neither pole
/// faces the viewer
fn view_rotation() -> Rotation3<f64> {
    Rotation3::from_euler_angles(-0.5, 0.6, 0.)
}

/// drops the depth component after rotating into view space
fn ortho(view: &Rotation3<f64>, p: &Point3<f64>) -> (Point2<f64>, f64) {
    let q = view * p;
    (Point2::new(q.x, q.y), q.z)
}

/// maps data coordinates to pixel coordinates, uniform scale with y flip
struct Viewport {
    size: u32,
    center: Point2<f64>,
    half: f64,
}

impl Viewport {
    fn new(size: u32, center: Point2<f64>, half: f64) -> Self {
        Viewport { size, center, half }
    }

    /// frames the given points with a small margin
    fn fit<I>(points: I, size: u32) -> Self
    where
        I: IntoIterator<Item = Point2<f64>>,
    {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min = Point2::new(min.x.min(p.x), min.y.min(p.y));
            max = Point2::new(max.x.max(p.x), max.y.max(p.y));
        }
        if min.x > max.x {
            // nothing to frame
            return Viewport::new(size, Point2::origin(), 1.);
        }
        let center = nalgebra::center(&min, &max);
        let mut half = (max.x - min.x).max(max.y - min.y) / 2. * 1.15;
        if half == 0. {
            half = 1.;
        }
        return Viewport::new(size, center, half);
    }

    // y grows upwards in data space but downwards in the image
    fn pixel(&self, p: &Point2<f64>) -> (i64, i64) {
        let scale = self.size as f64 / (2. * self.half);
        let x = (p.x - self.center.x) * scale + self.size as f64 / 2.;
        let y = self.size as f64 / 2. - (p.y - self.center.y) * scale;
        (x as i64, y as i64)
    }
}

/// paints a filled disc, clipped at the image border
fn splat(img: &mut RgbaImage, center: (i64, i64), radius: u32, color: Rgba<u8>) {
    let r = radius as i64;
    let (w, h) = (img.width() as i64, img.height() as i64);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let (x, y) = (center.0 + dx, center.1 + dy);
            if x < 0 || y < 0 || x >= w || y >= h {
                continue;
            }
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

fn blank(size: u32, settings: &RenderSettings) -> RgbaImage {
    RgbaImage::from_pixel(size, size, settings.background_color)
}

/// draws the front hemisphere of the unit sphere as parallels and meridians
fn draw_sphere_wireframe(img: &mut RgbaImage, view: &Rotation3<f64>, vp: &Viewport) {
    let mut draw = |p: Point3<f64>| {
        let (q, depth) = ortho(view, &p);
        if depth < 0. {
            // back side
            return;
        }
        splat(img, vp.pixel(&q), 0, WIREFRAME_COLOR);
    };

    // parallels every 30 degrees of latitude
    for lat_step in -2i32..=2 {
        let lat = lat_step as f64 * PI / 6.;
        let (z, r) = (lat.sin(), lat.cos());
        for i in 0..WIREFRAME_STEPS {
            let theta = TAU * i as f64 / WIREFRAME_STEPS as f64;
            draw(Point3::new(r * theta.cos(), r * theta.sin(), z));
        }
    }

    // meridians every 30 degrees of longitude, each a full great circle
    for lon_step in 0..6 {
        let lon = lon_step as f64 * PI / 6.;
        for i in 0..WIREFRAME_STEPS {
            let t = TAU * i as f64 / WIREFRAME_STEPS as f64;
            draw(Point3::new(
                t.sin() * lon.cos(),
                t.sin() * lon.sin(),
                t.cos(),
            ));
        }
    }
}

fn scatter3(img: &mut RgbaImage, scene: &Scene, view: &Rotation3<f64>, vp: &Viewport, radius: u32) {
    for v in scene.patch().points() {
        let (q, _) = ortho(view, &v.position);
        let color = Rgba([v.color.x, v.color.y, v.color.z, 0xff]);
        splat(img, vp.pixel(&q), radius, color);
    }
}

/// whole-sphere panel: wireframe plus the patch
pub fn render_overview(scene: &Scene, settings: &RenderSettings) -> RgbaImage {
    let mut img = blank(settings.panel_size, settings);
    let view = view_rotation();
    let vp = Viewport::new(settings.panel_size, Point2::origin(), 1.25);
    draw_sphere_wireframe(&mut img, &view, &vp);
    scatter3(&mut img, scene, &view, &vp, settings.point_size);
    return img;
}

/// close-up panel: the same view framed to the patch bounding box
pub fn render_focus(scene: &Scene, settings: &RenderSettings) -> RgbaImage {
    let mut img = blank(settings.panel_size, settings);
    let view = view_rotation();

    let bbox = scene.patch().bounding_box();
    let (center, _) = ortho(&view, &bbox.center());
    // sqrt(3) covers the worst-case diagonal of the box in the view plane
    let mut half = bbox.half_extent() * 3f64.sqrt() * 1.05;
    if half == 0. {
        half = 1.;
    }
    let vp = Viewport::new(settings.panel_size, center, half);

    scatter3(&mut img, scene, &view, &vp, settings.point_size);
    return img;
}

/// flattened panel: the projected 2D points, same colors index for index
pub fn render_flat(scene: &Scene, settings: &RenderSettings) -> RgbaImage {
    let size = settings.panel_size * 2;
    let mut img = blank(size, settings);
    let vp = Viewport::fit(scene.flat().iter().copied(), size);
    for (p, v) in scene.flat().iter().zip(scene.patch().points()) {
        let color = Rgba([v.color.x, v.color.y, v.color.z, 0xff]);
        splat(&mut img, vp.pixel(p), settings.point_size, color);
    }
    return img;
}

fn blit(target: &mut RgbaImage, panel: &RgbaImage, off_x: u32, off_y: u32) {
    for (x, y, p) in panel.enumerate_pixels() {
        target.put_pixel(off_x + x, off_y + y, *p);
    }
}

/// composes the three views: overview and close-up stacked on the left, the
/// flattened view at double size on the right
pub fn render_views(scene: &Scene, settings: &RenderSettings) -> RgbaImage {
    let s = settings.panel_size;

    let ((overview, focus), flat) = rayon::join(
        || {
            rayon::join(
                || render_overview(scene, settings),
                || render_focus(scene, settings),
            )
        },
        || render_flat(scene, settings),
    );

    let mut img = RgbaImage::from_pixel(3 * s, 2 * s, settings.background_color);
    blit(&mut img, &overview, 0, 0);
    blit(&mut img, &focus, 0, s);
    blit(&mut img, &flat, s, 0);
    debug!(
        width = img.width(),
        height = img.height(),
        "composed patch views"
    );
    return img;
}

#[cfg(test)]
mod tests {
    use image::Rgba;
    use nalgebra::Point2;

    use super::{render_views, RenderSettings, Viewport};
    use crate::samples::Samples;
    use crate::scene::Scene;

    fn test_scene() -> Scene {
        let samples = Samples::new(300);
        Scene::from_samples(&samples, 10, 8).unwrap()
    }

    #[test]
    fn viewport_maps_center_and_flips_y() {
        let vp = Viewport::new(100, Point2::origin(), 1.);
        assert_eq!(vp.pixel(&Point2::origin()), (50, 50));
        assert_eq!(vp.pixel(&Point2::new(0., 1.)), (50, 0));
        assert_eq!(vp.pixel(&Point2::new(1., 0.)), (100, 50));
    }

    #[test]
    fn composition_has_the_expected_layout() {
        let settings = RenderSettings {
            panel_size: 64,
            ..RenderSettings::default()
        };
        let img = render_views(&test_scene(), &settings);
        assert_eq!(img.width(), 192);
        assert_eq!(img.height(), 128);
    }

    #[test]
    fn flat_panel_shows_the_distinguished_center() {
        let settings = RenderSettings {
            panel_size: 64,
            ..RenderSettings::default()
        };
        let img = render_views(&test_scene(), &settings);
        // the flattened panel occupies the right two thirds
        let black = img
            .enumerate_pixels()
            .any(|(x, _, p)| x >= 64 && *p == Rgba([0, 0, 0, 0xff]));
        assert!(black);
    }

    #[test]
    fn overview_contains_the_sphere_wireframe() {
        let settings = RenderSettings {
            panel_size: 64,
            ..RenderSettings::default()
        };
        let img = super::render_overview(&test_scene(), &settings);
        let gray = img
            .pixels()
            .filter(|p| **p == super::WIREFRAME_COLOR)
            .count();
        assert!(gray > 100);
    }
}
