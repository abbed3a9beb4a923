use std::path::Path;

use geo2d_workload::shapes::Shape;
use glam::DVec2;
use image::{Rgb, RgbImage};

/// Image layout for previews of a centered planar domain.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain_extent: DVec2,
    pub background: [u8; 3],
    pub point_color: [u8; 3],
    pub point_radius: i32,
    pub shape_color: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: DVec2) -> Self {
        Self {
            image_size,
            domain_extent,
            background: [250, 250, 250],
            point_color: [40, 40, 40],
            point_radius: 1,
            shape_color: [220, 40, 40],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_point_style(mut self, color: [u8; 3], radius: i32) -> Self {
        self.point_color = color;
        self.point_radius = radius;
        self
    }

    pub fn with_shape_color(mut self, color: [u8; 3]) -> Self {
        self.shape_color = color;
        self
    }

    /// Maps a domain position (origin at the center, y up) to pixel coordinates.
    fn to_pixel(&self, p: DVec2) -> (i32, i32) {
        let (w, h) = self.image_size;
        let u = (p.x / self.domain_extent.x + 0.5) * w as f64;
        let v = (0.5 - p.y / self.domain_extent.y) * h as f64;
        (u.floor() as i32, v.floor() as i32)
    }

    fn scale(&self) -> f64 {
        self.image_size.0 as f64 / self.domain_extent.x
    }
}

/// Draws centered points and shape outlines and writes a PNG to `path`.
pub fn render_preview_to_png(
    points: &[DVec2],
    shapes: &[Shape],
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    for &p in points {
        let (x, y) = config.to_pixel(p);
        fill_disk(&mut img, x, y, config.point_radius, config.point_color);
    }

    for shape in shapes {
        let outline: Vec<DVec2> = match shape {
            Shape::Box(b) => vec![
                b.bottom_left,
                DVec2::new(b.upper_right.x, b.bottom_left.y),
                b.upper_right,
                DVec2::new(b.bottom_left.x, b.upper_right.y),
            ],
            Shape::Hexagon(hex) => hex.vertices.to_vec(),
            Shape::Circle(c) => circle_outline(c.center, c.radius, config.scale()),
            // Spherical circles live on another domain.
            Shape::SphericalCircle(_) => continue,
        };
        draw_polygon(&mut img, config, &outline);
    }

    img.save(path.as_ref())?;
    Ok(())
}

fn circle_outline(center: DVec2, radius: f64, scale: f64) -> Vec<DVec2> {
    let segments = ((radius * scale) as usize).clamp(16, 512);
    (0..segments)
        .map(|i| {
            let a = i as f64 / segments as f64 * std::f64::consts::TAU;
            center + DVec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

fn draw_polygon(img: &mut RgbImage, config: &RenderConfig, vertices: &[DVec2]) {
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        draw_line(img, config.to_pixel(a), config.to_pixel(b), config.shape_color);
    }
}

fn draw_line(img: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: [u8; 3]) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(img, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn fill_disk(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: [u8; 3]) {
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

#[inline]
fn put(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}
