use tracing::{ debug, info };

use crate::ray::Ray3D;
use crate::tuple::{ Tuple3D, DegenerateVector };
use crate::color::Color;
use crate::world::World;
use crate::canvas::Canvas;

/// A camera record for generating a canvas.
///
/// The camera sits at `position` and looks through a viewport: the rectangle
/// `[xmin, xmax] x [ymin, ymax]` on the plane `z = 0`. Pixels are spread over
/// the viewport by linear interpolation, so the viewport bounds must satisfy
/// `xmin < xmax` and `ymin < ymax`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,

    /// Where every primary ray starts.
    pub position: Tuple3D,
}

impl Camera {
    pub fn new(hsize: usize, vsize: usize,
        (xmin, xmax): (f64, f64), (ymin, ymax): (f64, f64),
        position: Tuple3D) -> Camera {
        Camera { hsize, vsize, xmin, xmax, ymin, ymax, position }
    }

    /// Maps a pixel onto the viewport plane.
    ///
    /// Pixel `(0, 0)` lands on `(xmin, ymin)`. Scan rows grow upwards, which
    /// is why `render` flips them when writing to the canvas.
    pub fn pixel_to_point(&self, px: usize, py: usize) -> Tuple3D {
        let x = (self.xmax - self.xmin) * px as f64 / self.hsize as f64
            + self.xmin;
        let y = (self.ymax - self.ymin) * py as f64 / self.vsize as f64
            + self.ymin;

        Tuple3D::new(x, y, 0.0)
    }

    /// The primary ray from the camera through a pixel.
    ///
    /// Fails if the camera sits exactly on the pixel's viewport point.
    pub fn ray_for_pixel(&self, px: usize, py: usize)
        -> Result<Ray3D, DegenerateVector> {
        Ray3D::towards(self.position, self.pixel_to_point(px, py))
    }

    /// The color seen through a single pixel.
    ///
    /// Depends only on the world and the pixel coordinates, so pixels can be
    /// computed in any order.
    pub fn color_for_pixel(&self, w: &World, px: usize, py: usize)
        -> Result<Color, DegenerateVector> {
        let ray = self.ray_for_pixel(px, py)?;
        w.color_at(&ray)
    }

    /// Computes every pixel of scan row `py`, left to right.
    pub fn render_row(&self, w: &World, py: usize)
        -> Result<Vec<Color>, DegenerateVector> {
        (0..self.hsize)
            .map(|px| self.color_for_pixel(w, px, py))
            .collect()
    }

    /// The canvas row that scan row `py` is written to.
    ///
    /// Scan row 0 is the bottom of the viewport, and so the last canvas row.
    pub fn canvas_row(&self, py: usize) -> usize {
        self.vsize - py - 1
    }

    /// Renders the world one pixel at a time.
    pub fn render(&self, w: &World) -> Result<Canvas, DegenerateVector> {
        info!(width = self.hsize, height = self.vsize,
            objects = w.objects.len(), "rendering scene");

        let mut image = Canvas::new(self.hsize, self.vsize);

        for py in 0..self.vsize {
            for px in 0..self.hsize {
                let color = self.color_for_pixel(w, px, py)?;
                image.write_pixel(px, self.canvas_row(py), &color);
            }
        }

        debug!("render finished");
        Ok(image)
    }
}

#[cfg(test)]
fn test_camera() -> Camera {
    Camera::new(10, 10, (-1.0, 1.0), (-1.0, 1.0), Tuple3D::new(0.0, 0.0, 1.0))
}

#[test]
fn pixel_to_viewport_point() {
    let c = test_camera();

    assert_eq!(c.pixel_to_point(0, 0), Tuple3D::new(-1.0, -1.0, 0.0));
    assert_eq!(c.pixel_to_point(5, 5), Tuple3D::new(0.0, 0.0, 0.0));
    assert_eq!(c.pixel_to_point(9, 2), Tuple3D::new(0.8, -0.6, 0.0));
}

#[test]
fn ray_through_center() {
    let c = test_camera();
    let r = c.ray_for_pixel(5, 5).unwrap();

    assert_eq!(r.origin, Tuple3D::new(0.0, 0.0, 1.0));
    assert_eq!(r.direction, Tuple3D::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = test_camera();
    let r = c.ray_for_pixel(0, 0).unwrap();
    let k = 1.0 / f64::sqrt(3.0);

    assert_eq!(r.direction, Tuple3D::new(-k, -k, -k));
}

#[test]
fn ray_from_camera_on_viewport() {
    let c = Camera::new(10, 10, (-1.0, 1.0), (-1.0, 1.0), Tuple3D::zero());

    assert_eq!(c.ray_for_pixel(5, 5), Err(DegenerateVector));
    assert_eq!(c.render(&World::new()), Err(DegenerateVector));
}

#[test]
fn render_lit_center_and_dark_corner() {
    let w = World::new();
    let c = test_camera();
    let image = c.render(&w).unwrap();

    // Scan pixel (5, 5) is written to canvas row 10 - 5 - 1
    let center = image.read_pixel(5, 4).unwrap();
    assert!(!center.is_black());
    assert_eq!(center, c.color_for_pixel(&w, 5, 5).unwrap());

    let corner = image.read_pixel(0, 9).unwrap();
    assert!(corner.is_black());
}

#[test]
fn render_center_pixel_in_shadow() {
    use crate::geometry::Sphere;

    let mut w = World::new();
    let c = test_camera();
    assert!(!c.color_for_pixel(&w, 5, 5).unwrap().is_black());

    w.objects.push(Sphere::new(
        Tuple3D::new(0.0, 5.0, 0.0), 0.5, Default::default()
    ));
    let image = c.render(&w).unwrap();

    assert!(image.read_pixel(5, 4).unwrap().is_black());
}

#[test]
fn render_flips_rows() {
    let w = World::new();
    let c = test_camera();
    let image = c.render(&w).unwrap();

    for py in 0..c.vsize {
        for px in 0..c.hsize {
            let expected = c.color_for_pixel(&w, px, py).unwrap();
            assert_eq!(image.read_pixel(px, c.vsize - 1 - py).unwrap(), expected);
        }
    }
}
