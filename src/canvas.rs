use std::io;
use std::io::Write;
use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::color::Color;

/// A canvas for drawing pixels.
///
/// This structure stores the results of the ray tracer. The `Camera` casts one
/// ray per pixel into a `World` and writes the resulting color here.
///
/// Colors are stored unclamped. Once rendering finishes, the `Canvas` can be
/// encoded as a binary PPM (P6) image, at which point each channel is folded
/// into a byte (see `Color::to_bytes`).
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// All pixels, row by row from the top row of the image.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Encodes the canvas as a binary PPM image.
    ///
    /// The header is `P6`, the width and height, and a maximum channel value
    /// of 255, followed by three raw bytes per pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// # use sphere_tracer::canvas::Canvas;
    /// let mut canvas = Canvas::new(2, 1);
    /// canvas.write_pixel(1, 0, &Color::rgb(1.0, 0.5, -1.0));
    /// assert_eq!(canvas.to_ppm(), b"P6\n2 1\n255\n\0\0\0\xff\x7f\0".to_vec());
    /// ```
    pub fn to_ppm(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);

        let mut out = Vec::with_capacity(header.len() + self.pixels.len() * 3);
        out.extend_from_slice(header.as_bytes());
        for pixel in self.pixels.iter() {
            out.extend_from_slice(&pixel.to_bytes());
        }

        out
    }

    /// Saves a canvas to a binary PPM file, replacing any existing file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let bytes = self.to_ppm();

        let mut out = File::create(path)?;
        out.write_all(&bytes)?;

        info!(path = %path.display(), bytes = bytes.len(), "saved image");
        Ok(())
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in row-column
    /// order, where `y` is the row of the pixel, and `x` is the column. Rows
    /// and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// # use sphere_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Pixels are specified in row-column order, where `y` is the row of the
    /// pixel, and `x` is the column. Rows and columns are zero-indexed. If
    /// the specified pixel location is out-of-bounds, `None` is returned by
    /// this function.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        // Return nothing if pixel is out-of-bounds
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(4, 3);

    assert_eq!(c.pixels().len(), 12);
    assert!(c.pixels().iter().all(|p| p.is_black()));
}

#[test]
fn out_of_bounds_pixels() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::rgb(1.0, 1.0, 1.0));
    c.write_pixel(0, 2, &Color::rgb(1.0, 1.0, 1.0));

    assert_eq!(c.read_pixel(2, 0), None);
    assert!(c.pixels().iter().all(|p| p.is_black()));
}

#[test]
fn ppm_header_and_body() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.5));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.2, 1.0));

    let ppm = c.to_ppm();
    let header = b"P6\n3 2\n255\n";
    assert_eq!(&ppm[..header.len()], &header[..]);

    let body = &ppm[header.len()..];
    assert_eq!(body.len(), 3 * 2 * 3);
    assert_eq!(&body[0..3], &[255, 0, 127]);
    assert_eq!(&body[15..18], &[0, 51, 255]);
}

#[test]
fn save_writes_ppm() {
    let mut c = Canvas::new(1, 1);
    c.write_pixel(0, 0, &Color::rgb(1.0, 1.0, 1.0));

    let path = std::env::temp_dir()
        .join(format!("sphere-tracer-canvas-{}.ppm", std::process::id()));
    c.save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(bytes, b"P6\n1 1\n255\n\xff\xff\xff".to_vec());
}
