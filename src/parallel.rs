use rayon::prelude::*;
use rayon::ThreadPoolBuildError;
use thiserror::Error;
use tracing::info;

use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::tuple::DegenerateVector;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("degenerate geometry: {0}")]
    Degenerate(#[from] DegenerateVector),
    #[error("could not start render threads: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

/// Renders the world with scan rows spread across a pool of worker threads.
///
/// Each row is computed independently from the read-only world and written
/// to its own canvas row, so the canvas is identical to `Camera::render`.
/// `threads == 0` lets rayon pick the number of workers.
pub fn parallel_render(world: &World, camera: &Camera, threads: usize)
    -> Result<Canvas, RenderError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    info!(width = camera.hsize, height = camera.vsize,
        objects = world.objects.len(), threads = pool.current_num_threads(),
        "rendering scene");

    let rows = pool.install(|| {
        (0..camera.vsize)
            .into_par_iter()
            .map(|py| camera.render_row(world, py))
            .collect::<Result<Vec<_>, DegenerateVector>>()
    })?;

    let mut image = Canvas::new(camera.hsize, camera.vsize);
    for (py, row) in rows.iter().enumerate() {
        for (px, color) in row.iter().enumerate() {
            image.write_pixel(px, camera.canvas_row(py), color);
        }
    }

    Ok(image)
}

#[cfg(test)]
use crate::tuple::Tuple3D;

#[test]
fn parallel_matches_sequential() {
    use crate::geometry::Sphere;

    let mut w = World::new();
    w.objects.push(Sphere::new(
        Tuple3D::new(0.6, 0.4, -0.5), 0.3, Default::default()
    ));
    let c = Camera::new(24, 16, (-1.5, 1.5), (-1.0, 1.0),
        Tuple3D::new(0.0, 0.0, 2.0));

    let sequential = c.render(&w).unwrap();
    for &threads in [0, 1, 3].iter() {
        assert_eq!(parallel_render(&w, &c, threads).unwrap(), sequential);
    }
}

#[test]
fn parallel_reports_degenerate_rays() {
    let c = Camera::new(10, 10, (-1.0, 1.0), (-1.0, 1.0), Tuple3D::zero());

    match parallel_render(&World::new(), &c, 2) {
        Err(RenderError::Degenerate(DegenerateVector)) => {},
        other => panic!("expected a degenerate ray, got {:?}", other),
    }
}
