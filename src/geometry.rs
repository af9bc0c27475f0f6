use crate::tuple::{ Tuple3D, DegenerateVector };
use crate::ray::Ray3D;
use crate::light::Material;

/// Intersects a line with a sphere.
///
/// The line starts at `origin` and runs along the unit vector `direction`.
/// Since `direction` has unit length, the quadratic's leading coefficient is
/// 1 and is left out.
///
/// Only the near root is ever returned:
///
/// * a discriminant of zero or less (including a tangent line) is a miss,
/// * a near root behind the origin is a miss, even when the far root lies
///   ahead of it. A ray starting inside a sphere therefore never hits it.
///
/// # Examples
///
/// ```
/// # use sphere_tracer::tuple::Tuple3D;
/// # use sphere_tracer::geometry::sphere_intersect;
/// let t = sphere_intersect(Tuple3D::zero(), 1.0,
///     Tuple3D::new(0.0, 0.0, -5.0), Tuple3D::new(0.0, 0.0, 1.0));
/// assert_eq!(t, Some(4.0));
/// ```
pub fn sphere_intersect(center: Tuple3D, radius: f64,
    origin: Tuple3D, direction: Tuple3D) -> Option<f64> {
    let sphere_to_ray = origin - center;

    let b = 2.0 * direction.dot(&sphere_to_ray);
    let c = sphere_to_ray.dot(&sphere_to_ray) - radius * radius;

    let discriminant = b * b - 4.0 * c;
    if discriminant <= 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / 2.0;
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

/// A sphere with its surface material.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Tuple3D,
    pub radius: f64,
    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere::unit()
    }
}

impl Sphere {
    pub fn new(center: Tuple3D, radius: f64, material: Material) -> Sphere {
        Sphere { center, radius, material }
    }

    /// A sphere of radius 1 at the origin, with the default material.
    pub fn unit() -> Sphere {
        Sphere {
            center: Tuple3D::zero(),
            radius: 1.0,
            material: Default::default(),
        }
    }

    /// Distance along `r` to the near side of this sphere, if it is hit.
    pub fn intersect(&self, r: &Ray3D) -> Option<f64> {
        sphere_intersect(self.center, self.radius, r.origin, r.direction)
    }

    /// The outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: Tuple3D) -> Result<Tuple3D, DegenerateVector> {
        (point - self.center).normalize()
    }
}

#[test]
fn ray_through_center_hits_near_side() {
    let s = Sphere::new(Tuple3D::new(1.0, 2.0, 3.0), 1.5, Default::default());
    let r = Ray3D::new(
        Tuple3D::new(1.0, 2.0, -7.0),
        Tuple3D::new(0.0, 0.0, 1.0),
    );

    // The origin is 10 away from the center
    assert_eq!(s.intersect(&r), Some(8.5));
}

#[test]
fn ray_along_diagonal_hits_near_side() {
    let s = Sphere::unit();
    let origin = Tuple3D::new(3.0, 3.0, 3.0);
    let direction = (Tuple3D::zero() - origin).normalize().unwrap();

    let t = s.intersect(&Ray3D::new(origin, direction)).unwrap();
    assert!(crate::feq(t, origin.norm() - 1.0));
}

#[test]
fn tangent_ray_misses() {
    let s = Sphere::unit();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 1.0, -5.0),
        Tuple3D::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_misses_sphere() {
    let s = Sphere::unit();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 2.0, -5.0),
        Tuple3D::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn ray_inside_sphere_misses() {
    let s = Sphere::unit();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, 0.0),
        Tuple3D::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn sphere_behind_ray_misses() {
    let s = Sphere::unit();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, 5.0),
        Tuple3D::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn zero_radius_sphere_misses() {
    let s = Sphere::new(Tuple3D::zero(), 0.0, Default::default());
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, -5.0),
        Tuple3D::new(0.0, 0.0, 1.0),
    );

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn normal_on_sphere() {
    let s = Sphere::new(Tuple3D::new(0.0, 0.0, -1.0), 1.0, Default::default());

    assert_eq!(s.normal_at(Tuple3D::zero()), Ok(Tuple3D::new(0.0, 0.0, 1.0)));
    assert_eq!(s.normal_at(s.center), Err(DegenerateVector));
}
