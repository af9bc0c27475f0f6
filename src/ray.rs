use crate::tuple::{ Tuple3D, DegenerateVector };

/// A ray, cast from `origin` along `direction`.
///
/// Intersection math assumes `direction` has unit length; build rays from a
/// normalized direction.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray3D {
    pub origin: Tuple3D,
    pub direction: Tuple3D,
}

impl Ray3D {
    pub fn new(origin: Tuple3D, direction: Tuple3D) -> Ray3D {
        Ray3D { origin, direction }
    }

    /// Builds a ray from `origin` pointing at `target`.
    pub fn towards(origin: Tuple3D, target: Tuple3D)
        -> Result<Ray3D, DegenerateVector> {
        let direction = (target - origin).normalize()?;
        Ok(Ray3D { origin, direction })
    }

    pub fn position(&self, t: f64) -> Tuple3D {
        self.origin + (t * self.direction)
    }
}

#[test]
fn ray_position() {
    let r = Ray3D::new(
                Tuple3D::new(2.0, 3.0, 4.0),
                Tuple3D::new(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple3D::new(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple3D::new(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple3D::new(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple3D::new(4.5, 3.0, 4.0));
}

#[test]
fn ray_towards_target() {
    let r = Ray3D::towards(
                Tuple3D::new(0.0, 0.0, 1.0),
                Tuple3D::new(0.0, 0.0, -4.0)
            ).unwrap();

    assert_eq!(r.direction, Tuple3D::new(0.0, 0.0, -1.0));
    assert!(Ray3D::towards(Tuple3D::zero(), Tuple3D::zero()).is_err());
}
