use std::ops::{ Add, Sub, Mul };

use thiserror::Error;

use crate::feq;

/// Raised when normalizing a vector whose norm is zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
#[error("cannot normalize a vector of norm 0")]
pub struct DegenerateVector;

/// A 3D tuple.
///
/// Used both for points (camera, light, sphere centers) and for directions.
/// Every operation yields a new tuple; nothing is mutated in place.
///
/// Equality is approximate: two tuples are equal when each pair of components
/// differs by less than `FEQ_EPSILON`.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple3D {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl PartialEq for Tuple3D {
    fn eq(&self, other: &Tuple3D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Tuple3D {
    pub fn new(x: f64, y: f64, z: f64) -> Tuple3D {
        Tuple3D { x, y, z }
    }

    pub fn zero() -> Tuple3D {
        Tuple3D { x: 0.0, y: 0.0, z: 0.0 }
    }

    pub fn dot(&self, other: &Tuple3D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    /// The Euclidean length of the tuple.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales the tuple to unit length.
    ///
    /// A zero-length tuple has no direction, so `DegenerateVector` is returned
    /// instead of a tuple full of NaNs.
    ///
    /// ```
    /// # use sphere_tracer::tuple::{ Tuple3D, DegenerateVector };
    /// let v = Tuple3D::new(1.0, 2.0, 2.0);
    /// assert_eq!(v.normalize(), Ok(Tuple3D::new(1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0)));
    /// assert_eq!(Tuple3D::zero().normalize(), Err(DegenerateVector));
    /// ```
    pub fn normalize(&self) -> Result<Tuple3D, DegenerateVector> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(DegenerateVector);
        }

        Ok((1.0 / norm) * *self)
    }
}

impl Add for Tuple3D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z
        }
    }
}

impl Sub for Tuple3D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z
        }
    }
}

/// Implements scalar right-multiplication for a 3D tuple.
///
/// ```
/// use sphere_tracer::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
/// assert_eq!(t * 5.0, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Tuple3D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other
        }
    }
}

/// Implements scalar left-multiplication for a 3D tuple.
///
/// ```rust
/// use sphere_tracer::tuple::Tuple3D;
///
/// let t = Tuple3D::new(1.0, 2.0, 3.0);
/// assert_eq!(5.0 * t, Tuple3D::new(5.0, 10.0, 15.0));
/// ```
impl Mul<Tuple3D> for f64 {
    type Output = Tuple3D;

    fn mul(self, other: Tuple3D) -> Tuple3D {
        Tuple3D {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z
        }
    }
}

/* Tests */

#[test]
fn add_tuples() {
    let a1 = Tuple3D::new(0.0, 2.2, 4.0);
    let a2 = Tuple3D::new(1.0, 2.0, 3.0);

    assert_eq!(a1 + a2, Tuple3D::new(1.0, 4.2, 7.0));
    assert_eq!(Tuple3D::new(-2.0, 1.0, -1.0) + a2, Tuple3D::new(-1.0, 3.0, 2.0));
}

#[test]
fn add_commutes_and_associates() {
    let u = Tuple3D::new(1.5, -2.0, 0.25);
    let v = Tuple3D::new(-3.0, 4.0, 8.0);
    let w = Tuple3D::new(0.1, 0.2, -0.3);

    assert_eq!(u + v, v + u);
    assert_eq!((u + v) + w, u + (v + w));
}

#[test]
fn sub_tuples() {
    let a1 = Tuple3D::new(0.0, 2.2, 4.0);
    let a2 = Tuple3D::new(1.0, 2.0, 3.0);

    assert_eq!(a1 - a2, Tuple3D::new(-1.0, 0.2, 1.0));
    assert_eq!(Tuple3D::new(-2.0, 1.0, -1.0) - a2, Tuple3D::new(-3.0, -1.0, -4.0));
}

#[test]
fn mul_scalar() {
    assert_eq!(0.0 * Tuple3D::new(2.0, 4.0, 6.0), Tuple3D::zero());
    assert_eq!(-1.0 * Tuple3D::new(2.0, -4.0, 6.0), Tuple3D::new(-2.0, 4.0, -6.0));
    assert_eq!(Tuple3D::new(2.1, 4.0, 6.0) * 4.0, Tuple3D::new(8.4, 16.0, 24.0));
}

#[test]
fn dot_tuples() {
    let a = Tuple3D::new(1.0, 2.0, 4.5);
    let b = Tuple3D::new(0.0, -2.0, 3.0);

    assert_eq!(a.dot(&b), 9.5);
    assert_eq!(a.dot(&b), b.dot(&a));
    assert_eq!(Tuple3D::zero().dot(&Tuple3D::zero()), 0.0);
}

#[test]
fn norm_tuples() {
    assert_eq!(Tuple3D::zero().norm(), 0.0);
    assert_eq!(Tuple3D::new(0.0, -2.0, 4.1).norm(), f64::sqrt(4.0 + 4.1 * 4.1));
}

#[test]
fn norm_of_scaled_tuple() {
    let v = Tuple3D::new(1.0, -2.0, 3.0);

    for &k in [-3.5, -1.0, 0.0, 0.5, 2.0].iter() {
        assert!(feq((k * v).norm(), f64::abs(k) * v.norm()));
    }
}

#[test]
fn normalize_clean() {
    let v = Tuple3D::new(0.0, 1.0, 0.0);

    assert_eq!(v.normalize(), Ok(Tuple3D::new(0.0, 1.0, 0.0)));
}

#[test]
fn normalize_dirty() {
    let v = Tuple3D::new(1.0, 2.0, 3.0);
    let n = v.normalize().unwrap();

    assert!(feq(n.norm(), 1.0));
    assert_eq!(n, Tuple3D::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    ));
}

#[test]
fn normalize_zero() {
    assert_eq!(Tuple3D::zero().normalize(), Err(DegenerateVector));
}
