use crate::ray::Ray3D;
use crate::geometry::Sphere;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin).
///
/// The `what` parameter borrows the sphere that was hit from the world's
/// object list.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Sphere,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if the underlying *pointers* of the
/// intersections are equivalent.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

/// Finds the nearest sphere hit by a ray.
///
/// Every object is tested; there is no acceleration structure. Misses are
/// dropped and the remaining hits are folded into a running minimum. When two
/// spheres are hit at exactly the same distance, the one listed first wins.
///
/// An empty list, or a list where nothing is hit, yields `None`.
pub fn nearest_intersection<'a>(objects: &'a [Sphere], r: &Ray3D)
    -> Option<Intersection<'a>> {
    objects.iter()
        .filter_map(|what| what.intersect(r).map(|t| Intersection { t, what }))
        .fold(None, |best: Option<Intersection<'a>>, candidate| match best {
            Some(b) if b.t <= candidate.t => Some(b),
            _ => Some(candidate),
        })
}

/// The distance to a hit, or infinity when there is none.
pub fn hit_distance(hit: &Option<Intersection>) -> f64 {
    hit.map_or(f64::INFINITY, |i| i.t)
}

#[cfg(test)]
use crate::tuple::Tuple3D;

#[cfg(test)]
fn ray_down_z() -> Ray3D {
    Ray3D::new(Tuple3D::new(0.0, 0.0, -10.0), Tuple3D::new(0.0, 0.0, 1.0))
}

#[test]
fn nearest_in_empty_list() {
    let hit = nearest_intersection(&[], &ray_down_z());

    assert!(hit.is_none());
    assert_eq!(hit_distance(&hit), f64::INFINITY);
}

#[test]
fn nearest_when_everything_misses() {
    let objects = vec![
        Sphere::new(Tuple3D::new(5.0, 0.0, 0.0), 1.0, Default::default()),
        Sphere::new(Tuple3D::new(0.0, 0.0, -20.0), 1.0, Default::default()),
    ];
    let hit = nearest_intersection(&objects, &ray_down_z());

    assert!(hit.is_none());
    assert_eq!(hit_distance(&hit), f64::INFINITY);
}

#[test]
fn nearest_picks_minimum_distance() {
    let objects = vec![
        Sphere::new(Tuple3D::new(0.0, 0.0, 5.0), 1.0, Default::default()),
        Sphere::new(Tuple3D::new(7.0, 0.0, 0.0), 1.0, Default::default()),
        Sphere::new(Tuple3D::new(0.0, 0.0, 0.0), 2.0, Default::default()),
        Sphere::new(Tuple3D::new(0.0, 0.0, 3.0), 0.5, Default::default()),
    ];
    let hit = nearest_intersection(&objects, &ray_down_z()).unwrap();

    assert_eq!(hit, Intersection { t: 8.0, what: &objects[2] });
    assert_eq!(hit_distance(&Some(hit)), 8.0);
}

#[test]
fn nearest_tie_goes_to_first() {
    let s = Sphere::new(Tuple3D::zero(), 1.0, Default::default());
    let objects = vec![
        Sphere::new(Tuple3D::new(0.0, 0.0, 50.0), 1.0, Default::default()),
        s,
        s,
    ];
    let hit = nearest_intersection(&objects, &ray_down_z()).unwrap();

    assert_eq!(hit.t, 9.0);
    assert!(std::ptr::eq(hit.what, &objects[1]));
}
