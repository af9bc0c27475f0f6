use crate::ray::Ray3D;
use crate::tuple::{ Tuple3D, DegenerateVector };
use crate::color::Color;
use crate::consts::DEFAULT_SHADOW_BIAS;
use crate::light::{ PointLight, Material, lighting };
use crate::geometry::Sphere;
use crate::intersect::{ Intersection, nearest_intersection, hit_distance };

/// A world with objects and light.
///
/// Objects are spheres, and the light is a single `PointLight`. The world is
/// read-only while rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub objects: Vec<Sphere>,
    pub light_source: PointLight,

    /// How far along the light direction shadow rays start from the surface.
    pub shadow_bias: f64,
}

impl Default for World {
    fn default() -> World {
        let light_source = PointLight::new(Tuple3D::new(0.0, 10.0, 0.0));

        let s1 = Sphere::new(
            Tuple3D::new(0.0, 0.0, -1.0),
            1.0,
            Material::new(
                Color::rgb(0.1, 0.0, 0.0),
                Color::rgb(0.7, 0.0, 0.0),
                Color::rgb(0.5, 0.5, 0.5),
                40.0,
                0.0,
            ),
        );

        World {
            objects: vec![s1],
            light_source,
            shadow_bias: DEFAULT_SHADOW_BIAS,
        }
    }
}

impl World {
    /// Creates a default world with one red sphere lit from above.
    pub fn new() -> World {
        Default::default()
    }

    /// Creates an empty world with no objects and the default light source.
    pub fn empty() -> World {
        World {
            objects: Vec::new(),
            light_source: Default::default(),
            shadow_bias: DEFAULT_SHADOW_BIAS,
        }
    }

    /// Intersects a ray against all objects in a world, keeping the nearest.
    pub fn intersect(&self, r: &Ray3D) -> Option<Intersection> {
        nearest_intersection(&self.objects, r)
    }

    /// Determines whether a point is shadowed.
    ///
    /// A shadow ray is cast from `p` along `lightv`. The point is in shadow
    /// when something is hit *strictly* closer than the light. With a zero
    /// bias the ray starts on the surface itself.
    pub fn is_shadowed(&self, p: Tuple3D, lightv: Tuple3D) -> bool {
        let origin = p + lightv * self.shadow_bias;
        let distance = (self.light_source.position - origin).norm();

        let hit = self.intersect(&Ray3D::new(origin, lightv));
        hit_distance(&hit) < distance
    }

    /// Calculates the color for a hit, based on shadows and light.
    ///
    /// `eye` is the position the primary ray was cast from.
    pub fn shade_hit(&self, r: &Ray3D, hit: &Intersection, eye: Tuple3D)
        -> Result<Color, DegenerateVector> {
        let point = r.position(hit.t);
        let lightv = (self.light_source.position - point).normalize()?;

        if self.is_shadowed(point, lightv) {
            return Ok(Color::black());
        }

        let normalv = hit.what.normal_at(point)?;
        lighting(&hit.what.material, eye, normalv, lightv)
    }

    /// Determines a color based on the intersection of a ray and the objects.
    ///
    /// Rays that hit nothing are black.
    pub fn color_at(&self, r: &Ray3D) -> Result<Color, DegenerateVector> {
        match self.intersect(r) {
            None => Ok(Color::black()),
            Some(hit) => self.shade_hit(r, &hit, r.origin),
        }
    }
}

#[test]
fn intersect_default_world_with_ray() {
    let w = World::new();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, 0.0, -1.0),
    );

    let hit = w.intersect(&r).unwrap();
    assert_eq!(hit.t, 1.0);
    assert!(std::ptr::eq(hit.what, &w.objects[0]));
}

#[test]
fn color_ray_miss() {
    let w = World::new();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, 1.0, 0.0),
    );

    assert!(w.color_at(&r).unwrap().is_black());
}

#[test]
fn color_ray_hit() {
    let w = World::new();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, 0.0, -1.0),
    );

    // Hit at the origin with the light straight above: no diffuse, and the
    // highlight vector (0, 1, 1) / sqrt(2) gives 0.5^(40 / 8) = 1 / 32
    let spec = 0.5 / 32.0;
    assert_eq!(w.color_at(&r).unwrap(), Color::rgb(0.1 + spec, spec, spec));
}

#[test]
fn color_in_empty_world() {
    let w = World::empty();
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, 0.0, -1.0),
    );

    assert!(w.color_at(&r).unwrap().is_black());
}

#[test]
fn shadow_nothing_between_point_and_light() {
    let w = World::new();
    let p = Tuple3D::new(0.0, 5.0, -1.0);
    let lightv = (w.light_source.position - p).normalize().unwrap();

    assert!(!w.is_shadowed(p, lightv));
}

#[test]
fn shadow_sphere_between_point_and_light() {
    let w = World::new();
    let p = Tuple3D::new(0.0, -5.0, -1.0);
    let lightv = (w.light_source.position - p).normalize().unwrap();

    assert!(w.is_shadowed(p, lightv));
}

#[test]
fn shadow_object_behind_light() {
    let mut w = World::new();
    w.light_source = PointLight::new(Tuple3D::new(0.0, -5.0, -1.0));
    let p = Tuple3D::new(0.0, -10.0, -1.0);
    let lightv = (w.light_source.position - p).normalize().unwrap();

    assert!(!w.is_shadowed(p, lightv));
}

#[test]
fn shadow_object_behind_point() {
    let w = World::new();
    let p = Tuple3D::new(0.0, 3.0, -1.0);
    let lightv = Tuple3D::new(0.0, 1.0, 0.0);

    assert!(!w.is_shadowed(p, lightv));
}

#[test]
fn shade_hit_in_shadow() {
    let mut w = World::new();
    w.objects.push(Sphere::new(
        Tuple3D::new(0.0, 5.0, 0.0), 0.5, Default::default()
    ));
    let r = Ray3D::new(
        Tuple3D::new(0.0, 0.0, 1.0),
        Tuple3D::new(0.0, 0.0, -1.0),
    );

    assert!(w.color_at(&r).unwrap().is_black());
}

#[test]
fn shadow_bias_moves_ray_origin() {
    // The light sits inside the sphere. Starting on the surface, the shadow
    // ray's near root is zero and counts as an occluder; a bias moves the
    // origin inside, where the near root is negative.
    let mut w = World::new();
    w.light_source = PointLight::new(Tuple3D::new(0.0, 0.0, -1.5));
    let p = Tuple3D::new(0.0, 0.0, 0.0);
    let lightv = Tuple3D::new(0.0, 0.0, -1.0);

    assert!(w.is_shadowed(p, lightv));

    w.shadow_bias = 0.001;
    assert!(!w.is_shadowed(p, lightv));
}
