use crate::color::Color;
use crate::consts::{ MAX_SHININESS, MAX_REFLECTION };
use crate::tuple::{ Tuple3D, DegenerateVector };

/// A point light.
///
/// The scene has exactly one. Only its position matters for shading; the
/// light carries no color of its own.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub position: Tuple3D,
}

impl PointLight {
    pub fn new(position: Tuple3D) -> PointLight {
        PointLight { position }
    }
}

/// A material record.
///
/// Each of the ambient, diffuse and specular terms has its own color.
/// `shininess` lives in `[0, 100]` and `reflection` in `[0, 1]`; `new` clamps
/// both. `reflection` is carried for scene files but does not take part in
/// shading.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f64,
    pub reflection: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            ambient: Color::rgb(0.1, 0.1, 0.1),
            diffuse: Color::rgb(0.9, 0.9, 0.9),
            specular: Color::rgb(0.9, 0.9, 0.9),
            shininess: MAX_SHININESS,
            reflection: 0.0,
        }
    }
}

impl Material {
    pub fn new(ambient: Color, diffuse: Color, specular: Color,
        shininess: f64, reflection: f64) -> Material {
        Material {
            ambient,
            diffuse,
            specular,
            shininess: shininess.max(0.0).min(MAX_SHININESS),
            reflection: reflection.max(0.0).min(MAX_REFLECTION),
        }
    }
}

/// Calculates the color of a lit surface point.
///
/// `eye` is the viewer's *position*, not a direction; it is added to the unit
/// light direction `lightv` to form the highlight vector. `normalv` is the
/// unit surface normal.
///
/// The result is `ambient + (lightv . normalv) * diffuse
/// + |normalv . normalize(eye + lightv)|^(shininess / 4) * specular`.
/// The diffuse factor is not clamped at zero and the sum is not clamped to
/// `[0, 1]`; that happens when the color is encoded.
///
/// Fails when `eye + lightv` is the zero vector.
pub fn lighting(m: &Material, eye: Tuple3D, normalv: Tuple3D, lightv: Tuple3D)
    -> Result<Color, DegenerateVector> {
    let ambient = m.ambient;
    let diffuse = m.diffuse * lightv.dot(&normalv);

    let halfway = (eye + lightv).normalize()?;
    let factor = normalv.dot(&halfway).abs().powf(m.shininess / 4.0);
    let specular = m.specular * factor;

    Ok(ambient + diffuse + specular)
}

#[cfg(test)]
fn test_material() -> Material {
    Material::new(
        Color::rgb(0.1, 0.1, 0.1),
        Color::rgb(0.5, 0.5, 0.5),
        Color::rgb(0.2, 0.2, 0.2),
        8.0,
        0.0,
    )
}

#[test]
fn material_clamps_shininess_and_reflection() {
    let m = Material::new(Color::black(), Color::black(), Color::black(),
        250.0, -0.5);
    assert_eq!(m.shininess, 100.0);
    assert_eq!(m.reflection, 0.0);

    let m = Material::new(Color::black(), Color::black(), Color::black(),
        -1.0, 3.0);
    assert_eq!(m.shininess, 0.0);
    assert_eq!(m.reflection, 1.0);
}

#[test]
fn light_facing_surface() {
    let m = test_material();
    let eye = Tuple3D::new(0.0, 0.0, 5.0);
    let normalv = Tuple3D::new(0.0, 0.0, 1.0);
    let lightv = Tuple3D::new(0.0, 0.0, 1.0);

    let res = lighting(&m, eye, normalv, lightv).unwrap();
    assert_eq!(res, Color::rgb(0.8, 0.8, 0.8));
}

#[test]
fn light_grazing_surface() {
    let m = test_material();
    let eye = Tuple3D::new(0.0, 0.0, 1.0);
    let normalv = Tuple3D::new(0.0, 0.0, 1.0);
    let lightv = Tuple3D::new(0.0, 1.0, 0.0);

    // No diffuse; the highlight vector sits at 45 degrees, 0.7071^2 = 0.5
    let res = lighting(&m, eye, normalv, lightv).unwrap();
    assert_eq!(res, Color::rgb(0.2, 0.2, 0.2));
}

#[test]
fn light_behind_surface_is_not_clamped() {
    let m = test_material();
    let eye = Tuple3D::new(0.0, 3.0, 0.0);
    let normalv = Tuple3D::new(0.0, 0.0, 1.0);
    let lightv = Tuple3D::new(0.0, 0.0, -1.0);

    // The specular dot product is negative and taken in absolute value:
    // |-1 / sqrt(10)|^2 = 0.1
    let res = lighting(&m, eye, normalv, lightv).unwrap();
    assert_eq!(res, Color::rgb(-0.38, -0.38, -0.38));
}

#[test]
fn lighting_degenerate_highlight() {
    let m = test_material();
    let eye = Tuple3D::new(0.0, 0.0, -1.0);
    let normalv = Tuple3D::new(0.0, 0.0, 1.0);
    let lightv = Tuple3D::new(0.0, 0.0, 1.0);

    assert_eq!(lighting(&m, eye, normalv, lightv), Err(DegenerateVector));
}
