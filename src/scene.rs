use std::convert::TryFrom;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::tuple::Tuple3D;
use crate::color::Color;
use crate::light::{ Material, PointLight };
use crate::geometry::Sphere;
use crate::world::World;
use crate::camera::Camera;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("could not read scene: {0}")]
    Io(#[from] io::Error),
    #[error("malformed JSON scene: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
    #[error("invalid scene: {0}")]
    Invalid(String),
}

/// A loaded scene: what to render, and how to look at it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Reads and parses a scene file.
    pub fn load(path: &Path) -> Result<Scene, SceneError> {
        debug!(path = %path.display(), "loading scene");
        let text = fs::read_to_string(path)?;
        let scene = Scene::parse(&text)?;

        debug!(objects = scene.world.objects.len(),
            width = scene.camera.hsize, height = scene.camera.vsize,
            "scene loaded");
        Ok(scene)
    }

    /// Parses a scene description.
    ///
    /// Text starting with `{` is read as JSON, anything else as the line-based
    /// scene format:
    ///
    /// ```text
    /// width
    /// height
    /// xmin
    /// xmax
    /// ymin
    /// ymax
    /// camera x,y,z
    /// light x,y,z
    /// ;-separated column names
    /// one ;-separated line per sphere
    /// ```
    ///
    /// The sphere columns are `center`, `radius`, `ambiant` (or `ambient`),
    /// `diffuse`, `specular`, `shininess` and `reflection`, in the order the
    /// header gives them.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sphere_tracer::scene::Scene;
    /// let text = "4\n3\n-1\n1\n-1\n1\n0,0,1\n0,10,0\n\
    ///     center;radius;ambiant;diffuse;specular;shininess;reflection\n\
    ///     0,0,-1;1;0.1,0,0;0.7,0,0;0.5,0.5,0.5;40;0\n";
    /// let scene = Scene::parse(text).unwrap();
    /// assert_eq!(scene.camera.hsize, 4);
    /// assert_eq!(scene.world.objects.len(), 1);
    /// ```
    pub fn parse(text: &str) -> Result<Scene, SceneError> {
        let scene = if text.trim_start().starts_with('{') {
            let json: SceneJson = serde_json::from_str(text)?;
            Scene::try_from(json)?
        } else {
            parse_text(text)?
        };

        scene.validate()?;
        Ok(scene)
    }

    fn validate(&self) -> Result<(), SceneError> {
        let c = &self.camera;
        if c.hsize == 0 || c.vsize == 0 {
            return Err(SceneError::Invalid(
                format!("image size {}x{} is empty", c.hsize, c.vsize)));
        }
        let buffer = c.hsize.checked_mul(c.vsize)
            .and_then(|n| n.checked_mul(std::mem::size_of::<Color>()))
            .filter(|&bytes| bytes <= isize::MAX as usize);
        let encoded = c.hsize.checked_mul(c.vsize)
            .and_then(|n| n.checked_mul(3));
        if buffer.is_none() || encoded.is_none() {
            return Err(SceneError::Invalid(
                format!("image size {}x{} is too large", c.hsize, c.vsize)));
        }
        if !(c.xmin < c.xmax) || !(c.ymin < c.ymax) {
            return Err(SceneError::Invalid(format!(
                "viewport [{}, {}] x [{}, {}] is empty",
                c.xmin, c.xmax, c.ymin, c.ymax)));
        }

        for (i, s) in self.world.objects.iter().enumerate() {
            if !(s.radius >= 0.0) {
                return Err(SceneError::Invalid(
                    format!("sphere {} has radius {}", i, s.radius)));
            }
        }

        Ok(())
    }
}

/// Line cursor over the text format, tracking 1-based line numbers.
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Lines<'a> {
        Lines { inner: text.lines(), number: 0 }
    }

    fn next_line(&mut self, what: &str) -> Result<&'a str, SceneError> {
        self.number += 1;
        let number = self.number;
        self.inner.next().ok_or_else(|| SceneError::Parse {
            line: number,
            reason: format!("missing {}", what),
        })
    }

    fn error(&self, reason: String) -> SceneError {
        SceneError::Parse { line: self.number, reason }
    }

    fn usize(&mut self, what: &str) -> Result<usize, SceneError> {
        let s = self.next_line(what)?;
        s.trim().parse()
            .map_err(|_| self.error(format!("bad {} {:?}", what, s)))
    }

    fn real(&mut self, what: &str) -> Result<f64, SceneError> {
        let s = self.next_line(what)?;
        parse_real(s, what).map_err(|reason| self.error(reason))
    }

    fn vector(&mut self, what: &str) -> Result<Tuple3D, SceneError> {
        let s = self.next_line(what)?;
        parse_vector(s, what).map_err(|reason| self.error(reason))
    }
}

fn parse_real(s: &str, what: &str) -> Result<f64, String> {
    s.trim().parse().map_err(|_| format!("bad {} {:?}", what, s))
}

fn parse_vector(s: &str, what: &str) -> Result<Tuple3D, String> {
    let fields: Vec<&str> = s.split(',').collect();
    if fields.len() != 3 {
        return Err(format!("{} needs 3 components, got {:?}", what, s));
    }

    let x = parse_real(fields[0], what)?;
    let y = parse_real(fields[1], what)?;
    let z = parse_real(fields[2], what)?;
    Ok(Tuple3D::new(x, y, z))
}

/// Positions of the sphere columns within a header line.
struct Columns {
    center: usize,
    radius: usize,
    ambient: usize,
    diffuse: usize,
    specular: usize,
    shininess: usize,
    reflection: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Columns, String> {
        let names: Vec<&str> = header.split(';').map(str::trim).collect();
        let find = |wanted: &[&str]| {
            names.iter()
                .position(|n| wanted.iter().any(|w| w == n))
                .ok_or_else(|| format!("missing column {:?}", wanted[0]))
        };

        Ok(Columns {
            center: find(&["center"])?,
            radius: find(&["radius"])?,
            ambient: find(&["ambiant", "ambient"])?,
            diffuse: find(&["diffuse"])?,
            specular: find(&["specular"])?,
            shininess: find(&["shininess"])?,
            reflection: find(&["reflection"])?,
        })
    }

    fn sphere(&self, line: &str) -> Result<Sphere, String> {
        let fields: Vec<&str> = line.split(';').collect();
        let field = |index: usize, what: &str| {
            fields.get(index).copied()
                .ok_or_else(|| format!("missing {}", what))
        };

        let center = parse_vector(field(self.center, "center")?, "center")?;
        let radius = parse_real(field(self.radius, "radius")?, "radius")?;
        let ambient = parse_vector(field(self.ambient, "ambient")?, "ambient")?;
        let diffuse = parse_vector(field(self.diffuse, "diffuse")?, "diffuse")?;
        let specular = parse_vector(field(self.specular, "specular")?, "specular")?;
        let shininess = parse_real(field(self.shininess, "shininess")?, "shininess")?;
        let reflection = parse_real(field(self.reflection, "reflection")?, "reflection")?;

        let material = Material::new(ambient.into(), diffuse.into(),
            specular.into(), shininess, reflection);
        Ok(Sphere::new(center, radius, material))
    }
}

fn parse_text(text: &str) -> Result<Scene, SceneError> {
    let mut lines = Lines::new(text);

    let width = lines.usize("width")?;
    let height = lines.usize("height")?;
    let xmin = lines.real("xmin")?;
    let xmax = lines.real("xmax")?;
    let ymin = lines.real("ymin")?;
    let ymax = lines.real("ymax")?;
    let camera = lines.vector("camera")?;
    let light = lines.vector("light")?;

    let mut header = lines.next_line("sphere header")?;
    while header.trim().is_empty() {
        header = lines.next_line("sphere header")?;
    }
    let columns = Columns::from_header(header)
        .map_err(|reason| lines.error(reason))?;

    let mut objects = Vec::new();
    for line in lines.inner.by_ref() {
        lines.number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let number = lines.number;
        let sphere = columns.sphere(line)
            .map_err(|reason| SceneError::Parse { line: number, reason })?;
        objects.push(sphere);
    }

    let mut world = World::empty();
    world.objects = objects;
    world.light_source = PointLight::new(light);

    Ok(Scene {
        world,
        camera: Camera::new(width, height, (xmin, xmax), (ymin, ymax), camera),
    })
}

/// A scene in JSON form.
#[derive(Clone, Debug, Deserialize)]
pub struct SceneJson {
    width: usize,
    height: usize,

    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,

    camera: [f64; 3],
    light: [f64; 3],
    spheres: Vec<SphereJson>,
}

#[derive(Clone, Debug, Deserialize)]
struct SphereJson {
    center: [f64; 3],
    radius: f64,
    #[serde(alias = "ambiant")]
    ambient: [f64; 3],
    diffuse: [f64; 3],
    specular: [f64; 3],
    shininess: f64,
    #[serde(default)]
    reflection: f64,
}

fn tuple(v: [f64; 3]) -> Tuple3D {
    Tuple3D::new(v[0], v[1], v[2])
}

fn color(v: [f64; 3]) -> Color {
    Color::rgb(v[0], v[1], v[2])
}

impl From<SphereJson> for Sphere {
    fn from(s: SphereJson) -> Sphere {
        let material = Material::new(color(s.ambient), color(s.diffuse),
            color(s.specular), s.shininess, s.reflection);
        Sphere::new(tuple(s.center), s.radius, material)
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = SceneError;

    fn try_from(scene_json: SceneJson) -> Result<Scene, SceneError> {
        let camera = Camera::new(
            scene_json.width,
            scene_json.height,
            (scene_json.xmin, scene_json.xmax),
            (scene_json.ymin, scene_json.ymax),
            tuple(scene_json.camera),
        );

        let mut world = World::empty();
        world.light_source = PointLight::new(tuple(scene_json.light));
        world.objects = scene_json.spheres.into_iter().map(|x| x.into()).collect();

        Ok(Scene { world, camera })
    }
}

#[cfg(test)]
const TEXT_SCENE: &str = "10
10
-1
1
-1.0
1.0
0,0,1
0, 10, 0
center;radius;ambiant;diffuse;specular;shininess;reflection
0,0,-1;1;0.1,0,0;0.7,0,0;0.5,0.5,0.5;40;0
0,5,0;0.5;0,0,0.1;0,0,0.7;0.2,0.2,0.2;250;-2

";

#[test]
fn parse_text_scene() {
    let scene = Scene::parse(TEXT_SCENE).unwrap();

    assert_eq!(scene.camera, Camera::new(10, 10, (-1.0, 1.0), (-1.0, 1.0),
        Tuple3D::new(0.0, 0.0, 1.0)));
    assert_eq!(scene.world.light_source.position, Tuple3D::new(0.0, 10.0, 0.0));
    assert_eq!(scene.world.objects.len(), 2);
    assert_eq!(scene.world.objects[0], World::new().objects[0]);

    let second = scene.world.objects[1];
    assert_eq!(second.center, Tuple3D::new(0.0, 5.0, 0.0));
    assert_eq!(second.radius, 0.5);
    assert_eq!(second.material.ambient, Color::rgb(0.0, 0.0, 0.1));
}

#[test]
fn parse_text_clamps_material() {
    let scene = Scene::parse(TEXT_SCENE).unwrap();
    let m = scene.world.objects[1].material;

    assert_eq!(m.shininess, 100.0);
    assert_eq!(m.reflection, 0.0);
}

#[test]
fn parse_text_follows_header_order() {
    let text = "2\n2\n-1\n1\n-1\n1\n0,0,1\n0,10,0\n\
        radius;extra;ambient;center;specular;diffuse;reflection;shininess\n\
        2;ignored;0.1,0.2,0.3;1,2,3;0,0,0;0.5,0.5,0.5;0.5;10\n";
    let scene = Scene::parse(text).unwrap();
    let s = scene.world.objects[0];

    assert_eq!(s.center, Tuple3D::new(1.0, 2.0, 3.0));
    assert_eq!(s.radius, 2.0);
    assert_eq!(s.material.ambient, Color::rgb(0.1, 0.2, 0.3));
    assert_eq!(s.material.shininess, 10.0);
    assert_eq!(s.material.reflection, 0.5);
}

#[test]
fn parse_text_without_spheres() {
    let text = "2\n2\n-1\n1\n-1\n1\n0,0,1\n0,10,0\n\
        center;radius;ambiant;diffuse;specular;shininess;reflection\n";
    let scene = Scene::parse(text).unwrap();

    assert!(scene.world.objects.is_empty());
}

#[test]
fn parse_text_reports_line_numbers() {
    match Scene::parse("10\n10\n-1\n1\n-1\n") {
        Err(SceneError::Parse { line: 6, .. }) => {},
        other => panic!("unexpected result {:?}", other),
    }

    match Scene::parse("10\n10\n-1\n1\n-1\n1\n0,0\n0,10,0\n") {
        Err(SceneError::Parse { line: 7, .. }) => {},
        other => panic!("unexpected result {:?}", other),
    }

    match Scene::parse("ten\n10\n") {
        Err(SceneError::Parse { line: 1, .. }) => {},
        other => panic!("unexpected result {:?}", other),
    }

    let bad_sphere = "2\n2\n-1\n1\n-1\n1\n0,0,1\n0,10,0\n\
        center;radius;ambiant;diffuse;specular;shininess;reflection\n\
        0,0,-1;1;0.1,0,0;0.7,0,0;0.5,0.5,0.5;40;0\n\
        0,0,-1;one;0.1,0,0;0.7,0,0;0.5,0.5,0.5;40;0\n";
    match Scene::parse(bad_sphere) {
        Err(SceneError::Parse { line: 11, .. }) => {},
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn parse_text_missing_column() {
    let text = "2\n2\n-1\n1\n-1\n1\n0,0,1\n0,10,0\n\
        center;radius;ambiant;diffuse;specular;shininess\n";

    match Scene::parse(text) {
        Err(SceneError::Parse { line: 9, reason }) =>
            assert!(reason.contains("reflection")),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn parse_rejects_empty_viewport() {
    let text = "2\n2\n1\n-1\n-1\n1\n0,0,1\n0,10,0\n\
        center;radius;ambiant;diffuse;specular;shininess;reflection\n";

    assert!(matches!(Scene::parse(text), Err(SceneError::Invalid(_))));
}

#[test]
fn parse_rejects_overflowing_size() {
    let header = "-1\n1\n-1\n1\n0,0,1\n0,10,0\n\
        center;radius;ambiant;diffuse;specular;shininess;reflection\n";

    let huge = format!("5000000000\n5000000000\n{}", header);
    assert!(matches!(Scene::parse(&huge), Err(SceneError::Invalid(_))));

    let wide = format!("{}\n2\n{}", usize::MAX / 2, header);
    assert!(matches!(Scene::parse(&wide), Err(SceneError::Invalid(_))));

    let fine = format!("640\n480\n{}", header);
    assert!(Scene::parse(&fine).is_ok());
}

#[test]
fn parse_json_scene() {
    let json = r#"{
        "width": 10, "height": 10,
        "xmin": -1, "xmax": 1, "ymin": -1, "ymax": 1,
        "camera": [0, 0, 1],
        "light": [0, 10, 0],
        "spheres": [
            { "center": [0, 0, -1], "radius": 1,
              "ambiant": [0.1, 0, 0], "diffuse": [0.7, 0, 0],
              "specular": [0.5, 0.5, 0.5], "shininess": 40 }
        ]
    }"#;

    let from_json = Scene::parse(json).unwrap();
    let text = TEXT_SCENE.lines().take(10).collect::<Vec<_>>().join("\n");
    assert_eq!(from_json, Scene::parse(&text).unwrap());
}

#[test]
fn parse_json_rejects_bad_vector() {
    let json = r#"{
        "width": 1, "height": 1,
        "xmin": -1, "xmax": 1, "ymin": -1, "ymax": 1,
        "camera": [0, 0],
        "light": [0, 10, 0],
        "spheres": []
    }"#;

    assert!(matches!(Scene::parse(json), Err(SceneError::Json(_))));
}

#[test]
fn load_and_render_scene() {
    let path = std::env::temp_dir()
        .join(format!("sphere-tracer-load-{}.scene", std::process::id()));
    fs::write(&path, TEXT_SCENE).unwrap();
    let scene = Scene::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    // The second sphere sits between the center pixel's hit point and the
    // light, so the center is in shadow while the bottom-left corner misses.
    let image = scene.camera.render(&scene.world).unwrap();
    assert!(image.read_pixel(5, 4).unwrap().is_black());
    assert!(image.read_pixel(0, 9).unwrap().is_black());

    let mut unblocked = scene.world.clone();
    unblocked.objects.truncate(1);
    assert!(!scene.camera.color_for_pixel(&unblocked, 5, 5).unwrap().is_black());
}

#[test]
fn load_missing_file() {
    let path = Path::new("/nonexistent/sphere-tracer/missing.scene");

    assert!(matches!(Scene::load(path), Err(SceneError::Io(_))));
}
