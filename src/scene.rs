use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use log::{ debug, info };
use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;
use crate::pattern::{ Pattern, PatternType };
use crate::light::{ Material, PointLight };
use crate::shape::{ Shape, ShapeType };
use crate::world::World;
use crate::camera::Camera;
use crate::error::{ Error, Result };

/// A world paired with the camera that views it.
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Loads a scene from a JSON scene description file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        info!("loading scene from {}", path.display());

        let contents = fs::read_to_string(path)?;
        Scene::from_json_str(&contents)
    }

    /// Parses a scene from a JSON scene description.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_tracer::scene::Scene;
    /// let scene = Scene::from_json_str(r#"{
    ///     "canvas_width": 20,
    ///     "canvas_height": 10,
    ///     "field_of_view": 1.0471976,
    ///     "camera_from": [0.0, 1.5, -5.0],
    ///     "camera_to": [0.0, 1.0, 0.0],
    ///     "camera_up": [0.0, 1.0, 0.0],
    ///     "light": { "position": [-10.0, 10.0, -10.0], "intensity": [1.0, 1.0, 1.0] },
    ///     "shapes": [
    ///         { "ty": "plane" },
    ///         { "ty": "sphere", "transform": [ { "translate": [0.0, 1.0, 0.0] } ] }
    ///     ]
    /// }"#)?;
    ///
    /// assert_eq!(scene.world.objects().len(), 2);
    /// assert_eq!(scene.camera.hsize, 20);
    /// # Ok::<(), prism_tracer::Error>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Scene::try_from(scene_json)
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = Error;

    fn try_from(scene_json: SceneJson) -> Result<Scene> {
        if scene_json.canvas_width == 0 || scene_json.canvas_height == 0 {
            return Err(Error::InvalidScene(format!(
                "canvas must be at least 1x1, got {}x{}",
                scene_json.canvas_width, scene_json.canvas_height
            )));
        }

        let fov = scene_json.field_of_view;
        if !(fov > 0.0 && fov < std::f32::consts::PI) {
            return Err(Error::InvalidScene(format!(
                "field of view must be between 0 and pi radians, got {}", fov
            )));
        }

        // Create the camera transform from the view parameters.
        let camera_transform = Matrix4D::view_transform(
            point(scene_json.camera_from),
            point(scene_json.camera_to),
            vector(scene_json.camera_up),
        )?;

        let camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            fov,
            camera_transform
        )?;

        let mut world = World::new();
        world.light = scene_json.light.map(|l| {
            PointLight::new(l.intensity.into(), point(l.position))
        });

        for shape_json in scene_json.shapes.into_iter() {
            world.add_object(Shape::try_from(shape_json)?);
        }

        debug!("scene has {} objects, light: {:?}", world.objects().len(),
            world.light);

        Ok(Scene { world, camera })
    }
}

fn point(p: [f32; 3]) -> Tuple4D {
    Tuple4D::point(p[0], p[1], p[2])
}

fn vector(v: [f32; 3]) -> Tuple4D {
    Tuple4D::vector(v[0], v[1], v[2])
}

/// Top level of a JSON scene description.
///
/// Angles are in radians. Colors and coordinates are `[x, y, z]` (or
/// `[r, g, b]`) arrays.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneJson {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub field_of_view: f32,

    pub camera_from: [f32; 3],
    pub camera_to: [f32; 3],
    pub camera_up: [f32; 3],

    #[serde(default)]
    pub light: Option<LightJson>,

    #[serde(default)]
    pub shapes: Vec<ShapeJson>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LightJson {
    pub position: [f32; 3],
    pub intensity: [f32; 3],
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Sphere,
    Plane,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShapeJson {
    pub ty: ShapeKind,

    /// Transform operations, applied to the shape in order.
    #[serde(default)]
    pub transform: Vec<TransformJson>,

    #[serde(default)]
    pub material: MaterialJson,
}

/// A single transform operation, e.g. `{ "rotate_y": 0.785 }`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformJson {
    Translate([f32; 3]),
    Scale([f32; 3]),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    /// `[xy, xz, yx, yz, zx, zy]`
    Shear([f32; 6]),
}

/// Builds a matrix from transform operations, first operation applied first.
fn build_transform(ops: &[TransformJson]) -> Matrix4D {
    let mut m = Matrix4D::identity();

    for op in ops.iter() {
        match *op {
            TransformJson::Translate([x, y, z]) => m.translate(x, y, z),
            TransformJson::Scale([x, y, z]) => m.scale(x, y, z),
            TransformJson::RotateX(r) => m.rotate_x(r),
            TransformJson::RotateY(r) => m.rotate_y(r),
            TransformJson::RotateZ(r) => m.rotate_z(r),
            TransformJson::Shear([xy, xz, yx, yz, zx, zy])
                => m.shear(xy, xz, yx, yz, zx, zy),
        };
    }

    m
}

/// Material fields; anything left out takes the default material's value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialJson {
    pub color: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub reflective: f32,
    pub pattern: Option<PatternJson>,
}

impl Default for MaterialJson {
    fn default() -> MaterialJson {
        let m = Material::default();

        MaterialJson {
            color: [m.color.r, m.color.g, m.color.b],
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
            reflective: m.reflective,
            pattern: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Solid,
    Stripe,
    Gradient,
    Ring,
    Checker,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PatternJson {
    pub ty: PatternKind,
    pub primary: [f32; 3],

    /// Defaults to black.
    #[serde(default)]
    pub secondary: [f32; 3],

    #[serde(default)]
    pub transform: Vec<TransformJson>,
}

impl TryFrom<PatternJson> for Pattern {
    type Error = Error;

    fn try_from(pattern_json: PatternJson) -> Result<Pattern> {
        let ty = match pattern_json.ty {
            PatternKind::Solid => PatternType::Solid,
            PatternKind::Stripe => PatternType::Stripe,
            PatternKind::Gradient => PatternType::Gradient,
            PatternKind::Ring => PatternType::Ring,
            PatternKind::Checker => PatternType::Checker,
        };

        Pattern::new(ty, pattern_json.primary.into(),
            pattern_json.secondary.into())
            .with_transform(build_transform(&pattern_json.transform))
    }
}

impl TryFrom<MaterialJson> for Material {
    type Error = Error;

    fn try_from(material_json: MaterialJson) -> Result<Material> {
        let pattern = match material_json.pattern {
            Some(p) => Some(Pattern::try_from(p)?),
            None => None,
        };

        Ok(Material {
            color: material_json.color.into(),
            pattern,
            ambient: material_json.ambient,
            diffuse: material_json.diffuse,
            specular: material_json.specular,
            shininess: material_json.shininess,
            reflective: material_json.reflective,
        })
    }
}

impl TryFrom<ShapeJson> for Shape {
    type Error = Error;

    fn try_from(shape_json: ShapeJson) -> Result<Shape> {
        let ty = match shape_json.ty {
            ShapeKind::Sphere => ShapeType::Sphere,
            ShapeKind::Plane => ShapeType::Plane,
        };

        let material = Material::try_from(shape_json.material)?;

        Shape::new(ty)
            .with_material(material)
            .with_transform(build_transform(&shape_json.transform))
    }
}

#[cfg(test)]
use crate::color::Color;

#[cfg(test)]
const SCENE: &str = r#"{
    "canvas_width": 40,
    "canvas_height": 20,
    "field_of_view": 1.0471976,
    "camera_from": [0.0, 1.5, -5.0],
    "camera_to": [0.0, 1.0, 0.0],
    "camera_up": [0.0, 1.0, 0.0],
    "light": { "position": [-10.0, 10.0, -10.0], "intensity": [1.0, 1.0, 1.0] },
    "shapes": [
        {
            "ty": "plane",
            "material": {
                "specular": 0.0,
                "reflective": 0.25,
                "pattern": {
                    "ty": "checker",
                    "primary": [1.0, 1.0, 1.0],
                    "transform": [ { "scale": [0.5, 0.5, 0.5] } ]
                }
            }
        },
        {
            "ty": "sphere",
            "transform": [
                { "scale": [0.5, 0.5, 0.5] },
                { "translate": [1.5, 0.5, -0.5] }
            ],
            "material": { "color": [0.5, 1.0, 0.1], "diffuse": 0.7 }
        }
    ]
}"#;

#[test]
fn parse_scene() {
    let scene = Scene::from_json_str(SCENE).unwrap();

    assert_eq!(scene.camera.hsize, 40);
    assert_eq!(scene.camera.vsize, 20);
    assert_eq!(scene.world.light, Some(PointLight::new(
        Color::white(), Tuple4D::point(-10.0, 10.0, -10.0)
    )));
    assert_eq!(scene.world.objects().len(), 2);

    let floor = &scene.world.objects()[0];
    assert_eq!(floor.ty, ShapeType::Plane);
    assert_eq!(floor.material().specular, 0.0);
    assert_eq!(floor.material().reflective, 0.25);
    assert_eq!(floor.material().diffuse, 0.9);

    let pattern = floor.material().pattern.unwrap();
    assert_eq!(pattern.ty, PatternType::Checker);
    assert_eq!(pattern.secondary, Color::black());
    assert_eq!(*pattern.transform(), Matrix4D::scaling(0.5, 0.5, 0.5));

    let ball = &scene.world.objects()[1];
    assert_eq!(ball.material().color, Color::rgb(0.5, 1.0, 0.1));
    assert_eq!(ball.material().diffuse, 0.7);
}

#[test]
fn transforms_apply_in_listed_order() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    let ball = &scene.world.objects()[1];

    assert_eq!(*ball.transform(),
        Matrix4D::translation(1.5, 0.5, -0.5)
            * Matrix4D::scaling(0.5, 0.5, 0.5));
}

#[test]
fn camera_uses_view_transform() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    let view = Matrix4D::view_transform(
        Tuple4D::point(0.0, 1.5, -5.0),
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    ).unwrap();

    assert_eq!(*scene.camera.transform(), view);
}

#[test]
fn missing_light_and_shapes_default_to_empty() {
    let scene = Scene::from_json_str(r#"{
        "canvas_width": 4, "canvas_height": 4, "field_of_view": 1.5,
        "camera_from": [0.0, 0.0, -5.0],
        "camera_to": [0.0, 0.0, 0.0],
        "camera_up": [0.0, 1.0, 0.0]
    }"#).unwrap();

    assert!(scene.world.light.is_none());
    assert!(scene.world.objects().is_empty());
}

#[test]
fn unknown_shape_is_a_parse_error() {
    let res = Scene::from_json_str(r#"{
        "canvas_width": 4, "canvas_height": 4, "field_of_view": 1.5,
        "camera_from": [0.0, 0.0, -5.0],
        "camera_to": [0.0, 0.0, 0.0],
        "camera_up": [0.0, 1.0, 0.0],
        "shapes": [ { "ty": "teapot" } ]
    }"#);

    match res {
        Err(Error::Scene(_)) => (),
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn zero_canvas_is_invalid() {
    let res = Scene::from_json_str(r#"{
        "canvas_width": 0, "canvas_height": 4, "field_of_view": 1.5,
        "camera_from": [0.0, 0.0, -5.0],
        "camera_to": [0.0, 0.0, 0.0],
        "camera_up": [0.0, 1.0, 0.0]
    }"#);

    match res {
        Err(Error::InvalidScene(_)) => (),
        other => panic!("expected an invalid scene, got {:?}", other),
    }
}

#[test]
fn singular_shape_transform_is_rejected() {
    let res = Scene::from_json_str(r#"{
        "canvas_width": 4, "canvas_height": 4, "field_of_view": 1.5,
        "camera_from": [0.0, 0.0, -5.0],
        "camera_to": [0.0, 0.0, 0.0],
        "camera_up": [0.0, 1.0, 0.0],
        "shapes": [ { "ty": "sphere", "transform": [ { "scale": [1.0, 0.0, 1.0] } ] } ]
    }"#);

    match res {
        Err(Error::DegenerateTransform) => (),
        other => panic!("expected a degenerate transform, got {:?}", other),
    }
}

#[test]
fn loaded_scene_renders() {
    let scene = Scene::from_json_str(SCENE).unwrap();
    let image = scene.camera.render(&scene.world).unwrap();

    assert_eq!(image.width, 40);
    assert_eq!(image.height, 20);
    assert!(image.pixels().any(|p| *p != Color::black()));
}

#[test]
fn load_bundled_scene() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/reflections.json");
    let scene = Scene::load(path).unwrap();

    assert_eq!(scene.world.objects().len(), 5);
    assert_eq!(scene.camera.hsize, 320);
}

#[test]
fn load_missing_file_is_io_error() {
    match Scene::load("/nonexistent/scene.json") {
        Err(Error::Io(_)) => (),
        other => panic!("expected an I/O error, got {:?}", other),
    }
}
