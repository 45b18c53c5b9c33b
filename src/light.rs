use crate::color::Color;
use crate::pattern::Pattern;
use crate::tuple::Tuple4D;
use crate::consts::EPSILON;
use crate::error::Result;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        position.w = 1.0;

        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess. `reflective` scales the color seen in a mirror
/// reflection off the surface (`0.0` is not reflective at all, `1.0` is a
/// perfect mirror).
///
/// When `pattern` is set, it replaces `color` as the surface color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub pattern: Option<Pattern>,

    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,

    pub reflective: f32,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
        }
    }
}

impl Material {
    /// Calculate the lighting of a point on a surface made of this material.
    ///
    /// Effectively, this function takes a single light, a point, the eye
    /// vector and the normal vector, and calculates how the light looks from
    /// the eye. `surface` is the color of the surface at `point`, already
    /// resolved from the material's color or pattern (see
    /// `Shape::color_at`).
    ///
    /// If this point is in a shadow (parameter `in_shadow`), only ambient light
    /// is used. The result isn't clamped.
    ///
    /// A point sitting on the light has no direction to it, so only ambient
    /// light is used there as well.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_tracer::tuple::Tuple4D;
    /// # use prism_tracer::color::Color;
    /// # use prism_tracer::light::{ Material, PointLight };
    /// let m = Material::default();
    /// let light = PointLight::new(Color::white(), Tuple4D::point(0.0, 0.0, -10.0));
    /// let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    /// let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    ///
    /// let c = m.lighting(&light, Tuple4D::point(0.0, 0.0, 0.0), eyev, normalv,
    ///     false, m.color)?;
    /// assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
    /// # Ok::<(), prism_tracer::Error>(())
    /// ```
    pub fn lighting(&self, light: &PointLight, point: Tuple4D, eyev: Tuple4D,
        normalv: Tuple4D, in_shadow: bool, surface: Color) -> Result<Color> {
        // Combine surface color with light's color
        let effective_color = surface * light.intensity;

        // Ambient light is independent of geometry, and survives shadows
        let ambient = effective_color * self.ambient;
        if in_shadow {
            return Ok(ambient);
        }

        let to_light = light.position - point;
        if to_light.magnitude() < EPSILON {
            return Ok(ambient);
        }

        let lightv = to_light.normalize()?;

        // For the side of the surface facing away from the light, use only
        // ambient light
        let light_dot_normal = lightv.dot(&normalv);
        if light_dot_normal <= 0.0 {
            return Ok(ambient);
        }

        let diffuse = effective_color * self.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv);
        let reflect_dot_eye = reflectv.dot(&eyev);

        let specular = if reflect_dot_eye <= 0.0 {
            Color::black()
        } else {
            let factor = reflect_dot_eye.powf(self.shininess);
            light.intensity * self.specular * factor
        };

        Ok(ambient + diffuse + specular)
    }
}

#[cfg(test)]
fn light_at(x: f32, y: f32, z: f32) -> PointLight {
    PointLight::new(Color::white(), Tuple4D::point(x, y, z))
}

#[test]
fn point_light_has_position_and_intensity() {
    let light = PointLight::new(Color::white(), Tuple4D::vector(0.0, 0.0, 0.0));

    assert_eq!(light.intensity, Color::white());
    assert_eq!(light.position, Tuple4D::point(0.0, 0.0, 0.0));
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.reflective, 0.0);
    assert!(m.pattern.is_none());
}

#[test]
fn eye_between_light_and_surface() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light_at(0.0, 0.0, -10.0), position, eyev, normalv,
        false, m.color).unwrap();
    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 2.0f32.sqrt() / 2.0, -(2.0f32.sqrt()) / 2.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light_at(0.0, 0.0, -10.0), position, eyev, normalv,
        false, m.color).unwrap();
    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_light_offset_45() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light_at(0.0, 10.0, -10.0), position, eyev, normalv,
        false, m.color).unwrap();
    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, -(2.0f32.sqrt()) / 2.0,
        -(2.0f32.sqrt()) / 2.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light_at(0.0, 10.0, -10.0), position, eyev, normalv,
        false, m.color).unwrap();
    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light_at(0.0, 0.0, 10.0), position, eyev, normalv,
        false, m.color).unwrap();
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow_is_ambient_only() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light_at(0.0, 0.0, -10.0), position, eyev, normalv,
        true, m.color).unwrap();
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn light_intensity_tints_result() {
    let m = Material::default();
    let light = PointLight::new(Color::rgb(1.0, 0.5, 0.0),
        Tuple4D::point(0.0, 0.0, -10.0));
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light, Tuple4D::point(0.0, 0.0, 0.0), eyev, normalv,
        false, m.color).unwrap();
    assert_eq!(res, Color::rgb(1.9, 0.95, 0.0));
}

#[test]
fn lighting_with_stripe_pattern() {
    use crate::shape::Shape;

    let mut s = Shape::sphere();
    *s.material_mut() = Material {
        color: Color::rgb(0.5, 0.5, 0.5),
        pattern: Some(Pattern::stripe(Color::white(), Color::black())),

        // Only ambient light contributes, so the result is the pattern color
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,

        ..Default::default()
    };

    let m = *s.material();
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = light_at(0.0, 0.0, -10.0);

    let p1 = Tuple4D::point(0.9, 0.0, 0.0);
    let p2 = Tuple4D::point(1.1, 0.0, 0.0);

    assert_eq!(
        m.lighting(&light, p1, eyev, normalv, false, s.color_at(p1)).unwrap(),
        Color::white()
    );
    assert_eq!(
        m.lighting(&light, p2, eyev, normalv, false, s.color_at(p2)).unwrap(),
        Color::black()
    );
}

#[test]
fn point_on_light_is_ambient_only() {
    let m = Material::default();
    let p = Tuple4D::point(0.0, 0.0, -10.0);
    let v = Tuple4D::vector(0.0, 0.0, -1.0);

    let res = m.lighting(&light_at(0.0, 0.0, -10.0), p, v, v, false, m.color)
        .unwrap();
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}
