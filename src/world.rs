use log::{ debug, trace };

use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::light::{ PointLight, Material };
use crate::shape::Shape;
use crate::intersect::{ Intersections, IntersectionComputation };
use crate::consts::EPSILON;
use crate::error::Result;

/// A world with objects and light.
///
/// Worlds collect all objects as well as light for rendering. Most logic is
/// performed within worlds for the ray tracer.
///
/// The world owns its shapes; intersections produced by `intersect` borrow
/// them. Shapes are kept in insertion order, and are addressed by the index
/// `add_object` returns.
#[derive(Clone, Debug, Default)]
pub struct World {
    pub objects: Vec<Shape>,
    pub light: Option<PointLight>,
}

impl World {
    /// Creates an empty world, with no objects and no light.
    pub fn new() -> World {
        Default::default()
    }

    /// Creates the reference world: two concentric spheres lit from the
    /// upper left.
    ///
    /// The outer sphere is a unit sphere with a green-ish material; the inner
    /// sphere is half its size with the default material.
    pub fn example() -> World {
        let light = PointLight::new(
            Color::white(),
            Tuple4D::point(-10.0, 10.0, -10.0)
        );

        let outer = Shape::sphere().with_material(Material {
            color: Color::rgb(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });

        let inner = Shape::sphere()
            .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5))
            .expect("uniform scaling by 0.5 is invertible");

        World {
            objects: vec![outer, inner],
            light: Some(light),
        }
    }

    /// Adds a shape to the world, returning its index.
    pub fn add_object(&mut self, shape: Shape) -> usize {
        debug!("adding {:?} as object {}", shape.ty, self.objects.len());
        self.objects.push(shape);
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    pub fn object(&self, index: usize) -> Option<&Shape> {
        self.objects.get(index)
    }

    pub fn object_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.objects.get_mut(index)
    }

    /// Intersects a ray against all objects in a world.
    ///
    /// The result is sorted by ascending `t`.
    pub fn intersect(&self, r: &Ray4D) -> Intersections<'_> {
        let mut intersections = Intersections::new();
        for obj in self.objects.iter() {
            intersections.extend(obj.intersect(r));
        }

        intersections.sort();
        intersections
    }

    /// Determines whether a point is shadowed.
    ///
    /// A point is shadowed if some object sits between it and the light.
    /// Without a light, nothing is shadowed. A point exactly at the light
    /// isn't shadowed either.
    pub fn is_shadowed(&self, p: Tuple4D) -> Result<bool> {
        let light = match self.light {
            Some(ref light) => light,
            None => return Ok(false),
        };

        let v = light.position - p;
        let distance = v.magnitude();
        if distance < EPSILON {
            return Ok(false);
        }

        let r = Ray4D::new(p, v.normalize()?);
        let shadowed = match self.intersect(&r).hit() {
            Some(i) => i.t < distance,
            None => false,
        };

        Ok(shadowed)
    }

    /// Calculates the color for a hit, based on shadows and light.
    ///
    /// The surface itself is lit by the world's light (black if the world has
    /// no light), and any reflection off of the surface is added on top.
    /// `remaining` bounds how many more reflections may be followed.
    pub fn shade_hit(&self, comps: &IntersectionComputation, remaining: usize)
        -> Result<Color> {
        let surface = match self.light {
            Some(ref light) => {
                let in_shadow = self.is_shadowed(comps.over_point)?;
                comps.obj.material().lighting(
                    light,
                    comps.point,
                    comps.eyev,
                    comps.normalv,
                    in_shadow,
                    comps.obj.color_at(comps.point),
                )?
            },
            None => Color::black(),
        };

        let reflected = self.reflected_color(comps, remaining)?;

        Ok(surface + reflected)
    }

    /// Calculates the color reflected off of a hit.
    ///
    /// Non-reflective surfaces reflect nothing. Otherwise a new ray is cast
    /// from just above the surface along the reflection vector, with one less
    /// reflection remaining. At zero remaining, the reflection is black.
    pub fn reflected_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Result<Color> {
        let reflective = comps.obj.material().reflective;
        if reflective == 0.0 || remaining == 0 {
            return Ok(Color::black());
        }

        trace!("following reflection at {:?}, {} remaining",
            comps.point, remaining);

        let reflect_ray = Ray4D::new(comps.over_point, comps.reflectv);
        let color = self.color_at(&reflect_ray, remaining - 1)?;

        Ok(color * reflective)
    }

    /// Determines a color based on the intersection of a ray and the objects.
    ///
    /// If nothing is hit, the color is black.
    pub fn color_at(&self, r: &Ray4D, remaining: usize) -> Result<Color> {
        let intersections = self.intersect(r);

        match intersections.hit() {
            None => Ok(Color::black()),
            Some(i) => {
                let comps = IntersectionComputation::new(r, &i)?;
                self.shade_hit(&comps, remaining)
            },
        }
    }
}

#[cfg(test)]
use crate::intersect::Intersection;
#[cfg(test)]
use crate::consts::REFLECTION_RECURSION_DEPTH;

#[cfg(test)]
fn ray(origin: (f32, f32, f32), direction: (f32, f32, f32)) -> Ray4D {
    Ray4D::new(
        Tuple4D::point(origin.0, origin.1, origin.2),
        Tuple4D::vector(direction.0, direction.1, direction.2),
    )
}

#[cfg(test)]
fn reflective_floor(reflective: f32) -> Shape {
    let mut floor = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap();
    floor.material_mut().reflective = reflective;
    floor
}

#[test]
fn new_world_is_empty() {
    let w = World::new();

    assert!(w.objects().is_empty());
    assert!(w.light.is_none());
}

#[test]
fn example_world_contents() {
    let w = World::example();

    assert_eq!(w.light, Some(PointLight::new(
        Color::white(), Tuple4D::point(-10.0, 10.0, -10.0)
    )));
    assert_eq!(w.objects().len(), 2);
    assert_eq!(w.object(0).unwrap().material().color,
        Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(*w.object(1).unwrap().transform(),
        Matrix4D::scaling(0.5, 0.5, 0.5));
    assert!(w.object(2).is_none());
}

#[test]
fn add_object_returns_index() {
    let mut w = World::new();

    assert_eq!(w.add_object(Shape::sphere()), 0);
    assert_eq!(w.add_object(Shape::plane()), 1);
    assert_eq!(w.object(1).unwrap().ty, crate::shape::ShapeType::Plane);
}

#[test]
fn intersect_example_world_with_ray() {
    let w = World::example();
    let xs = w.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 4);
    assert_eq!(xs.intersections[0].t, 4.0);
    assert_eq!(xs.intersections[1].t, 4.5);
    assert_eq!(xs.intersections[2].t, 5.5);
    assert_eq!(xs.intersections[3].t, 6.0);
}

#[test]
fn shade_intersection_from_outside() {
    let w = World::example();
    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[0]);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps, REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w = World::example();
    w.light = Some(PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.25, 0.0),
    ));

    let r = ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    let i = Intersection::new(0.5, &w.objects[1]);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps, REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    let mut w = World::new();
    w.light = Some(PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.0, -10.0),
    ));

    w.add_object(Shape::sphere());
    let behind = w.add_object(
        Shape::sphere()
            .with_transform(Matrix4D::translation(0.0, 0.0, 10.0))
            .unwrap()
    );

    let r = ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[behind]);
    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps, REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn shade_without_light_is_black() {
    let mut w = World::example();
    w.light = None;

    let c = w.color_at(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)),
        REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, Color::black());
}

#[test]
fn color_ray_miss() {
    let w = World::example();
    let c = w.color_at(&ray((0.0, 0.0, -5.0), (0.0, 1.0, 0.0)),
        REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, Color::black());
}

#[test]
fn color_ray_hit() {
    let w = World::example();
    let c = w.color_at(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)),
        REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_with_intersection_behind_ray() {
    let mut w = World::example();
    w.object_mut(0).unwrap().material_mut().ambient = 1.0;
    w.object_mut(1).unwrap().material_mut().ambient = 1.0;

    let c = w.color_at(&ray((0.0, 0.0, 0.75), (0.0, 0.0, -1.0)),
        REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, w.objects[1].material().color);
}

#[test]
fn no_shadow_when_nothing_collinear() {
    let w = World::example();

    assert!(!w.is_shadowed(Tuple4D::point(0.0, 10.0, 0.0)).unwrap());
}

#[test]
fn shadow_when_object_between_point_and_light() {
    let w = World::example();

    assert!(w.is_shadowed(Tuple4D::point(10.0, -10.0, 10.0)).unwrap());
}

#[test]
fn no_shadow_when_object_behind_light() {
    let w = World::example();

    assert!(!w.is_shadowed(Tuple4D::point(-20.0, 20.0, -20.0)).unwrap());
}

#[test]
fn no_shadow_when_object_behind_point() {
    let w = World::example();

    assert!(!w.is_shadowed(Tuple4D::point(-2.0, 2.0, -2.0)).unwrap());
}

#[test]
fn no_shadow_without_light_or_at_light() {
    let mut w = World::example();

    assert!(!w.is_shadowed(Tuple4D::point(-10.0, 10.0, -10.0)).unwrap());

    w.light = None;
    assert!(!w.is_shadowed(Tuple4D::point(10.0, -10.0, 10.0)).unwrap());
}

#[test]
fn reflected_color_for_nonreflective_material() {
    let mut w = World::example();
    w.object_mut(1).unwrap().material_mut().ambient = 1.0;

    let r = ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    let i = Intersection::new(1.0, &w.objects[1]);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(w.reflected_color(&comps, REFLECTION_RECURSION_DEPTH).unwrap(),
        Color::black());
}

#[test]
fn reflected_color_for_reflective_material() {
    let mut w = World::example();
    let floor = w.add_object(reflective_floor(0.5));

    let k = 2.0f32.sqrt() / 2.0;
    let r = ray((0.0, 0.0, -3.0), (0.0, -k, k));
    let i = Intersection::new(2.0f32.sqrt(), &w.objects[floor]);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    let reflected = w.reflected_color(&comps, REFLECTION_RECURSION_DEPTH)
        .unwrap();
    let bounce = w.color_at(&Ray4D::new(comps.over_point, comps.reflectv),
        REFLECTION_RECURSION_DEPTH - 1).unwrap();

    assert_ne!(reflected, Color::black());
    assert_eq!(reflected, bounce * 0.5);
}

#[test]
fn shade_hit_adds_reflection_to_surface() {
    let mut w = World::example();
    let floor = w.add_object(reflective_floor(0.5));

    let k = 2.0f32.sqrt() / 2.0;
    let r = ray((0.0, 0.0, -3.0), (0.0, -k, k));
    let i = Intersection::new(2.0f32.sqrt(), &w.objects[floor]);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    // With nothing remaining, only the surface itself contributes
    let surface = w.shade_hit(&comps, 0).unwrap();
    let reflected = w.reflected_color(&comps, REFLECTION_RECURSION_DEPTH)
        .unwrap();

    assert_eq!(w.shade_hit(&comps, REFLECTION_RECURSION_DEPTH).unwrap(),
        surface + reflected);
}

#[test]
fn reflected_color_at_max_recursion_depth() {
    let mut w = World::example();
    let floor = w.add_object(reflective_floor(0.5));

    let k = 2.0f32.sqrt() / 2.0;
    let r = ray((0.0, 0.0, -3.0), (0.0, -k, k));
    let i = Intersection::new(2.0f32.sqrt(), &w.objects[floor]);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(w.reflected_color(&comps, 0).unwrap(), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mut w = World::new();
    w.light = Some(PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, 0.0)
    ));

    w.add_object(reflective_floor(1.0));

    let mut ceiling = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0))
        .unwrap();
    ceiling.material_mut().reflective = 1.0;
    w.add_object(ceiling);

    let r = ray((0.0, 0.0, 0.0), (0.0, 1.0, 0.0));
    let c = w.color_at(&r, REFLECTION_RECURSION_DEPTH).unwrap();

    // With no reflections left, only the ceiling's own surface is seen
    let xs = w.intersect(&r);
    let comps = IntersectionComputation::new(&r, &xs.hit().unwrap()).unwrap();
    let ceiling = &w.objects[1];
    let surface = ceiling.material().lighting(
        w.light.as_ref().unwrap(),
        comps.point,
        comps.eyev,
        comps.normalv,
        w.is_shadowed(comps.over_point).unwrap(),
        ceiling.color_at(comps.point),
    ).unwrap();
    assert_eq!(w.color_at(&r, 0).unwrap(), surface);

    // Each bounce adds the same amount of light, so more depth is brighter
    let shallow = w.color_at(&r, 1).unwrap();
    assert!(shallow.r > surface.r);
    assert!(c.r > shallow.r);
}

#[test]
fn hit_at_light_position_is_shaded() {
    let mut w = World::new();
    w.light = Some(PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, 0.0)
    ));
    w.add_object(Shape::plane());

    let r = ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0));
    let c = w.color_at(&r, REFLECTION_RECURSION_DEPTH).unwrap();

    assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
}
