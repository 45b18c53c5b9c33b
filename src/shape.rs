use crate::consts::EPSILON;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::color::Color;
use crate::light::Material;
use crate::matrix::Matrix4D;
use crate::intersect::{ Intersection, Intersections };
use crate::error::Result;

/// The geometry of a `Shape`, in object space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// A unit sphere with its center at the object-space origin.
    Sphere,

    /// The XZ plane (`y == 0`), stretching indefinitely along X and Z.
    Plane,
}

/// A renderable surface.
///
/// Every shape pairs some geometry (`ty`) with a material and a transform.
/// Geometry is always defined in object space; the transform places the shape
/// in the world. Its inverse is cached whenever the transform is set, so that
/// intersecting a ray (done once per shape per ray) doesn't have to invert a
/// matrix.
///
/// # Examples
///
/// ```
/// # use prism_tracer::tuple::Tuple4D;
/// # use prism_tracer::ray::Ray4D;
/// # use prism_tracer::matrix::Matrix4D;
/// # use prism_tracer::shape::Shape;
/// let s = Shape::sphere().with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))?;
/// let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0),
///                    Tuple4D::vector(0.0, 0.0, 1.0));
///
/// let xs = s.intersect(&r);
/// assert_eq!(xs.len(), 2);
/// assert_eq!(xs.intersections[0].t, 3.0);
/// assert_eq!(xs.intersections[1].t, 7.0);
/// # Ok::<(), prism_tracer::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,

    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::new(ShapeType::Sphere)
    }
}

/// Checks that two Shapes are equal.
///
/// Shapes compare by value; the cached inverse follows from the transform and
/// isn't compared.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.transform == other.transform
            && self.material == other.material
    }
}

impl Shape {
    /// Creates a shape with identity transform and default material.
    pub fn new(ty: ShapeType) -> Shape {
        Shape {
            ty,
            material: Material::default(),
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    /// Creates a unit sphere with identity transform and default material.
    pub fn sphere() -> Shape {
        Shape::new(ShapeType::Sphere)
    }

    /// Creates an XZ plane with identity transform and default material.
    pub fn plane() -> Shape {
        Shape::new(ShapeType::Plane)
    }

    /// Returns a reference to the Shape transform.
    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Sets the transform property on a Shape.
    ///
    /// The inverse is computed here. A transform which can't be inverted is
    /// rejected with `Error::DegenerateTransform`, and the shape keeps its
    /// previous transform.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Builder flavor of `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D) -> Result<Shape> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Builder which replaces the material of a Shape.
    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Returns a reference to this Shape's material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Returns a mutable reference to this Shape's material.
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Converts a point from world to object space.
    pub fn world_to_object(&self, point: Tuple4D) -> Tuple4D {
        self.inverse * point
    }

    /// Converts a normal from object to world space.
    ///
    /// Normals are transformed by the transpose of the inverse transform,
    /// which keeps them perpendicular to the surface under non-uniform
    /// scaling. The translation part of that matrix leaks into `w`, so `w`
    /// is reset before normalizing.
    pub fn normal_to_world(&self, normal: Tuple4D) -> Result<Tuple4D> {
        let mut world_normal = self.inverse.transposition() * normal;
        world_normal.w = 0.0;
        world_normal.normalize()
    }

    /// Intersects a world space ray with this Shape.
    ///
    /// The ray is moved into object space before intersecting. Because the
    /// ray direction isn't renormalized, the returned `t` values are valid
    /// along the original world space ray.
    pub fn intersect(&self, ray: &Ray4D) -> Intersections<'_> {
        self.local_intersect(&ray.transform(self.inverse))
    }

    /// Returns the normal vector at a world space point on this Shape.
    ///
    /// `world_point` is assumed to be on the surface.
    pub fn normal_at(&self, world_point: Tuple4D) -> Result<Tuple4D> {
        let local_point = self.world_to_object(world_point);
        let local_normal = self.local_normal_at(&local_point);
        self.normal_to_world(local_normal)
    }

    /// Returns the surface color at a world space point on this Shape.
    ///
    /// This is the material's pattern evaluated at that point if there is
    /// one, otherwise the material's flat color.
    pub fn color_at(&self, world_point: Tuple4D) -> Color {
        match self.material.pattern {
            Some(ref pattern) => pattern.pattern_at_shape(self, world_point),
            None => self.material.color,
        }
    }

    /// Intersect an object space ray with a Shape.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections<'_> {
        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(ray),
            ShapeType::Plane => self.intersect_plane(ray),
        }
    }

    /// Obtain the object space normal vector of a Shape at a point.
    pub fn local_normal_at(&self, at: &Tuple4D) -> Tuple4D {
        match self.ty {
            // The sphere sits at the origin, so the normal is just the
            // vector from the origin to the point.
            ShapeType::Sphere => Tuple4D { w: 0.0, ..*at },
            ShapeType::Plane => Tuple4D::vector(0.0, 1.0, 0.0),
        }
    }

    /// Checks whether a ray intersects a Sphere.
    ///
    /// Returns either no intersections, or two intersections in ascending
    /// order of `t`. If the ray is tangent to the sphere, both are equal.
    fn intersect_sphere(&self, ray: &Ray4D) -> Intersections<'_> {
        // Note that subtracting a point removes the 'w' part of the ray origin.
        let sphere_to_ray = ray.origin - Tuple4D::point(0.0, 0.0, 0.0);

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);

        if discriminant < 0.0 {
            return Intersections::new();
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        vec![Intersection::new(t1, self), Intersection::new(t2, self)].into()
    }

    /// Intersects a ray with a plane.
    fn intersect_plane(&self, ray: &Ray4D) -> Intersections<'_> {
        // Without a Y component, the ray is parallel to (or inside) the plane
        if ray.direction.y.abs() < EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;
        vec![Intersection::new(t, self)].into()
    }
}

#[cfg(test)]
use std::f32::consts::PI;

#[cfg(test)]
fn ray(origin: (f32, f32, f32), direction: (f32, f32, f32)) -> Ray4D {
    Ray4D::new(
        Tuple4D::point(origin.0, origin.1, origin.2),
        Tuple4D::vector(direction.0, direction.1, direction.2),
    )
}

#[test]
fn default_shape_state() {
    let s = Shape::sphere();

    assert_eq!(s.ty, ShapeType::Sphere);
    assert_eq!(*s.transform(), Matrix4D::identity());
    assert_eq!(*s.material(), Material::default());
}

#[test]
fn assigning_transform_and_material() {
    let mut s = Shape::sphere();
    s.set_transform(Matrix4D::translation(2.0, 3.0, 4.0)).unwrap();
    s.material_mut().ambient = 1.0;

    assert_eq!(*s.transform(), Matrix4D::translation(2.0, 3.0, 4.0));
    assert_eq!(s.material().ambient, 1.0);
}

#[test]
fn singular_transform_is_rejected() {
    let mut s = Shape::sphere();
    s.set_transform(Matrix4D::translation(1.0, 0.0, 0.0)).unwrap();

    assert!(s.set_transform(Matrix4D::scaling(0.0, 0.0, 0.0)).is_err());
    assert_eq!(*s.transform(), Matrix4D::translation(1.0, 0.0, 0.0));
    assert!(Shape::plane()
        .with_transform(Matrix4D::scaling(1.0, 1.0, 0.0))
        .is_err());
}

#[test]
fn shapes_compare_by_value() {
    let a = Shape::sphere();
    let b = Shape::sphere();
    let c = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, Shape::plane());
}

#[test]
fn ray_intersects_sphere_at_two_points() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 2);
    assert_eq!(xs.intersections[0].t, 4.0);
    assert_eq!(xs.intersections[1].t, 6.0);
    assert!(std::ptr::eq(xs.intersections[0].what, &s));
    assert!(std::ptr::eq(xs.intersections[1].what, &s));
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 2);
    assert_eq!(xs.intersections[0].t, 5.0);
    assert_eq!(xs.intersections[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0)));

    assert!(xs.is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 2);
    assert_eq!(xs.intersections[0].t, -1.0);
    assert_eq!(xs.intersections[1].t, 1.0);
}

#[test]
fn sphere_is_behind_ray() {
    let s = Shape::sphere();
    let xs = s.intersect(&ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 2);
    assert_eq!(xs.intersections[0].t, -6.0);
    assert_eq!(xs.intersections[1].t, -4.0);
}

#[test]
fn intersect_scaled_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert_eq!(xs.len(), 2);
    assert_eq!(xs.intersections[0].t, 3.0);
    assert_eq!(xs.intersections[1].t, 7.0);
}

#[test]
fn intersect_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();
    let xs = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0)));

    assert!(xs.is_empty());
}

#[test]
fn normal_on_sphere_axes() {
    let s = Shape::sphere();

    assert_eq!(s.normal_at(Tuple4D::point(1.0, 0.0, 0.0)).unwrap(),
        Tuple4D::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)).unwrap(),
        Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 0.0, 1.0)).unwrap(),
        Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_sphere_nonaxial_is_normalized() {
    let s = Shape::sphere();
    let k = 3.0f32.sqrt() / 3.0;
    let n = s.normal_at(Tuple4D::point(k, k, k)).unwrap();

    assert_eq!(n, Tuple4D::vector(k, k, k));
    assert_eq!(n, n.normalize().unwrap());
}

#[test]
fn normal_on_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0))
        .unwrap();
    let n = s.normal_at(Tuple4D::point(0.0, 1.70711, -0.70711)).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_transformed_sphere() {
    let s = Shape::sphere()
        .with_transform(
            Matrix4D::scaling(1.0, 0.5, 1.0) * Matrix4D::rotation_z(PI / 5.0)
        )
        .unwrap();
    let p = Tuple4D::point(0.0, 2.0f32.sqrt() / 2.0, -(2.0f32.sqrt()) / 2.0);
    let n = s.normal_at(p).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane();

    for at in [
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(10.0, 0.0, -10.0),
        Tuple4D::point(-5.0, 0.0, 150.0),
    ].iter() {
        assert_eq!(p.local_normal_at(at), Tuple4D::vector(0.0, 1.0, 0.0));
    }
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();
    let xs = p.local_intersect(&ray((0.0, 10.0, 0.0), (0.0, 0.0, 1.0)));

    assert!(xs.is_empty());
}

#[test]
fn ray_coplanar_with_plane() {
    let p = Shape::plane();
    let xs = p.local_intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0)));

    assert!(xs.is_empty());
}

#[test]
fn ray_intersecting_plane_from_above() {
    let p = Shape::plane();
    let xs = p.local_intersect(&ray((0.0, 1.0, 0.0), (0.0, -1.0, 0.0)));

    assert_eq!(xs.len(), 1);
    assert_eq!(xs.intersections[0].t, 1.0);
    assert!(std::ptr::eq(xs.intersections[0].what, &p));
}

#[test]
fn ray_intersecting_plane_from_below() {
    let p = Shape::plane();
    let xs = p.local_intersect(&ray((0.0, -1.0, 0.0), (0.0, 1.0, 0.0)));

    assert_eq!(xs.len(), 1);
    assert_eq!(xs.intersections[0].t, 1.0);
}

#[test]
fn color_at_uses_pattern_when_present() {
    use crate::pattern::Pattern;

    let mut s = Shape::sphere();
    s.material.color = Color::red();
    assert_eq!(s.color_at(Tuple4D::point(1.5, 0.0, 0.0)), Color::red());

    s.material.pattern = Some(Pattern::stripe(Color::white(), Color::black()));
    assert_eq!(s.color_at(Tuple4D::point(0.5, 0.0, 0.0)), Color::white());
    assert_eq!(s.color_at(Tuple4D::point(1.5, 0.0, 0.0)), Color::black());
}
