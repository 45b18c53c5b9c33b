use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;

/// A ray, cast from an origin point along a direction vector.
///
/// The direction is not required to be normalized; rays transformed into
/// object space by a scaling transform generally won't be, and intersection
/// math relies on keeping that scale.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray4D {
    pub origin: Tuple4D,
    pub direction: Tuple4D,
}

impl Ray4D {
    /// Creates a new ray.
    ///
    /// The `w` components are coerced so that `origin` is a point and
    /// `direction` is a vector.
    pub fn new(mut origin: Tuple4D, mut direction: Tuple4D) -> Ray4D {
        origin.w = 1.0;
        direction.w = 0.0;

        Ray4D { origin, direction }
    }

    /// The point at distance `t` along the ray.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_tracer::tuple::Tuple4D;
    /// # use prism_tracer::ray::Ray4D;
    /// let r = Ray4D::new(Tuple4D::point(2.0, 3.0, 4.0),
    ///                    Tuple4D::vector(1.0, 0.0, 0.0));
    /// assert_eq!(r.position(2.5), Tuple4D::point(4.5, 3.0, 4.0));
    /// ```
    pub fn position(&self, t: f32) -> Tuple4D {
        self.origin + (t * self.direction)
    }

    /// Applies a transformation to both the origin and direction of the ray.
    pub fn transform(&self, m: Matrix4D) -> Ray4D {
        Ray4D {
            origin: m * self.origin,
            direction: m * self.direction,
        }
    }
}

#[test]
fn ray_creation_coerces_kinds() {
    let r = Ray4D::new(
                Tuple4D::tuple(1.0, 2.0, 3.0, 0.0),
                Tuple4D::tuple(4.0, 5.0, 6.0, 1.0)
            );

    assert!(r.origin.is_point());
    assert!(r.direction.is_vector());
    assert_eq!(r.origin, Tuple4D::point(1.0, 2.0, 3.0));
    assert_eq!(r.direction, Tuple4D::vector(4.0, 5.0, 6.0));
}

#[test]
fn ray_position() {
    let r = Ray4D::new(
                Tuple4D::point(2.0, 3.0, 4.0),
                Tuple4D::vector(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple4D::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple4D::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple4D::point(1.0, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            );
    let t = r.transform(Matrix4D::translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Tuple4D::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_scaling_keeps_direction_unnormalized() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            );
    let t = r.transform(Matrix4D::scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Tuple4D::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 3.0, 0.0));
}
