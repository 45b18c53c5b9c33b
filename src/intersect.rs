use crate::consts::HIT_OFFSET_EPSILON;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::shape::Shape;
use crate::error::Result;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin).
///
/// The `what` parameter borrows the intersected shape. Shapes are owned by a
/// `World` (or whoever built them), so an intersection can never outlive the
/// shape it refers to.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f32,
    pub what: &'a Shape,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if they refer to the *same* shape (not
/// merely an equal one).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f32, what: &'a Shape) -> Intersection<'a> {
        Intersection { t, what }
    }
}

/// A collection of intersections.
///
/// Mostly a wrapper for a vector of `Intersection` objects. See the
/// `Intersection` documentation for more information.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

impl<'a> Intersections<'a> {
    /// Creates a new list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    /// Appends every intersection in `other` to this collection.
    pub fn extend(&mut self, other: Intersections<'a>) {
        self.intersections.extend(other.intersections);
    }

    /// Returns the visible intersection, if any object has been hit.
    ///
    /// The hit is the intersection with the lowest non-negative `t`;
    /// intersections behind the ray origin are never visible. Non-finite
    /// values of `t` are ignored. If several intersections share the lowest
    /// `t`, the first of them (in collection order) is the hit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_tracer::shape::Shape;
    /// # use prism_tracer::intersect::{ Intersection, Intersections };
    /// let s = Shape::sphere();
    /// let xs: Intersections = vec![
    ///     Intersection::new(5.0, &s),
    ///     Intersection::new(7.0, &s),
    ///     Intersection::new(-3.0, &s),
    ///     Intersection::new(2.0, &s),
    /// ].into();
    ///
    /// assert_eq!(xs.hit(), Some(Intersection::new(2.0, &s)));
    /// ```
    pub fn hit(&self) -> Option<Intersection<'a>> {
        let mut best: Option<Intersection<'a>> = None;

        for i in self.intersections.iter() {
            if !i.t.is_finite() || i.t < 0.0 {
                continue;
            }

            match best {
                Some(b) if b.t <= i.t => (),
                _ => best = Some(*i),
            }
        }

        best
    }

    /// Sorts the intersections by ascending `t`.
    ///
    /// The sort is stable, and incomparable values (NaN) are treated as
    /// equal to everything.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`; everything needed to shade the
/// hit point.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f32,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple4D,

    /// A point slightly above the intersected surface. Used to prevent an
    /// object from shadowing itself (this causes "acne").
    pub over_point: Tuple4D,

    /// The eye vector for the intersection.
    pub eyev: Tuple4D,

    /// The normal vector of the object being intersected, facing the eye.
    pub normalv: Tuple4D,

    /// The intersection ray, reflected across the normal.
    pub reflectv: Tuple4D,

    /// Whether the intersection occurs within the object or not.
    pub inside: bool,
}

impl<'a> IntersectionComputation<'a> {
    /// Creates a new intersection computation, given a ray and intersection.
    ///
    /// If the surface normal points away from the eye, the ray started inside
    /// the object; the normal is flipped and `inside` is set.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>)
        -> Result<IntersectionComputation<'a>> {
        let t = hit.t;
        let obj = hit.what;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = obj.normal_at(point)?;

        let inside = if normalv.dot(&eyev) < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        let over_point = point + normalv * HIT_OFFSET_EPSILON;
        let reflectv = r.direction.reflect(&normalv);

        Ok(IntersectionComputation {
            t, obj,
            point, over_point,
            eyev, normalv, reflectv,
            inside,
        })
    }
}

#[cfg(test)]
use crate::matrix::Matrix4D;

#[test]
fn intersection_encapsulates_t_and_object() {
    let s = Shape::sphere();
    let i = Intersection::new(3.5, &s);

    assert_eq!(i.t, 3.5);
    assert!(std::ptr::eq(i.what, &s));
}

#[test]
fn intersections_compare_by_identity() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();

    assert_eq!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s1));
    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s2));
    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(2.0, &s1));
}

#[test]
fn hit_with_all_positive() {
    let s  = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i2, i1].into();

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_with_some_negative() {
    let s  = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let xs: Intersections = vec![i2, i1].into();

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_with_all_negative() {
    let s  = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ].into();

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative() {
    let s  = Shape::sphere();
    let i1 = Intersection::new(5.0, &s);
    let i2 = Intersection::new(7.0, &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0, &s);
    let xs: Intersections = vec![i1, i2, i3, i4].into();

    assert_eq!(xs.hit(), Some(i4));
}

#[test]
fn hit_ignores_non_finite() {
    let s  = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(f32::NAN, &s),
        Intersection::new(f32::INFINITY, &s),
        Intersection::new(4.0, &s),
    ].into();

    assert_eq!(xs.hit(), Some(Intersection::new(4.0, &s)));
}

#[test]
fn hit_prefers_first_of_equal_minima() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();
    let xs: Intersections = vec![
        Intersection::new(3.0, &s1),
        Intersection::new(1.0, &s2),
        Intersection::new(1.0, &s1),
    ].into();

    assert_eq!(xs.hit(), Some(Intersection::new(1.0, &s2)));
}

#[test]
fn sort_orders_by_t() {
    let s  = Shape::sphere();
    let mut xs: Intersections = vec![
        Intersection::new(5.0, &s),
        Intersection::new(-1.0, &s),
        Intersection::new(2.0, &s),
    ].into();
    xs.sort();

    let ts: Vec<f32> = xs.intersections.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![-1.0, 2.0, 5.0]);
}

#[test]
fn precompute_intersection_state() {
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0),
                       Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(comps.t, i.t);
    assert!(std::ptr::eq(comps.obj, &s));
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_intersection() {
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, 0.0),
                       Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere();
    let i = Intersection::new(1.0, &s);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
    // Flipped, so it faces the eye
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn hit_should_offset_point() {
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0),
                       Tuple4D::vector(0.0, 0.0, 1.0));
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0))
        .unwrap();
    let i = Intersection::new(5.0, &s);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert!(comps.over_point.z < -HIT_OFFSET_EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}

#[test]
fn precompute_reflection_vector() {
    let p = Shape::plane();
    let k = 2.0f32.sqrt() / 2.0;
    let r = Ray4D::new(Tuple4D::point(0.0, 1.0, -1.0),
                       Tuple4D::vector(0.0, -k, k));
    let i = Intersection::new(2.0f32.sqrt(), &p);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(comps.reflectv, Tuple4D::vector(0.0, k, k));
}
