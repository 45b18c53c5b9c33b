use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;
use crate::error::{ Error, Result };

/// A homogeneous 4D tuple: either a point (`w == 1.0`) or a vector
/// (`w == 0.0`).
///
/// Arithmetic follows affine rules; subtracting two points yields a vector,
/// adding a vector to a point yields a point, and so on. The `w` component
/// is carried through every operation, so mixing the two up produces tuples
/// which are neither points nor vectors.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple4D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32
}

impl PartialEq for Tuple4D {
    fn eq(&self, other: &Tuple4D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple4D {
    pub fn tuple(x: f32, y: f32, z: f32, w: f32) -> Tuple4D {
        Tuple4D { x, y, z, w }
    }

    pub fn point(x: f32, y: f32, z: f32) -> Tuple4D {
        Tuple4D { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f32, y: f32, z: f32) -> Tuple4D {
        Tuple4D { x, y, z, w: 0.0 }
    }

    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    /// The Euclidean length of a vector.
    ///
    /// Only `x`, `y` and `z` contribute; calling this on a point measures the
    /// distance of the point from the origin.
    pub fn magnitude(&self) -> f32 {
        f32::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        )
    }

    /// Scales a vector to unit length.
    ///
    /// Normalizing a zero-length vector is undefined; instead of producing a
    /// tuple full of NaNs, this returns `Error::InvalidOperand`. The same goes
    /// for vectors whose magnitude overflows or is NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_tracer::tuple::Tuple4D;
    /// let v = Tuple4D::vector(4.0, 0.0, 0.0);
    /// assert_eq!(v.normalize().unwrap(), Tuple4D::vector(1.0, 0.0, 0.0));
    /// assert!(Tuple4D::vector(0.0, 0.0, 0.0).normalize().is_err());
    /// ```
    pub fn normalize(&self) -> Result<Tuple4D> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(Error::InvalidOperand(
                "cannot normalize a zero-length vector"
            ));
        }
        if !mag.is_finite() {
            return Err(Error::InvalidOperand(
                "cannot normalize a vector with non-finite magnitude"
            ));
        }

        Ok(Tuple4D {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
            w: self.w,
        })
    }

    pub fn dot(&self, other: &Tuple4D) -> f32 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    /// The cross product of two vectors. Always yields a vector.
    pub fn cross(&self, other: &Tuple4D) -> Tuple4D {
        Tuple4D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 0.0
        }
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Tuple4D) -> Tuple4D {
        *self - (*normal * 2.0 * self.dot(normal))
    }
}

impl Add for Tuple4D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w
        }
    }
}

impl Sub for Tuple4D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w
        }
    }
}

impl Neg for Tuple4D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w
        }
    }
}

/// Implements scalar right-multiplication for a 4D tuple.
///
/// ```
/// use prism_tracer::tuple::Tuple4D;
///
/// let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(t * 5.0, Tuple4D::tuple(5.0, 10.0, 15.0, 20.0));
/// ```
impl Mul<f32> for Tuple4D {
    type Output = Self;

    fn mul(self, other: f32) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
            w: self.w * other
        }
    }
}

/// Implements scalar left-multiplication for a 4D tuple.
impl Mul<Tuple4D> for f32 {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        other * self
    }
}

/// Divides every component of a tuple by a scalar.
impl Div<f32> for Tuple4D {
    type Output = Self;

    fn div(self, other: f32) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
            w: self.w / other
        }
    }
}

/* Tests */

#[test]
fn tuple_with_w1_is_point() {
    let a = Tuple4D::tuple(4.3, -4.2, 3.1, 1.0);

    assert!(a.is_point());
    assert!(!a.is_vector());
    assert_eq!(a, Tuple4D::point(4.3, -4.2, 3.1));
}

#[test]
fn tuple_with_w0_is_vector() {
    let a = Tuple4D::tuple(4.3, -4.2, 3.1, 0.0);

    assert!(!a.is_point());
    assert!(a.is_vector());
    assert_eq!(a, Tuple4D::vector(4.3, -4.2, 3.1));
}

#[test]
fn equality_tolerates_small_error() {
    let a = Tuple4D::point(1.0, 2.0, 3.0);
    let b = Tuple4D::point(1.00001, 2.0, 2.99999);
    let c = Tuple4D::point(1.001, 2.0, 3.0);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn add_tuples() {
    let a1 = Tuple4D::tuple(3.0, -2.0, 5.0, 1.0);
    let a2 = Tuple4D::tuple(-2.0, 3.0, 1.0, 0.0);

    assert_eq!(a1 + a2, Tuple4D::tuple(1.0, 1.0, 6.0, 1.0));
}

#[test]
fn add_vector_to_point() {
    let p = Tuple4D::point(1.0, 2.0, 3.0);
    let v = Tuple4D::vector(1.0, 1.0, 1.0);

    assert!((p + v).is_point());
    assert!((v + v).is_vector());
}

#[test]
fn sub_points() {
    let p1 = Tuple4D::point(3.0, 2.0, 1.0);
    let p2 = Tuple4D::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple4D::point(3.0, 2.0, 1.0);
    let v = Tuple4D::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple4D::point(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let p1 = Tuple4D::vector(3.0, 2.0, 1.0);
    let p2 = Tuple4D::vector(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple4D::tuple(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn mul_scalar() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple4D::tuple(3.5, -7.0, 10.5, -14.0));
    assert_eq!(3.5 * a, Tuple4D::tuple(3.5, -7.0, 10.5, -14.0));
}

#[test]
fn mul_fraction() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 0.5, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn div_scalar() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a / 2.0, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn magnitude_unit() {
    assert!(feq(Tuple4D::vector(1.0, 0.0, 0.0).magnitude(), 1.0));
    assert!(feq(Tuple4D::vector(0.0, 1.0, 0.0).magnitude(), 1.0));
    assert!(feq(Tuple4D::vector(0.0, 0.0, 1.0).magnitude(), 1.0));
}

#[test]
fn magnitude_pos() {
    let v = Tuple4D::vector(1.0, 2.0, 3.0);

    assert!(feq(v.magnitude(), f32::sqrt(14.0)));
}

#[test]
fn magnitude_neg() {
    let v = Tuple4D::vector(-1.0, -2.0, -3.0);

    assert!(feq(v.magnitude(), f32::sqrt(14.0)));
}

#[test]
fn normalize_clean() {
    let v = Tuple4D::vector(4.0, 0.0, 0.0);

    assert_eq!(v.normalize().unwrap(), Tuple4D::vector(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple4D::vector(1.0, 2.0, 3.0);
    let e = Tuple4D::vector(
        1.0 / f32::sqrt(14.0),
        2.0 / f32::sqrt(14.0),
        3.0 / f32::sqrt(14.0)
    );

    assert_eq!(v.normalize().unwrap(), e);
}

#[test]
fn normalized_vectors_have_unit_magnitude() {
    let vs = [
        Tuple4D::vector(1.0, 2.0, 3.0),
        Tuple4D::vector(-0.001, 0.002, 0.0),
        Tuple4D::vector(1000.0, -250.0, 3.5),
        Tuple4D::vector(0.0, 0.0, -7.0),
    ];

    for v in vs.iter() {
        assert!(feq(v.normalize().unwrap().magnitude(), 1.0));
    }
}

#[test]
fn normalize_zero_vector_fails() {
    let v = Tuple4D::vector(0.0, 0.0, 0.0);

    match v.normalize() {
        Err(Error::InvalidOperand(msg)) => assert!(msg.contains("zero-length")),
        other => panic!("expected InvalidOperand, got {:?}", other),
    }
}

#[test]
fn normalize_non_finite_vector_fails() {
    for v in &[
        Tuple4D::vector(f32::INFINITY, 0.0, 0.0),
        Tuple4D::vector(f32::NAN, 1.0, 0.0),
        Tuple4D::vector(f32::MAX, f32::MAX, 0.0),
    ] {
        match v.normalize() {
            Err(Error::InvalidOperand(msg)) => assert!(msg.contains("non-finite")),
            other => panic!("expected InvalidOperand, got {:?}", other),
        }
    }
}

#[test]
fn dot_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    assert!(feq(a.dot(&b), 20.0));
}

#[test]
fn cross_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    let c = Tuple4D::vector(-1.0, 2.0, -1.0);
    let d = Tuple4D::vector(1.0, -2.0, 1.0);

    assert_eq!(a.cross(&b), c);
    assert_eq!(b.cross(&a), d);
}

#[test]
fn reflect_45() {
    let v = Tuple4D::vector(1.0, -1.0, 0.0);
    let n = Tuple4D::vector(0.0, 1.0, 0.0);
    let r = v.reflect(&n);

    assert_eq!(r, Tuple4D::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted() {
    let v = Tuple4D::vector(0.0, -1.0, 0.0);
    let n = Tuple4D::vector(2.0f32.sqrt() / 2.0, 2.0f32.sqrt() / 2.0, 0.0);
    let r = v.reflect(&n);

    assert_eq!(r, Tuple4D::vector(1.0, 0.0, 0.0));
}
