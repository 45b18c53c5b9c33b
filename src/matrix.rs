use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::feq;
use crate::tuple::*;
use crate::error::{ Error, Result };

/// A 2x2 matrix.
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix2D {
    data: [f32; 4],
}

/// A 3x3 matrix.
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix3D {
    data: [f32; 9],
}

/// A 4x4 matrix.
///
/// These matrices are used almost universally in the ray tracer logic.
/// Basically, these matrices encode transformations in 3D space, transforming
/// both vectors and points (`w` components of `0.0` and `1.0`, respectively).
///
/// The smaller `Matrix2D` and `Matrix3D` types exist to support the cofactor
/// expansion used by `determinant` and `inverse`.
///
/// For methods which modify matrices, they are typically provided in pairs;
/// one which modifies the matrix in-place, and one which returns a new matrix.
/// For example, `transpose` and `transposition`, or `translate` and
/// `translated`. The in-place variants of the transform builders return
/// `&mut Self`, so they can be chained:
///
/// ```
/// # use prism_tracer::tuple::Tuple4D;
/// # use prism_tracer::matrix::Matrix4D;
/// let mut m = Matrix4D::identity();
/// m.rotate_x(std::f32::consts::PI / 2.0)
///     .scale(5.0, 5.0, 5.0)
///     .translate(10.0, 5.0, 7.0);
///
/// let p = Tuple4D::point(1.0, 0.0, 1.0);
/// assert_eq!(m * p, Tuple4D::point(15.0, 0.0, 7.0));
/// ```
///
/// Each builder call applies its transform *after* everything already in the
/// matrix, so a chain reads in the order the operations happen to an object.
///
/// Calculating a view transformation (for cameras, etc.):
///
/// ```
/// # use prism_tracer::tuple::Tuple4D;
/// # use prism_tracer::matrix::Matrix4D;
/// let from = Tuple4D::point(0.0, 0.0, 8.0);
/// let to = Tuple4D::point(0.0, 0.0, 0.0);
/// let up = Tuple4D::vector(0.0, 1.0, 0.0);
/// let view = Matrix4D::view_transform(from, to, up)?;
/// assert_eq!(view, Matrix4D::translation(0.0, 0.0, -8.0));
/// # Ok::<(), prism_tracer::Error>(())
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Matrix4D {
    data: [f32; 16],
}

/// Operations shared by every square matrix size.
///
/// Each matrix type is expected to provide its own `cofactor` and
/// `determinant`; everything else is generic over the side length.
macro_rules! square_matrix {
    ($name:ident, $n:expr) => {
        impl $name {
            /// Creates a new matrix. All elements are initialized to `0.0`.
            pub fn new() -> $name {
                $name { data: [0.0; $n * $n] }
            }

            /// Instantiates an identity matrix.
            pub fn identity() -> $name {
                let mut m = Self::new();
                for i in 0..$n {
                    m[(i, i)] = 1.0;
                }

                m
            }

            /// Produces the transpose of a matrix in-place.
            pub fn transpose(&mut self) {
                *self = self.transposition();
            }

            /// Produces the transpose of a matrix, returning a new matrix.
            ///
            /// The transpose of a matrix is roughly defined by the following
            /// formula (given matrix `A`, create transpose matrix `A^T`):
            ///
            /// ```latex
            /// A^T_{ij} = A_{ji}
            /// ```
            pub fn transposition(&self) -> $name {
                let mut buf = Self::new();

                for r in 0..$n {
                    for c in 0..$n {
                        buf[(c, r)] = self[(r, c)];
                    }
                }

                buf
            }

            /// Whether the matrix has an inverse (nonzero determinant).
            pub fn is_invertible(&self) -> bool {
                self.determinant() != 0.0
            }

            /// Calculates the inverse of a matrix.
            ///
            /// A matrix with a zero determinant has no inverse; this returns
            /// `Error::DegenerateTransform` rather than a matrix of garbage.
            pub fn inverse(&self) -> Result<$name> {
                let det = self.determinant();
                if det == 0.0 {
                    return Err(Error::DegenerateTransform);
                }

                // Note the transposed index: the inverse is the adjugate
                // (transposed cofactor matrix) divided by the determinant.
                let mut inv = Self::new();
                for r in 0..$n {
                    for c in 0..$n {
                        inv[(c, r)] = self.cofactor(r, c) / det;
                    }
                }

                Ok(inv)
            }
        }

        /// Matrices are compared element-wise. Note that equality is
        /// approximate, as matrix elements are floating point numbers.
        impl PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                self.data.iter().zip(other.data.iter())
                    .all(|(x, y)| feq(*x, *y))
            }
        }

        /// Builds a matrix from its elements in row-major order.
        impl From<[f32; $n * $n]> for $name {
            fn from(data: [f32; $n * $n]) -> $name {
                $name { data }
            }
        }

        impl Index<(usize, usize)> for $name {
            type Output = f32;

            fn index(&self, index: (usize, usize)) -> &f32 {
                &self.data[(index.0 * $n) + index.1]
            }
        }

        impl IndexMut<(usize, usize)> for $name {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut f32 {
                &mut self.data[(index.0 * $n) + index.1]
            }
        }

        /// Multiplication between two matrices.
        ///
        /// Note that matrix multiplication is not commutative; in other
        /// words, for matrix `A` and matrix `B`, `A * B` is not necessarily
        /// equal to `B * A`.
        impl Mul<$name> for $name {
            type Output = $name;

            fn mul(self, other: $name) -> $name {
                let mut res = $name::new();

                for r in 0..$n {
                    for c in 0..$n {
                        res[(r, c)] = (0..$n)
                            .map(|k| self[(r, k)] * other[(k, c)])
                            .sum();
                    }
                }

                res
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for r in 0..$n {
                    write!(f, "|")?;
                    for c in 0..$n {
                        write!(f, " {} |", self[(r, c)])?;
                    }

                    // Don't put a newline on the final row (allow the user to
                    // do that)
                    if r != $n - 1 {
                        writeln!(f)?;
                    }
                }

                Ok(())
            }
        }
    };
}

square_matrix!(Matrix2D, 2);
square_matrix!(Matrix3D, 3);
square_matrix!(Matrix4D, 4);

/// Returns the sign applied to a minor to produce its cofactor.
fn cofactor_sign(row: usize, col: usize) -> f32 {
    if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
}

impl Matrix2D {
    /// Returns the minor of a `Matrix2D` at row and column.
    ///
    /// Removing a row and column from a 2x2 matrix leaves a single element,
    /// which is its own determinant.
    pub fn minor(&self, row: usize, col: usize) -> f32 {
        self[(1 - row, 1 - col)]
    }

    /// Returns the cofactor of a `Matrix2D` at row and column.
    pub fn cofactor(&self, row: usize, col: usize) -> f32 {
        self.minor(row, col) * cofactor_sign(row, col)
    }

    /// Calculates the determinant of a `Matrix2D`.
    pub fn determinant(&self) -> f32 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

impl Matrix3D {
    /// Returns the submatrix of a `Matrix3D`.
    ///
    /// A submatrix can be thought of as a matrix which "eliminates" a row and
    /// column of a larger matrix. For example, given the following 3x3 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0, 2.0,
    ///     3.0, 1.0, 0.0,
    ///     1.0, 1.0, 1.0
    /// ]
    /// ```
    ///
    /// The corresponding submatrix for `row == 1`, `col == 2` (assuming zero
    /// index), would be a 2x2 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0,
    ///     1.0, 1.0
    /// ]
    /// ```
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix2D {
        let mut buf: [f32; 4] = [0.0; 4];
        let mut count = 0;

        for r in 0..3 {
            for c in 0..3 {
                if !(r == row || c == col) {
                    buf[count] = self[(r, c)];
                    count += 1;
                }
            }
        }

        Matrix2D { data: buf }
    }

    /// Returns the minor of a `Matrix3D` at row and column.
    ///
    /// The "minor" is the determinant of the submatrix at `row` and `col`. See
    /// the documentation for `submatrix` for what this means.
    pub fn minor(&self, row: usize, col: usize) -> f32 {
        self.submatrix(row, col).determinant()
    }

    /// Returns the cofactor of a `Matrix3D` at row and column.
    ///
    /// The "cofactor" is the minor of a matrix, negated according to the
    /// "cofactor matrix." Basically, if the sum of row and column is even,
    /// the minor remains positive; if the sum is odd, the minor is negated.
    pub fn cofactor(&self, row: usize, col: usize) -> f32 {
        self.minor(row, col) * cofactor_sign(row, col)
    }

    /// Calculates the determinant of a Matrix3D.
    pub fn determinant(&self) -> f32 {
        (0..3).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }
}

impl Matrix4D {
    /// Instantiates a 4x4 translation matrix.
    ///
    /// This matrix offsets a point by `x`, `y` and `z`. Vectors are left
    /// untouched.
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Instantiates a 4x4 scaling matrix.
    ///
    /// This matrix scales vectors or points by `x`, `y` and `z` along the X, Y
    /// and Z axes, respectively.
    pub fn scaling(x: f32, y: f32, z: f32) -> Matrix4D {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the X axis.
    ///
    /// Rotations follow the right-hand rule. Assumes that parameter `r` is in
    /// radians.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_tracer::tuple::Tuple4D;
    /// # use prism_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(0.0, 1.0, 0.0);
    /// let m = Matrix4D::rotation_x(std::f32::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f32) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Y axis.
    pub fn rotation_y(r: f32) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Z axis.
    pub fn rotation_z(r: f32) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 shearing matrix.
    ///
    /// Each parameter moves one coordinate in proportion to another. For
    /// example, `xy` moves `x` in proportion to `y`, and `zx` moves `z` in
    /// proportion to `x`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use prism_tracer::tuple::Tuple4D;
    /// # use prism_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(2.0, 3.0, 4.0);
    /// let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * point, Tuple4D::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f32, xz: f32, yx: f32, yz: f32, zx: f32, zy: f32)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Generates a view transformation.
    ///
    /// The view transform manipulates the world from the perspective of an eye,
    /// The `from` parameter is where the eye is, the `to` parameter is where
    /// the eye is looking, and the `up` parameter indicates where "up" is in
    /// the world.
    ///
    /// A "default" orientation fixes the eye at the origin, looking at a screen
    /// one unit "deep." The `up` vector points conventionally up, with `y=1`.
    ///
    /// Note that the view transformation moves the *world* with respect to the
    /// eye, not the other way around.
    ///
    /// Fails with `Error::InvalidOperand` if `from == to` or `up` is zero.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D)
        -> Result<Matrix4D> {
        let forward = (to - from).normalize()?;
        let left = forward.cross(&up.normalize()?);
        let true_up = left.cross(&forward);

        let mut orientation = Matrix4D::identity();
        orientation[(0, 0)] = left.x;
        orientation[(0, 1)] = left.y;
        orientation[(0, 2)] = left.z;

        orientation[(1, 0)] = true_up.x;
        orientation[(1, 1)] = true_up.y;
        orientation[(1, 2)] = true_up.z;

        orientation[(2, 0)] = -forward.x;
        orientation[(2, 1)] = -forward.y;
        orientation[(2, 2)] = -forward.z;

        Ok(orientation * Matrix4D::translation(-from.x, -from.y, -from.z))
    }

    /// Returns this transform followed by a translation.
    pub fn translated(&self, x: f32, y: f32, z: f32) -> Matrix4D {
        Matrix4D::translation(x, y, z) * *self
    }

    /// Returns this transform followed by a scaling.
    pub fn scaled(&self, x: f32, y: f32, z: f32) -> Matrix4D {
        Matrix4D::scaling(x, y, z) * *self
    }

    /// Returns this transform followed by a rotation about the X axis.
    pub fn rotated_x(&self, r: f32) -> Matrix4D {
        Matrix4D::rotation_x(r) * *self
    }

    /// Returns this transform followed by a rotation about the Y axis.
    pub fn rotated_y(&self, r: f32) -> Matrix4D {
        Matrix4D::rotation_y(r) * *self
    }

    /// Returns this transform followed by a rotation about the Z axis.
    pub fn rotated_z(&self, r: f32) -> Matrix4D {
        Matrix4D::rotation_z(r) * *self
    }

    /// Returns this transform followed by a shear.
    pub fn sheared(&self, xy: f32, xz: f32, yx: f32, yz: f32, zx: f32, zy: f32)
        -> Matrix4D {
        Matrix4D::shearing(xy, xz, yx, yz, zx, zy) * *self
    }

    /// Appends a translation in-place. See `translated`.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Matrix4D {
        *self = self.translated(x, y, z);
        self
    }

    /// Appends a scaling in-place. See `scaled`.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Matrix4D {
        *self = self.scaled(x, y, z);
        self
    }

    /// Appends a rotation about the X axis in-place. See `rotated_x`.
    pub fn rotate_x(&mut self, r: f32) -> &mut Matrix4D {
        *self = self.rotated_x(r);
        self
    }

    /// Appends a rotation about the Y axis in-place. See `rotated_y`.
    pub fn rotate_y(&mut self, r: f32) -> &mut Matrix4D {
        *self = self.rotated_y(r);
        self
    }

    /// Appends a rotation about the Z axis in-place. See `rotated_z`.
    pub fn rotate_z(&mut self, r: f32) -> &mut Matrix4D {
        *self = self.rotated_z(r);
        self
    }

    /// Appends a shear in-place. See `sheared`.
    pub fn shear(&mut self, xy: f32, xz: f32, yx: f32, yz: f32, zx: f32,
        zy: f32) -> &mut Matrix4D {
        *self = self.sheared(xy, xz, yx, yz, zx, zy);
        self
    }

    /// Returns the submatrix of a `Matrix4D`.
    ///
    /// See `Matrix3D::submatrix`; the row and column are removed, leaving a
    /// 3x3 matrix.
    pub fn submatrix(&self, row: usize, col: usize) -> Matrix3D {
        let mut buf: [f32; 9] = [0.0; 9];
        let mut count = 0;

        for r in 0..4 {
            for c in 0..4 {
                if !(r == row || c == col) {
                    buf[count] = self[(r, c)];
                    count += 1;
                }
            }
        }

        Matrix3D { data: buf }
    }

    /// Returns the minor of a `Matrix4D` at row and column.
    pub fn minor(&self, row: usize, col: usize) -> f32 {
        self.submatrix(row, col).determinant()
    }

    /// Returns the cofactor of a `Matrix4D` at row and column.
    pub fn cofactor(&self, row: usize, col: usize) -> f32 {
        self.minor(row, col) * cofactor_sign(row, col)
    }

    /// Calculates the determinant of a `Matrix4D`.
    pub fn determinant(&self) -> f32 {
        (0..4).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
    }
}

/// Multiplication between a matrix and a `Tuple4D`.
///
/// Note that `Tuple4D`s are multiplied on the right; this requirement is
/// somewhat arbitrary, but it matches the convention of a 4D vector having
/// 4 rows, 1 column.
///
/// # Examples
///
/// ```
/// # use prism_tracer::tuple::Tuple4D;
/// # use prism_tracer::matrix::Matrix4D;
/// let v = Tuple4D::vector(1.0, 4.0, 5.0);
/// let m = Matrix4D::scaling(2.0, 2.0, 2.0);
/// assert_eq!(m * v, Tuple4D::vector(2.0, 8.0, 10.0));
/// ```
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        let mut buf: [f32; 4] = Default::default();

        for (r, v) in buf.iter_mut().enumerate() {
            *v = self[(r, 0)] * other.x
                + self[(r, 1)] * other.y
                + self[(r, 2)] * other.z
                + self[(r, 3)] * other.w;
        }

        Tuple4D { x: buf[0], y: buf[1], z: buf[2], w: buf[3] }
    }
}

#[cfg(test)]
use std::f32::consts::PI;

#[test]
fn construct_and_index_4x4() {
    let m: Matrix4D = [  1.0,  2.0,  3.0,  4.0,
                         5.5,  6.5,  7.5,  8.5,
                         9.0, 10.0, 11.0, 12.0,
                        13.5, 14.5, 15.5, 16.5, ].into();

    assert_eq!(m[(0, 0)], 1.0);
    assert_eq!(m[(0, 3)], 4.0);
    assert_eq!(m[(1, 0)], 5.5);
    assert_eq!(m[(1, 2)], 7.5);
    assert_eq!(m[(2, 2)], 11.0);
    assert_eq!(m[(3, 0)], 13.5);
    assert_eq!(m[(3, 2)], 15.5);
}

#[test]
fn construct_and_index_small() {
    let m2: Matrix2D = [ -3.0, 5.0,
                          1.0, -2.0 ].into();
    let m3: Matrix3D = [ -3.0,  5.0,  0.0,
                          1.0, -2.0, -7.0,
                          0.0,  1.0,  1.0 ].into();

    assert_eq!(m2[(0, 1)], 5.0);
    assert_eq!(m2[(1, 0)], 1.0);
    assert_eq!(m3[(1, 1)], -2.0);
    assert_eq!(m3[(2, 2)], 1.0);
}

#[test]
fn equality_is_approximate() {
    let a: Matrix2D = [ 1.0, 2.0, 3.0, 4.0 ].into();
    let b: Matrix2D = [ 1.00001, 2.0, 3.0, 3.99999 ].into();
    let c: Matrix2D = [ 2.0, 3.0, 4.0, 5.0 ].into();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn multiply_matrices() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        5.0, 6.0, 7.0, 8.0,
                        9.0, 8.0, 7.0, 6.0,
                        5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix4D = [ -2.0, 1.0, 2.0,  3.0,
                         3.0, 2.0, 1.0, -1.0,
                         4.0, 3.0, 6.0,  5.0,
                         1.0, 2.0, 7.0,  8.0, ].into();

    let p: Matrix4D = [ 20.0, 22.0,  50.0,  48.0,
                        44.0, 54.0, 114.0, 108.0,
                        40.0, 58.0, 110.0, 102.0,
                        16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, p);
}

#[test]
fn multiply_matrix_by_tuple() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        2.0, 4.0, 4.0, 2.0,
                        8.0, 6.0, 4.0, 1.0,
                        0.0, 0.0, 0.0, 1.0, ].into();
    let t = Tuple4D::tuple(1.0, 2.0, 3.0, 1.0);

    assert_eq!(a * t, Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();
    let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i * t, t);
}

#[test]
fn transpose() {
     let a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                         9.0, 8.0, 0.0, 8.0,
                         1.0, 8.0, 5.0, 3.0,
                         0.0, 0.0, 5.0, 8.0, ].into();

     let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                         9.0, 8.0, 8.0, 0.0,
                         3.0, 0.0, 5.0, 5.0,
                         0.0, 8.0, 3.0, 8.0, ].into();

     assert_eq!(t, a.transposition());
     assert_eq!(t.transposition(), a);

     let mut b = a;
     b.transpose();
     assert_eq!(b, t);
}

#[test]
fn transpose_identity() {
    let i = Matrix4D::identity();
    assert_eq!(i, i.transposition());
}

#[test]
fn mat2_determinant() {
    let a: Matrix2D = [  1.0, 5.0,
                        -3.0, 2.0 ].into();

    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3D = [  1.0, 5.0,  0.0,
                        -3.0, 2.0,  7.0,
                         0.0, 6.0, -3.0, ].into();

    let s: Matrix2D = [ -3.0, 2.0,
                         0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
     let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                         -8.0, 5.0,  8.0, 6.0,
                         -1.0, 0.0,  8.0, 2.0,
                         -7.0, 1.0, -1.0, 1.0, ].into();

     let s: Matrix3D = [ -6.0,  1.0, 6.0,
                         -8.0,  8.0, 6.0,
                         -7.0, -1.0, 1.0, ].into();

     assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_cofactor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
     let a: Matrix3D = [  1.0, 2.0,  6.0,
                         -5.0, 8.0, -4.0,
                          2.0, 6.0,  4.0, ].into();

     assert_eq!(a.cofactor(0, 0), 56.0);
     assert_eq!(a.cofactor(0, 1), 12.0);
     assert_eq!(a.cofactor(0, 2), -46.0);
     assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
     let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                         -3.0,  1.0,  7.0,  3.0,
                          1.0,  2.0, -9.0,  6.0,
                         -6.0,  7.0,  7.0, -9.0, ].into();

     assert_eq!(a.cofactor(0, 0), 690.0);
     assert_eq!(a.cofactor(0, 1), 447.0);
     assert_eq!(a.cofactor(0, 2), 210.0);
     assert_eq!(a.cofactor(0, 3), 51.0);
     assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn mat4_invertibility() {
    let a: Matrix4D = [ 6.0,  4.0, 4.0,  4.0,
                        5.0,  5.0, 7.0,  6.0,
                        4.0, -9.0, 3.0, -7.0,
                        9.0,  1.0, 7.0, -6.0, ].into();

    let b: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                         9.0,  6.0,  2.0,  6.0,
                         0.0, -5.0,  1.0, -5.0,
                         0.0,  0.0,  0.0,  0.0, ].into();

    assert!(a.is_invertible());
    assert!(!b.is_invertible());
}

#[test]
fn singular_inverse_is_an_error() {
    let b: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                         9.0,  6.0,  2.0,  6.0,
                         0.0, -5.0,  1.0, -5.0,
                         0.0,  0.0,  0.0,  0.0, ].into();

    match b.inverse() {
        Err(Error::DegenerateTransform) => (),
        other => panic!("expected DegenerateTransform, got {:?}", other),
    }

    assert!(Matrix4D::scaling(0.0, 1.0, 1.0).inverse().is_err());
}

#[test]
fn mat2_and_mat3_inverse() {
    let a: Matrix2D = [ 4.0, 7.0,
                        2.0, 6.0 ].into();
    let a_inv: Matrix2D = [  0.6, -0.7,
                            -0.2,  0.4 ].into();

    assert_eq!(a.inverse().unwrap(), a_inv);
    assert_eq!(a * a.inverse().unwrap(), Matrix2D::identity());

    let b: Matrix3D = [ 1.0, 2.0, 3.0,
                        0.0, 1.0, 4.0,
                        5.0, 6.0, 0.0 ].into();
    let b_inv: Matrix3D = [ -24.0,  18.0,  5.0,
                             20.0, -15.0, -4.0,
                             -5.0,   4.0,  1.0 ].into();

    assert_eq!(b.inverse().unwrap(), b_inv);
}

#[test]
fn mat4_inverse() {
     let a: Matrix4D = [  8.0, -5.0,  9.0,  2.0,
                          7.0,  5.0,  6.0,  1.0,
                         -6.0,  0.0,  9.0,  6.0,
                         -3.0,  0.0, -9.0, -4.0, ].into();

     let i: Matrix4D = [ -0.15385, -0.15385, -0.28205, -0.53846,
                         -0.07692,  0.12308,  0.02564,  0.03077,
                          0.35897,  0.35897,  0.43590,  0.92308,
                         -0.69231, -0.69231, -0.76923, -1.92308, ].into();

     assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn mat4_inverse_of_general_matrix() {
     let a: Matrix4D = [ -5.0,  2.0,  6.0, -8.0,
                          1.0, -5.0,  1.0,  8.0,
                          7.0,  7.0, -6.0, -7.0,
                          1.0, -3.0,  7.0,  4.0, ].into();

     let b = a.inverse().unwrap();
     assert_eq!(a.determinant(), 532.0);
     assert_eq!(a.cofactor(2, 3), -160.0);
     assert!(crate::feq(b[(3, 2)], -160.0 / 532.0));
     assert_eq!(a.cofactor(3, 2), 105.0);
     assert!(crate::feq(b[(2, 3)], 105.0 / 532.0));
}

#[test]
fn mat4_inverse_mult() {
     let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                          3.0,  8.0,  2.0, -9.0,
                         -4.0,  4.0,  4.0,  1.0,
                         -6.0,  5.0, -1.0,  1.0, ].into();

     let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                         3.0, -1.0, 7.0, 0.0,
                         7.0,  0.0, 5.0, 4.0,
                         6.0, -2.0, 0.0, 5.0  ].into();

     let c = a * b;

     assert_eq!(a, c * b.inverse().unwrap());
     assert_eq!(a * a.inverse().unwrap(), Matrix4D::identity());
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 1.0, 7.0));
}

#[test]
fn mat4_translation_inverse() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0).inverse().unwrap();
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(-8.0, 7.0, 3.0));
}

#[test]
fn mat4_translation_vector() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-8.0, 18.0, 32.0));
}

#[test]
fn mat4_scaling_inverse() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0).inverse().unwrap();
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-2.0, 2.0, 2.0));
}

#[test]
fn mat4_scaling_reflection() {
    let transform = Matrix4D::scaling(-1.0, 1.0, 1.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotate_x() {
    let half_quarter = Matrix4D::rotation_x(PI / 4.0);
    let full_quarter = Matrix4D::rotation_x(PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(0.0, 2.0f32.sqrt() / 2.0, 2.0f32.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_x_inverse() {
    let half_quarter = Matrix4D::rotation_x(PI / 4.0).inverse().unwrap();
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(half_quarter * point,
        Tuple4D::point(0.0, 2.0f32.sqrt() / 2.0, -(2.0f32.sqrt()) / 2.0));
}

#[test]
fn mat4_rotate_y() {
    let half_quarter = Matrix4D::rotation_y(PI / 4.0);
    let full_quarter = Matrix4D::rotation_y(PI / 2.0);
    let point = Tuple4D::point(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(2.0f32.sqrt() / 2.0, 0.0, 2.0f32.sqrt() / 2.0));
}

#[test]
fn mat4_rotate_z() {
    let half_quarter = Matrix4D::rotation_z(PI / 4.0);
    let full_quarter = Matrix4D::rotation_z(PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(-2.0f32.sqrt() / 2.0, 2.0f32.sqrt() / 2.0, 0.0));
}

#[test]
fn mat4_shear_each_axis() {
    let point = Tuple4D::point(2.0, 3.0, 4.0);
    let cases = [
        (Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0), (5.0, 3.0, 4.0)),
        (Matrix4D::shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0), (6.0, 3.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0), (2.0, 5.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0), (2.0, 7.0, 4.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0), (2.0, 3.0, 6.0)),
        (Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0), (2.0, 3.0, 7.0)),
    ];

    for (m, (x, y, z)) in cases.iter() {
        assert_eq!(*m * point, Tuple4D::point(*x, *y, *z));
    }
}

#[test]
fn chained_transforms() {
    let a = Matrix4D::rotation_x(PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);

    let t = c * b * a;
    let p = Tuple4D::point(1.0, 0.0, 1.0);

    assert_eq!(t * p, Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn fluent_builders_apply_in_call_order() {
    let mut fluent = Matrix4D::identity();
    fluent.rotate_x(PI / 2.0)
        .scale(5.0, 5.0, 5.0)
        .translate(10.0, 5.0, 7.0);

    let value = Matrix4D::identity()
        .rotated_x(PI / 2.0)
        .scaled(5.0, 5.0, 5.0)
        .translated(10.0, 5.0, 7.0);

    let expected = Matrix4D::translation(10.0, 5.0, 7.0)
        * Matrix4D::scaling(5.0, 5.0, 5.0)
        * Matrix4D::rotation_x(PI / 2.0);

    assert_eq!(fluent, value);
    assert_eq!(fluent, expected);
    assert_eq!(fluent * Tuple4D::point(1.0, 0.0, 1.0),
        Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn fluent_builders_compose_with_existing_transform() {
    let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    let mut fluent = m;
    fluent.translate(1.0, 2.0, 3.0)
        .rotate_y(PI / 3.0)
        .rotate_z(PI / 6.0)
        .shear(0.0, 0.0, 0.5, 0.0, 0.0, 0.0);

    let expected = Matrix4D::shearing(0.0, 0.0, 0.5, 0.0, 0.0, 0.0)
        * Matrix4D::rotation_z(PI / 6.0)
        * Matrix4D::rotation_y(PI / 3.0)
        * Matrix4D::translation(1.0, 2.0, 3.0)
        * m;

    assert_eq!(fluent, expected);
}

#[test]
fn default_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, -1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::identity(),
        Matrix4D::view_transform(from, to, up).unwrap());
}

#[test]
fn positive_z_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(),
        Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple4D::point(0.0, 0.0, 8.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(),
        Matrix4D::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple4D::point(1.0, 3.0, 2.0);
    let to = Tuple4D::point(4.0, -2.0, 8.0);
    let up = Tuple4D::vector(1.0, 1.0, 0.0);

    let a: Matrix4D = [  -0.50709, 0.50709,  0.67612, -2.36643,
                          0.76772, 0.60609,  0.12122, -2.82843,
                         -0.35857, 0.59761, -0.71714,  0.00000,
                          0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix4D::view_transform(from, to, up).unwrap(), a);
}

#[test]
fn view_from_eye_to_itself_fails() {
    let eye = Tuple4D::point(1.0, 2.0, 3.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert!(Matrix4D::view_transform(eye, eye, up).is_err());
}
