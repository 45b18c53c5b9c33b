use crate::feq;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::error::Result;

/// The procedural function a `Pattern` evaluates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PatternType {
    /// The primary color everywhere.
    Solid,
    /// Alternating bands of color along the X axis.
    Stripe,
    /// Linear blend from primary to secondary across each unit of X.
    Gradient,
    /// Concentric rings about the Y axis.
    Ring,
    /// A 3D checkerboard of unit cubes.
    Checker,
}

/// A procedural color pattern.
///
/// Patterns are evaluated in their own "pattern space." A point on a shape is
/// first moved into object space (through the shape's inverse transform), and
/// then into pattern space (through the pattern's inverse transform). This
/// lets a pattern be scaled or rotated independently of the shape it is
/// applied to.
///
/// # Examples
///
/// ```
/// # use prism_tracer::tuple::Tuple4D;
/// # use prism_tracer::color::Color;
/// # use prism_tracer::pattern::Pattern;
/// let pattern = Pattern::stripe(Color::white(), Color::black());
/// assert_eq!(pattern.pattern_at(Tuple4D::point(0.9, 0.0, 0.0)), Color::white());
/// assert_eq!(pattern.pattern_at(Tuple4D::point(1.0, 0.0, 0.0)), Color::black());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pattern {
    pub ty: PatternType,
    pub primary: Color,
    pub secondary: Color,
    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Pattern {
    /// Creates a pattern with an identity transform.
    pub fn new(ty: PatternType, primary: Color, secondary: Color) -> Pattern {
        Pattern {
            ty,
            primary,
            secondary,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    pub fn solid(color: Color) -> Pattern {
        Pattern::new(PatternType::Solid, color, color)
    }

    pub fn stripe(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternType::Stripe, primary, secondary)
    }

    pub fn gradient(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternType::Gradient, primary, secondary)
    }

    pub fn ring(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternType::Ring, primary, secondary)
    }

    pub fn checker(primary: Color, secondary: Color) -> Pattern {
        Pattern::new(PatternType::Checker, primary, secondary)
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Sets the pattern transform, caching its inverse.
    ///
    /// Fails with `Error::DegenerateTransform` (leaving the pattern
    /// untouched) if the transform can't be inverted.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Builder flavor of `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D) -> Result<Pattern> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Evaluates the pattern at a point in pattern space.
    pub fn pattern_at(&self, p: Tuple4D) -> Color {
        match self.ty {
            PatternType::Solid => self.primary,
            PatternType::Stripe => self.alternate(p.x.floor()),
            PatternType::Gradient => {
                let fraction = p.x - p.x.floor();
                self.primary + (self.secondary - self.primary) * fraction
            },
            PatternType::Ring => {
                self.alternate((p.x * p.x + p.z * p.z).sqrt().floor())
            },
            PatternType::Checker => {
                self.alternate(p.x.floor() + p.y.floor() + p.z.floor())
            },
        }
    }

    /// Evaluates the pattern at a world space point on `shape`.
    pub fn pattern_at_shape(&self, shape: &Shape, world_point: Tuple4D)
        -> Color {
        let object_point = shape.world_to_object(world_point);
        self.pattern_at(self.inverse * object_point)
    }

    /// Primary when `n` (an integer-valued float) is even, else secondary.
    fn alternate(&self, n: f32) -> Color {
        if feq(n.rem_euclid(2.0), 0.0) {
            self.primary
        } else {
            self.secondary
        }
    }
}

#[cfg(test)]
const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
#[cfg(test)]
const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

#[test]
fn solid_pattern_is_constant() {
    let pattern = Pattern::solid(Color::red());

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)), Color::red());
    assert_eq!(pattern.pattern_at(Tuple4D::point(-3.5, 2.2, 9.1)),
        Color::red());
}

#[test]
fn stripe_pattern_is_constant_along_y_and_z() {
    let pattern = Pattern::stripe(WHITE, BLACK);

    for i in 0..3 {
        let i = i as f32;
        assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, i, 0.0)), WHITE);
        assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, i)), WHITE);
    }
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = Pattern::stripe(WHITE, BLACK);

    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.0, 0.0, 0.0)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point( 0.9, 0.0, 0.0)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point( 1.0, 0.0, 0.0)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(-0.1, 0.0, 0.0)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.0, 0.0, 0.0)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(-1.1, 0.0, 0.0)), WHITE);
}

#[test]
fn gradient_interpolates_between_colors() {
    let pattern = Pattern::gradient(WHITE, BLACK);

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.25, 0.0, 0.0)),
        Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.5, 0.0, 0.0)),
        Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.75, 0.0, 0.0)),
        Color::rgb(0.25, 0.25, 0.25));
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = Pattern::ring(WHITE, BLACK);

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.0, 0.0, 0.0)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.0)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.708, 0.0, 0.708)), BLACK);
}

#[test]
fn checkers_repeat_in_each_dimension() {
    let pattern = Pattern::checker(WHITE, BLACK);

    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.0)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.99, 0.0, 0.0)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.01, 0.0, 0.0)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.99, 0.0)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 1.01, 0.0)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 0.99)), WHITE);
    assert_eq!(pattern.pattern_at(Tuple4D::point(0.0, 0.0, 1.01)), BLACK);
    assert_eq!(pattern.pattern_at(Tuple4D::point(1.5, 0.0, 1.5)), WHITE);
}

#[test]
fn pattern_with_object_transformation() {
    let shape = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let pattern = Pattern::stripe(WHITE, BLACK);

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(1.5, 0.0, 0.0)),
        WHITE);
}

#[test]
fn pattern_with_pattern_transformation() {
    let shape = Shape::sphere();
    let pattern = Pattern::stripe(WHITE, BLACK)
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(1.5, 0.0, 0.0)),
        WHITE);
}

#[test]
fn pattern_with_both_transformations() {
    let shape = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let pattern = Pattern::stripe(WHITE, BLACK)
        .with_transform(Matrix4D::translation(0.5, 0.0, 0.0))
        .unwrap();

    assert_eq!(pattern.pattern_at_shape(&shape, Tuple4D::point(2.5, 0.0, 0.0)),
        WHITE);
}

#[test]
fn singular_pattern_transform_is_rejected() {
    let mut pattern = Pattern::checker(WHITE, BLACK);

    assert!(pattern.set_transform(Matrix4D::scaling(1.0, 0.0, 1.0)).is_err());
    assert_eq!(*pattern.transform(), Matrix4D::identity());
}
