use std::time::Instant;

use log::{ debug, info, warn };

use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;
use crate::world::World;
use crate::canvas::Canvas;
use crate::consts::REFLECTION_RECURSION_DEPTH;
use crate::error::{ Error, Result };

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. Based on camera parameters,
/// different perspectives can be produced.
///
/// The camera sits at the origin looking toward `-z`, with a canvas one unit
/// in front of it. Its transform (typically a view transformation) orients
/// the world relative to that canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    /// The angle describing "how much" the camera can see, in radians.
    pub field_of_view: f32,

    /// How many reflections a camera ray may follow.
    pub recursion_depth: usize,

    half_width: f32,
    half_height: f32,
    pixel_size: f32,

    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Camera {
    /// Creates a camera.
    ///
    /// Fails if either canvas dimension is zero, or if `transform` can't be
    /// inverted.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f32,
        transform: Matrix4D) -> Result<Camera> {
        if hsize == 0 || vsize == 0 {
            return Err(Error::InvalidOperand("camera canvas size is zero"));
        }

        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f32) / (vsize as f32);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = half_width * 2.0 / (hsize as f32);

        Ok(Camera {
            hsize,
            vsize,
            field_of_view,
            recursion_depth: REFLECTION_RECURSION_DEPTH,
            half_width,
            half_height,
            pixel_size,
            inverse: transform.inverse()?,
            transform,
        })
    }

    /// The size of one pixel on the canvas, in world units.
    pub fn pixel_size(&self) -> f32 {
        self.pixel_size
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Replaces the camera transform, caching its inverse.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Creates the world space ray through the center of a pixel.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Result<Ray4D> {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f32 + 0.5) * self.pixel_size;
        let yoffset = (py as f32 + 0.5) * self.pixel_size;

        // The untransformed coordinates of the pixel in world space. The
        // camera looks toward -z, so +x is to the *left*.
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Tuple4D::point(world_x, world_y, -1.0);
        let origin = self.inverse * Tuple4D::point(0.0, 0.0, 0.0);
        let direction = (pixel - origin).normalize()?;

        Ok(Ray4D::new(origin, direction))
    }

    /// Renders a world into a new canvas.
    ///
    /// Each pixel is traced exactly once, row by row.
    pub fn render(&self, w: &World) -> Result<Canvas> {
        if w.light.is_none() {
            warn!("world has no light; only reflections will be visible");
        }

        info!("rendering {}x{} image of {} objects", self.hsize, self.vsize,
            w.objects().len());
        let start = Instant::now();

        let mut image = Canvas::new(self.hsize, self.vsize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let ray = self.ray_for_pixel(x, y)?;
                let color = w.color_at(&ray, self.recursion_depth)?;
                image.write_pixel(x, y, &color);
            }

            debug!("rendered row {}/{}", y + 1, self.vsize);
        }

        info!("render finished in {:.2?}", start.elapsed());
        Ok(image)
    }
}

#[cfg(test)]
use std::f32::consts::PI;

#[test]
fn pixel_size_for_horizontal_canvas() {
    let c = Camera::new(200, 125, PI / 2.0, Matrix4D::identity()).unwrap();

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn pixel_size_for_vertical_canvas() {
    let c = Camera::new(125, 200, PI / 2.0, Matrix4D::identity()).unwrap();

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn degenerate_cameras_are_rejected() {
    assert!(Camera::new(0, 10, PI / 2.0, Matrix4D::identity()).is_err());
    assert!(Camera::new(10, 10, PI / 2.0, Matrix4D::scaling(0.0, 1.0, 1.0))
        .is_err());

    let mut c = Camera::new(10, 10, PI / 2.0, Matrix4D::identity()).unwrap();
    assert!(c.set_transform(Matrix4D::scaling(1.0, 0.0, 1.0)).is_err());
    assert_eq!(*c.transform(), Matrix4D::identity());
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix4D::identity()).unwrap();
    let r = c.ray_for_pixel(100, 50).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, PI / 2.0, Matrix4D::identity()).unwrap();
    let r = c.ray_for_pixel(0, 0).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let mut transform = Matrix4D::identity();
    transform.translate(0.0, -2.0, 5.0).rotate_y(PI / 4.0);

    let c = Camera::new(201, 101, PI / 2.0, transform).unwrap();
    let r = c.ray_for_pixel(100, 50).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Tuple4D::vector(2.0f32.sqrt() / 2.0, 0.0, -(2.0f32.sqrt() / 2.0)));
}

#[test]
fn render_world_with_camera() {
    use crate::color::Color;

    let w = World::example();
    let mut c = Camera::new(11, 11, PI / 2.0, Matrix4D::identity()).unwrap();

    let from = Tuple4D::point(0.0, 0.0, -5.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);
    c.set_transform(Matrix4D::view_transform(from, to, up).unwrap()).unwrap();

    let image = c.render(&w).unwrap();
    assert_eq!(image.width, 11);
    assert_eq!(image.height, 11);
    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn render_empty_world_is_black() {
    use crate::color::Color;

    let c = Camera::new(4, 3, PI / 3.0, Matrix4D::identity()).unwrap();
    let image = c.render(&World::new()).unwrap();

    assert!(image.pixels().all(|p| *p == Color::black()));
}
