pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;
pub mod color;

pub mod pattern;
pub mod light;
pub mod shape;
pub mod intersect;
pub mod world;
pub mod camera;

pub mod canvas;
pub mod scene;

pub use error::{ Error, Result };

use consts::EPSILON;

/// Approximate equality for floats, tolerant of accumulated transform error.
pub fn feq(left: f32, right: f32) -> bool {
    (left - right).abs() < EPSILON
}
