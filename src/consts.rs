// Runtime parameters
pub const CANVAS_WIDTH: usize = 125;
pub const CANVAS_HEIGHT: usize = 100;
pub const OUT_FILE: &'static str = "./out.ppm";

// Floating point comparisons
pub const EPSILON: f32 = 0.0001;

// Distance a hit point is pushed along its normal before casting shadow and
// reflection rays. Larger than `EPSILON` to stay clear of f32 noise.
pub const HIT_OFFSET_EPSILON: f32 = 0.001;

// Maximum recursion depths
pub const REFLECTION_RECURSION_DEPTH: usize = 5;
