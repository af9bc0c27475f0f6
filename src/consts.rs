// Runtime parameters
pub const DEFAULT_THREADS: usize = 1;
pub const SCENE_EXTENSION: &'static str = ".scene";
pub const IMAGE_EXTENSION: &'static str = ".ppm";

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Offset applied to shadow ray origins along the light direction. Zero keeps
// the unbiased behaviour, where a surface point may be tested against its
// own sphere.
pub const DEFAULT_SHADOW_BIAS: f64 = 0.0;

// Material limits
pub const MAX_SHININESS: f64 = 100.0;
pub const MAX_REFLECTION: f64 = 1.0;
