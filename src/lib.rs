pub mod error;
pub mod float;
pub mod frame;
pub mod interaction;
pub mod material;
pub mod math;
pub mod options;
pub mod ray;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod spectra;
pub mod transform;
pub mod vecmath;

// For convenience, re-export.
pub use float::Float;
