//! Trajectory synthesis: spline fitting through anchor points and
//! fixed-timestep resampling into the committed path.

pub mod spline;
pub mod synthesizer;

pub use spline::CubicSpline;
pub use synthesizer::{synthesize, CommittedPath};
