//! Planning parameters shared between the behavior and trajectory layers.
//!
//! Speeds are handled in mph because the telemetry reports them that way;
//! all geometry is metric. `MPH_PER_MPS` is the single conversion point.

/// Maximum s value before the track wraps back to 0 [m]
pub const TRACK_LENGTH: f64 = 6945.554;
/// Lane width [m]
pub const LANE_WIDTH: f64 = 4.0;
/// Number of lanes; lane 0 is the leftmost
pub const LANE_COUNT: usize = 3;

/// Speed the planner accelerates toward [mph]
pub const SPEED_LIMIT: f64 = 49.5;
/// Rate limit on target speed changes, one step per cycle [mph]
pub const SPEED_STEP: f64 = 0.224;
/// mph per m/s conversion divisor
pub const MPH_PER_MPS: f64 = 2.24;

/// Occupied radius around every vehicle [m]
pub const VEHICLE_RADIUS: f64 = 2.0;
/// Longitudinal gap below which a leading vehicle is too close [m]
pub const BUFFER_DISTANCE: f64 = 30.0;
/// Cost for a candidate that would leave the road
pub const EDGE_PENALTY: f64 = 10.0;

/// Time between consecutive committed path points [s]
pub const TIME_STEP: f64 = 0.02;
/// Fixed capacity of the committed path [points]
pub const HORIZON: usize = 50;
/// Spacing of the far spline anchors ahead of the ego vehicle [m]
pub const ANCHOR_SPACING: f64 = 30.0;
