//! highway_planner - motion-planning core for a simulated highway vehicle
//!
//! Each planning cycle consumes the ego pose, the remaining uncommitted
//! trajectory and nearby-vehicle telemetry, and emits a smooth,
//! continuity-preserving trajectory for the next few seconds of motion.
//! The decision layer is a behavior state machine scored with a worst-case
//! cost model; the synthesis layer fits a spline through anchor points and
//! resamples it at a fixed time step.

// Core modules
pub mod common;
pub mod params;

// Planning modules
pub mod track;
pub mod behavior;
pub mod trajectory;
pub mod planner;

// Transport glue
pub mod telemetry;
pub mod server;

// Re-export common types for convenience
pub use common::{Point2D, Pose2D, DetectedVehicle};
pub use common::{PlannerError, PlannerResult};
pub use behavior::{BehaviorState, PlannerState};
pub use track::Track;
pub use trajectory::CommittedPath;
pub use planner::plan_cycle;
