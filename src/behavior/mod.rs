//! Behavior planning: the lane-change state machine and its cost model.

pub mod state;
pub mod cost;
pub mod planner;

pub use state::{BehaviorState, PlannerState};
pub use cost::CandidateEvaluation;
pub use planner::behavior_step;
