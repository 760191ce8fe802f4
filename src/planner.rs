//! One full planning cycle: behavior step, then trajectory synthesis.
//!
//! Pure with respect to its inputs: identical `(PlannerState, telemetry)`
//! pairs produce identical `(PlannerState, CommittedPath)` outputs, which
//! is what makes the planner testable without a transport.

use tracing::debug;

use crate::behavior::cost::CostContext;
use crate::behavior::{behavior_step, PlannerState};
use crate::common::{PlannerResult, Pose2D};
use crate::telemetry::Telemetry;
use crate::track::Track;
use crate::trajectory::{synthesize, CommittedPath};

/// Consume one telemetry snapshot and produce the next committed path
/// together with the updated planner state.
pub fn plan_cycle(
    state: PlannerState,
    track: &Track,
    telemetry: &Telemetry,
) -> PlannerResult<(PlannerState, CommittedPath)> {
    let remainder = telemetry.remainder();
    let vehicles = telemetry.vehicles();

    // plan from the end of the uncommitted tail when one exists, so the
    // freshly synthesized points continue where the last cycle left off
    let planning_s = if remainder.is_empty() { telemetry.s } else { telemetry.end_path_s };

    let ctx = CostContext {
        ego_s: planning_s,
        ego_speed: telemetry.speed,
        remainder_len: remainder.len(),
        vehicles: &vehicles,
    };
    let next = behavior_step(state, &ctx);

    debug!(
        state = %next.state,
        lane = next.lane,
        target_speed_mph = next.target_speed_mph,
        remainder = remainder.len(),
        vehicles = vehicles.len(),
        "cycle planned"
    );

    let pose = Pose2D::new(telemetry.x, telemetry.y, telemetry.yaw.to_radians());
    let path = synthesize(
        pose,
        planning_s,
        &remainder,
        next.lane,
        next.target_speed_mph,
        track,
    )?;

    Ok((next, path))
}
