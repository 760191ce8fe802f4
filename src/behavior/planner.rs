//! Candidate selection and the per-cycle state update.

use ordered_float::NotNan;
use tracing::{debug, info};

use crate::behavior::cost::{evaluate_candidate, CandidateEvaluation, CostContext};
use crate::behavior::state::PlannerState;
use crate::params::{LANE_COUNT, SPEED_LIMIT, SPEED_STEP};

/// Run the decision layer for one cycle.
///
/// Scores every legal successor of the current behavior, selects the
/// minimum-cost candidate (ties to the earliest enumerated, which is
/// always `KeepLane`), commits the lane on a prepare selection and
/// applies the rate-limited speed update from the winner's flags.
pub fn behavior_step(state: PlannerState, ctx: &CostContext) -> PlannerState {
    let evaluations: Vec<CandidateEvaluation> = state
        .state
        .successors()
        .iter()
        .map(|&candidate| evaluate_candidate(candidate, state.lane, ctx))
        .collect();

    for eval in &evaluations {
        debug!(
            candidate = %eval.state,
            cost = eval.cost,
            collision = eval.collision,
            too_close = eval.too_close,
            "candidate evaluated"
        );
    }

    // min_by_key keeps the first minimum, so ties favor KeepLane
    let winner = evaluations
        .iter()
        .min_by_key(|eval| NotNan::new(eval.cost).unwrap_or_else(|_| NotNan::new(f64::MAX).unwrap()))
        .copied()
        .expect("successor list is never empty");

    let mut next = state;
    if winner.state != state.state {
        info!(from = %state.state, to = %winner.state, cost = winner.cost, "behavior transition");
    }
    next.state = winner.state;

    // lane commitment happens at the prepare step, before the lateral
    // maneuver state; clamp keeps the invariant even if an off-road
    // candidate ever won past the edge penalty
    if winner.state.commits_lane() {
        let lane = (state.lane as i64 + winner.state.lane_offset())
            .clamp(0, LANE_COUNT as i64 - 1);
        next.lane = lane as usize;
    }

    // rate-limited speed update, one step per cycle
    if winner.too_close {
        next.target_speed_mph -= SPEED_STEP;
    } else if winner.collision {
        next.target_speed_mph -= 2.0 * SPEED_STEP;
    } else if next.target_speed_mph < SPEED_LIMIT {
        next.target_speed_mph += SPEED_STEP;
    }
    next.target_speed_mph = next.target_speed_mph.max(0.0);

    next
}
