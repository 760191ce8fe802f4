//! Per-candidate cost evaluation over the sensor-fusion snapshot.
//!
//! A candidate's score is the worst single-vehicle contribution, not the
//! sum: a behavior is only as good as its most threatening neighbor.

use crate::behavior::state::BehaviorState;
use crate::common::DetectedVehicle;
use crate::params::{
    BUFFER_DISTANCE, EDGE_PENALTY, LANE_COUNT, LANE_WIDTH, SPEED_LIMIT, TIME_STEP, VEHICLE_RADIUS,
};
use crate::track::lane_center;

/// Outcome of scoring one candidate behavior for one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateEvaluation {
    pub state: BehaviorState,
    pub cost: f64,
    pub collision: bool,
    pub too_close: bool,
}

/// Cycle-scoped inputs shared by every candidate evaluation
#[derive(Debug, Clone, Copy)]
pub struct CostContext<'a> {
    /// Ego longitudinal position, taken at the end of the remainder [m]
    pub ego_s: f64,
    /// Ego speed as reported by telemetry [mph]
    pub ego_speed: f64,
    /// Number of uncommitted path points carried from the previous cycle
    pub remainder_len: usize,
    pub vehicles: &'a [DetectedVehicle],
}

/// Score one candidate behavior.
///
/// Pure fold over the detected vehicles: each vehicle's contribution is
/// computed from scratch, the candidate cost is the maximum contribution
/// and the collision/too-close flags are the OR across vehicles. With no
/// vehicles the cost is zero, so selection degrades to the enumeration
/// order and keeps the lane.
pub fn evaluate_candidate(
    candidate: BehaviorState,
    lane: usize,
    ctx: &CostContext,
) -> CandidateEvaluation {
    let target_lane = lane as i64 + candidate.lane_offset();
    let off_road = target_lane < 0 || target_lane >= LANE_COUNT as i64;

    let mut worst = 0.0_f64;
    let mut collision = false;
    let mut too_close = false;

    for vehicle in ctx.vehicles {
        let mut contribution = 0.0;
        if off_road {
            contribution += EDGE_PENALTY;
        }

        // inefficiency: preferring faster lanes; the vehicle speed is m/s
        // from its velocity vector, the ego speed is telemetry mph
        let vehicle_speed = vehicle.speed();
        contribution += (2.0 * SPEED_LIMIT - vehicle_speed - ctx.ego_speed) / SPEED_LIMIT;

        // project the vehicle to where it will be once the remainder has
        // been driven out
        let projected_s = vehicle.s + ctx.remainder_len as f64 * TIME_STEP * vehicle_speed;

        let in_band =
            (vehicle.d - lane_center(target_lane)).abs() < VEHICLE_RADIUS + LANE_WIDTH / 2.0;
        if in_band && projected_s > ctx.ego_s {
            let gap = projected_s - ctx.ego_s;
            if gap < 2.0 * VEHICLE_RADIUS {
                collision = true;
                contribution += 1.0;
            } else if gap < BUFFER_DISTANCE {
                debug_assert!(gap > 0.0);
                too_close = true;
                contribution += 2.0 / (1.0 + (-2.0 * VEHICLE_RADIUS / gap).exp()) - 1.0;
            }
        }

        if contribution > worst {
            worst = contribution;
        }
    }

    CandidateEvaluation {
        state: candidate,
        cost: worst,
        collision,
        too_close,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BehaviorState::*;

    fn vehicle_at(s: f64, d: f64, vx: f64, vy: f64) -> DetectedVehicle {
        DetectedVehicle { id: 0, x: 0.0, y: 0.0, vx, vy, s, d }
    }

    fn ctx(vehicles: &[DetectedVehicle]) -> CostContext {
        CostContext { ego_s: 100.0, ego_speed: 40.0, remainder_len: 0, vehicles }
    }

    #[test]
    fn test_no_vehicles_costs_zero() {
        let eval = evaluate_candidate(KeepLane, 1, &ctx(&[]));
        assert_eq!(eval.cost, 0.0);
        assert!(!eval.collision);
        assert!(!eval.too_close);
    }

    #[test]
    fn test_edge_penalty_dominates() {
        // any vehicle present makes the off-road candidate pay the penalty
        let vehicles = [vehicle_at(500.0, 2.0, 20.0, 0.0)];
        let left_from_leftmost = evaluate_candidate(PrepareLeft, 0, &ctx(&vehicles));
        let keep = evaluate_candidate(KeepLane, 0, &ctx(&vehicles));
        assert!(left_from_leftmost.cost > keep.cost + EDGE_PENALTY - 1.0);
    }

    #[test]
    fn test_stopped_car_close_ahead_is_too_close() {
        // stopped vehicle 15 m ahead in the ego lane
        let vehicles = [vehicle_at(115.0, 6.0, 0.0, 0.0)];
        let keep = evaluate_candidate(KeepLane, 1, &ctx(&vehicles));
        assert!(keep.too_close);
        assert!(!keep.collision);

        // the adjacent lane carries no proximity term, only inefficiency
        let left = evaluate_candidate(PrepareLeft, 1, &ctx(&vehicles));
        assert!(!left.too_close);
        assert!(left.cost < keep.cost);
    }

    #[test]
    fn test_car_within_vehicle_diameter_is_collision() {
        // gap of 2 m, below 2 * VEHICLE_RADIUS
        let vehicles = [vehicle_at(102.0, 6.0, 0.0, 0.0)];
        let keep = evaluate_candidate(KeepLane, 1, &ctx(&vehicles));
        assert!(keep.collision);
        // collision adds a flat 1.0 on top of the inefficiency term
        let inefficiency = (2.0 * SPEED_LIMIT - 40.0) / SPEED_LIMIT;
        assert!((keep.cost - (inefficiency + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_worst_case_not_summed() {
        // two threats in the lane band; cost equals the worse alone, not
        // their sum
        let vehicles = [
            vehicle_at(120.0, 6.0, 0.0, 0.0),
            vehicle_at(112.0, 6.0, 0.0, 0.0),
        ];
        let both = evaluate_candidate(KeepLane, 1, &ctx(&vehicles));
        let worse_alone = evaluate_candidate(KeepLane, 1, &ctx(&vehicles[1..]));
        assert!((both.cost - worse_alone.cost).abs() < 1e-12);
    }

    #[test]
    fn test_flags_do_not_leak_across_candidates() {
        // vehicle in the ego lane only; the left candidate must stay clean
        let vehicles = [vehicle_at(110.0, 6.0, 0.0, 0.0)];
        let keep = evaluate_candidate(KeepLane, 1, &ctx(&vehicles));
        let left = evaluate_candidate(PrepareLeft, 1, &ctx(&vehicles));
        assert!(keep.too_close);
        assert!(!left.too_close);
        assert!(!left.collision);
    }

    #[test]
    fn test_remainder_projection_moves_vehicle_forward() {
        // fast vehicle just behind ego crosses ahead once projected
        let vehicles = [vehicle_at(99.0, 6.0, 25.0, 0.0)];
        let still = evaluate_candidate(KeepLane, 1, &ctx(&vehicles));
        assert!(!still.too_close);

        let projected = CostContext { remainder_len: 40, ..ctx(&vehicles) };
        let moving = evaluate_candidate(KeepLane, 1, &projected);
        // 99 + 40 * 0.02 * 25 = 119, inside the buffer band
        assert!(moving.too_close);
    }

    #[test]
    fn test_vehicle_behind_is_ignored() {
        let vehicles = [vehicle_at(90.0, 6.0, 0.0, 0.0)];
        let keep = evaluate_candidate(KeepLane, 1, &ctx(&vehicles));
        assert!(!keep.too_close);
        assert!(!keep.collision);
    }
}
