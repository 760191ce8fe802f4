//! Behavior states and the persistent planner state.
//!
//! The state machine is a closed enumeration with a static transition
//! table, so an illegal successor is unrepresentable rather than a
//! runtime string-comparison bug.

use std::fmt;

use crate::params::{LANE_COUNT, SPEED_LIMIT};

/// Behavior of the ego vehicle for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorState {
    KeepLane,
    PrepareLeft,
    PrepareRight,
    LaneChangeLeft,
    LaneChangeRight,
}

impl BehaviorState {
    /// Legal successor states, in evaluation order.
    ///
    /// `KeepLane` leads the list for every state that allows it, so cost
    /// ties resolve to the most conservative behavior.
    pub fn successors(&self) -> &'static [BehaviorState] {
        use BehaviorState::*;
        match self {
            KeepLane => &[KeepLane, PrepareLeft, PrepareRight],
            PrepareLeft => &[KeepLane, PrepareLeft, LaneChangeLeft],
            PrepareRight => &[KeepLane, PrepareRight, LaneChangeRight],
            LaneChangeLeft => &[KeepLane, LaneChangeLeft],
            LaneChangeRight => &[KeepLane, LaneChangeRight],
        }
    }

    /// Lane index delta this behavior steers toward
    pub fn lane_offset(&self) -> i64 {
        use BehaviorState::*;
        match self {
            KeepLane => 0,
            PrepareLeft | LaneChangeLeft => -1,
            PrepareRight | LaneChangeRight => 1,
        }
    }

    /// Whether lane commitment happens on selecting this state
    pub fn commits_lane(&self) -> bool {
        matches!(self, BehaviorState::PrepareLeft | BehaviorState::PrepareRight)
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BehaviorState::KeepLane => "KL",
            BehaviorState::PrepareLeft => "PLCL",
            BehaviorState::PrepareRight => "PLCR",
            BehaviorState::LaneChangeLeft => "LCL",
            BehaviorState::LaneChangeRight => "LCR",
        };
        write!(f, "{}", name)
    }
}

/// The only state carried across cycles, passed in and returned by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerState {
    /// Current (or committed) lane index in [0, LANE_COUNT - 1]
    pub lane: usize,
    pub state: BehaviorState,
    /// Rate-limited target speed [mph]
    pub target_speed_mph: f64,
}

impl PlannerState {
    pub fn new(lane: usize) -> Self {
        Self {
            lane,
            state: BehaviorState::KeepLane,
            target_speed_mph: 0.0,
        }
    }

    /// Invariants every reachable state satisfies
    pub fn is_valid(&self) -> bool {
        self.lane < LANE_COUNT
            && self.target_speed_mph >= 0.0
            && self.target_speed_mph <= SPEED_LIMIT + crate::params::SPEED_STEP
    }
}

impl Default for PlannerState {
    fn default() -> Self {
        // the simulated vehicle spawns in the middle lane at rest
        Self::new(1)
    }
}
