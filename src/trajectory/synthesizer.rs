//! Builds the committed path for one cycle.
//!
//! Two near anchors preserve heading continuity with the previous cycle's
//! path, three far anchors pull the curve onto the target lane center.
//! The spline is fitted in the reference frame of the stitch point so its
//! x axis is monotonic, then resampled at the fixed control time step.

use tracing::debug;

use crate::common::{PlannerResult, Point2D, Pose2D};
use crate::params::{ANCHOR_SPACING, HORIZON, MPH_PER_MPS, TIME_STEP};
use crate::track::{lane_center, Track};
use crate::trajectory::spline::CubicSpline;

/// Fixed-capacity output path; full at `HORIZON` points in normal operation
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedPath {
    points: Vec<Point2D>,
}

impl CommittedPath {
    pub fn new() -> Self {
        Self { points: Vec::with_capacity(HORIZON) }
    }

    /// Append a point; returns false once the horizon is full
    pub fn push(&mut self, point: Point2D) -> bool {
        if self.points.len() >= HORIZON {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= HORIZON
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

impl Default for CommittedPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Synthesize the committed path for one cycle.
///
/// `pose` is the ego pose with yaw in radians, `planning_s` the
/// longitudinal position the cycle plans from (end of the remainder when
/// one exists), `remainder` the uncommitted tail of the previous path.
pub fn synthesize(
    pose: Pose2D,
    planning_s: f64,
    remainder: &[Point2D],
    lane: usize,
    target_speed_mph: f64,
    track: &Track,
) -> PlannerResult<CommittedPath> {
    // near anchors: either a tangent pair through the current pose or the
    // last two remainder points, so the stitch point keeps its heading
    let (reference, near) = seed_anchors(pose, remainder);

    let mut anchors_x = Vec::with_capacity(5);
    let mut anchors_y = Vec::with_capacity(5);
    for anchor in near {
        let local = reference.to_local(anchor);
        anchors_x.push(local.x);
        anchors_y.push(local.y);
    }
    for step in 1..=3 {
        let s = planning_s + ANCHOR_SPACING * step as f64;
        let global = track.frenet_to_cartesian(s, lane_center(lane as i64));
        let local = reference.to_local(global);
        anchors_x.push(local.x);
        anchors_y.push(local.y);
    }

    let spline = CubicSpline::fit(&anchors_x, &anchors_y)?;

    let mut path = CommittedPath::new();
    for &point in remainder {
        if !path.push(point) {
            break;
        }
    }

    if target_speed_mph <= 0.0 {
        // cannot space points at zero speed; the served loop never gets
        // here because the speed update precedes synthesis
        debug!(len = path.len(), "non-positive target speed, emitting remainder only");
        return Ok(path);
    }

    // spacing that covers the lookahead chord in steps of one control
    // period at the target speed
    let target_x = ANCHOR_SPACING;
    let target_y = spline.evaluate(target_x);
    let chord = (target_x * target_x + target_y * target_y).sqrt();
    let n = chord / (TIME_STEP * target_speed_mph / MPH_PER_MPS);

    let mut local_x = 0.0;
    while !path.is_full() {
        local_x += target_x / n;
        let local = Point2D::new(local_x, spline.evaluate(local_x));
        path.push(reference.to_global(local));
    }

    Ok(path)
}

fn seed_anchors(pose: Pose2D, remainder: &[Point2D]) -> (Pose2D, [Point2D; 2]) {
    if remainder.len() < 2 {
        let prev = Point2D::new(pose.x - pose.yaw.cos(), pose.y - pose.yaw.sin());
        (pose, [prev, pose.position()])
    } else {
        let last = remainder[remainder.len() - 1];
        let prev = remainder[remainder.len() - 2];
        let yaw = prev.bearing_to(&last);
        (Pose2D::new(last.x, last.y, yaw), [prev, last])
    }
}
