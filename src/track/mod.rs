//! Track model: the static waypoint table and the Frenet projection.
//!
//! The track is a single closed loop described by sparse centerline
//! waypoints ordered by increasing s. It is loaded once at startup and
//! read-only afterwards.

use std::f64::consts::FRAC_PI_2;
use std::fs;
use std::path::Path;

use crate::common::{PlannerError, PlannerResult, Point2D};
use crate::params::{LANE_WIDTH, TRACK_LENGTH};

/// One centerline waypoint; (dx, dy) is the unit lane-normal at the point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub s: f64,
    pub dx: f64,
    pub dy: f64,
}

/// Immutable track geometry
#[derive(Debug, Clone)]
pub struct Track {
    waypoints: Vec<Waypoint>,
    track_length: f64,
}

/// Cartesian center of a lane as a lateral offset [m]; lane 0 is leftmost.
///
/// Accepts out-of-range indices because candidate evaluation looks at
/// lanes one step beyond the road edge.
pub fn lane_center(lane: i64) -> f64 {
    LANE_WIDTH / 2.0 + LANE_WIDTH * lane as f64
}

impl Track {
    /// Build a track from an ordered waypoint table
    pub fn new(waypoints: Vec<Waypoint>, track_length: f64) -> PlannerResult<Self> {
        if waypoints.len() < 2 {
            return Err(PlannerError::MapError(format!(
                "need at least 2 waypoints, got {}",
                waypoints.len()
            )));
        }
        if waypoints.windows(2).any(|w| w[1].s <= w[0].s) {
            return Err(PlannerError::MapError(
                "waypoint s values must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { waypoints, track_length })
    }

    /// Load the highway map: one `x y s dx dy` record per line
    pub fn from_csv<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let contents = fs::read_to_string(path)?;
        let mut waypoints = Vec::new();
        for (lineno, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<f64> = line
                .split_whitespace()
                .map(|f| {
                    f.parse::<f64>().map_err(|e| {
                        PlannerError::MapError(format!("line {}: {}", lineno + 1, e))
                    })
                })
                .collect::<PlannerResult<_>>()?;
            if fields.len() != 5 {
                return Err(PlannerError::MapError(format!(
                    "line {}: expected 5 fields, got {}",
                    lineno + 1,
                    fields.len()
                )));
            }
            waypoints.push(Waypoint {
                x: fields[0],
                y: fields[1],
                s: fields[2],
                dx: fields[3],
                dy: fields[4],
            });
        }
        Self::new(waypoints, TRACK_LENGTH)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn track_length(&self) -> f64 {
        self.track_length
    }

    /// Project Frenet coordinates onto the Cartesian plane.
    ///
    /// Interpolates along the segment between the two nearest waypoints,
    /// then offsets d along the segment's right-hand perpendicular.
    /// s wraps at the track length.
    pub fn frenet_to_cartesian(&self, s: f64, d: f64) -> Point2D {
        let s = s.rem_euclid(self.track_length);

        // index of the last waypoint at or before s; s ahead of the final
        // waypoint falls on the closing segment back to the first
        let idx = self.waypoints.partition_point(|w| w.s <= s);
        let prev = if idx == 0 { self.waypoints.len() - 1 } else { idx - 1 };
        let next = (prev + 1) % self.waypoints.len();

        let wp = &self.waypoints[prev];
        let wn = &self.waypoints[next];
        let heading = (wn.y - wp.y).atan2(wn.x - wp.x);

        let mut seg = s - wp.s;
        if seg < 0.0 {
            seg += self.track_length;
        }
        let seg_x = wp.x + seg * heading.cos();
        let seg_y = wp.y + seg * heading.sin();

        let perp = heading - FRAC_PI_2;
        Point2D::new(seg_x + d * perp.cos(), seg_y + d * perp.sin())
    }
}
