//! Wire messages exchanged with the simulator.
//!
//! Frames are socket.io style: a `42` prefix followed by a JSON array of
//! `[event, payload]`. Anything that is not a well-formed telemetry event
//! is treated as "no telemetry this cycle", never as a fatal error.

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::common::{DetectedVehicle, Point2D};
use crate::trajectory::CommittedPath;

/// Message-event prefix of the simulator protocol
const EVENT_PREFIX: &str = "42";

/// One inbound telemetry snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct Telemetry {
    pub x: f64,
    pub y: f64,
    pub s: f64,
    pub d: f64,
    /// Ego heading [degrees]
    pub yaw: f64,
    /// Ego speed [mph]
    pub speed: f64,
    pub previous_path_x: Vec<f64>,
    pub previous_path_y: Vec<f64>,
    pub end_path_s: f64,
    pub end_path_d: f64,
    /// Rows of `[id, x, y, vx, vy, s, d]`
    pub sensor_fusion: Vec<[f64; 7]>,
}

impl Telemetry {
    /// Uncommitted path points carried over from the previous cycle
    pub fn remainder(&self) -> Vec<Point2D> {
        izip!(&self.previous_path_x, &self.previous_path_y)
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }

    pub fn vehicles(&self) -> Vec<DetectedVehicle> {
        self.sensor_fusion
            .iter()
            .map(|row| DetectedVehicle {
                id: row[0] as i64,
                x: row[1],
                y: row[2],
                vx: row[3],
                vy: row[4],
                s: row[5],
                d: row[6],
            })
            .collect()
    }
}

/// Outbound committed path
#[derive(Debug, Clone, Serialize)]
pub struct PathMessage {
    pub next_x: Vec<f64>,
    pub next_y: Vec<f64>,
}

/// Extract a telemetry snapshot from a raw frame.
///
/// Returns `None` for non-event frames, non-telemetry events (manual
/// driving) and malformed payloads.
pub fn parse_frame(raw: &str) -> Option<Telemetry> {
    let body = raw.strip_prefix(EVENT_PREFIX)?;
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let event = value.get(0)?.as_str()?;
    if event != "telemetry" {
        return None;
    }
    serde_json::from_value(value.get(1)?.clone()).ok()
}

/// Encode the committed path as a control frame
pub fn control_frame(path: &CommittedPath) -> String {
    let message = PathMessage { next_x: path.xs(), next_y: path.ys() };
    // PathMessage has no non-serializable fields, to_string cannot fail
    format!(
        "{}[\"control\",{}]",
        EVENT_PREFIX,
        serde_json::to_string(&message).expect("path message serializes")
    )
}

/// Idle acknowledgement for cycles without telemetry
pub fn manual_frame() -> String {
    format!("{}[\"manual\",{{}}]", EVENT_PREFIX)
}
