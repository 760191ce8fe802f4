//! Synchronous WebSocket service around the planner.
//!
//! One connection at a time, one planning cycle per inbound text frame.
//! Cycles are strictly serialized by the blocking read loop, so the
//! planner state needs no locking. The state survives reconnects: it
//! belongs to the process, not the connection.

use std::net::{TcpListener, TcpStream};

use tracing::{info, warn};
use tungstenite::{accept, Message, WebSocket};

use crate::behavior::PlannerState;
use crate::common::{PlannerError, PlannerResult};
use crate::planner::plan_cycle;
use crate::telemetry::{control_frame, manual_frame, parse_frame};
use crate::track::Track;

/// Default port of the simulator protocol
pub const DEFAULT_PORT: u16 = 4567;

pub struct PlannerServer {
    track: Track,
    state: PlannerState,
}

impl PlannerServer {
    pub fn new(track: Track) -> Self {
        Self { track, state: PlannerState::default() }
    }

    /// Bind the port and serve until the process is killed.
    ///
    /// A failed bind is fatal and reported to the caller; a dropped
    /// connection is not, the listener simply accepts the next one.
    pub fn run(&mut self, port: u16) -> PlannerResult<()> {
        let listener = TcpListener::bind(("0.0.0.0", port)).map_err(|e| {
            PlannerError::TransportError(format!("cannot bind port {}: {}", port, e))
        })?;
        info!(port, "listening");

        for stream in listener.incoming() {
            let stream = match stream {
                Ok(stream) => stream,
                Err(e) => {
                    warn!(error = %e, "accept failed");
                    continue;
                }
            };
            match accept(stream) {
                Ok(socket) => {
                    info!("simulator connected");
                    if let Err(e) = self.serve_connection(socket) {
                        warn!(error = %e, "connection lost");
                    }
                    info!("simulator disconnected");
                }
                Err(e) => warn!(error = %e, "websocket handshake failed"),
            }
        }
        Ok(())
    }

    fn serve_connection(&mut self, mut socket: WebSocket<TcpStream>) -> PlannerResult<()> {
        loop {
            let message = match socket.read() {
                Ok(message) => message,
                Err(tungstenite::Error::ConnectionClosed)
                | Err(tungstenite::Error::AlreadyClosed) => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            let raw = match message {
                Message::Text(raw) => raw,
                Message::Close(_) => return Ok(()),
                _ => continue,
            };
            let reply = self.handle_frame(&raw);
            socket.send(Message::Text(reply))?;
        }
    }

    /// Process one inbound frame and produce the reply frame.
    ///
    /// Frames without usable telemetry get an idle acknowledgement; so
    /// does a cycle that fails internally, since a missed cycle is
    /// recoverable while a dead connection is not.
    pub fn handle_frame(&mut self, raw: &str) -> String {
        let telemetry = match parse_frame(raw) {
            Some(telemetry) => telemetry,
            None => return manual_frame(),
        };
        match plan_cycle(self.state, &self.track, &telemetry) {
            Ok((next, path)) => {
                self.state = next;
                control_frame(&path)
            }
            Err(e) => {
                warn!(error = %e, "planning cycle failed, skipping");
                manual_frame()
            }
        }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HORIZON;
    use crate::track::Waypoint;

    fn server() -> PlannerServer {
        let waypoints = (0..100)
            .map(|i| Waypoint {
                x: i as f64 * 30.0,
                y: 0.0,
                s: i as f64 * 30.0,
                dx: 0.0,
                dy: -1.0,
            })
            .collect();
        PlannerServer::new(Track::new(waypoints, 3000.0).unwrap())
    }

    fn telemetry_frame(s: f64) -> String {
        format!(
            concat!(
                r#"42["telemetry",{{"x":{},"y":-6.0,"s":{},"d":6.0,"yaw":0.0,"speed":0.0,"#,
                r#""previous_path_x":[],"previous_path_y":[],"end_path_s":0.0,"#,
                r#""end_path_d":0.0,"sensor_fusion":[]}}]"#
            ),
            s, s
        )
    }

    #[test]
    fn test_telemetry_frame_gets_control_reply() {
        let mut server = server();
        let reply = server.handle_frame(&telemetry_frame(100.0));
        assert!(reply.starts_with(r#"42["control","#));
        let body: serde_json::Value = serde_json::from_str(&reply[2..]).unwrap();
        assert_eq!(body[1]["next_x"].as_array().unwrap().len(), HORIZON);
        assert_eq!(body[1]["next_y"].as_array().unwrap().len(), HORIZON);
    }

    #[test]
    fn test_empty_frame_gets_manual_reply() {
        let mut server = server();
        assert_eq!(server.handle_frame("42[\"manual\",{}]"), manual_frame());
        assert_eq!(server.handle_frame("garbage"), manual_frame());
    }

    #[test]
    fn test_state_persists_across_frames() {
        let mut server = server();
        server.handle_frame(&telemetry_frame(100.0));
        let after_one = server.state().target_speed_mph;
        server.handle_frame(&telemetry_frame(100.5));
        assert!(server.state().target_speed_mph > after_one);
    }

    #[test]
    fn test_manual_frames_do_not_touch_state() {
        let mut server = server();
        server.handle_frame(&telemetry_frame(100.0));
        let snapshot = *server.state();
        server.handle_frame("42[\"manual\",{}]");
        assert_eq!(*server.state(), snapshot);
    }
}
