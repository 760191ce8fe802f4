// Highway planner service: loads the track map, binds the simulator
// port and plans one trajectory per telemetry frame.
//
// Usage: planner_server [map_csv] [port]

use anyhow::{Context, Result};
use tracing::info;

use highway_planner::server::{PlannerServer, DEFAULT_PORT};
use highway_planner::Track;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("highway_planner=info")
        .init();

    let mut args = std::env::args().skip(1);
    let map_path = args.next().unwrap_or_else(|| "data/highway_map.csv".to_string());
    let port: u16 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid port '{}'", raw))?,
        None => DEFAULT_PORT,
    };

    let track =
        Track::from_csv(&map_path).with_context(|| format!("loading track map {}", map_path))?;
    info!(waypoints = track.waypoints().len(), map = %map_path, "track loaded");

    PlannerServer::new(track)
        .run(port)
        .context("planner server terminated")?;
    Ok(())
}
