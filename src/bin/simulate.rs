// Closed-loop planning demo on a synthetic circular track.
//
// Runs the planner for a fixed number of cycles against randomly placed
// traffic, feeding each committed path back as the next cycle's
// remainder, then plots the driven trajectory.

use gnuplot::{AxesCommon, Caption, Color, Figure};
use rand::Rng;

use highway_planner::params::{LANE_COUNT, TIME_STEP};
use highway_planner::telemetry::Telemetry;
use highway_planner::track::{lane_center, Waypoint};
use highway_planner::{plan_cycle, PlannerState, Track};

const CYCLES: usize = 600;
const POINTS_PER_CYCLE: usize = 3;
const TRACK_RADIUS: f64 = 400.0;
const TRAFFIC_COUNT: usize = 6;

fn circular_track(radius: f64, waypoint_count: usize) -> Track {
    let waypoints = (0..waypoint_count)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / waypoint_count as f64;
            Waypoint {
                x: radius * theta.cos(),
                y: radius * theta.sin(),
                s: radius * theta,
                // counterclockwise travel, so the lane-normal points outward
                dx: theta.cos(),
                dy: theta.sin(),
            }
        })
        .collect();
    let length = 2.0 * std::f64::consts::PI * radius;
    Track::new(waypoints, length).expect("synthetic track is well formed")
}

struct TrafficCar {
    s: f64,
    lane: usize,
    speed: f64, // [m/s]
}

fn sensor_fusion(track: &Track, cars: &[TrafficCar]) -> Vec<[f64; 7]> {
    cars.iter()
        .enumerate()
        .map(|(id, car)| {
            let pos = track.frenet_to_cartesian(car.s, lane_center(car.lane as i64));
            let ahead = track.frenet_to_cartesian(car.s + 1.0, lane_center(car.lane as i64));
            let heading = (ahead.y - pos.y).atan2(ahead.x - pos.x);
            [
                id as f64,
                pos.x,
                pos.y,
                car.speed * heading.cos(),
                car.speed * heading.sin(),
                car.s,
                lane_center(car.lane as i64),
            ]
        })
        .collect()
}

fn main() {
    let track = circular_track(TRACK_RADIUS, 120);
    let mut rng = rand::thread_rng();

    let mut traffic: Vec<TrafficCar> = (0..TRAFFIC_COUNT)
        .map(|_| TrafficCar {
            s: rng.gen_range(50.0..track.track_length()),
            lane: rng.gen_range(0..LANE_COUNT),
            speed: rng.gen_range(8.0..18.0),
        })
        .collect();

    let mut state = PlannerState::new(1);
    let start = track.frenet_to_cartesian(0.0, lane_center(1));
    let mut telemetry = Telemetry {
        x: start.x,
        y: start.y,
        s: 0.0,
        d: lane_center(1),
        yaw: 90.0, // degrees, tangent to the circle at theta = 0
        speed: 0.0,
        previous_path_x: vec![],
        previous_path_y: vec![],
        end_path_s: 0.0,
        end_path_d: lane_center(1),
        sensor_fusion: sensor_fusion(&track, &traffic),
    };

    let mut driven_x = vec![telemetry.x];
    let mut driven_y = vec![telemetry.y];

    for cycle in 0..CYCLES {
        let (next, path) = plan_cycle(state, &track, &telemetry).expect("cycle plans");
        state = next;

        // the vehicle executes the first few points before the next
        // telemetry snapshot arrives
        let points = path.points();
        let mut consumed_dist = 0.0;
        for i in 0..POINTS_PER_CYCLE {
            let from = if i == 0 {
                (telemetry.x, telemetry.y)
            } else {
                (points[i - 1].x, points[i - 1].y)
            };
            consumed_dist += ((points[i].x - from.0).powi(2) + (points[i].y - from.1).powi(2)).sqrt();
            driven_x.push(points[i].x);
            driven_y.push(points[i].y);
        }

        let lead = points[POINTS_PER_CYCLE - 1];
        let prev = points[POINTS_PER_CYCLE - 2];
        let tail = &points[POINTS_PER_CYCLE..];
        let tail_dist: f64 = tail
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum::<f64>()
            + lead.distance(&tail[0]);

        telemetry.x = lead.x;
        telemetry.y = lead.y;
        telemetry.yaw = prev.bearing_to(&lead).to_degrees();
        telemetry.s = (telemetry.s + consumed_dist) % track.track_length();
        telemetry.speed = state.target_speed_mph;
        telemetry.previous_path_x = tail.iter().map(|p| p.x).collect();
        telemetry.previous_path_y = tail.iter().map(|p| p.y).collect();
        telemetry.end_path_s = (telemetry.s + tail_dist) % track.track_length();

        let elapsed = POINTS_PER_CYCLE as f64 * TIME_STEP;
        for car in traffic.iter_mut() {
            car.s = (car.s + car.speed * elapsed) % track.track_length();
        }
        telemetry.sensor_fusion = sensor_fusion(&track, &traffic);

        if cycle % 100 == 0 {
            println!(
                "cycle {:4}  state {:4}  lane {}  target {:5.1} mph",
                cycle, state.state.to_string(), state.lane, state.target_speed_mph
            );
        }
    }

    // plot the centerline, the driven path and the final traffic positions
    let center: Vec<(f64, f64)> = (0..=360)
        .map(|deg| {
            let theta = (deg as f64).to_radians();
            (TRACK_RADIUS * theta.cos(), TRACK_RADIUS * theta.sin())
        })
        .collect();
    let traffic_pos: Vec<(f64, f64)> = traffic
        .iter()
        .map(|car| {
            let p = track.frenet_to_cartesian(car.s, lane_center(car.lane as i64));
            (p.x, p.y)
        })
        .collect();

    std::fs::create_dir_all("img").unwrap_or_default();
    let mut fg = Figure::new();
    fg.axes2d()
        .set_title("Highway planner closed-loop demo", &[])
        .set_aspect_ratio(gnuplot::AutoOption::Fix(1.0))
        .lines(
            center.iter().map(|p| p.0),
            center.iter().map(|p| p.1),
            &[Caption("track centerline"), Color("gray")],
        )
        .lines(
            driven_x.iter(),
            driven_y.iter(),
            &[Caption("driven path"), Color("red")],
        )
        .points(
            traffic_pos.iter().map(|p| p.0),
            traffic_pos.iter().map(|p| p.1),
            &[Caption("traffic"), Color("blue")],
        );
    fg.set_terminal("pngcairo", "img/simulate_demo.png");
    fg.show().unwrap();
    println!("plot saved to img/simulate_demo.png");
}
