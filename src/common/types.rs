//! Common types used throughout highway_planner

use nalgebra::Vector2;

/// 2D point representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Bearing from this point toward `other`, in radians
    pub fn bearing_to(&self, other: &Point2D) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from(tuple: (f64, f64)) -> Self {
        Self { x: tuple.0, y: tuple.1 }
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v[0], y: v[1] }
    }
}

/// 2D pose (position + orientation)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, yaw: f64) -> Self {
        Self { x, y, yaw }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Transform a global point into this pose's local frame
    pub fn to_local(&self, p: Point2D) -> Point2D {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        Point2D::new(
            dx * self.yaw.cos() + dy * self.yaw.sin(),
            -dx * self.yaw.sin() + dy * self.yaw.cos(),
        )
    }

    /// Transform a point in this pose's local frame back to global
    pub fn to_global(&self, p: Point2D) -> Point2D {
        Point2D::new(
            self.x + p.x * self.yaw.cos() - p.y * self.yaw.sin(),
            self.y + p.x * self.yaw.sin() + p.y * self.yaw.cos(),
        )
    }
}

/// One vehicle reported by sensor fusion, valid for a single cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedVehicle {
    pub id: i64,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub s: f64,
    pub d: f64,
}

impl DetectedVehicle {
    /// Scalar speed [m/s], the norm of the reported velocity vector
    pub fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point2d_distance() {
        let p1 = Point2D::new(0.0, 0.0);
        let p2 = Point2D::new(3.0, 4.0);
        assert!((p1.distance(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_point2d_bearing() {
        let p1 = Point2D::origin();
        let p2 = Point2D::new(0.0, 2.0);
        assert!((p1.bearing_to(&p2) - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    }

    #[test]
    fn test_pose2d_local_global_round_trip() {
        let pose = Pose2D::new(3.0, -2.0, 0.7);
        let p = Point2D::new(10.0, 5.0);
        let back = pose.to_global(pose.to_local(p));
        assert!((back.x - p.x).abs() < 1e-10);
        assert!((back.y - p.y).abs() < 1e-10);
    }

    #[test]
    fn test_detected_vehicle_speed() {
        let v = DetectedVehicle { id: 0, x: 0.0, y: 0.0, vx: 3.0, vy: 4.0, s: 0.0, d: 0.0 };
        assert!((v.speed() - 5.0).abs() < 1e-10);
    }
}
