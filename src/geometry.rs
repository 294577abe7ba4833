//! Distance, angle and vector helpers shared by every entity.

use glam::Vec2;

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle in radians of the ray from `from` toward `to` (atan2 convention).
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

/// Velocity vector of magnitude `speed` pointing along `angle`.
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Moves `from` by `speed` units toward `to`.
///
/// The divisor is clamped to at least one unit, so a target sitting on top of
/// `from` never produces a NaN.
pub fn step_towards(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    let length = delta.length().max(1.0);
    from + delta / length * speed
}

/// True when the two points are strictly closer than `radius`.
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance(a, b) < radius
}

/// True when `point` lies inside the closed rectangle `[0, size.x] x [0, size.y]`.
pub fn in_bounds(point: Vec2, size: Vec2) -> bool {
    (0.0..=size.x).contains(&point.x) && (0.0..=size.y).contains(&point.y)
}
