//! Circle and segment geometry shared by pocket capture and shot planning

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Distance from `p` to the segment `start..end`, measured only when the
/// projection of `p` falls strictly inside the segment.
///
/// Points behind `start` or past `end` (or a zero-length segment) give `None`.
pub fn segment_distance_interior(start: Vec2, end: Vec2, p: Vec2) -> Option<f32> {
    let line = end - start;
    let len = line.length();
    let dir = line.normalize_or_zero();
    if len == 0.0 {
        return None;
    }

    let projection = (p - start).dot(dir);
    if projection <= 0.0 || projection >= len {
        return None;
    }

    let closest = start + dir * projection;
    Some(closest.distance(p))
}

/// Ghost-ball contact point: where the striker's center must be at impact so
/// the target travels from `target` toward `goal`.
///
/// Lies on the far side of the target from the goal, `contact_distance` away
/// from the target's center. A goal at the target's center yields the target
/// center itself.
#[inline]
pub fn ghost_ball(target: Vec2, goal: Vec2, contact_distance: f32) -> Vec2 {
    let away = (target - goal).normalize_or_zero();
    target + away * contact_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sd_circle() {
        assert!((sd_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 2.0) - 3.0).abs() < 1e-6);
        assert!(sd_circle(Vec2::ZERO, Vec2::ZERO, 2.0) < 0.0);
    }

    #[test]
    fn test_segment_distance_interior() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(10.0, 0.0);

        let d = segment_distance_interior(start, end, Vec2::new(5.0, 3.0));
        assert!((d.unwrap() - 3.0).abs() < 1e-6);

        // Behind the start and past the end are ignored
        assert!(segment_distance_interior(start, end, Vec2::new(-1.0, 0.5)).is_none());
        assert!(segment_distance_interior(start, end, Vec2::new(11.0, 0.5)).is_none());
        // Degenerate segment
        assert!(segment_distance_interior(start, start, Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_ghost_ball_is_colinear_and_behind() {
        let target = Vec2::new(100.0, 100.0);
        let pocket = Vec2::new(0.0, 0.0);
        let impact = ghost_ball(target, pocket, 34.0);

        assert!((impact.distance(target) - 34.0).abs() < 1e-4);
        // Impact, target and pocket are colinear with the impact farthest out
        assert!(impact.distance(pocket) > target.distance(pocket));
        let a = (target - impact).normalize();
        let b = (pocket - target).normalize();
        assert!(a.dot(b) > 0.9999);
    }
}
