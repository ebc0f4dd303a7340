//! Planar marine geometry helpers.
//!
//! World coordinates are metres with +x east and +z north. Bearings are
//! degrees clockwise from true north, as read off a compass card.

pub const METRES_PER_NM: f64 = 1852.0;

/// 4/3-earth effective radius used for the radar-horizon curvature drop.
pub const EFFECTIVE_EARTH_RADIUS_M: f64 = 8_495_000.0;

/// Wraps an angle into [0, 360).
pub fn wrap_deg(angle: f64) -> f64 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Smallest signed difference `a - b` in (-180, 180].
pub fn signed_delta_deg(a: f64, b: f64) -> f64 {
    let delta = wrap_deg(a - b);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Bearing from one world point to another, degrees clockwise from north.
pub fn bearing_deg(from_x: f64, from_z: f64, to_x: f64, to_z: f64) -> f64 {
    wrap_deg((to_x - from_x).atan2(to_z - from_z).to_degrees())
}

pub fn distance_m(from_x: f64, from_z: f64, to_x: f64, to_z: f64) -> f64 {
    ((to_x - from_x).powi(2) + (to_z - from_z).powi(2)).sqrt()
}

/// Offsets a world point along a compass bearing.
pub fn offset(x: f64, z: f64, bearing_deg: f64, distance_m: f64) -> (f64, f64) {
    let rad = bearing_deg.to_radians();
    (x + distance_m * rad.sin(), z + distance_m * rad.cos())
}

/// Height lost below the horizontal sight line at `distance_m`, metres.
pub fn horizon_drop_m(distance_m: f64) -> f64 {
    distance_m * distance_m / (2.0 * EFFECTIVE_EARTH_RADIUS_M)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_handles_negative_angles() {
        assert_eq!(wrap_deg(-90.0), 270.0);
        assert_eq!(wrap_deg(720.0), 0.0);
        assert_eq!(wrap_deg(359.5), 359.5);
    }

    #[test]
    fn signed_delta_takes_short_way_round() {
        assert_eq!(signed_delta_deg(350.0, 10.0), -20.0);
        assert_eq!(signed_delta_deg(10.0, 350.0), 20.0);
    }

    #[test]
    fn bearing_matches_compass_convention() {
        assert!((bearing_deg(0.0, 0.0, 0.0, 100.0) - 0.0).abs() < 1e-9);
        assert!((bearing_deg(0.0, 0.0, 100.0, 0.0) - 90.0).abs() < 1e-9);
        assert!((bearing_deg(0.0, 0.0, 0.0, -100.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn offset_round_trips_through_bearing_and_distance() {
        let (x, z) = offset(10.0, -5.0, 37.0, 1234.0);
        assert!((bearing_deg(10.0, -5.0, x, z) - 37.0).abs() < 1e-6);
        assert!((distance_m(10.0, -5.0, x, z) - 1234.0).abs() < 1e-6);
    }

    #[test]
    fn horizon_drop_grows_quadratically() {
        let near = horizon_drop_m(1_000.0);
        let far = horizon_drop_m(10_000.0);
        assert!((far / near - 100.0).abs() < 1e-6);
    }
}
