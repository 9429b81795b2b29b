//! Angle math for the clock dials.
//!
//! Screen-angle convention: 0° points at 3 o'clock, angles increase
//! clockwise, so 12 o'clock sits at -90°. All dial values map to an end
//! angle measured from the dial top.

use embedded_graphics::prelude::Point;

/// Screen angle of the dial top (12 o'clock position).
pub const TOP_ANGLE_DEG: f32 = -90.0;

/// Degrees spanned by one unit of a dial with the given modulus.
pub fn unit_angle_degrees(units_per_revolution: u16) -> f32 {
    360.0 / units_per_revolution as f32
}

/// Screen angle where the sweep for `value` ends.
///
/// `end_angle(0, u)` is the dial top itself (zero sweep); a one-based dial
/// feeds its top value (e.g. hour 12) to get the full revolution.
pub fn end_angle(value: u16, units_per_revolution: u16) -> f32 {
    TOP_ANGLE_DEG + value as f32 * unit_angle_degrees(units_per_revolution)
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    let mut wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Minute hand angle from the dial top: 6° per minute plus a small
/// creep for the elapsed seconds.
pub fn minute_hand_angle(minutes: u8, seconds: u8) -> f32 {
    minutes as f32 * 6.0 + seconds as f32 * 0.1
}

/// Hour hand angle from the dial top: 30° per hour plus the minute creep.
pub fn hour_hand_angle(hours: u8, minutes: u8) -> f32 {
    (hours % 12) as f32 * 30.0 + minutes as f32 * 0.5
}

/// Point at `distance` from `center` along a screen angle in degrees.
pub fn polar_point(center: Point, distance: f32, angle_deg: f32) -> Point {
    let rad = angle_deg.to_radians();
    let x = center.x + libm::roundf(libm::cosf(rad) * distance) as i32;
    let y = center.y + libm::roundf(libm::sinf(rad) * distance) as i32;
    Point::new(x, y)
}

/// Point at `distance` from `center` along a hand angle measured
/// clockwise from 12 o'clock.
pub fn hand_point(center: Point, distance: f32, angle_deg: f32) -> Point {
    polar_point(center, distance, angle_deg + TOP_ANGLE_DEG)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn end_angle_starts_at_dial_top() {
        assert!((end_angle(0, 60) - TOP_ANGLE_DEG).abs() < 1e-6);
        assert!((end_angle(0, 12) - TOP_ANGLE_DEG).abs() < 1e-6);
    }

    #[test]
    fn end_angle_is_monotone_over_the_dial() {
        for units in [12u16, 24, 60] {
            let mut previous = end_angle(0, units);
            for v in 1..units {
                let current = end_angle(v, units);
                assert!(
                    current > previous,
                    "end_angle({v}, {units}) went backwards"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn top_value_of_a_one_based_dial_is_a_full_revolution() {
        assert!((end_angle(12, 12) - 270.0).abs() < 1e-6);
        assert!((end_angle(60, 60) - 270.0).abs() < 1e-6);
    }

    #[test]
    fn unit_angles_match_the_dial_moduli() {
        assert!((unit_angle_degrees(60) - 6.0).abs() < 1e-6);
        assert!((unit_angle_degrees(12) - 30.0).abs() < 1e-6);
        assert!((unit_angle_degrees(24) - 15.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_wraps_negative_angles() {
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-6);
        assert!((normalize_degrees(450.0) - 90.0).abs() < 1e-6);
        assert!((normalize_degrees(0.0)).abs() < 1e-6);
    }

    #[test]
    fn hand_angles_follow_the_clock_formulas() {
        assert!((minute_hand_angle(15, 0) - 90.0).abs() < 1e-6);
        assert!((minute_hand_angle(15, 30) - 93.0).abs() < 1e-6);
        assert!((hour_hand_angle(3, 0) - 90.0).abs() < 1e-6);
        assert!((hour_hand_angle(15, 30) - 105.0).abs() < 1e-6);
    }

    #[test]
    fn polar_point_hits_the_cardinal_directions() {
        let c = Point::new(120, 120);
        assert_eq!(polar_point(c, 100.0, 0.0), Point::new(220, 120));
        assert_eq!(polar_point(c, 100.0, 90.0), Point::new(120, 220));
        assert_eq!(polar_point(c, 100.0, TOP_ANGLE_DEG), Point::new(120, 20));
        assert_eq!(hand_point(c, 100.0, 0.0), Point::new(120, 20));
        assert_eq!(hand_point(c, 100.0, 90.0), Point::new(220, 120));
    }
}
