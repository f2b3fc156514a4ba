//! Interpolation laws used by the timeline events:
//! - lerp_i32 / lerp_u8 (truncating linear blends)
//! - lerp_color (per-channel)
//! - smoothstep (cubic ease, zero slope at both ends)

use crate::types::{Point, Rgba};

/// Fraction of the way through an event window, in `(0, 1]`.
///
/// A zero-length window is complete as soon as it is evaluated.
#[inline]
pub fn completion(elapsed: usize, length: usize) -> f32 {
    if length == 0 {
        return 1.0;
    }
    elapsed as f32 / length as f32
}

#[inline]
pub fn smoothstep(x: f32) -> f32 {
    x * x * (3.0 - 2.0 * x)
}

#[inline]
pub fn lerp_i32(a: i32, b: i32, t: f32) -> i32 {
    a.saturating_add((t * (b as f32 - a as f32)) as i32)
}

/// Blend two channel values, truncating toward the start value.
#[inline]
pub fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + t * (b as f32 - a as f32)) as u8
}

#[inline]
pub fn lerp_point(a: Point, b: Point, t: f32) -> Point {
    Point::new(lerp_i32(a.x, b.x, t), lerp_i32(a.y, b.y, t))
}

#[inline]
pub fn lerp_color(a: Rgba, b: Rgba, t: f32) -> Rgba {
    Rgba {
        r: lerp_u8(a.r, b.r, t),
        g: lerp_u8(a.g, b.g, t),
        b: lerp_u8(a.b, b.b, t),
        a: lerp_u8(a.a, b.a, t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_endpoints_and_symmetry() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        for i in 0..=20 {
            let c = i as f32 / 20.0;
            let sum = smoothstep(c) + smoothstep(1.0 - c);
            assert!((sum - 1.0).abs() < 1e-5, "c={c} sum={sum}");
        }
    }

    #[test]
    fn coordinate_lerp_saturates() {
        assert_eq!(lerp_i32(10, i32::MAX, 1.0), i32::MAX);
        assert_eq!(lerp_i32(-10, i32::MIN, 1.0), i32::MIN);
        assert_eq!(lerp_i32(-100, 100, 0.5), 0);
    }

    #[test]
    fn zero_length_window_is_complete() {
        assert_eq!(completion(0, 0), 1.0);
        assert_eq!(completion(15, 30), 0.5);
        assert_eq!(completion(30, 30), 1.0);
    }

    #[test]
    fn channel_lerp_truncates() {
        assert_eq!(lerp_u8(0, 255, 0.5), 127);
        assert_eq!(lerp_u8(255, 0, 0.5), 127);
        assert_eq!(lerp_u8(0, 255, 1.0), 255);
        assert_eq!(lerp_u8(200, 10, 1.0), 10);
    }

    #[test]
    fn channel_lerp_is_monotonic_both_ways() {
        let mut up = 0;
        let mut down = 255;
        for k in 0..=60 {
            let t = k as f32 / 60.0;
            let u = lerp_u8(3, 250, t);
            let d = lerp_u8(250, 3, t);
            assert!(u >= up);
            assert!(d <= down);
            up = u;
            down = d;
        }
    }

    #[test]
    fn integer_lerp_hits_target() {
        assert_eq!(lerp_i32(100, 150, 1.0), 150);
        assert_eq!(lerp_i32(100, -20, 1.0), -20);
        assert_eq!(lerp_i32(0, 10, 0.25), 2);
    }
}
