//! Shared utilities.

/// Render loop pacing.
pub mod frame_timing;

/// Backing-store size in physical pixels for a surface laid out at
/// `css_width` x `css_height` with the given device pixel ratio. Never
/// returns a zero dimension.
#[must_use]
pub fn physical_size(css_width: f64, css_height: f64, pixel_ratio: f64) -> (u32, u32) {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };
    let physical = |css: f64| (css * ratio).round().max(1.0) as u32;
    (physical(css_width), physical(css_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_scales_by_pixel_ratio() {
        assert_eq!(physical_size(800.0, 600.0, 2.0), (1600, 1200));
        assert_eq!(physical_size(333.0, 100.0, 1.5), (500, 150));
    }

    #[test]
    fn physical_size_never_collapses() {
        assert_eq!(physical_size(0.0, 0.0, 2.0), (1, 1));
        assert_eq!(physical_size(300.0, 150.0, 0.0), (300, 150));
        assert_eq!(physical_size(300.0, 150.0, f64::NAN), (300, 150));
    }
}
