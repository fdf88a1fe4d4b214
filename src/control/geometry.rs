#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the control as reported by the host at call time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn contains_x(&self, x: f64) -> bool {
        (0.0..=self.width).contains(&x)
    }

    /// Converts a horizontal offset into drag progress (`offset / width`).
    pub fn progress_for_offset(&self, offset: f64) -> f64 {
        if self.width > 0.0 {
            offset / self.width
        } else {
            0.0
        }
    }
}

/// Placement of the draggable top panel. The revealed bottom panel always
/// covers `[0, origin_x]`, so the two never overlap nor leave a gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub origin_x: f64,
    pub width: f64,
    pub opacity: f64,
}

impl PanelLayout {
    pub fn rest(bounds: Bounds) -> Self {
        Self {
            origin_x: 0.0,
            width: bounds.width,
            opacity: 1.0,
        }
    }

    pub fn confirmed(bounds: Bounds) -> Self {
        Self {
            origin_x: bounds.width,
            width: 0.0,
            opacity: 0.0,
        }
    }

    /// Maps a drag offset onto the top panel, clamping overshoot so that
    /// `origin_x + width == bounds.width` and opacity stays in `[0, 1]`.
    pub fn for_offset(offset: f64, bounds: Bounds) -> Self {
        let full = bounds.width.max(0.0);
        let origin_x = offset.clamp(0.0, full);
        let width = (full - offset).clamp(0.0, full);
        let opacity = (1.0 - bounds.progress_for_offset(offset)).clamp(0.0, 1.0);

        Self {
            origin_x,
            width,
            opacity,
        }
    }

    pub fn for_progress(progress: f64, bounds: Bounds) -> Self {
        Self::for_offset(progress * bounds.width, bounds)
    }

    pub fn revealed_width(&self) -> f64 {
        self.origin_x
    }

    /// Translates a point in control space into this panel's space.
    pub fn to_local(&self, point: Point) -> Point {
        Point::new(point.x - self.origin_x, point.y)
    }

    /// Whether a press may start a drag: horizontally within the leading
    /// `fraction` of the control, measured from the panel's left edge, and
    /// vertically inside the panel.
    pub fn in_trigger_area(&self, point: Point, bounds: Bounds, fraction: f64) -> bool {
        let local = self.to_local(point);
        (0.0..=bounds.height).contains(&local.y)
            && (0.0..=bounds.width * fraction).contains(&local.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 300.0,
        height: 50.0,
    };

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_layout_follows_offset_below_threshold() {
        for offset in [0.0, 10.0, 50.0, 120.0, 224.9] {
            let layout = PanelLayout::for_offset(offset, BOUNDS);
            assert!(approx(layout.opacity, 1.0 - offset / 300.0));
            assert!(approx(layout.origin_x, offset));
            assert!(approx(layout.width, 300.0 - offset));
        }
    }

    #[test]
    fn test_layout_never_leaves_a_gap() {
        for offset in [-80.0, -1.0, 0.0, 42.0, 299.0, 300.0, 420.0] {
            let layout = PanelLayout::for_offset(offset, BOUNDS);
            assert!(approx(layout.width + layout.revealed_width(), BOUNDS.width));
            assert!((0.0..=1.0).contains(&layout.opacity));
            assert!(layout.origin_x >= 0.0);
            assert!((0.0..=BOUNDS.width).contains(&layout.width));
        }
    }

    #[test]
    fn test_negative_offset_is_rest() {
        assert_eq!(
            PanelLayout::for_offset(-25.0, BOUNDS),
            PanelLayout::rest(BOUNDS)
        );
    }

    #[test]
    fn test_trigger_area() {
        let rest = PanelLayout::rest(BOUNDS);
        assert!(rest.in_trigger_area(Point::new(0.0, 0.0), BOUNDS, 0.25));
        assert!(rest.in_trigger_area(Point::new(75.0, 50.0), BOUNDS, 0.25));
        assert!(!rest.in_trigger_area(Point::new(75.1, 10.0), BOUNDS, 0.25));
        assert!(!rest.in_trigger_area(Point::new(10.0, 50.1), BOUNDS, 0.25));
        assert!(!rest.in_trigger_area(Point::new(-1.0, 10.0), BOUNDS, 0.25));
    }

    #[test]
    fn test_trigger_area_moves_with_panel() {
        let shifted = PanelLayout::for_offset(100.0, BOUNDS);
        assert!(!shifted.in_trigger_area(Point::new(50.0, 10.0), BOUNDS, 0.25));
        assert!(shifted.in_trigger_area(Point::new(150.0, 10.0), BOUNDS, 0.25));
    }

    #[test]
    fn test_zero_width_bounds() {
        let bounds = Bounds::new(0.0, 20.0);
        let layout = PanelLayout::for_offset(10.0, bounds);
        assert_eq!(layout.width, 0.0);
        assert_eq!(layout.origin_x, 0.0);
        assert_eq!(layout.opacity, 1.0);
    }
}
