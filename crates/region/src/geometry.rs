//! Overlay geometry: the outer frame and the content rectangle it encloses

use crate::{GestureKind, RegionError, RegionResult, Rect, SizePreset};

/// Outer dimensions at or below this are rejected by `resize`
pub const MIN_OUTER_DIMENSION: u32 = 100;

/// Frame chrome around the content area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    /// Border on all four sides
    pub border_width: u32,
    /// Drag header below the top border
    pub header_height: u32,
    /// Side of the square resize grip in the bottom-right corner
    pub grip_size: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            border_width: 4,
            header_height: 30,
            grip_size: 20,
        }
    }
}

impl OverlayStyle {
    /// Horizontal chrome (left + right border)
    pub fn horizontal_inset(&self) -> u32 {
        self.border_width.saturating_mul(2)
    }

    /// Vertical chrome (both borders plus header)
    pub fn vertical_inset(&self) -> u32 {
        self.horizontal_inset().saturating_add(self.header_height)
    }

    /// Any outer size accepted by the floor must keep a non-empty content area.
    pub fn validate(&self) -> RegionResult<()> {
        let chrome = self.horizontal_inset().max(self.vertical_inset());
        if chrome >= MIN_OUTER_DIMENSION {
            return Err(RegionError::InvalidStyle {
                chrome,
                floor: MIN_OUTER_DIMENSION,
            });
        }
        Ok(())
    }
}

/// Absolute screen geometry of the overlay frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    outer: Rect,
    style: OverlayStyle,
}

impl OverlayGeometry {
    /// Create geometry from an absolute outer rectangle
    pub fn new(outer: Rect, style: OverlayStyle) -> RegionResult<Self> {
        style.validate()?;
        if !Self::accepts(outer.width as i64, outer.height as i64) {
            return Err(RegionError::Degenerate {
                width: outer.width,
                height: outer.height,
                floor: MIN_OUTER_DIMENSION,
            });
        }
        Ok(Self { outer, style })
    }

    /// Startup frame: 800x600 at (100, 100)
    pub fn initial(style: OverlayStyle) -> RegionResult<Self> {
        Self::new(Rect::new(100, 100, 800, 600), style)
    }

    pub fn outer(&self) -> Rect {
        self.outer
    }

    pub fn style(&self) -> OverlayStyle {
        self.style
    }

    /// Size the frame so the content area is exactly the preset resolution.
    /// Position is unchanged.
    pub fn apply_preset(&mut self, preset: SizePreset) {
        let (width, height) = preset.dimensions();
        self.outer.width = width + self.style.horizontal_inset();
        self.outer.height = height + self.style.vertical_inset();
    }

    /// Shift the frame; off-screen positions are allowed
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.outer = self.outer.offset(dx, dy);
    }

    /// Move the frame origin to an absolute position
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.outer.x = x;
        self.outer.y = y;
    }

    /// Set the outer size. Returns false and keeps the current geometry when
    /// either dimension is at or below `MIN_OUTER_DIMENSION`.
    pub fn resize(&mut self, new_width: i32, new_height: i32) -> bool {
        if !Self::accepts(new_width as i64, new_height as i64) {
            return false;
        }
        self.outer.width = new_width as u32;
        self.outer.height = new_height as u32;
        true
    }

    /// Absolute rectangle of the shareable area
    pub fn content_rect(&self) -> Rect {
        let b = self.style.border_width;
        Rect {
            x: self.outer.x + b as i32,
            y: self.outer.y + (b + self.style.header_height) as i32,
            width: self.outer.width - self.style.horizontal_inset(),
            height: self.outer.height - self.style.vertical_inset(),
        }
    }

    /// Which gesture a press at overlay-relative (x, y) starts, if any
    pub fn hit_test(&self, local_x: i32, local_y: i32) -> Option<GestureKind> {
        let width = self.outer.width as i32;
        let height = self.outer.height as i32;
        if local_x < 0 || local_y < 0 || local_x >= width || local_y >= height {
            return None;
        }

        let corner = (self.style.border_width + self.style.grip_size) as i32;
        if local_x >= width - corner && local_y >= height - corner {
            return Some(GestureKind::Resize);
        }

        let header_bottom = (self.style.border_width + self.style.header_height) as i32;
        if local_y < header_bottom {
            return Some(GestureKind::Move);
        }

        None
    }

    /// Grip square relative to the overlay origin
    pub fn grip_rect(&self) -> Rect {
        let corner = self.style.border_width + self.style.grip_size;
        Rect::new(
            (self.outer.width - corner) as i32,
            (self.outer.height - corner) as i32,
            self.style.grip_size,
            self.style.grip_size,
        )
    }

    fn accepts(width: i64, height: i64) -> bool {
        let floor = MIN_OUTER_DIMENSION as i64;
        width > floor && height > floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(x: i32, y: i32, w: u32, h: u32) -> OverlayGeometry {
        OverlayGeometry::new(Rect::new(x, y, w, h), OverlayStyle::default()).unwrap()
    }

    #[test]
    fn content_rect_insets_border_and_header() {
        let g = geometry(100, 100, 808, 668);
        assert_eq!(g.content_rect(), Rect::new(104, 134, 800, 600));
    }

    #[test]
    fn content_size_identities_hold_for_other_styles() {
        let style = OverlayStyle {
            border_width: 7,
            header_height: 0,
            grip_size: 10,
        };
        let g = OverlayGeometry::new(Rect::new(-50, 20, 300, 200), style).unwrap();
        let content = g.content_rect();
        assert_eq!(content.width, 300 - 14);
        assert_eq!(content.height, 200 - 14);
        assert_eq!((content.x, content.y), (-43, 27));
    }

    #[test]
    fn preset_sets_exact_content_size_and_keeps_position() {
        let mut g = geometry(100, 100, 808, 668);
        g.apply_preset(SizePreset::Teams);
        assert_eq!(g.outer(), Rect::new(100, 100, 1288, 758));
        assert_eq!(g.content_rect(), Rect::new(104, 134, 1280, 720));

        for preset in SizePreset::ALL {
            let mut g = geometry(-300, 2000, 555, 333);
            g.apply_preset(preset);
            let content = g.content_rect();
            assert_eq!((content.width, content.height), preset.dimensions());
            assert_eq!((g.outer().x, g.outer().y), (-300, 2000));
        }
    }

    #[test]
    fn resize_floor_is_exclusive() {
        let mut g = geometry(0, 0, 500, 400);
        let before = g;

        assert!(!g.resize(100, 300));
        assert!(!g.resize(300, 100));
        assert!(!g.resize(-20, 300));
        assert_eq!(g, before);

        assert!(g.resize(101, 101));
        assert_eq!(g.outer(), Rect::new(0, 0, 101, 101));
    }

    #[test]
    fn translate_allows_off_screen() {
        let mut g = geometry(10, 10, 500, 400);
        g.translate(-200, -50);
        assert_eq!(g.outer(), Rect::new(-190, -40, 500, 400));
    }

    #[test]
    fn new_rejects_degenerate_outer_size() {
        let err = OverlayGeometry::new(Rect::new(0, 0, 100, 500), OverlayStyle::default());
        assert_eq!(
            err,
            Err(RegionError::Degenerate {
                width: 100,
                height: 500,
                floor: MIN_OUTER_DIMENSION
            })
        );
    }

    #[test]
    fn style_with_oversized_chrome_is_rejected() {
        let style = OverlayStyle {
            border_width: 10,
            header_height: 80,
            grip_size: 20,
        };
        assert!(matches!(
            style.validate(),
            Err(RegionError::InvalidStyle { chrome: 100, .. })
        ));
    }

    #[test]
    fn huge_style_values_are_rejected_not_overflowed() {
        let style = OverlayStyle {
            border_width: u32::MAX / 2 + 1,
            header_height: u32::MAX,
            grip_size: 20,
        };
        assert_eq!(
            style.validate(),
            Err(RegionError::InvalidStyle {
                chrome: u32::MAX,
                floor: MIN_OUTER_DIMENSION
            })
        );
    }

    #[test]
    fn hit_test_finds_header_and_grip() {
        let g = geometry(100, 100, 808, 668);
        assert_eq!(g.hit_test(0, 0), Some(GestureKind::Move));
        assert_eq!(g.hit_test(400, 33), Some(GestureKind::Move));
        assert_eq!(g.hit_test(400, 34), None);
        assert_eq!(g.hit_test(807, 667), Some(GestureKind::Resize));
        assert_eq!(g.hit_test(784, 644), Some(GestureKind::Resize));
        assert_eq!(g.hit_test(783, 644), None);
        assert_eq!(g.hit_test(808, 10), None);
        assert_eq!(g.hit_test(-1, 10), None);
    }

    #[test]
    fn grip_rect_sits_inside_the_border() {
        let g = geometry(0, 0, 808, 668);
        assert_eq!(g.grip_rect(), Rect::new(784, 644, 20, 20));
    }
}
