//! Drag gestures on the overlay frame
//!
//! Pointer positions are global screen coordinates. Every sample is applied
//! relative to the frame as it was when the gesture began, so rejected or
//! skipped samples never accumulate.

use crate::{OverlayGeometry, Rect};

/// What a drag does to the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    /// Drag on the header: translate
    Move,
    /// Drag on the grip: change outer size
    Resize,
}

/// An in-progress drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragGesture {
    kind: GestureKind,
    start_pointer: (i32, i32),
    start_outer: Rect,
}

impl DragGesture {
    /// Start a gesture at the given global pointer position
    pub fn begin(kind: GestureKind, pointer: (i32, i32), geometry: &OverlayGeometry) -> Self {
        Self {
            kind,
            start_pointer: pointer,
            start_outer: geometry.outer(),
        }
    }

    /// Apply a pointer sample. Returns true if the geometry changed.
    pub fn apply(&self, pointer: (i32, i32), geometry: &mut OverlayGeometry) -> bool {
        let dx = pointer.0 - self.start_pointer.0;
        let dy = pointer.1 - self.start_pointer.1;
        let current = geometry.outer();

        match self.kind {
            GestureKind::Move => {
                let x = self.start_outer.x + dx;
                let y = self.start_outer.y + dy;
                if (x, y) == (current.x, current.y) {
                    return false;
                }
                geometry.move_to(x, y);
                true
            }
            GestureKind::Resize => {
                let width = self.start_outer.width as i32 + dx;
                let height = self.start_outer.height as i32 + dy;
                if (width, height) == (current.width as i32, current.height as i32) {
                    return false;
                }
                geometry.resize(width, height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OverlayStyle;

    fn geometry() -> OverlayGeometry {
        OverlayGeometry::new(Rect::new(100, 100, 808, 668), OverlayStyle::default()).unwrap()
    }

    #[test]
    fn move_follows_pointer_from_gesture_start() {
        let mut g = geometry();
        let drag = DragGesture::begin(GestureKind::Move, (500, 110), &g);

        assert!(drag.apply((510, 115), &mut g));
        assert!(drag.apply((530, 90), &mut g));
        assert_eq!(g.outer(), Rect::new(130, 80, 808, 668));

        assert!(!drag.apply((530, 90), &mut g));
    }

    #[test]
    fn resize_changes_size_only() {
        let mut g = geometry();
        let drag = DragGesture::begin(GestureKind::Resize, (900, 750), &g);

        assert!(drag.apply((880, 760), &mut g));
        assert_eq!(g.outer(), Rect::new(100, 100, 788, 678));
    }

    #[test]
    fn resize_below_floor_is_dropped_without_drift() {
        let mut g = geometry();
        let drag = DragGesture::begin(GestureKind::Resize, (900, 750), &g);

        // 808 - 708 = 100: at the floor, rejected
        assert!(!drag.apply((192, 700), &mut g));
        assert_eq!(g.outer().width, 808);

        // back above the floor, measured from the gesture start
        assert!(drag.apply((193, 700), &mut g));
        assert_eq!(g.outer(), Rect::new(100, 100, 101, 618));
    }
}
