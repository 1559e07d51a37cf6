//! Region module for UltraShare
//!
//! Screen rectangles, overlay geometry and the drag gestures that mutate it.

pub mod geometry;
pub mod gesture;
pub mod preset;

pub use geometry::{OverlayGeometry, OverlayStyle, MIN_OUTER_DIMENSION};
pub use gesture::{DragGesture, GestureKind};
pub use preset::SizePreset;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionError {
    #[error("Overlay chrome {chrome}px leaves no content inside the {floor}px size floor")]
    InvalidStyle { chrome: u32, floor: u32 },

    #[error("Overlay size {width}x{height} is below the {floor}px floor")]
    Degenerate { width: u32, height: u32, floor: u32 },

    #[error("Unknown size preset: {0}")]
    UnknownPreset(String),
}

pub type RegionResult<T> = Result<T, RegionError>;

/// Rectangle in physical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Both dimensions are non-zero
    pub fn is_realized(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Same rectangle shifted by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_size() {
        let rect = Rect::new(0, 0, 30, 40).offset(-5, 7);
        assert_eq!(rect, Rect::new(-5, 7, 30, 40));
    }

    #[test]
    fn display_uses_geometry_notation() {
        assert_eq!(Rect::new(100, 100, 800, 600).to_string(), "800x600+100+100");
    }
}
