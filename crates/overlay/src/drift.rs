//! Detection of attached windows moved outside our control
//!
//! Runs once when a drag starts: if the attached window is no longer where the
//! content rectangle says it should be, the user (or another program) moved it
//! and the attachment is dropped. Only position is compared; a window that
//! refuses our size (minimum sizes, fixed dialogs) stays attached.

use crate::Aligner;
use region::{OverlayGeometry, Rect};
use tracing::info;
use winctl::{WindowHandle, WindowSurface};

/// Allowed position difference in pixels, per axis
pub const DRIFT_TOLERANCE: i32 = 20;

/// Why an attachment was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachReason {
    /// Rect query failed, most likely the window was closed
    Lost,
    /// Window origin is off by (dx, dy)
    Drifted { dx: i32, dy: i32 },
}

/// Outcome of a drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftCheck {
    Unattached,
    InSync(WindowHandle),
    Detached(WindowHandle, DetachReason),
}

impl DriftCheck {
    pub fn detached(&self) -> bool {
        matches!(self, DriftCheck::Detached(..))
    }
}

/// Origin offset of `actual` from `expected` when either axis exceeds `tolerance`
pub fn position_drift(expected: &Rect, actual: &Rect, tolerance: i32) -> Option<(i32, i32)> {
    let dx = actual.x - expected.x;
    let dy = actual.y - expected.y;
    (dx.abs() > tolerance || dy.abs() > tolerance).then_some((dx, dy))
}

impl<S: WindowSurface> Aligner<S> {
    /// Compare the attached window against the content rectangle and detach
    /// it if it was lost or moved by more than the tolerance.
    pub fn check_and_maybe_detach(&mut self, geometry: &OverlayGeometry) -> DriftCheck {
        let Some(handle) = self.attachment() else {
            return DriftCheck::Unattached;
        };

        let expected = geometry.content_rect();
        let reason = match self.surface().window_rect(handle) {
            Err(_) => DetachReason::Lost,
            Ok(actual) => match position_drift(&expected, &actual, self.tolerance) {
                Some((dx, dy)) => DetachReason::Drifted { dx, dy },
                None => return DriftCheck::InSync(handle),
            },
        };

        info!(%handle, ?reason, "attached window drifted");
        self.clear_attachment();
        DriftCheck::Detached(handle, reason)
    }
}
