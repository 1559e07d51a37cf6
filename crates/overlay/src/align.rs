//! Alignment of a target window to the overlay's content area

use crate::DRIFT_TOLERANCE;
use region::{OverlayGeometry, Rect};
use tracing::{debug, info, warn};
use winctl::{WinCtlResult, WindowHandle, WindowSurface};

/// Pushes the content rectangle to at most one attached window
pub struct Aligner<S> {
    surface: S,
    attachment: Option<WindowHandle>,
    pub(crate) tolerance: i32,
}

impl<S: WindowSurface> Aligner<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            attachment: None,
            tolerance: DRIFT_TOLERANCE,
        }
    }

    /// Override the drift tolerance in pixels
    pub fn with_tolerance(mut self, tolerance: i32) -> Self {
        self.tolerance = tolerance.max(0);
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Currently attached window
    pub fn attachment(&self) -> Option<WindowHandle> {
        self.attachment
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    /// Raise `handle`, move it onto the content rectangle and attach it.
    ///
    /// On failure the attachment is cleared and the error handed back for
    /// display.
    pub fn snap(&mut self, handle: WindowHandle, geometry: &OverlayGeometry) -> WinCtlResult<Rect> {
        if let Err(err) = self.surface.bring_to_front(handle) {
            debug!(%handle, error = %err, "bring to front failed, snapping anyway");
        }

        let rect = geometry.content_rect();
        match self.surface.move_resize(handle, rect) {
            Ok(()) => {
                if self.attachment != Some(handle) {
                    info!(%handle, %rect, "window attached");
                }
                self.attachment = Some(handle);
                Ok(rect)
            }
            Err(err) => {
                warn!(%handle, %rect, error = %err, "snap failed");
                self.attachment = None;
                Err(err)
            }
        }
    }

    /// Re-sync the attached window after the overlay moved or resized.
    ///
    /// Failures are returned but keep the attachment; only the drift check
    /// drops it.
    pub fn on_geometry_changed(&mut self, geometry: &OverlayGeometry) -> WinCtlResult<()> {
        let Some(handle) = self.attachment else {
            return Ok(());
        };

        let rect = geometry.content_rect();
        debug!(%handle, %rect, "syncing attached window");
        self.surface.move_resize(handle, rect).map_err(|err| {
            warn!(%handle, %rect, error = %err, "sync failed, keeping attachment");
            err
        })
    }

    pub fn clear_attachment(&mut self) {
        if let Some(handle) = self.attachment.take() {
            info!(%handle, "window detached");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSurface;
    use region::OverlayStyle;

    fn geometry() -> OverlayGeometry {
        OverlayGeometry::new(Rect::new(100, 100, 808, 668), OverlayStyle::default()).unwrap()
    }

    #[test]
    fn snap_moves_to_content_rect_and_attaches() {
        let surface = FakeSurface::default().with_window(7, "Editor", Rect::new(0, 0, 640, 480));
        let mut aligner = Aligner::new(&surface);

        let applied = aligner.snap(WindowHandle(7), &geometry()).unwrap();

        assert_eq!(applied, Rect::new(104, 134, 800, 600));
        assert_eq!(aligner.attachment(), Some(WindowHandle(7)));
        assert_eq!(surface.raised(), vec![WindowHandle(7)]);
        assert_eq!(surface.moves(), vec![(WindowHandle(7), Rect::new(104, 134, 800, 600))]);
    }

    #[test]
    fn snap_ignores_focus_failures() {
        let surface = FakeSurface::default().with_window(7, "Editor", Rect::new(0, 0, 640, 480));
        surface.refuse_focus.set(true);
        let mut aligner = Aligner::new(&surface);

        assert!(aligner.snap(WindowHandle(7), &geometry()).is_ok());
        assert!(aligner.is_attached());
    }

    #[test]
    fn failed_snap_clears_attachment() {
        let surface = FakeSurface::default().with_window(7, "Editor", Rect::new(0, 0, 640, 480));
        let mut aligner = Aligner::new(&surface);
        aligner.snap(WindowHandle(7), &geometry()).unwrap();

        assert!(aligner.snap(WindowHandle(99), &geometry()).is_err());
        assert_eq!(aligner.attachment(), None);

        aligner.snap(WindowHandle(7), &geometry()).unwrap();
        surface.reject_moves.set(true);
        assert!(aligner.snap(WindowHandle(7), &geometry()).is_err());
        assert_eq!(aligner.attachment(), None);
    }

    #[test]
    fn resnap_same_handle_reissues_move() {
        let surface = FakeSurface::default().with_window(7, "Editor", Rect::new(0, 0, 640, 480));
        let mut aligner = Aligner::new(&surface);

        aligner.snap(WindowHandle(7), &geometry()).unwrap();
        aligner.snap(WindowHandle(7), &geometry()).unwrap();

        assert_eq!(surface.moves().len(), 2);
        assert_eq!(aligner.attachment(), Some(WindowHandle(7)));
    }

    #[test]
    fn snap_to_new_handle_replaces_attachment() {
        let surface = FakeSurface::default()
            .with_window(7, "Editor", Rect::new(0, 0, 640, 480))
            .with_window(8, "Browser", Rect::new(0, 0, 640, 480));
        let mut aligner = Aligner::new(&surface);

        aligner.snap(WindowHandle(7), &geometry()).unwrap();
        aligner.snap(WindowHandle(8), &geometry()).unwrap();

        assert_eq!(aligner.attachment(), Some(WindowHandle(8)));
    }

    #[test]
    fn geometry_change_resyncs_only_when_attached() {
        let surface = FakeSurface::default().with_window(7, "Editor", Rect::new(0, 0, 640, 480));
        let mut aligner = Aligner::new(&surface);
        let mut g = geometry();

        aligner.on_geometry_changed(&g).unwrap();
        assert!(surface.moves().is_empty());

        aligner.snap(WindowHandle(7), &g).unwrap();
        g.translate(10, -5);
        aligner.on_geometry_changed(&g).unwrap();
        assert_eq!(
            surface.moves().last(),
            Some(&(WindowHandle(7), Rect::new(114, 129, 800, 600)))
        );
    }

    #[test]
    fn failed_resync_keeps_attachment() {
        let surface = FakeSurface::default().with_window(7, "Editor", Rect::new(0, 0, 640, 480));
        let mut aligner = Aligner::new(&surface);
        aligner.snap(WindowHandle(7), &geometry()).unwrap();

        surface.reject_moves.set(true);
        assert!(aligner.on_geometry_changed(&geometry()).is_err());
        assert_eq!(aligner.attachment(), Some(WindowHandle(7)));
    }

    #[test]
    fn clear_is_idempotent() {
        let surface = FakeSurface::default().with_window(7, "Editor", Rect::new(0, 0, 640, 480));
        let mut aligner = Aligner::new(&surface);
        aligner.snap(WindowHandle(7), &geometry()).unwrap();

        aligner.clear_attachment();
        assert_eq!(aligner.attachment(), None);
        aligner.clear_attachment();
        assert_eq!(aligner.attachment(), None);
    }
}
