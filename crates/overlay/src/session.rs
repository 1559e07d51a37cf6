//! Overlay session: geometry, gestures and alignment driven by UI events

use crate::{Aligner, DriftCheck};
use region::{DragGesture, GestureKind, OverlayGeometry, Rect, SizePreset};
use winctl::{WinCtlResult, WindowHandle, WindowSurface};

/// Everything the overlay's event handlers mutate. Owned by the UI thread.
pub struct Session<S> {
    geometry: OverlayGeometry,
    aligner: Aligner<S>,
    gesture: Option<DragGesture>,
}

impl<S: WindowSurface> Session<S> {
    pub fn new(geometry: OverlayGeometry, aligner: Aligner<S>) -> Self {
        Self {
            geometry,
            aligner,
            gesture: None,
        }
    }

    pub fn geometry(&self) -> &OverlayGeometry {
        &self.geometry
    }

    pub fn attachment(&self) -> Option<WindowHandle> {
        self.aligner.attachment()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a drag at a global pointer position. The attached window is
    /// checked for drift first, once per gesture.
    pub fn begin_gesture(&mut self, kind: GestureKind, pointer: (i32, i32)) -> DriftCheck {
        let check = self.aligner.check_and_maybe_detach(&self.geometry);
        self.gesture = Some(DragGesture::begin(kind, pointer, &self.geometry));
        check
    }

    /// Apply a pointer sample of the active gesture. Returns true if the
    /// overlay geometry changed.
    pub fn drag_to(&mut self, pointer: (i32, i32)) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        if !gesture.apply(pointer, &mut self.geometry) {
            return false;
        }
        self.sync_attached();
        true
    }

    pub fn end_gesture(&mut self) {
        self.gesture = None;
    }

    /// Resize for a preset's content resolution and re-sync the attached
    /// window. Returns the new outer rectangle.
    pub fn apply_preset(&mut self, preset: SizePreset) -> Rect {
        let before = self.geometry.outer();
        self.geometry.apply_preset(preset);
        if self.geometry.outer() != before {
            self.sync_attached();
        }
        self.geometry.outer()
    }

    pub fn snap(&mut self, handle: WindowHandle) -> WinCtlResult<Rect> {
        self.aligner.snap(handle, &self.geometry)
    }

    pub fn clear_attachment(&mut self) {
        self.aligner.clear_attachment();
    }

    // Drag-time failures are logged by the aligner and leave the attachment alone.
    fn sync_attached(&mut self) {
        let _ = self.aligner.on_geometry_changed(&self.geometry);
    }
}
