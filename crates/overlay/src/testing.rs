//! In-memory window surface for tests

use region::Rect;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use winctl::{WinCtlError, WinCtlResult, WindowEntry, WindowHandle, WindowSurface};

/// Records every call; windows only exist after `with_window`
#[derive(Default)]
pub(crate) struct FakeSurface {
    entries: RefCell<Vec<WindowEntry>>,
    rects: RefCell<HashMap<WindowHandle, Rect>>,
    moves: RefCell<Vec<(WindowHandle, Rect)>>,
    raised: RefCell<Vec<WindowHandle>>,
    queries: Cell<usize>,
    pub reject_moves: Cell<bool>,
    pub refuse_focus: Cell<bool>,
}

impl FakeSurface {
    pub fn with_window(self, raw: isize, title: &str, rect: Rect) -> Self {
        let handle = WindowHandle(raw);
        self.entries.borrow_mut().push(WindowEntry::new(handle, title));
        self.rects.borrow_mut().insert(handle, rect);
        self
    }

    /// Simulate the user dragging the window elsewhere
    pub fn set_rect(&self, raw: isize, rect: Rect) {
        self.rects.borrow_mut().insert(WindowHandle(raw), rect);
    }

    /// Simulate the window being closed
    pub fn close(&self, raw: isize) {
        let handle = WindowHandle(raw);
        self.rects.borrow_mut().remove(&handle);
        self.entries.borrow_mut().retain(|entry| entry.handle != handle);
    }

    pub fn moves(&self) -> Vec<(WindowHandle, Rect)> {
        self.moves.borrow().clone()
    }

    pub fn raised(&self) -> Vec<WindowHandle> {
        self.raised.borrow().clone()
    }

    pub fn queries(&self) -> usize {
        self.queries.get()
    }
}

impl WindowSurface for FakeSurface {
    fn list_visible_windows(&self) -> WinCtlResult<Vec<WindowEntry>> {
        Ok(self.entries.borrow().clone())
    }

    fn foreground_window(&self) -> WinCtlResult<WindowEntry> {
        self.entries
            .borrow()
            .first()
            .cloned()
            .ok_or(WinCtlError::NoForeground)
    }

    fn window_rect(&self, handle: WindowHandle) -> WinCtlResult<Rect> {
        self.queries.set(self.queries.get() + 1);
        self.rects
            .borrow()
            .get(&handle)
            .copied()
            .ok_or(WinCtlError::InvalidHandle(handle))
    }

    fn move_resize(&self, handle: WindowHandle, rect: Rect) -> WinCtlResult<()> {
        if !self.rects.borrow().contains_key(&handle) {
            return Err(WinCtlError::InvalidHandle(handle));
        }
        if self.reject_moves.get() {
            return Err(WinCtlError::Rejected { handle, rect });
        }
        self.rects.borrow_mut().insert(handle, rect);
        self.moves.borrow_mut().push((handle, rect));
        Ok(())
    }

    fn bring_to_front(&self, handle: WindowHandle) -> WinCtlResult<()> {
        if self.refuse_focus.get() {
            return Err(WinCtlError::FocusRefused(handle));
        }
        self.raised.borrow_mut().push(handle);
        Ok(())
    }
}
