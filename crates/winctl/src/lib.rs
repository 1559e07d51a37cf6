//! Window query and control for UltraShare
//!
//! Lists top-level windows and moves them around. The `WindowSurface` trait is
//! the seam the alignment logic talks to; `Win32Surface` is the real backend.

#[cfg(windows)]
pub mod win32;

#[cfg(windows)]
pub use win32::{set_dpi_awareness, Win32Surface};

use region::Rect;
use thiserror::Error;

/// Titles of desktop shell windows that are never offered as targets
pub const EXCLUDED_TITLES: &[&str] = &["Program Manager"];

#[derive(Error, Debug)]
pub enum WinCtlError {
    #[cfg(windows)]
    #[error("Windows API error: {0}")]
    Windows(#[from] windows::core::Error),

    #[error("Window {0} no longer exists")]
    InvalidHandle(WindowHandle),

    #[error("Window {handle} rejected geometry {rect}")]
    Rejected { handle: WindowHandle, rect: Rect },

    #[error("Window {0} could not be brought to the foreground")]
    FocusRefused(WindowHandle),

    #[error("No foreground window")]
    NoForeground,
}

pub type WinCtlResult<T> = Result<T, WinCtlError>;

/// Opaque top-level window identifier. Lifetime is owned by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A listed window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    pub handle: WindowHandle,
    pub title: String,
}

impl WindowEntry {
    pub fn new(handle: WindowHandle, title: impl Into<String>) -> Self {
        Self {
            handle,
            title: title.into(),
        }
    }
}

/// Operations the alignment logic needs from the windowing system.
///
/// Rectangles are absolute screen coordinates.
pub trait WindowSurface {
    /// Visible, titled top-level windows in OS order
    fn list_visible_windows(&self) -> WinCtlResult<Vec<WindowEntry>>;

    fn foreground_window(&self) -> WinCtlResult<WindowEntry>;

    /// Current outer rectangle; fails for handles that are gone
    fn window_rect(&self, handle: WindowHandle) -> WinCtlResult<Rect>;

    /// Move and size a window. Minimized windows are restored without
    /// activation first; Z-order and focus are left alone.
    fn move_resize(&self, handle: WindowHandle, rect: Rect) -> WinCtlResult<()>;

    /// Restore and activate. Callers treat failure as non-fatal.
    fn bring_to_front(&self, handle: WindowHandle) -> WinCtlResult<()>;
}

impl<S: WindowSurface + ?Sized> WindowSurface for &S {
    fn list_visible_windows(&self) -> WinCtlResult<Vec<WindowEntry>> {
        (**self).list_visible_windows()
    }

    fn foreground_window(&self) -> WinCtlResult<WindowEntry> {
        (**self).foreground_window()
    }

    fn window_rect(&self, handle: WindowHandle) -> WinCtlResult<Rect> {
        (**self).window_rect(handle)
    }

    fn move_resize(&self, handle: WindowHandle, rect: Rect) -> WinCtlResult<()> {
        (**self).move_resize(handle, rect)
    }

    fn bring_to_front(&self, handle: WindowHandle) -> WinCtlResult<()> {
        (**self).bring_to_front(handle)
    }
}

/// Whether a visible window with this title belongs in the target list
pub fn is_listable(title: &str) -> bool {
    !title.is_empty() && !EXCLUDED_TITLES.contains(&title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untitled_and_shell_windows_are_not_listable() {
        assert!(!is_listable(""));
        assert!(!is_listable("Program Manager"));
        assert!(is_listable("Program Manager - notes.txt"));
        assert!(is_listable("Visual Studio Code"));
    }

    #[test]
    fn handle_displays_as_hex() {
        assert_eq!(WindowHandle(0x1a2b).to_string(), "0x1a2b");
    }

    #[test]
    fn rejected_error_names_rect() {
        let err = WinCtlError::Rejected {
            handle: WindowHandle(16),
            rect: Rect::new(1, 2, 3, 4),
        };
        assert_eq!(err.to_string(), "Window 0x10 rejected geometry 3x4+1+2");
    }

    #[test]
    fn focus_refusal_names_the_window() {
        let err = WinCtlError::FocusRefused(WindowHandle(0x2a));
        assert_eq!(err.to_string(), "Window 0x2a could not be brought to the foreground");
    }
}
