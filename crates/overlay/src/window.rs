//! Overlay frame window implementation
//!
//! A borderless, topmost, color-keyed window whose client area is exactly the
//! overlay's outer rectangle. It lives on the UI thread; whatever message pump
//! runs there (the control panel's event loop) dispatches its messages.

use crate::{render, Aligner, OverlayError, OverlayResult, Session};
use region::{GestureKind, OverlayGeometry, Rect};
use std::cell::RefCell;
use std::sync::Once;
use tracing::{debug, warn};
use winctl::Win32Surface;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows::Win32::Graphics::Gdi::{InvalidateRect, ScreenToClient, UpdateWindow};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetCursorPos, LoadCursorW, RegisterClassExW,
    SetCursor, SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos, ShowWindow,
    GWLP_HWNDPARENT, IDC_ARROW, IDC_SIZEALL, IDC_SIZENWSE, LWA_COLORKEY, MA_NOACTIVATE,
    SWP_NOACTIVATE, SWP_NOZORDER, SW_SHOWNOACTIVATE, WM_CAPTURECHANGED, WM_CLOSE,
    WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEACTIVATE, WM_MOUSEMOVE, WM_PAINT, WM_SETCURSOR,
    WNDCLASSEXW, WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};

thread_local! {
    static OVERLAY_STATE: RefCell<Option<OverlayState>> = const { RefCell::new(None) };
}

struct OverlayState {
    hwnd: HWND,
    session: Session<Win32Surface>,
}

static REGISTER: Once = Once::new();

/// Borrow the live state. Nested messages sent while a handler holds the
/// borrow get `Busy` and fall back to default handling.
fn with_state<R>(f: impl FnOnce(&mut OverlayState) -> R) -> OverlayResult<R> {
    OVERLAY_STATE.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| OverlayError::Busy)?;
        let state = slot.as_mut().ok_or(OverlayError::NotCreated)?;
        Ok(f(state))
    })
}

fn register_class() -> OverlayResult<()> {
    let mut result: Result<(), OverlayError> = Ok(());
    REGISTER.call_once(|| unsafe {
        let hmodule = match GetModuleHandleW(None) {
            Ok(h) => h,
            Err(e) => {
                result = Err(e.into());
                return;
            }
        };
        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            lpfnWndProc: Some(OverlayWindow::wnd_proc),
            hInstance: HINSTANCE(hmodule.0),
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            lpszClassName: OverlayWindow::CLASS_NAME,
            ..Default::default()
        };

        if RegisterClassExW(&wc) == 0 {
            result = Err(windows::core::Error::from_win32().into());
        }
    });

    result
}

unsafe fn cursor_pos() -> Option<(i32, i32)> {
    let mut pt = POINT::default();
    GetCursorPos(&mut pt).ok()?;
    Some((pt.x, pt.y))
}

unsafe fn place(hwnd: HWND, outer: Rect) {
    if let Err(err) = SetWindowPos(
        hwnd,
        None,
        outer.x,
        outer.y,
        outer.width as i32,
        outer.height as i32,
        SWP_NOZORDER | SWP_NOACTIVATE,
    ) {
        warn!(%outer, error = %err, "failed to place overlay");
    }
    let _ = InvalidateRect(hwnd, None, false);
}

/// The on-screen overlay frame
pub struct OverlayWindow;

impl OverlayWindow {
    const CLASS_NAME: PCWSTR = w!("UltraShareOverlay");

    /// Create and show the overlay on the calling thread. That thread must
    /// pump messages afterwards.
    pub fn create(geometry: OverlayGeometry, surface: Win32Surface) -> OverlayResult<()> {
        register_class()?;

        unsafe {
            let hmodule = GetModuleHandleW(None)?;
            let hinstance = HINSTANCE(hmodule.0);
            let outer = geometry.outer();

            let hwnd = CreateWindowExW(
                WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_TOOLWINDOW,
                Self::CLASS_NAME,
                w!("UltraShare Overlay"),
                WS_POPUP,
                outer.x,
                outer.y,
                outer.width as i32,
                outer.height as i32,
                None,
                None,
                hinstance,
                None,
            )?;

            if let Err(err) = SetLayeredWindowAttributes(hwnd, render::TRANSPARENT_KEY, 0, LWA_COLORKEY) {
                let _ = DestroyWindow(hwnd);
                return Err(err.into());
            }

            let previous = OVERLAY_STATE.with(|cell| {
                cell.borrow_mut().replace(OverlayState {
                    hwnd,
                    session: Session::new(geometry, Aligner::new(surface)),
                })
            });
            if let Some(old) = previous {
                let _ = DestroyWindow(old.hwnd);
            }

            let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            let _ = UpdateWindow(hwnd);
            debug!(%outer, "overlay created");
        }

        Ok(())
    }

    /// Run `f` against the overlay session, then bring the window in line with
    /// whatever `f` changed.
    pub fn with_session<R>(f: impl FnOnce(&mut Session<Win32Surface>) -> R) -> OverlayResult<R> {
        let (result, hwnd, before, after) = with_state(|state| {
            let before = state.session.geometry().outer();
            let result = f(&mut state.session);
            (result, state.hwnd, before, state.session.geometry().outer())
        })?;

        unsafe {
            if before != after {
                place(hwnd, after);
            } else {
                let _ = InvalidateRect(hwnd, None, false);
            }
        }

        Ok(result)
    }

    /// Make `owner` (the control panel) own the overlay so they minimize together
    pub fn set_owner(owner: isize) -> OverlayResult<()> {
        let hwnd = with_state(|state| state.hwnd)?;
        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_HWNDPARENT, owner);
        }
        Ok(())
    }

    pub fn destroy() {
        let state = OVERLAY_STATE.with(|cell| cell.try_borrow_mut().ok().and_then(|mut slot| slot.take()));
        if let Some(state) = state {
            unsafe {
                let _ = DestroyWindow(state.hwnd);
            }
        }
    }

    unsafe extern "system" fn wnd_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_PAINT => {
                let painted = with_state(|state| {
                    render::paint(
                        hwnd,
                        state.session.geometry(),
                        state.session.attachment().is_some(),
                    )
                });
                match painted {
                    Ok(()) => LRESULT(0),
                    Err(_) => DefWindowProcW(hwnd, msg, wparam, lparam),
                }
            }

            // Clicking the frame must not pull focus from the shared window
            WM_MOUSEACTIVATE => LRESULT(MA_NOACTIVATE as isize),

            WM_SETCURSOR => {
                if Self::set_gesture_cursor(hwnd) {
                    LRESULT(1)
                } else {
                    DefWindowProcW(hwnd, msg, wparam, lparam)
                }
            }

            WM_LBUTTONDOWN => {
                Self::handle_mouse_down(hwnd, lparam);
                LRESULT(0)
            }

            WM_MOUSEMOVE => {
                Self::handle_mouse_move(hwnd);
                LRESULT(0)
            }

            WM_LBUTTONUP => {
                let _ = with_state(|state| state.session.end_gesture());
                let _ = ReleaseCapture();
                LRESULT(0)
            }

            WM_CAPTURECHANGED => {
                let _ = with_state(|state| state.session.end_gesture());
                LRESULT(0)
            }

            // The frame lives as long as the control panel
            WM_CLOSE => LRESULT(0),

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }

    unsafe fn handle_mouse_down(hwnd: HWND, lparam: LPARAM) {
        let x = (lparam.0 & 0xFFFF) as i16 as i32;
        let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;
        let Some(pointer) = cursor_pos() else {
            return;
        };

        let started = with_state(|state| {
            let kind = state.session.geometry().hit_test(x, y)?;
            Some((kind, state.session.begin_gesture(kind, pointer)))
        });

        if let Ok(Some((kind, check))) = started {
            debug!(?kind, ?check, "gesture started");
            SetCapture(hwnd);
            if check.detached() {
                let _ = InvalidateRect(hwnd, None, false);
            }
        }
    }

    unsafe fn handle_mouse_move(hwnd: HWND) {
        let Some(pointer) = cursor_pos() else {
            return;
        };

        let moved = with_state(|state| {
            if !state.session.is_dragging() {
                return None;
            }
            state
                .session
                .drag_to(pointer)
                .then(|| state.session.geometry().outer())
        });

        if let Ok(Some(outer)) = moved {
            place(hwnd, outer);
        }
    }

    unsafe fn set_gesture_cursor(hwnd: HWND) -> bool {
        let Some((x, y)) = cursor_pos() else {
            return false;
        };
        let mut pt = POINT { x, y };
        if !ScreenToClient(hwnd, &mut pt).as_bool() {
            return false;
        }

        let kind = with_state(|state| state.session.geometry().hit_test(pt.x, pt.y))
            .ok()
            .flatten();
        let cursor = match kind {
            Some(GestureKind::Move) => IDC_SIZEALL,
            Some(GestureKind::Resize) => IDC_SIZENWSE,
            None => return false,
        };

        match LoadCursorW(None, cursor) {
            Ok(cursor) => {
                SetCursor(cursor);
                true
            }
            Err(_) => false,
        }
    }
}
