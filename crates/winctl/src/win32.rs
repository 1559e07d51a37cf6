//! Win32 implementation of the window surface

use crate::{is_listable, WinCtlError, WinCtlResult, WindowEntry, WindowHandle, WindowSurface};
use region::Rect;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use tracing::{debug, warn};
use windows::Win32::Foundation::{BOOL, HWND, LPARAM, RECT};
use windows::Win32::System::Threading::GetCurrentProcessId;
use windows::Win32::UI::HiDpi::{
    SetProcessDpiAwarenessContext, DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetForegroundWindow, GetWindowRect, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible, SetForegroundWindow,
    SetWindowPos, ShowWindow, SWP_NOACTIVATE, SWP_NOZORDER, SWP_SHOWWINDOW, SW_RESTORE,
    SW_SHOWNOACTIVATE,
};

pub(crate) fn hwnd_from_handle(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut std::ffi::c_void)
}

pub(crate) fn handle_from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

fn rect_from_win32(rect: &RECT) -> Rect {
    Rect::new(
        rect.left,
        rect.top,
        (rect.right - rect.left).max(0) as u32,
        (rect.bottom - rect.top).max(0) as u32,
    )
}

/// Make window coordinates physical pixels. Call once, before any window exists.
pub fn set_dpi_awareness() -> WinCtlResult<()> {
    unsafe {
        SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2)?;
    }
    Ok(())
}

/// Desktop windows through user32. Windows owned by this process are hidden
/// from the list so the overlay and control panel can't target themselves.
#[derive(Debug, Clone, Copy)]
pub struct Win32Surface {
    own_pid: u32,
}

impl Win32Surface {
    pub fn new() -> Self {
        Self {
            own_pid: unsafe { GetCurrentProcessId() },
        }
    }

    fn ensure_window(&self, handle: WindowHandle) -> WinCtlResult<HWND> {
        let hwnd = hwnd_from_handle(handle);
        if unsafe { IsWindow(hwnd) }.as_bool() {
            Ok(hwnd)
        } else {
            Err(WinCtlError::InvalidHandle(handle))
        }
    }
}

impl Default for Win32Surface {
    fn default() -> Self {
        Self::new()
    }
}

struct EnumState {
    own_pid: u32,
    entries: Vec<WindowEntry>,
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let state = &mut *(lparam.0 as *mut EnumState);

    if IsWindowVisible(hwnd).as_bool() && window_pid(hwnd) != state.own_pid {
        let title = window_title(hwnd);
        if is_listable(&title) {
            state.entries.push(WindowEntry::new(handle_from_hwnd(hwnd), title));
        }
    }

    BOOL(1) // Continue enumeration
}

unsafe fn window_pid(hwnd: HWND) -> u32 {
    let mut pid: u32 = 0;
    GetWindowThreadProcessId(hwnd, Some(&mut pid as *mut u32));
    pid
}

unsafe fn window_title(hwnd: HWND) -> String {
    let len = GetWindowTextLengthW(hwnd);
    if len <= 0 {
        return String::new();
    }

    let mut buf = vec![0u16; len as usize + 1];
    let copied = GetWindowTextW(hwnd, &mut buf).max(0) as usize;
    OsString::from_wide(&buf[..copied])
        .to_string_lossy()
        .into_owned()
}

impl WindowSurface for Win32Surface {
    fn list_visible_windows(&self) -> WinCtlResult<Vec<WindowEntry>> {
        let mut state = EnumState {
            own_pid: self.own_pid,
            entries: Vec::new(),
        };

        unsafe {
            EnumWindows(
                Some(enum_window_callback),
                LPARAM(&mut state as *mut EnumState as isize),
            )?;
        }

        debug!(count = state.entries.len(), "enumerated windows");
        Ok(state.entries)
    }

    fn foreground_window(&self) -> WinCtlResult<WindowEntry> {
        unsafe {
            let hwnd = GetForegroundWindow();
            if hwnd.is_invalid() {
                return Err(WinCtlError::NoForeground);
            }
            Ok(WindowEntry::new(handle_from_hwnd(hwnd), window_title(hwnd)))
        }
    }

    fn window_rect(&self, handle: WindowHandle) -> WinCtlResult<Rect> {
        let hwnd = self.ensure_window(handle)?;
        let mut rect = RECT::default();
        unsafe {
            GetWindowRect(hwnd, &mut rect).map_err(|_| WinCtlError::InvalidHandle(handle))?;
        }
        Ok(rect_from_win32(&rect))
    }

    fn move_resize(&self, handle: WindowHandle, rect: Rect) -> WinCtlResult<()> {
        if !rect.is_realized() {
            return Err(WinCtlError::Rejected { handle, rect });
        }
        let hwnd = self.ensure_window(handle)?;

        unsafe {
            if IsIconic(hwnd).as_bool() {
                let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
            }

            SetWindowPos(
                hwnd,
                None,
                rect.x,
                rect.y,
                rect.width as i32,
                rect.height as i32,
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_SHOWWINDOW,
            )
            .map_err(|err| {
                warn!(%handle, %rect, error = %err, "SetWindowPos failed");
                WinCtlError::Rejected { handle, rect }
            })?;
        }

        Ok(())
    }

    fn bring_to_front(&self, handle: WindowHandle) -> WinCtlResult<()> {
        let hwnd = self.ensure_window(handle)?;

        unsafe {
            let _ = ShowWindow(hwnd, SW_RESTORE);
            if !SetForegroundWindow(hwnd).as_bool() {
                return Err(WinCtlError::FocusRefused(handle));
            }
        }

        Ok(())
    }
}
