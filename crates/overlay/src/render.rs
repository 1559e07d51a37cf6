//! GDI painting of the overlay frame

use region::{OverlayGeometry, Rect};
use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DeleteObject, DrawTextW, EndPaint, FillRect, SetBkMode,
    SetTextColor, DT_CENTER, DT_SINGLELINE, DT_VCENTER, HBRUSH, HDC, PAINTSTRUCT, TRANSPARENT,
};

/// Cyan frame (#00E5FF as BGR)
pub const FRAME_COLOR: COLORREF = COLORREF(0x00FFE500);
/// Near-black color key; painted pixels become transparent and click-through
pub const TRANSPARENT_KEY: COLORREF = COLORREF(0x00010000);
const TITLE_COLOR: COLORREF = COLORREF(0x00000000);

const TITLE: &str = "UltraShare Region";

fn to_win32(rect: &Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

/// Paint the frame in overlay client coordinates
pub fn paint(hwnd: HWND, geometry: &OverlayGeometry, attached: bool) {
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        let outer = geometry.outer();
        let style = geometry.style();
        let b = style.border_width as i32;

        let frame = CreateSolidBrush(FRAME_COLOR);
        let hole = CreateSolidBrush(TRANSPARENT_KEY);

        let client = Rect::new(0, 0, outer.width, outer.height);
        fill(hdc, &client, frame);

        let content = geometry.content_rect().offset(-outer.x, -outer.y);
        fill(hdc, &content, hole);
        fill(hdc, &geometry.grip_rect(), frame);

        let header = Rect::new(b, b, outer.width - style.horizontal_inset(), style.header_height);
        draw_title(hdc, &header, attached);

        let _ = DeleteObject(hole);
        let _ = DeleteObject(frame);
        let _ = EndPaint(hwnd, &ps);
    }
}

unsafe fn fill(hdc: HDC, rect: &Rect, brush: HBRUSH) {
    FillRect(hdc, &to_win32(rect), brush);
}

unsafe fn draw_title(hdc: HDC, header: &Rect, attached: bool) {
    let text = if attached {
        format!("{} (attached)", TITLE)
    } else {
        TITLE.to_string()
    };
    let mut wide: Vec<u16> = text.encode_utf16().collect();
    let mut bounds = to_win32(header);

    SetBkMode(hdc, TRANSPARENT);
    SetTextColor(hdc, TITLE_COLOR);
    DrawTextW(hdc, &mut wide, &mut bounds, DT_CENTER | DT_VCENTER | DT_SINGLELINE);
}
