//! Control panel state

use region::SizePreset;
use std::fmt::Display;
use tracing::warn;
use winctl::{WindowEntry, WindowHandle, WindowSurface};

/// Characters of a window title shown in the status line
const STATUS_TITLE_CHARS: usize = 20;

/// Status line under the controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    /// Content area was resized to a preset
    Region { width: u32, height: u32 },
    Snapped { title: String },
    SnapFailed(String),
    ListFailed(String),
    /// The attached window was moved away or closed
    Detached,
}

impl Status {
    /// Get display text for current status
    pub fn display_text(&self) -> String {
        match self {
            Status::Ready => "Ready".to_string(),
            Status::Region { width, height } => format!("Region: {}x{}", width, height),
            Status::Snapped { title } => {
                let short: String = title.chars().take(STATUS_TITLE_CHARS).collect();
                format!("Snapped: {}...", short)
            }
            Status::SnapFailed(reason) => format!("Snap failed: {}", reason),
            Status::ListFailed(reason) => format!("Could not list windows: {}", reason),
            Status::Detached => "Window detached".to_string(),
        }
    }

    /// Check if the status reports a problem
    pub fn is_error(&self) -> bool {
        matches!(self, Status::SnapFailed(_) | Status::ListFailed(_))
    }
}

/// What the control panel shows and which target it has picked
pub struct PanelState {
    preset: SizePreset,
    windows: Vec<WindowEntry>,
    selected: Option<WindowHandle>,
    status: Status,
    last_attachment: Option<WindowHandle>,
}

impl PanelState {
    pub fn new(preset: SizePreset) -> Self {
        let (width, height) = preset.dimensions();
        Self {
            preset,
            windows: Vec::new(),
            selected: None,
            status: Status::Region { width, height },
            last_attachment: None,
        }
    }

    pub fn preset(&self) -> SizePreset {
        self.preset
    }

    /// Record a preset choice. Returns true if it differs from the current one.
    pub fn set_preset(&mut self, preset: SizePreset) -> bool {
        let (width, height) = preset.dimensions();
        self.status = Status::Region { width, height };
        if preset == self.preset {
            return false;
        }
        self.preset = preset;
        true
    }

    /// Window snapshot from the last refresh
    pub fn windows(&self) -> &[WindowEntry] {
        &self.windows
    }

    pub fn selected(&self) -> Option<WindowHandle> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&WindowEntry> {
        let handle = self.selected?;
        self.windows.iter().find(|entry| entry.handle == handle)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Re-enumerate windows. The selection survives if its handle is still
    /// listed, otherwise the first entry is selected. A failed enumeration
    /// keeps the previous snapshot.
    pub fn refresh(&mut self, surface: &impl WindowSurface) {
        match surface.list_visible_windows() {
            Ok(windows) => {
                self.windows = windows;
                let still_listed = self
                    .selected
                    .is_some_and(|handle| self.windows.iter().any(|e| e.handle == handle));
                if !still_listed {
                    self.selected = self.windows.first().map(|entry| entry.handle);
                }
            }
            Err(err) => {
                warn!(error = %err, "window enumeration failed");
                self.status = Status::ListFailed(err.to_string());
            }
        }
    }

    /// Pick a target. Returns true when it differs from the previous one, in
    /// which case the caller drops the current attachment.
    pub fn select(&mut self, handle: WindowHandle) -> bool {
        if self.selected == Some(handle) {
            return false;
        }
        self.selected = Some(handle);
        true
    }

    /// Update the status line from a snap attempt on the selected window
    pub fn record_snap<T, E: Display>(&mut self, result: &Result<T, E>) {
        self.status = match result {
            Ok(_) => Status::Snapped {
                title: self
                    .selected_entry()
                    .map(|entry| entry.title.clone())
                    .unwrap_or_default(),
            },
            Err(err) => Status::SnapFailed(err.to_string()),
        };
    }

    /// Feed the session's current attachment; reports when a window that was
    /// attached has been let go.
    pub fn observe_attachment(&mut self, attachment: Option<WindowHandle>) {
        if self.last_attachment.is_some() && attachment.is_none() && !self.status.is_error() {
            self.status = Status::Detached;
        }
        self.last_attachment = attachment;
    }

    pub fn is_attached(&self) -> bool {
        self.last_attachment.is_some()
    }
}
