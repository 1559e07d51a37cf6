//! Control panel built with egui

use crate::state::PanelState;
use eframe::egui;
use overlay::OverlayWindow;
use region::SizePreset;
use std::time::Duration;
use tracing::{debug, info, warn};
use winctl::{Win32Surface, WindowHandle};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 229, 255);
const DISABLED: egui::Color32 = egui::Color32::from_rgb(108, 117, 125);
const ERROR: egui::Color32 = egui::Color32::from_rgb(220, 53, 69);

/// Drift and lost windows are only noticed through polling
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct ControlPanelApp {
    state: PanelState,
    surface: Win32Surface,
    owner_set: bool,
}

impl ControlPanelApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, preset: SizePreset) -> Self {
        let surface = Win32Surface::new();
        let mut state = PanelState::new(preset);
        state.refresh(&surface);
        Self {
            state,
            surface,
            owner_set: false,
        }
    }

    fn adopt_overlay(&mut self, frame: &eframe::Frame) {
        use raw_window_handle::{HasWindowHandle, RawWindowHandle};

        if self.owner_set {
            return;
        }
        if let Ok(handle) = frame.window_handle() {
            if let RawWindowHandle::Win32(win32) = handle.as_raw() {
                match OverlayWindow::set_owner(win32.hwnd.get()) {
                    Ok(()) => self.owner_set = true,
                    Err(err) => warn!(error = %err, "could not attach overlay to panel"),
                }
            }
        }
    }

    fn preset_row(&mut self, ui: &mut egui::Ui) {
        let mut chosen = self.state.preset();
        ui.horizontal(|ui| {
            ui.label("Region size:");
            egui::ComboBox::from_id_source("preset")
                .selected_text(chosen.label())
                .width(220.0)
                .show_ui(ui, |ui| {
                    for preset in SizePreset::ALL {
                        ui.selectable_value(&mut chosen, preset, preset.label());
                    }
                });
        });

        if chosen != self.state.preset() && self.state.set_preset(chosen) {
            match OverlayWindow::with_session(|session| session.apply_preset(chosen)) {
                Ok(outer) => info!(preset = chosen.name(), %outer, "preset applied"),
                Err(err) => warn!(error = %err, "preset not applied"),
            }
        }
    }

    fn window_row(&mut self, ui: &mut egui::Ui) {
        let mut chosen: Option<WindowHandle> = self.state.selected();
        let selected_text = self
            .state
            .selected_entry()
            .map(|entry| entry.title.as_str())
            .unwrap_or("No windows found");

        ui.label("Target window:");
        egui::ComboBox::from_id_source("target")
            .selected_text(selected_text)
            .width(360.0)
            .show_ui(ui, |ui| {
                for entry in self.state.windows() {
                    ui.selectable_value(&mut chosen, Some(entry.handle), entry.title.as_str());
                }
            });

        if let Some(handle) = chosen {
            if self.state.select(handle) {
                debug!(%handle, "target changed");
                let _ = OverlayWindow::with_session(|session| session.clear_attachment());
            }
        }

        ui.add_space(6.0);
        if ui.button("🔄 Refresh list").clicked() {
            self.state.refresh(&self.surface);
        }
    }

    fn snap_button(&mut self, ui: &mut egui::Ui) {
        let target = self.state.selected();
        let snap_btn = egui::Button::new(
            egui::RichText::new("SNAP!")
                .size(20.0)
                .strong()
                .color(egui::Color32::BLACK),
        )
        .fill(if target.is_some() { ACCENT } else { DISABLED })
        .min_size(egui::vec2(200.0, 50.0))
        .rounding(8.0);

        if ui.add_enabled(target.is_some(), snap_btn).clicked() {
            if let Some(handle) = target {
                let result = OverlayWindow::with_session(|session| session.snap(handle))
                    .and_then(|snapped| snapped.map_err(Into::into));
                if let Err(err) = &result {
                    warn!(%handle, error = %err, "snap failed");
                }
                self.state.record_snap(&result);
            }
        }
    }
}

impl eframe::App for ControlPanelApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.adopt_overlay(frame);

        if let Ok(attachment) = OverlayWindow::with_session(|session| session.attachment()) {
            self.state.observe_attachment(attachment);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(16.0);
                ui.heading(egui::RichText::new("UltraShare").size(32.0).color(ACCENT));
                ui.label("Ultra-Wide Screen Sharing Tool");
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(16.0);
            });

            self.preset_row(ui);
            ui.add_space(16.0);
            self.window_row(ui);
            ui.add_space(24.0);

            ui.vertical_centered(|ui| {
                self.snap_button(ui);
                ui.add_space(16.0);

                let (marker, color) = if self.state.is_attached() {
                    ("● Attached", ACCENT)
                } else {
                    ("○ Not attached", DISABLED)
                };
                ui.label(egui::RichText::new(marker).color(color));

                ui.add_space(8.0);
                let status = self.state.status();
                let text = egui::RichText::new(status.display_text()).size(14.0);
                ui.label(if status.is_error() { text.color(ERROR) } else { text });
            });
        });

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
