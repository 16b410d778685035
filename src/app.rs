use std::path::PathBuf;

use eframe::egui;
use rusty_cohp::config::Settings;
use rusty_cohp::data::model::CurveKind;
use rusty_cohp::state::AppState;

use crate::ui::{export, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyCohpApp {
    pub state: AppState,
    /// Screen rectangles of the two plots from the last frame.
    plot_rects: [Option<egui::Rect>; 2],
    /// PNG export waiting for its screenshot event.
    pending_export: Option<(CurveKind, PathBuf)>,
}

impl RustyCohpApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
            plot_rects: [None, None],
            pending_export: None,
        }
    }

    fn rect_slot(kind: CurveKind) -> usize {
        match kind {
            CurveKind::Cohp => 0,
            CurveKind::Coop => 1,
        }
    }

    /// Turn an export request into a screenshot command, and finish a
    /// pending export once the screenshot arrives.
    fn handle_exports(&mut self, ctx: &egui::Context) {
        if let Some(request) = self.state.export_request.take() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
            self.pending_export = Some(request);
        }

        if self.pending_export.is_none() {
            return;
        }
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = screenshot else {
            return;
        };
        let Some((kind, path)) = self.pending_export.take() else {
            return;
        };
        let Some(rect) = self.plot_rects[Self::rect_slot(kind)] else {
            self.state.status_message = Some(format!("Error: the {kind} plot is not visible"));
            return;
        };
        match export::save_region_png(&image, rect, ctx.pixels_per_point(), &path) {
            Ok(()) => {
                log::info!("{kind} plot saved to {}", path.display());
                self.state.status_message = Some(format!("Plot saved as '{}'", path.display()));
            }
            Err(e) => {
                log::error!("Failed to save {kind} plot: {e:#}");
                self.state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

impl eframe::App for RustyCohpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_exports(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: adjustments and pair table ----
        egui::SidePanel::right("adjustments_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: COHP and COOP plots side by side ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let state = &self.state;
            let rects = &mut self.plot_rects;
            ui.columns(2, |cols| {
                for (col, kind) in cols.iter_mut().zip(CurveKind::ALL) {
                    rects[Self::rect_slot(kind)] = plot::curve_plot(col, state, kind);
                }
            });
        });

        if self.pending_export.is_some() {
            ctx.request_repaint();
        }
    }
}
