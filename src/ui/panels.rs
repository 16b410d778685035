use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use rusty_cohp::data::export::save_csv;
use rusty_cohp::data::model::CurveKind;
use rusty_cohp::state::AppState;

use super::table;

// ---------------------------------------------------------------------------
// Right side panel – graph adjustments and pair table
// ---------------------------------------------------------------------------

/// Render the adjustments panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for kind in CurveKind::ALL {
                plot_adjustments(ui, state, kind);
                ui.separator();
            }

            ui.heading("Element pairs");
            table::pair_table(ui, state);
        });
}

fn plot_adjustments(ui: &mut Ui, state: &mut AppState, kind: CurveKind) {
    ui.heading(format!("{kind} graph adjustments"));
    let plot = state.plot_mut(kind);

    ui.horizontal(|ui: &mut Ui| {
        ui.strong("X-axis limits:");
        bound_field(ui, &mut plot.x_min, "auto");
        bound_field(ui, &mut plot.x_max, "auto");
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Y-axis limits:");
        bound_field(ui, &mut plot.y_min, "min");
        bound_field(ui, &mut plot.y_max, "max");
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut plot.show_plot_title, "Plot title");
        ui.checkbox(&mut plot.show_x_title, "X axis title");
        ui.checkbox(&mut plot.show_y_title, "Y axis title");
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut plot.show_x_scale, "Show X axis scale");
        ui.checkbox(&mut plot.show_y_scale, "Show Y axis scale");
    });
}

fn bound_field(ui: &mut Ui, text: &mut String, hint: &str) {
    ui.add(
        TextEdit::singleline(text)
            .hint_text(hint)
            .desired_width(50.0),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Demo file").clicked() {
                state.load_demo();
                ui.close_menu();
            }
            ui.separator();
            for kind in CurveKind::ALL {
                let enabled = section_loaded(state, kind);
                if ui
                    .add_enabled(enabled, egui::Button::new(format!("Export {kind} curves (CSV)…")))
                    .clicked()
                {
                    export_csv_dialog(state, kind);
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        if ui.button("Reset axes").clicked() {
            state.reset_axes();
        }
        for kind in CurveKind::ALL {
            let enabled = section_loaded(state, kind);
            if ui
                .add_enabled(enabled, egui::Button::new(format!("Save {kind} plot")))
                .clicked()
            {
                save_plot_dialog(state, kind);
            }
        }

        ui.separator();

        if state.loading {
            ui.spinner();
        }
        if let Some(ds) = &state.dataset {
            ui.label(format!("{}: {} element pairs", ds.name, ds.pairs.len()));
        }

        if let Some(msg) = &state.status_message {
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::DARK_GREEN
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

fn section_loaded(state: &AppState, kind: CurveKind) -> bool {
    state
        .dataset
        .as_ref()
        .is_some_and(|ds| ds.section(kind).curves().is_some())
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open LOBSTER output")
        .add_filter("ZIP with COHPCAR and/or COOPCAR.lobster", &["zip"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

fn save_plot_dialog(state: &mut AppState, kind: CurveKind) {
    let file = rfd::FileDialog::new()
        .set_title(format!("Save {kind} plot"))
        .set_file_name(state.export_file_name(kind))
        .add_filter("PNG", &["png"])
        .save_file();

    if let Some(path) = file {
        state.export_request = Some((kind, path));
    }
}

fn export_csv_dialog(state: &mut AppState, kind: CurveKind) {
    let Some(curves) = state.dataset.as_ref().and_then(|ds| ds.section(kind).curves()) else {
        return;
    };
    let default_name = state.export_file_name(kind).replace("_plot.png", "_curves.csv");
    let file = rfd::FileDialog::new()
        .set_title(format!("Export {kind} curves"))
        .set_file_name(default_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = file else {
        return;
    };
    let message = match save_csv(curves, &path) {
        Ok(()) => format!("{kind} curves exported to '{}'", path.display()),
        Err(e) => {
            log::error!("Failed to export {kind} curves: {e:#}");
            format!("Error: {e:#}")
        }
    };
    state.status_message = Some(message);
}
