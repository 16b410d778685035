use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use rusty_cohp::color::color_or_default;
use rusty_cohp::state::AppState;

/// Element-pair table: colour, visibility and integrated-curve toggles.
/// Rows follow the canonical pair order.
pub fn pair_table(ui: &mut Ui, state: &mut AppState) {
    let pairs = match &state.dataset {
        Some(ds) => ds.pairs.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };
    if pairs.is_empty() {
        ui.label("No element pairs recognised.");
        return;
    }
    let options = state.settings.color_options.clone();

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(70.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Element pair", "Color", "Show", "ICOHP/ICOOP"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for pair in &pairs {
                let Some(control) = state.pair_controls.get_mut(pair) else {
                    continue;
                };
                body.row(24.0, |mut row| {
                    row.col(|ui| {
                        ui.label(pair.to_string());
                    });
                    row.col(|ui| {
                        let current = RichText::new(&control.color).color(color_or_default(&control.color));
                        egui::ComboBox::from_id_salt(("pair_color", pair))
                            .selected_text(current)
                            .show_ui(ui, |ui| {
                                for name in &options {
                                    let text = RichText::new(name).color(color_or_default(name));
                                    ui.selectable_value(&mut control.color, name.clone(), text);
                                }
                            });
                    });
                    row.col(|ui| {
                        ui.checkbox(&mut control.show, "");
                    });
                    row.col(|ui| {
                        ui.checkbox(&mut control.show_integrated, "");
                    });
                });
            }
        });
}
