use eframe::egui::{self, Align2, Color32, RichText, Ui};
use egui_plot::{Corner, HLine, Legend, Line, LineStyle, Plot, PlotBounds, PlotPoint, PlotPoints, Text, VLine};

use rusty_cohp::color::{FALLBACK_COLOR, color_or_default};
use rusty_cohp::data::model::CurveKind;
use rusty_cohp::state::AppState;

const ENERGY_TITLE: &str = "Energy (eV)";
const NOTICE_COLOR: Color32 = Color32::from_rgb(200, 110, 0);

// ---------------------------------------------------------------------------
// COHP / COOP plot
// ---------------------------------------------------------------------------

/// Render one section's plot: curves on the horizontal axis, energy on the
/// vertical one. Returns the plot's screen rectangle when something was drawn.
pub fn curve_plot(ui: &mut Ui, state: &AppState, kind: CurveKind) -> Option<egui::Rect> {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("{kind}: open a ZIP file  (File → Open…)"));
        });
        return None;
    };

    let section = dataset.section(kind);
    if let Some(notice) = section.notice(kind) {
        ui.label(RichText::new(notice).color(NOTICE_COLOR));
    }
    let curves = section.curves()?;
    let range = state.x_range(kind)?;
    let window = state.energy_window(kind);
    let settings = state.plot(kind);
    let width = state.settings.line_width;

    if let Some(title) = state.plot_title(kind) {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.heading(title);
        });
    }

    let mut plot = Plot::new(("curve_plot", kind.label()))
        .legend(Legend::default().position(Corner::LeftBottom))
        .show_grid(false)
        .show_axes([settings.show_x_scale, settings.show_y_scale])
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false);
    if settings.show_x_title {
        plot = plot.x_axis_label(kind.axis_title());
    }
    if settings.show_y_title {
        plot = plot.y_axis_label(ENERGY_TITLE);
    }

    let response = plot.show(ui, |plot_ui| {
        plot_ui.set_plot_bounds(PlotBounds::from_min_max(
            [range.min, window.min],
            [range.max, window.max],
        ));

        for pair in &curves.pairs {
            let control = state.pair_controls.get(pair);
            if !control.map_or(true, |c| c.show) {
                continue;
            }
            let Some(curve) = curves.get(pair) else {
                continue;
            };
            let color = control.map_or(FALLBACK_COLOR, |c| color_or_default(&c.color));

            let points: PlotPoints = curve
                .primary_sum
                .iter()
                .zip(&curves.energy)
                .map(|(&x, &e)| [x, e])
                .collect();
            plot_ui.line(Line::new(points).name(pair).color(color).width(width));

            if control.is_some_and(|c| c.show_integrated) {
                let points: PlotPoints = curve
                    .integrated_sum
                    .iter()
                    .zip(&curves.energy)
                    .map(|(&x, &e)| [x, e])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(kind.integrated_label())
                        .color(color)
                        .width(width)
                        .style(LineStyle::dashed_loose()),
                );
            }
        }

        // Fermi level and zero line
        plot_ui.hline(
            HLine::new(0.0)
                .color(Color32::BLACK)
                .width(1.5)
                .style(LineStyle::dashed_loose()),
        );
        plot_ui.vline(
            VLine::new(0.0)
                .color(Color32::BLACK)
                .width(1.5)
                .style(LineStyle::dashed_loose()),
        );
        plot_ui.text(
            Text::new(PlotPoint::new(range.max, 0.0), RichText::new("E_F").italics())
                .color(Color32::BLACK)
                .anchor(Align2::RIGHT_BOTTOM),
        );
    });

    Some(response.response.rect)
}
