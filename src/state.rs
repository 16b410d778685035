use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::data::filter::{PairControls, init_pair_controls, visible_primary_curves};
use crate::data::model::{CurveKind, Dataset};
use crate::data::range::{DisplayRange, EnergyWindow, fit_range};
use crate::data::{demo, loader};

// ---------------------------------------------------------------------------
// Per-plot adjustments
// ---------------------------------------------------------------------------

/// Axis inputs and label toggles of one plot. Bounds are kept as text so an
/// empty field means "automatic".
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
    pub show_plot_title: bool,
    pub show_x_title: bool,
    pub show_y_title: bool,
    pub show_x_scale: bool,
    pub show_y_scale: bool,
}

impl PlotSettings {
    pub fn new(window: EnergyWindow) -> Self {
        Self {
            x_min: String::new(),
            x_max: String::new(),
            y_min: format_bound(window.min),
            y_max: format_bound(window.max),
            show_plot_title: true,
            show_x_title: true,
            show_y_title: true,
            show_x_scale: true,
            show_y_scale: true,
        }
    }

    pub fn x_overrides(&self) -> (Option<f64>, Option<f64>) {
        (parse_bound(&self.x_min), parse_bound(&self.x_max))
    }

    /// The energy window, with blank or invalid fields taken from `default`.
    pub fn energy_window(&self, default: EnergyWindow) -> EnergyWindow {
        default.with_overrides(parse_bound(&self.y_min), parse_bound(&self.y_max))
    }
}

/// Parse an axis-bound field; blank or non-numeric text is "no override".
pub fn parse_bound(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn format_bound(v: f64) -> String {
    format!("{v}")
}

/// Render ASCII digits as Unicode subscripts (`CeCoAl4` → `CeCoAl₄`).
pub fn subscript_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x2080 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded dataset (None until the user loads a file).
    pub dataset: Option<Dataset>,

    /// Colour / visibility / integrated toggles, shared by both plots.
    pub pair_controls: PairControls,

    pub cohp_plot: PlotSettings,
    pub coop_plot: PlotSettings,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// A PNG export waiting for the next frame's screenshot.
    pub export_request: Option<(CurveKind, PathBuf)>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let window = settings.energy_window;
        Self {
            settings,
            dataset: None,
            pair_controls: PairControls::new(),
            cohp_plot: PlotSettings::new(window),
            coop_plot: PlotSettings::new(window),
            status_message: None,
            export_request: None,
            loading: false,
        }
    }

    /// Ingest a newly loaded dataset, replacing the previous one and its
    /// pair controls.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.pair_controls = init_pair_controls(&dataset, &self.settings.color_cycle);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a `.zip` or bare LOBSTER file. On failure the current dataset
    /// stays and the error goes to the status line.
    pub fn load_path(&mut self, path: &Path) {
        self.loading = true;
        let result = loader::load_file(
            path,
            self.settings.column_layout,
            &self.settings.demo_name,
        );
        self.finish_load(result);
    }

    /// Load the bundled synthetic demo archive.
    pub fn load_demo(&mut self) {
        self.loading = true;
        let name = self.settings.demo_name.clone();
        let result = demo::demo_archive(&name).and_then(|bytes| {
            loader::load_archive(
                &format!("{name}.zip"),
                &bytes,
                self.settings.column_layout,
                &name,
            )
        });
        self.finish_load(result);
    }

    fn finish_load(&mut self, result: anyhow::Result<Dataset>) {
        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded '{}' with {} atom pairs",
                    dataset.name,
                    dataset.pairs.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    pub fn plot(&self, kind: CurveKind) -> &PlotSettings {
        match kind {
            CurveKind::Cohp => &self.cohp_plot,
            CurveKind::Coop => &self.coop_plot,
        }
    }

    pub fn plot_mut(&mut self, kind: CurveKind) -> &mut PlotSettings {
        match kind {
            CurveKind::Cohp => &mut self.cohp_plot,
            CurveKind::Coop => &mut self.coop_plot,
        }
    }

    pub fn energy_window(&self, kind: CurveKind) -> EnergyWindow {
        self.plot(kind).energy_window(self.settings.energy_window)
    }

    /// Curve-axis range for one plot: fitted to the visible pairs inside the
    /// energy window, then per-bound overrides. `None` when the section has
    /// no curves.
    pub fn x_range(&self, kind: CurveKind) -> Option<DisplayRange> {
        let curves = self.dataset.as_ref()?.section(kind).curves()?;
        let visible = visible_primary_curves(curves, &self.pair_controls);
        let auto = fit_range(&curves.energy, self.energy_window(kind), visible);
        let (min, max) = self.plot(kind).x_overrides();
        Some(auto.with_overrides(min, max))
    }

    /// Set both plots to the configured default bounds.
    pub fn reset_axes(&mut self) {
        let x_min = format_bound(self.settings.reset_x_min);
        let x_max = format_bound(self.settings.reset_x_max);
        let window = self.settings.energy_window;
        for kind in CurveKind::ALL {
            let plot = self.plot_mut(kind);
            plot.x_min = x_min.clone();
            plot.x_max = x_max.clone();
            plot.y_min = format_bound(window.min);
            plot.y_max = format_bound(window.max);
        }
    }

    /// `"<name with subscripts> COHP"`, or `None` when the title is hidden.
    pub fn plot_title(&self, kind: CurveKind) -> Option<String> {
        if !self.plot(kind).show_plot_title {
            return None;
        }
        let name = self.dataset.as_ref().map_or("", |d| d.name.as_str());
        Some(format!("{} {kind}", subscript_digits(name)).trim().to_string())
    }

    /// Default PNG file name for a plot export.
    pub fn export_file_name(&self, kind: CurveKind) -> String {
        let name = self
            .dataset
            .as_ref()
            .map_or(self.settings.demo_name.as_str(), |d| d.name.as_str());
        format!("{name}_{kind}_plot.png")
    }
}
