//! Auto-scaling of the curve axis from the data visible in an energy window.

use serde::{Deserialize, Serialize};

/// Relative margin added on both sides of the fitted range.
pub const RANGE_BUFFER: f64 = 0.05;

/// Closed energy interval `[min, max]` shown on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyWindow {
    pub min: f64,
    pub max: f64,
}

impl EnergyWindow {
    pub fn new(min: f64, max: f64) -> Self {
        EnergyWindow { min, max }
    }

    pub fn contains(&self, e: f64) -> bool {
        e >= self.min && e <= self.max
    }

    /// Replace either bound with an explicit value when given.
    pub fn with_overrides(self, min: Option<f64>, max: Option<f64>) -> Self {
        EnergyWindow {
            min: min.unwrap_or(self.min),
            max: max.unwrap_or(self.max),
        }
    }
}

/// Horizontal `(min, max)` bounds in the curve's units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

impl DisplayRange {
    /// Explicit bounds win per side; the other side stays auto-fitted.
    pub fn with_overrides(self, min: Option<f64>, max: Option<f64>) -> Self {
        DisplayRange {
            min: min.unwrap_or(self.min),
            max: max.unwrap_or(self.max),
        }
    }
}

/// Symmetric range bounding every curve's magnitude inside `window`.
///
/// Curves whose length differs from `energy` are ignored. When nothing
/// non-zero is visible the magnitude falls back to 1.
pub fn fit_range<'a, I>(energy: &[f64], window: EnergyWindow, curves: I) -> DisplayRange
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mask: Vec<bool> = energy.iter().map(|&e| window.contains(e)).collect();

    let mut max_abs = 0.0_f64;
    for curve in curves {
        if curve.len() != energy.len() {
            continue;
        }
        for (v, &inside) in curve.iter().zip(&mask) {
            if inside {
                max_abs = max_abs.max(v.abs());
            }
        }
    }

    if max_abs == 0.0 {
        max_abs = 1.0;
    }
    let bound = max_abs * (1.0 + RANGE_BUFFER);
    DisplayRange {
        min: -bound,
        max: bound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn axis() -> Vec<f64> {
        (-10..=10).map(f64::from).collect()
    }

    #[test]
    fn window_selects_the_extremum() {
        let energy = axis();
        // peak of 4 inside the window, larger values outside it
        let curve: Vec<f64> = energy
            .iter()
            .map(|&e| match e as i32 {
                -3 => -4.0,
                -9 | 5 => 50.0,
                _ => 1.0,
            })
            .collect();
        let r = fit_range(&energy, EnergyWindow::new(-8.0, 2.0), [curve.as_slice()]);
        assert!(close(r.min, -4.2) && close(r.max, 4.2), "{r:?}");
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let energy = axis();
        let mut curve = vec![0.0; energy.len()];
        curve[2] = 2.0; // e = -8
        let r = fit_range(&energy, EnergyWindow::new(-8.0, 2.0), [curve.as_slice()]);
        assert!(close(r.max, 2.1));
    }

    #[test]
    fn maximum_is_taken_across_curves() {
        let energy = axis();
        let a = vec![1.0; energy.len()];
        let b = vec![-3.0; energy.len()];
        let r = fit_range(&energy, EnergyWindow::new(-8.0, 2.0), [a.as_slice(), b.as_slice()]);
        assert!(close(r.min, -3.15) && close(r.max, 3.15));
    }

    #[test]
    fn degenerate_inputs_fall_back_to_unit_range() {
        let energy = axis();
        let flat = vec![0.0; energy.len()];
        let short = vec![9.0; 3];
        for r in [
            fit_range(&energy, EnergyWindow::new(-8.0, 2.0), std::iter::empty()),
            fit_range(&energy, EnergyWindow::new(-8.0, 2.0), [flat.as_slice()]),
            fit_range(&energy, EnergyWindow::new(-8.0, 2.0), [short.as_slice()]),
            fit_range(&energy, EnergyWindow::new(20.0, 30.0), [short.as_slice(), flat.as_slice()]),
        ] {
            assert!(close(r.min, -1.05) && close(r.max, 1.05), "{r:?}");
        }
    }

    #[test]
    fn overrides_apply_per_bound() {
        let auto = DisplayRange { min: -2.0, max: 2.0 };
        assert_eq!(auto.with_overrides(Some(-5.0), None), DisplayRange { min: -5.0, max: 2.0 });
        assert_eq!(auto.with_overrides(None, Some(1.0)), DisplayRange { min: -2.0, max: 1.0 });
        assert_eq!(auto.with_overrides(None, None), auto);
        let w = EnergyWindow::new(-8.0, 2.0).with_overrides(None, Some(4.0));
        assert_eq!(w, EnergyWindow::new(-8.0, 4.0));
    }
}
