use std::collections::BTreeMap;

use super::model::{AtomPair, Dataset, PairCurves};

// ---------------------------------------------------------------------------
// Per-pair display controls
// ---------------------------------------------------------------------------

/// User toggles for one atom pair, shared by the COHP and COOP plots.
#[derive(Debug, Clone, PartialEq)]
pub struct PairControl {
    /// Colour name, resolved through [`crate::color::named_color`].
    pub color: String,
    pub show: bool,
    pub show_integrated: bool,
}

/// Controls keyed by pair. Pairs missing here behave as shown, without
/// the integrated curve.
pub type PairControls = BTreeMap<AtomPair, PairControl>;

/// Initialise controls for every pair of the dataset: colours cycle through
/// `cycle` by pair index, every pair shown, integrated curves hidden.
pub fn init_pair_controls(dataset: &Dataset, cycle: &[String]) -> PairControls {
    dataset
        .pairs
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let color = if cycle.is_empty() {
                String::from("blue")
            } else {
                cycle[i % cycle.len()].clone()
            };
            let control = PairControl {
                color,
                show: true,
                show_integrated: false,
            };
            (pair.clone(), control)
        })
        .collect()
}

/// Pairs of `curves` that are toggled on, in canonical order.
pub fn visible_pairs<'a>(curves: &'a PairCurves, controls: &PairControls) -> Vec<&'a AtomPair> {
    curves
        .pairs
        .iter()
        .filter(|pair| controls.get(*pair).map_or(true, |c| c.show))
        .collect()
}

/// Primary curves of the visible pairs, the input of the range fitter.
pub fn visible_primary_curves<'a>(curves: &'a PairCurves, controls: &PairControls) -> Vec<&'a [f64]> {
    visible_pairs(curves, controls)
        .into_iter()
        .filter_map(|pair| curves.get(pair))
        .map(|c| c.primary_sum.as_slice())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AggregatedPairCurve, CurveKind, Section};

    fn curves(pairs: &[(&str, &str, f64)]) -> PairCurves {
        let mut map = BTreeMap::new();
        for (a, b, v) in pairs {
            map.insert(
                AtomPair::new(a, b),
                AggregatedPairCurve {
                    primary_sum: vec![*v],
                    integrated_sum: vec![0.0],
                },
            );
        }
        PairCurves {
            kind: CurveKind::Cohp,
            energy: vec![0.0],
            pairs: map.keys().cloned().collect(),
            curves: map,
            interaction_count: pairs.len(),
        }
    }

    fn cycle() -> Vec<String> {
        ["red", "green", "blue", "orange"].map(String::from).to_vec()
    }

    #[test]
    fn colours_cycle_by_pair_index() {
        let c = curves(&[
            ("Al", "Al", 1.0),
            ("Al", "Ce", 1.0),
            ("Al", "Co", 1.0),
            ("Ce", "Co", 1.0),
            ("Co", "Co", 1.0),
        ]);
        let ds = Dataset::from_sections("t".into(), Section::Loaded(c), Section::Absent);
        let controls = init_pair_controls(&ds, &cycle());
        let colours: Vec<&str> = ds.pairs.iter().map(|p| controls[p].color.as_str()).collect();
        assert_eq!(colours, ["red", "green", "blue", "orange", "red"]);
        assert!(controls.values().all(|c| c.show && !c.show_integrated));
    }

    #[test]
    fn hidden_pairs_are_excluded() {
        let c = curves(&[("Fe", "O", 3.0), ("O", "O", 7.0)]);
        let ds = Dataset::from_sections("t".into(), Section::Loaded(c.clone()), Section::Absent);
        let mut controls = init_pair_controls(&ds, &cycle());
        controls.get_mut(&AtomPair::new("O", "O")).unwrap().show = false;

        assert_eq!(visible_pairs(&c, &controls), vec![&AtomPair::new("Fe", "O")]);
        assert_eq!(visible_primary_curves(&c, &controls), vec![&[3.0][..]]);
    }

    #[test]
    fn unknown_pairs_default_to_visible() {
        let c = curves(&[("Fe", "O", 3.0)]);
        assert_eq!(visible_pairs(&c, &PairControls::new()).len(), 1);
    }
}
